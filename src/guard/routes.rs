use crate::models::RecordKey;

pub const ROOT: &str = "/";
pub const SIGN_IN: &str = "/sign-in";
pub const CONFIRM_SIGN_IN: &str = "/confirm-sign-in-with-email-code";
pub const DASHBOARD: &str = "/dashboard";

/// Landing page for a signed-in user
pub const LANDING: &str = DASHBOARD;

/// Pages reachable without a session
pub const PUBLIC_PATHS: &[&str] = &[SIGN_IN, CONFIRM_SIGN_IN];

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

pub fn model_href(key: &str) -> String {
    format!("/model/{}", key)
}

/// Record API address of one stored record
pub fn record_api_href(key: &str, record: &RecordKey) -> String {
    format!("/api/models/{}/{}/{}", key, record.partition_id, record.sort_id)
}

/// Page a path resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    SignIn,
    ConfirmSignIn,
    Dashboard,
    /// Generic model screen; `record` set for the detail page
    Model { key: String, record: Option<RecordKey> },
    Unknown,
}

impl Route {
    pub fn resolve(path: &str) -> Self {
        match path {
            ROOT => return Route::Root,
            SIGN_IN => return Route::SignIn,
            CONFIRM_SIGN_IN => return Route::ConfirmSignIn,
            DASHBOARD => return Route::Dashboard,
            _ => {}
        }

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Route::Unknown;
        }

        match segments.as_slice() {
            [key] | ["model", key] => Route::Model { key: key.to_string(), record: None },
            ["model", key, partition_id, record_id] => Route::Model {
                key: key.to_string(),
                record: Some(RecordKey::new(*partition_id, *record_id)),
            },
            _ => Route::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(key: &str) -> Route {
        Route::Model { key: key.into(), record: None }
    }

    #[test]
    fn test_fixed_routes() {
        assert_eq!(Route::resolve("/"), Route::Root);
        assert_eq!(Route::resolve("/sign-in"), Route::SignIn);
        assert_eq!(Route::resolve("/confirm-sign-in-with-email-code"), Route::ConfirmSignIn);
        assert_eq!(Route::resolve("/dashboard"), Route::Dashboard);
    }

    #[test]
    fn test_model_routes() {
        assert_eq!(Route::resolve("/person-metadata"), model("person-metadata"));
        assert_eq!(Route::resolve("/model/log"), model("log"));
        assert_eq!(
            Route::resolve("/model/log/job-1/log-1"),
            Route::Model { key: "log".into(), record: Some(RecordKey::new("job-1", "log-1")) }
        );
        // a bare `/model` is just a key like any other
        assert_eq!(Route::resolve("/model"), model("model"));
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(Route::resolve("/a/b"), Route::Unknown);
        assert_eq!(Route::resolve("/model/log/"), Route::Unknown);
        assert_eq!(Route::resolve("//"), Route::Unknown);
    }

    #[test]
    fn test_record_api_href() {
        assert_eq!(record_api_href("log", &RecordKey::new("job-1", "log-1")), "/api/models/log/job-1/log-1");
    }

    #[test]
    fn test_public_paths() {
        assert!(is_public("/sign-in"));
        assert!(is_public("/confirm-sign-in-with-email-code"));
        assert!(!is_public("/"));
        assert!(!is_public("/dashboard"));
    }
}
