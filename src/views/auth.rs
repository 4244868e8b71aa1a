use serde::{Deserialize, Serialize};

use crate::guard::routes;

/// POST body of the sign-in page
#[derive(Debug, Clone, Deserialize)]
pub struct SignInForm {
    pub email: String,
}

/// POST body of the confirmation page
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmSignInForm {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormPage {
    pub title: &'static str,
    pub action: &'static str,
    pub fields: Vec<&'static str>,
    /// Values carried over from the previous step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl FormPage {
    pub fn sign_in() -> Self {
        Self {
            title: "Sign in",
            action: routes::SIGN_IN,
            fields: vec!["email"],
            email: None,
        }
    }

    pub fn confirm_sign_in(email: impl Into<String>) -> Self {
        Self {
            title: "Check your email",
            action: routes::CONFIRM_SIGN_IN,
            fields: vec!["email", "code"],
            email: Some(email.into()),
        }
    }
}
