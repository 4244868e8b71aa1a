use serde::Serialize;

use crate::identity::UserAttributes;
use crate::models::ModelRegistry;

use super::model::ModelHeader;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user: UserAttributes,
    pub models: Vec<ModelHeader>,
}

impl DashboardView {
    pub fn new(user: UserAttributes, registry: &ModelRegistry) -> Self {
        Self {
            user,
            models: registry.iter().map(ModelHeader::of).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_registered_model() {
        let user: UserAttributes = [("email", "ada@example.com")].into_iter().collect();
        let view = DashboardView::new(user, &ModelRegistry::builtin());

        let hrefs: Vec<_> = view.models.iter().map(|m| m.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/model/log", "/model/person-metadata"]);
        assert_eq!(view.models[1].icon, "user-round");
        assert_eq!(view.user.get("email"), Some("ada@example.com"));
    }
}
