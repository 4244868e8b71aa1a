//! JSON view models for the dashboard pages. Nothing in here branches on a
//! model key; everything type-specific comes from the model definition.

pub mod auth;
pub mod dashboard;
pub mod format;
pub mod model;

pub use auth::{ConfirmSignInForm, FormPage, SignInForm};
pub use dashboard::DashboardView;
pub use format::DisplayZone;
pub use model::{ModelDetailView, ModelListView, ModelView};
