pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod stores;
pub mod views;

pub use app::{app, AppState};
