pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod types;
pub mod upstream;
pub mod views;

pub use app::{app, AppState};

#[cfg(test)]
pub mod testing;
