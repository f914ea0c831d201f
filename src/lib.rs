//! Library entrypoint for MandiWatch.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can build the app state and routers against any store).

use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod models;
pub mod schema;

pub mod services;

pub mod controllers;
pub mod routes;

use services::AlertStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AlertStore>,
    pub settings: config::Settings,
}

impl AppState {
    pub fn new(store: impl AlertStore + 'static, settings: config::Settings) -> Self {
        Self {
            store: Arc::new(store),
            settings,
        }
    }
}
