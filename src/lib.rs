//! Jobboard-RS Library
//!
//! Job posting and follow-relationship services over a document store.

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
