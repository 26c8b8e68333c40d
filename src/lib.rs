//! Todo API Server Library
//!
//! A small HTTP CRUD service for users and their todos, stored in
//! PostgreSQL or SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod server;
pub mod services;

pub use config::Config;
pub use error::{DbError, ServerError};
pub use server::HttpServer;
pub use services::AppState;
