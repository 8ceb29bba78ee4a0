//! HTTP API backing a trivia game: categories, paginated questions, search
//! and a quiz endpoint, stored in SQLite.

pub mod db;
pub mod server;
pub mod service;
pub mod settings;
pub mod telemetry;
