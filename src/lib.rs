pub mod config;
pub mod db;
pub mod error;
pub mod log;
pub mod server;
pub mod span;
pub mod templates;
pub mod urls;
pub mod views;
