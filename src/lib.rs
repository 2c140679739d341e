pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod models;
pub mod persist;
pub mod presentation;
pub mod session;
