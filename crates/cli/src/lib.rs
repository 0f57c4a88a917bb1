//! Command line client for the holiday tracker API.

pub mod cache;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod forms;
pub mod prompt;
pub mod session;
pub mod view;
