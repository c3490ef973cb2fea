mod http;

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod workflow;

pub use client::{ModelService, Predictions};
pub use config::{Arguments, Config};
