pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod handlers;
pub mod health;
pub mod record;
pub mod report;
pub mod telemetry;
pub mod youtube;
