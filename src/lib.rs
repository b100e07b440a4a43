pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod telemetry;
