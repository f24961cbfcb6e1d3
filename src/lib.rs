pub mod a11y;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod entities;
pub mod health;
pub mod links;
pub mod moderation;
pub mod notifications;
pub mod repositories;
pub mod routes;
pub mod telemetry;
