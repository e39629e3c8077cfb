pub mod alerts;
pub mod auth;
pub mod config;
pub mod http;
pub mod oauth;
pub mod repositories;
pub mod tls;
