pub mod client;

pub use client::{alert_endpoint, AlertClient};
