pub mod dto;
pub mod error;

pub use dto::{TokenGrant, TokenResponse};
pub use error::TokenError;
