//! Payment-request URLs for the commerce SDK.
//!
//! Builds and parses `solana:` transfer-request URLs so a checkout page
//! can hand a wallet everything it needs to pay: recipient, amount, token
//! mint, references, and display text. Rendering a URL as a QR code is the
//! presentation layer's concern and is not done here.

pub mod error;
pub mod request;

// Re-export key public types for ergonomic imports.
pub use error::PayError;
pub use request::PaymentRequest;
