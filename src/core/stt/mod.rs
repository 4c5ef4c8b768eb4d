//! Speech-to-text backend clients.

pub mod azure;

pub use azure::{AzureSpeechClient, AzureSpeechConfig};
