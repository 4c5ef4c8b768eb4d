//! Azure Speech-to-Text REST client.
//!
//! Implements the recognition backend contract over the short-audio REST
//! endpoint (`{region}.stt.speech.microsoft.com`). One HTTP request per
//! recognizer session; the strategy's format descriptor selects the
//! Content-Type the audio is submitted under.

mod client;
mod config;
mod messages;


pub use client::AzureSpeechClient;
pub use config::AzureSpeechConfig;
pub use messages::SpeechRecognitionResponse;
