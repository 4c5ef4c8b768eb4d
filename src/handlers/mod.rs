//! HTTP request handlers
//!
//! This module organizes the API handlers into logical groups:
//! - `api` - Health check endpoint
//! - `transcribe` - Speech-to-text with tiered format fallback
//! - `translate` - Text translation
//! - `synthesize` - Speech synthesis

pub mod api;
pub mod synthesize;
pub mod transcribe;
pub mod translate;
