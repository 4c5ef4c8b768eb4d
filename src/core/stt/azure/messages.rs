//! Wire types for the Azure Speech short-audio REST API.
//!
//! API Reference:
//! https://learn.microsoft.com/azure/ai-services/speech-service/rest-speech-to-text-short

use serde::Deserialize;

use crate::core::recognition::RecognitionOutcome;

/// Recognition response in `format=simple` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechRecognitionResponse {
    /// Terminal status: `Success`, `NoMatch`, `InitialSilenceTimeout`,
    /// `BabbleTimeout`, or `Error`.
    #[serde(rename = "RecognitionStatus")]
    pub recognition_status: String,

    /// Display-form transcript, present on `Success`.
    #[serde(rename = "DisplayText", default)]
    pub display_text: Option<String>,

    /// Offset of the recognized audio in 100 ns ticks.
    #[serde(rename = "Offset", default)]
    pub offset: Option<u64>,

    /// Duration of the recognized audio in 100 ns ticks.
    #[serde(rename = "Duration", default)]
    pub duration: Option<u64>,
}

impl SpeechRecognitionResponse {
    /// Map the service status onto the backend outcome contract.
    pub fn into_outcome(self) -> RecognitionOutcome {
        match self.recognition_status.as_str() {
            "Success" => RecognitionOutcome::Recognized {
                text: self.display_text.unwrap_or_default(),
            },
            "NoMatch" | "InitialSilenceTimeout" | "BabbleTimeout" => RecognitionOutcome::NoMatch,
            status => RecognitionOutcome::Error {
                details: format!("recognition ended with status {status}"),
            },
        }
    }
}
