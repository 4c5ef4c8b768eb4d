pub mod audio;
pub mod recognition;
pub mod stt;
pub mod translate;
pub mod tts;

// Re-export commonly used types for convenience
pub use audio::{
    encode, normalize, AudioDecoder, AudioError, AudioSample, NormalizationPipeline,
    NormalizedAudio, WavBuffer, WavDecoder, TARGET_SAMPLE_RATE,
};

pub use recognition::{
    default_strategies, prepare_strategy_payloads, strategies_with_timeout, AttemptOutcome,
    AudioFormatDescriptor, RecognitionAttempt, RecognitionBackend, RecognitionError,
    RecognitionOutcome, RecognitionStrategy, RecognizerSession, SessionError, SessionState,
    TranscriptionSession, STRATEGY_TIMEOUT,
};

pub use stt::{AzureSpeechClient, AzureSpeechConfig};

pub use translate::{TranslateError, TranslationBackend, TranslatorClient, TranslatorConfig};

pub use tts::{SynthesisBackend, SynthesisClient, SynthesisConfig, SynthesisError};
