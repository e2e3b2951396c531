//! Speech-to-text transcription library around whisper.cpp.
//!
//! Layout follows a hexagonal split per area: `domain` holds pure types
//! and trait seams, `infrastructure` binds the real crates (whisper-rs,
//! symphonia, reqwest). `pipeline` orchestrates the two entry points:
//! whole-file transcription and incremental dictation.

pub mod audio;
pub mod pipeline;
pub mod shared;
pub mod transcription;

pub use audio::domain::audio_segment::AudioSegment;
pub use pipeline::dictation_stream::DictationStream;
pub use transcription::domain::engine::SpeechEngine;
pub use transcription::domain::error::TranscriptionError;
pub use transcription::domain::params::{DecodeParams, DecodeStrategy};
pub use transcription::domain::segment::TranscriptSegment;
pub use transcription::infrastructure::whisper_engine::WhisperEngine;
