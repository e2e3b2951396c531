use std::path::Path;

use super::audio_segment::AudioSegment;
use crate::transcription::domain::error::TranscriptionError;

/// Domain interface for turning an audio file into recognizer-ready PCM.
///
/// Implementations decode, downmix to mono, and resample to the rate the
/// model expects.
pub trait AudioReader: Send {
    fn read(&self, path: &Path) -> Result<AudioSegment, TranscriptionError>;
}
