use crate::shared::constants::CENTISECONDS_PER_SECOND;

/// One unit of transcribed speech: a text span with start/end timestamps
/// in centiseconds from the beginning of the audio.
///
/// Segments are chronologically ordered and valid until the next
/// transcription pass on the same engine replaces them.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    pub start_cs: i64,
    pub end_cs: i64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start_cs: i64, end_cs: i64) -> Self {
        Self {
            text: text.into(),
            start_cs,
            end_cs,
        }
    }

    pub fn start_secs(&self) -> f64 {
        self.start_cs as f64 / CENTISECONDS_PER_SECOND as f64
    }

    pub fn end_secs(&self) -> f64 {
        self.end_cs as f64 / CENTISECONDS_PER_SECOND as f64
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_secs() - self.start_secs()
    }
}
