use thiserror::Error;

/// Failures surfaced by the transcription layer.
///
/// The wrapped C API reports failure through sentinels (null context,
/// negative segment count); those are converted to explicit variants here.
/// Out-of-range segment access, undefined behavior at the C boundary,
/// becomes `SegmentOutOfRange`.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("invalid audio input: {0}")]
    InvalidAudio(String),

    #[error("segment index {index} out of range (segment count {count})")]
    SegmentOutOfRange { index: usize, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
