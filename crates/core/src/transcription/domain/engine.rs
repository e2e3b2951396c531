use super::error::TranscriptionError;
use super::params::DecodeParams;
use super::segment::TranscriptSegment;

/// Domain interface for a loaded speech-to-text engine.
///
/// An implementation owns a loaded model and its decoding state. Loading
/// happens at construction and release at drop, so a live value is always
/// in the Loaded state and a released engine cannot be referenced again.
///
/// `transcribe` blocks until inference completes and replaces the result
/// buffer of the previous call; segment accessors read that buffer.
/// Implementations are not required to tolerate concurrent calls on one
/// value; run independent engines on independent threads for parallelism.
pub trait SpeechEngine: Send {
    /// Whether the engine holds a structurally valid model. True for any
    /// live production engine; test doubles may model an unloaded state.
    fn is_loaded(&self) -> bool;

    /// Run inference over mono 16 kHz samples, returning the number of
    /// segments produced. Zero means no speech was detected.
    fn transcribe(
        &mut self,
        params: &DecodeParams,
        samples: &[f32],
    ) -> Result<usize, TranscriptionError>;

    /// Segments produced by the most recent `transcribe` call, in
    /// chronological order.
    fn segments(&self) -> &[TranscriptSegment];

    fn segment_count(&self) -> usize {
        self.segments().len()
    }

    /// Bounds-checked access to one segment of the latest result.
    fn segment(&self, index: usize) -> Result<&TranscriptSegment, TranscriptionError> {
        self.segments()
            .get(index)
            .ok_or(TranscriptionError::SegmentOutOfRange {
                index,
                count: self.segments().len(),
            })
    }
}
