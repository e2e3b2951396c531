use std::path::Path;

use crate::audio::domain::audio_reader::AudioReader;
use crate::transcription::domain::engine::SpeechEngine;
use crate::transcription::domain::error::TranscriptionError;
use crate::transcription::domain::params::DecodeParams;
use crate::transcription::domain::segment::TranscriptSegment;

/// Reads an audio file and runs one blocking transcription pass over it.
pub struct TranscribeFileUseCase {
    reader: Box<dyn AudioReader>,
    engine: Box<dyn SpeechEngine>,
    params: DecodeParams,
}

impl TranscribeFileUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        engine: Box<dyn SpeechEngine>,
        params: DecodeParams,
    ) -> Self {
        Self {
            reader,
            engine,
            params,
        }
    }

    /// Transcribe `source` and return the ordered segments.
    ///
    /// An empty decoded file yields an empty result without touching the
    /// engine; everything else is one `transcribe` call whose segments are
    /// copied out before the next call can overwrite them.
    pub fn run(&mut self, source: &Path) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let audio = self.reader.read(source)?;
        if audio.is_empty() {
            log::warn!("{} decoded to zero samples, skipping", source.display());
            return Ok(Vec::new());
        }

        let count = self.engine.transcribe(&self.params, audio.samples())?;
        log::info!(
            "transcribed {} ({:.2}s) into {count} segments",
            source.display(),
            audio.duration()
        );
        Ok(self.engine.segments().to_vec())
    }
}
