use std::path::{Path, PathBuf};

use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState,
};

use crate::transcription::domain::engine::SpeechEngine;
use crate::transcription::domain::error::TranscriptionError;
use crate::transcription::domain::language;
use crate::transcription::domain::params::{DecodeParams, DecodeStrategy};
use crate::transcription::domain::segment::TranscriptSegment;

/// Speech engine backed by whisper.cpp via whisper-rs.
///
/// The value owns the loaded model context and decoding state: loading
/// happens in [`WhisperEngine::load`], release happens on drop. The
/// sentinel-based C lifecycle (null context, manual free, double-free
/// hazards) stays inside whisper-rs; this type only ever exists in the
/// Loaded state.
///
/// Not internally synchronized. One engine serves one thread; spin up
/// independent engines for parallel transcription.
pub struct WhisperEngine {
    model_path: PathBuf,
    // Keeps the model weights alive for as long as the decoding state
    _ctx: WhisperContext,
    state: WhisperState,
    segments: Vec<TranscriptSegment>,
}

impl WhisperEngine {
    /// Load a ggml model file and allocate decoding state.
    ///
    /// Fails with [`TranscriptionError::ModelLoad`] when the path does not
    /// exist or the file is not a recognized model format. Memory usage is
    /// proportional to model size.
    pub fn load(model_path: &Path) -> Result<Self, TranscriptionError> {
        if !model_path.exists() {
            return Err(TranscriptionError::ModelLoad(format!(
                "model not found at: {}",
                model_path.display()
            )));
        }

        let path_str = model_path.to_str().ok_or_else(|| {
            TranscriptionError::ModelLoad(format!(
                "model path is not valid UTF-8: {}",
                model_path.display()
            ))
        })?;

        log::info!("loading whisper model from {}", model_path.display());
        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| TranscriptionError::ModelLoad(format!("failed to load model: {e}")))?;

        let state = ctx
            .create_state()
            .map_err(|e| TranscriptionError::ModelLoad(format!("failed to create state: {e}")))?;

        Ok(Self {
            model_path: model_path.to_path_buf(),
            _ctx: ctx,
            state,
            segments: Vec::new(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn build_full_params<'a>(
        &self,
        params: &'a DecodeParams,
    ) -> Result<FullParams<'a, 'a>, TranscriptionError> {
        if let Some(code) = params.language.as_deref() {
            if language::id_for_code(code).is_none() {
                return Err(TranscriptionError::Inference(format!(
                    "unknown language code: {code}"
                )));
            }
        }

        let strategy = match params.strategy {
            DecodeStrategy::Greedy => SamplingStrategy::Greedy {
                best_of: params.best_of,
            },
            DecodeStrategy::BeamSearch => SamplingStrategy::BeamSearch {
                beam_size: params.beam_size,
                patience: params.patience,
            },
        };

        let mut fp = FullParams::new(strategy);
        // None selects whisper's language auto-detection
        fp.set_language(params.language.as_deref());
        fp.set_translate(params.translate);
        fp.set_no_context(params.no_context);
        fp.set_single_segment(params.single_segment);
        fp.set_token_timestamps(params.token_timestamps);
        fp.set_temperature(params.temperature);
        fp.set_n_threads(params.threads.max(1));
        fp.set_print_special(false);
        fp.set_print_progress(false);
        fp.set_print_realtime(false);
        fp.set_print_timestamps(false);
        Ok(fp)
    }

    /// Rebuild the segment buffer from the decoder state after a full pass.
    fn collect_segments(&mut self) {
        self.segments.clear();
        let num_segments = self.state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match self.state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let mut text = String::new();
            let mut start_cs = i64::MAX;
            let mut end_cs = i64::MIN;

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let tok_text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens ([_BEG_], [_SOT_], <|endoftext|>, ...)
                let trimmed = tok_text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                text.push_str(tok_text);

                // Token timestamps are in centiseconds; negative means
                // the decoder didn't assign one
                let data = token.token_data();
                if data.t0 >= 0 {
                    start_cs = start_cs.min(data.t0);
                }
                if data.t1 >= 0 {
                    end_cs = end_cs.max(data.t1);
                }
            }

            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }
            if start_cs == i64::MAX {
                start_cs = 0;
            }
            if end_cs == i64::MIN {
                end_cs = start_cs;
            }

            self.segments
                .push(TranscriptSegment::new(text, start_cs, end_cs));
        }
    }
}

impl SpeechEngine for WhisperEngine {
    fn is_loaded(&self) -> bool {
        // Construction is loading; a live value always holds a valid context
        true
    }

    fn transcribe(
        &mut self,
        params: &DecodeParams,
        samples: &[f32],
    ) -> Result<usize, TranscriptionError> {
        if samples.is_empty() {
            return Err(TranscriptionError::InvalidAudio(
                "empty sample buffer".to_string(),
            ));
        }

        let fp = self.build_full_params(params)?;

        log::debug!(
            "running whisper inference over {} samples ({:?})",
            samples.len(),
            params.strategy
        );
        self.state
            .full(fp, samples)
            .map_err(|e| TranscriptionError::Inference(format!("whisper decode failed: {e}")))?;

        self.collect_segments();
        Ok(self.segments.len())
    }

    fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }
}

impl std::fmt::Debug for WhisperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperEngine")
            .field("model_path", &self.model_path)
            .field("segments", &self.segments.len())
            .finish()
    }
}
