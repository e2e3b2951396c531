use std::thread;

use crate::shared::constants::STREAM_CHUNK_SAMPLES;
use crate::transcription::domain::engine::SpeechEngine;
use crate::transcription::domain::error::TranscriptionError;
use crate::transcription::domain::params::DecodeParams;

const CHANNEL_CAPACITY: usize = 8;

/// Callback invoked with the accumulated transcript after each decoded
/// chunk.
pub type PartialFn = Box<dyn Fn(&str) + Send>;

/// Incremental dictation over a live sample feed.
///
/// The engine moves into a worker thread that buffers incoming samples,
/// decodes one-second chunks (single-segment, no cross-chunk context),
/// and reports growing partial text. `finish` closes the feed, drains the
/// remainder, and returns the final transcript.
///
/// The caller thread never blocks on inference; backpressure is the
/// bounded sample channel. There is no mid-chunk cancellation: dropping
/// the stream stops feeding, and the worker finishes its current decode
/// before exiting.
pub struct DictationStream {
    sample_tx: crossbeam_channel::Sender<Vec<f32>>,
    worker: thread::JoinHandle<Result<String, TranscriptionError>>,
}

impl DictationStream {
    /// Start dictating with a loaded engine. The params are adjusted for
    /// chunked decoding (one segment per chunk, context discarded between
    /// chunks) the way the interactive dictation path always runs.
    pub fn start(
        engine: Box<dyn SpeechEngine>,
        params: DecodeParams,
        on_partial: PartialFn,
    ) -> Result<Self, TranscriptionError> {
        if !engine.is_loaded() {
            return Err(TranscriptionError::ModelLoad(
                "cannot start dictation without a loaded model".to_string(),
            ));
        }

        let mut chunk_params = params;
        chunk_params.single_segment = true;
        chunk_params.no_context = true;

        let (sample_tx, sample_rx) = crossbeam_channel::bounded::<Vec<f32>>(CHANNEL_CAPACITY);
        let worker = thread::spawn(move || run_worker(engine, chunk_params, sample_rx, on_partial));

        Ok(Self { sample_tx, worker })
    }

    /// Feed captured samples (mono 16 kHz). Blocks only when the worker
    /// is more than a few chunks behind. Samples fed after the worker has
    /// failed are discarded; the failure surfaces from `finish`.
    pub fn feed(&self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }
        let _ = self.sample_tx.send(samples.to_vec());
    }

    /// Close the feed, wait for the worker to drain buffered audio, and
    /// return the final transcript. Consumes the stream; the engine is
    /// released with the worker.
    pub fn finish(self) -> Result<String, TranscriptionError> {
        drop(self.sample_tx);
        self.worker
            .join()
            .map_err(|_| TranscriptionError::Inference("dictation worker panicked".to_string()))?
    }
}

fn run_worker(
    mut engine: Box<dyn SpeechEngine>,
    params: DecodeParams,
    sample_rx: crossbeam_channel::Receiver<Vec<f32>>,
    on_partial: PartialFn,
) -> Result<String, TranscriptionError> {
    let mut pending: Vec<f32> = Vec::new();
    let mut transcript = String::new();

    for batch in sample_rx {
        pending.extend_from_slice(&batch);
        while pending.len() >= STREAM_CHUNK_SAMPLES {
            let chunk: Vec<f32> = pending.drain(..STREAM_CHUNK_SAMPLES).collect();
            decode_chunk(&mut *engine, &params, &chunk, &mut transcript, &on_partial)?;
        }
    }

    // Drain the tail. Whisper rejects sub-second input, so pad the last
    // chunk with silence up to the chunk size.
    if !pending.is_empty() {
        pending.resize(STREAM_CHUNK_SAMPLES.max(pending.len()), 0.0);
        let tail = std::mem::take(&mut pending);
        decode_chunk(&mut *engine, &params, &tail, &mut transcript, &on_partial)?;
    }

    Ok(transcript)
}

fn decode_chunk(
    engine: &mut dyn SpeechEngine,
    params: &DecodeParams,
    chunk: &[f32],
    transcript: &mut String,
    on_partial: &PartialFn,
) -> Result<(), TranscriptionError> {
    engine.transcribe(params, chunk)?;

    let mut chunk_text = String::new();
    for segment in engine.segments() {
        if !chunk_text.is_empty() {
            chunk_text.push(' ');
        }
        chunk_text.push_str(segment.text.trim());
    }

    if chunk_text.is_empty() {
        return Ok(());
    }

    if !transcript.is_empty() {
        transcript.push(' ');
    }
    transcript.push_str(&chunk_text);
    on_partial(transcript);
    Ok(())
}
