pub const WHISPER_MODEL_FILENAME: &str = "ggml-tiny.en.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin";

/// Whisper models expect mono PCM at this rate.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Segment timestamps are expressed in centiseconds (10 ms units).
pub const CENTISECONDS_PER_SECOND: i64 = 100;

/// Samples buffered before the dictation stream runs a decode pass
/// (1 second at 16 kHz).
pub const STREAM_CHUNK_SAMPLES: usize = 16000;

pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3"];
