use std::path::PathBuf;
use std::process;

use clap::Parser;

use dictate_core::audio::infrastructure::symphonia_reader::SymphoniaReader;
use dictate_core::pipeline::transcribe_file_use_case::TranscribeFileUseCase;
use dictate_core::shared::model_resolver;
use dictate_core::transcription::domain::language;
use dictate_core::transcription::infrastructure::system_info::system_info;
use dictate_core::{DecodeParams, DecodeStrategy, TranscriptSegment, WhisperEngine};

/// Speech-to-text transcription for audio files.
#[derive(Parser)]
#[command(name = "dictate")]
struct Cli {
    /// Input audio file (wav, flac, or mp3).
    input: Option<PathBuf>,

    /// Path to a ggml model file. The tiny English model is fetched into
    /// the user cache when omitted.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Decoding strategy: greedy or beam-search.
    #[arg(long, default_value = "greedy")]
    strategy: String,

    /// Language short code (e.g. en, de), or "auto" to detect.
    #[arg(long, default_value = "en")]
    language: String,

    /// Translate the transcript to English.
    #[arg(long)]
    translate: bool,

    /// Decoder threads (defaults to available cores, capped at 4).
    #[arg(long)]
    threads: Option<i32>,

    /// List supported languages and exit.
    #[arg(long)]
    list_languages: bool,

    /// Print build/runtime capabilities and exit.
    #[arg(long)]
    system_info: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.system_info {
        println!("{}", system_info());
        return Ok(());
    }

    if cli.list_languages {
        for (id, code) in language::all() {
            println!("{id:>3}  {code}");
        }
        return Ok(());
    }

    let input = cli
        .input
        .clone()
        .ok_or("no input file given (see --help for usage)")?;

    let params = build_params(&cli)?;
    let model_path = resolve_model(cli.model)?;
    log::info!("using model at {}", model_path.display());
    let engine = WhisperEngine::load(&model_path)?;

    let mut use_case = TranscribeFileUseCase::new(
        Box::new(SymphoniaReader::default()),
        Box::new(engine),
        params,
    );
    let segments = use_case.run(&input)?;

    if segments.is_empty() {
        eprintln!("(no speech detected)");
        return Ok(());
    }
    for segment in &segments {
        println!("{}", render_segment(segment));
    }
    Ok(())
}

fn build_params(cli: &Cli) -> Result<DecodeParams, Box<dyn std::error::Error>> {
    let strategy: DecodeStrategy = cli.strategy.parse()?;
    let mut params = DecodeParams::default_for(strategy);

    params.language = if cli.language == "auto" {
        None
    } else {
        if language::id_for_code(&cli.language).is_none() {
            return Err(format!("unsupported language code: {}", cli.language).into());
        }
        Some(cli.language.clone())
    };
    params.translate = cli.translate;
    if let Some(threads) = cli.threads {
        if threads < 1 {
            return Err("--threads must be at least 1".into());
        }
        params.threads = threads;
    }
    Ok(params)
}

fn resolve_model(model: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match model {
        Some(path) => Ok(path),
        None => {
            let progress: model_resolver::ProgressFn = Box::new(|downloaded, total| {
                if total > 0 {
                    eprint!("\rDownloading model: {}%", downloaded * 100 / total);
                } else {
                    eprint!("\rDownloading model: {downloaded} bytes");
                }
            });
            let path = model_resolver::resolve_default(Some(progress))?;
            eprintln!();
            Ok(path)
        }
    }
}

fn render_segment(segment: &TranscriptSegment) -> String {
    format!(
        "[{} --> {}] {}",
        format_timestamp(segment.start_cs),
        format_timestamp(segment.end_cs),
        segment.text
    )
}

/// Centiseconds to `HH:MM:SS.mmm`.
fn format_timestamp(cs: i64) -> String {
    let total_ms = cs.max(0) * 10;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_zero() {
        assert_eq!(format_timestamp(0), "00:00:00.000");
    }

    #[test]
    fn test_format_timestamp_full_units() {
        // 1h 2m 3s 450ms = 372345 cs
        assert_eq!(format_timestamp(372_345), "01:02:03.450");
    }

    #[test]
    fn test_format_timestamp_clamps_negative() {
        assert_eq!(format_timestamp(-50), "00:00:00.000");
    }

    #[test]
    fn test_render_segment() {
        let seg = TranscriptSegment::new("hello world", 150, 320);
        assert_eq!(
            render_segment(&seg),
            "[00:00:01.500 --> 00:00:03.200] hello world"
        );
    }
}
