use std::str::FromStr;

/// Decoding algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStrategy {
    Greedy,
    BeamSearch,
}

impl FromStr for DecodeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(DecodeStrategy::Greedy),
            "beam" | "beam-search" => Ok(DecodeStrategy::BeamSearch),
            other => Err(format!("unknown decode strategy: {other}")),
        }
    }
}

/// Value-type decoding configuration, passed by reference into each
/// transcription call. Carries no ownership of engine state.
///
/// `default_for` returns a fully populated configuration that is usable
/// directly, mirroring `whisper_full_default_params`.
#[derive(Clone, Debug)]
pub struct DecodeParams {
    pub strategy: DecodeStrategy,
    /// Candidates kept per step under greedy decoding.
    pub best_of: i32,
    /// Beam width under beam-search decoding.
    pub beam_size: i32,
    /// Beam-search patience factor; negative means the library default.
    pub patience: f32,
    pub threads: i32,
    pub temperature: f32,
    /// Language short code; `None` requests auto-detection.
    pub language: Option<String>,
    pub translate: bool,
    /// Discard decoder context between calls. Keeps chunked dictation
    /// from hallucinating continuations of the previous chunk.
    pub no_context: bool,
    /// Force all output into a single segment.
    pub single_segment: bool,
    pub token_timestamps: bool,
}

impl DecodeParams {
    /// Library defaults for the given strategy (whisper.cpp's published
    /// defaults: best-of 5, beam size 5, temperature 0).
    pub fn default_for(strategy: DecodeStrategy) -> Self {
        Self {
            strategy,
            best_of: 5,
            beam_size: 5,
            patience: -1.0,
            threads: default_threads(),
            temperature: 0.0,
            language: Some("en".to_string()),
            translate: false,
            no_context: true,
            single_segment: false,
            token_timestamps: true,
        }
    }

    pub fn greedy() -> Self {
        Self::default_for(DecodeStrategy::Greedy)
    }

    pub fn beam_search() -> Self {
        Self::default_for(DecodeStrategy::BeamSearch)
    }
}

fn default_threads() -> i32 {
    let n = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    n.min(4) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DecodeStrategy::Greedy)]
    #[case(DecodeStrategy::BeamSearch)]
    fn test_default_params_fully_populated(#[case] strategy: DecodeStrategy) {
        let p = DecodeParams::default_for(strategy);
        assert_eq!(p.strategy, strategy);
        assert!(p.threads >= 1);
        assert!(p.best_of > 0);
        assert!(p.beam_size > 0);
        assert_eq!(p.temperature, 0.0);
        assert_eq!(p.language.as_deref(), Some("en"));
        assert!(!p.translate);
        assert!(p.no_context);
    }

    #[rstest]
    #[case("greedy", DecodeStrategy::Greedy)]
    #[case("beam", DecodeStrategy::BeamSearch)]
    #[case("beam-search", DecodeStrategy::BeamSearch)]
    #[case("GREEDY", DecodeStrategy::Greedy)]
    fn test_strategy_from_str(#[case] input: &str, #[case] expected: DecodeStrategy) {
        assert_eq!(input.parse::<DecodeStrategy>().unwrap(), expected);
    }

    #[test]
    fn test_strategy_from_str_rejects_unknown() {
        assert!("viterbi".parse::<DecodeStrategy>().is_err());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(DecodeParams::greedy().strategy, DecodeStrategy::Greedy);
        assert_eq!(
            DecodeParams::beam_search().strategy,
            DecodeStrategy::BeamSearch
        );
    }
}
