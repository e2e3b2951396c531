use std::sync::OnceLock;

/// Build/runtime capability summary, assembled once and stable for the
/// process lifetime.
///
/// Reports the compile target and the SIMD features the binary was built
/// with, in the pipe-separated style of whisper.cpp's own system info
/// line, plus the parallelism available to decoding threads.
pub fn system_info() -> &'static str {
    static INFO: OnceLock<String> = OnceLock::new();
    INFO.get_or_init(|| {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        format!(
            "arch = {} | os = {} | threads = {} | AVX = {} | AVX2 = {} | SSE4.1 = {} | NEON = {} | F16C = {} | FMA = {}",
            std::env::consts::ARCH,
            std::env::consts::OS,
            threads,
            flag(cfg!(target_feature = "avx")),
            flag(cfg!(target_feature = "avx2")),
            flag(cfg!(target_feature = "sse4.1")),
            flag(cfg!(target_feature = "neon")),
            flag(cfg!(target_feature = "f16c")),
            flag(cfg!(target_feature = "fma")),
        )
    })
}

fn flag(enabled: bool) -> u8 {
    u8::from(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_info_is_nonempty() {
        assert!(!system_info().is_empty());
    }

    #[test]
    fn test_system_info_is_stable_across_calls() {
        let a = system_info();
        let b = system_info();
        assert_eq!(a, b);
        // Same allocation, not just equal text
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_system_info_reports_target() {
        let info = system_info();
        assert!(info.contains(std::env::consts::ARCH));
        assert!(info.contains("threads = "));
    }
}
