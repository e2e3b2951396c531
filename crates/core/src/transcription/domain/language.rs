use std::collections::HashMap;
use std::sync::OnceLock;

/// Whisper language short codes, indexed by numeric language id.
///
/// Immutable process-wide data; the id order matches the table compiled
/// into whisper.cpp, so ids passed through to the recognizer keep their
/// meaning.
const LANGUAGE_CODES: &[&str] = &[
    "en", "zh", "de", "es", "ru", "ko", "fr", "ja", "pt", "tr", // 0-9
    "pl", "ca", "nl", "ar", "sv", "it", "id", "hi", "fi", "vi", // 10-19
    "he", "uk", "el", "ms", "cs", "ro", "da", "hu", "ta", "no", // 20-29
    "th", "ur", "hr", "bg", "lt", "la", "mi", "ml", "cy", "sk", // 30-39
    "te", "fa", "lv", "bn", "sr", "az", "sl", "kn", "et", "mk", // 40-49
    "br", "eu", "is", "hy", "ne", "mn", "bs", "kk", "sq", "sw", // 50-59
    "gl", "mr", "pa", "si", "km", "sn", "yo", "so", "af", "oc", // 60-69
    "ka", "be", "tg", "sd", "gu", "am", "yi", "lo", "uz", "fo", // 70-79
    "ht", "ps", "tk", "nn", "mt", "sa", "lb", "my", "bo", "tl", // 80-89
    "mg", "as", "tt", "haw", "ln", "ha", "ba", "jw", "su", // 90-98
];

fn code_to_id() -> &'static HashMap<&'static str, i32> {
    static INDEX: OnceLock<HashMap<&'static str, i32>> = OnceLock::new();
    INDEX.get_or_init(|| {
        LANGUAGE_CODES
            .iter()
            .enumerate()
            .map(|(id, &code)| (code, id as i32))
            .collect()
    })
}

/// Highest valid language id (inclusive).
pub fn max_id() -> i32 {
    LANGUAGE_CODES.len() as i32 - 1
}

/// Canonical short code for a language id, `None` when out of range.
pub fn code_for_id(id: i32) -> Option<&'static str> {
    usize::try_from(id)
        .ok()
        .and_then(|i| LANGUAGE_CODES.get(i).copied())
}

/// Numeric id for a language short code, `None` when unrecognized.
pub fn id_for_code(code: &str) -> Option<i32> {
    code_to_id().get(code).copied()
}

/// All `(id, code)` pairs in id order.
pub fn all() -> impl Iterator<Item = (i32, &'static str)> {
    LANGUAGE_CODES
        .iter()
        .enumerate()
        .map(|(id, &code)| (id as i32, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(LANGUAGE_CODES.len(), 99);
        assert_eq!(max_id(), 98);
    }

    #[test]
    fn test_known_ids() {
        assert_eq!(code_for_id(0), Some("en"));
        assert_eq!(code_for_id(1), Some("zh"));
        assert_eq!(code_for_id(6), Some("fr"));
        assert_eq!(code_for_id(98), Some("su"));
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(id_for_code("en"), Some(0));
        assert_eq!(id_for_code("de"), Some(2));
        assert_eq!(id_for_code("haw"), Some(93));
    }

    #[test]
    fn test_round_trip_law_holds_for_every_id() {
        for id in 0..=max_id() {
            let code = code_for_id(id).expect("id in range must have a code");
            assert_eq!(id_for_code(code), Some(id), "round trip failed for {code}");
        }
    }

    #[test]
    fn test_out_of_range_id_returns_none() {
        assert_eq!(code_for_id(-1), None);
        assert_eq!(code_for_id(max_id() + 1), None);
    }

    #[test]
    fn test_unknown_code_returns_none() {
        assert_eq!(id_for_code("not-a-real-code"), None);
        assert_eq!(id_for_code(""), None);
        // Codes are lowercase; lookup is exact
        assert_eq!(id_for_code("EN"), None);
    }

    #[test]
    fn test_codes_are_unique() {
        let ids: std::collections::HashSet<_> = all().map(|(_, code)| code).collect();
        assert_eq!(ids.len(), LANGUAGE_CODES.len());
    }
}
