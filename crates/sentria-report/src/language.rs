// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language normalization for crisis inputs.
//!
//! Callers submit the language as a display string (Arabic or English, in
//! either script); the generator is instructed with the two-letter code.
//! Unrecognized values pass through verbatim so the generator can apply its
//! own fallback (formal Arabic, else English).

use sentria_core::CrisisInput;

/// Maps a caller-supplied language value to `ar`/`en`.
///
/// Returns `None` for values that are not recognized; those are forwarded
/// unchanged.
pub fn normalize_language_code(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "العربية" | "arabic" | "ar" => Some("ar"),
        "الإنجليزية" | "english" | "en" => Some("en"),
        _ => None,
    }
}

/// Normalizes the `language` field of a crisis input in place.
pub fn normalize_input_language(input: &mut CrisisInput) {
    if let Some(language) = &input.language
        && let Some(code) = normalize_language_code(language)
    {
        input.language = Some(code.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_variants_map_to_ar() {
        assert_eq!(normalize_language_code("العربية"), Some("ar"));
        assert_eq!(normalize_language_code("arabic"), Some("ar"));
        assert_eq!(normalize_language_code("Arabic"), Some("ar"));
        assert_eq!(normalize_language_code("ar"), Some("ar"));
        assert_eq!(normalize_language_code("  AR "), Some("ar"));
    }

    #[test]
    fn english_variants_map_to_en() {
        assert_eq!(normalize_language_code("الإنجليزية"), Some("en"));
        assert_eq!(normalize_language_code("english"), Some("en"));
        assert_eq!(normalize_language_code("EN"), Some("en"));
    }

    #[test]
    fn unrecognized_values_pass_through() {
        assert_eq!(normalize_language_code("french"), None);
        assert_eq!(normalize_language_code(""), None);

        let mut input = CrisisInput {
            language: Some("français".to_string()),
            ..Default::default()
        };
        normalize_input_language(&mut input);
        assert_eq!(input.language.as_deref(), Some("français"));
    }

    #[test]
    fn input_language_is_rewritten_in_place() {
        let mut input = CrisisInput {
            language: Some("العربية".to_string()),
            ..Default::default()
        };
        normalize_input_language(&mut input);
        assert_eq!(input.language.as_deref(), Some("ar"));
    }

    #[test]
    fn absent_language_is_untouched() {
        let mut input = CrisisInput::default();
        normalize_input_language(&mut input);
        assert!(input.language.is_none());
    }
}
