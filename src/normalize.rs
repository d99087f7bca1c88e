//! Query and token normalization.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for matching: lowercase, strip diacritics, trim.
///
/// This lets numeric and accented spellings compare equal:
/// - "Circuito Poniente" → "circuito poniente"
/// - "Periférico" → "periferico"
/// - "  RUTA 12 " → "ruta 12"
///
/// # Algorithm
///
/// 1. Lowercase
/// 2. NFD normalize (decompose characters into base + combining marks)
/// 3. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 4. Trim leading/trailing whitespace
///
/// Lowercasing runs first because it can itself produce combining marks
/// ("İ" lowercases to "i" + combining dot above); stripping afterwards
/// keeps the function idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̃ (tilde), ̈ (diaeresis)
fn is_combining_mark(c: char) -> bool {
    // Unicode category Mn (Mark, Nonspacing) range
    // This covers the most common combining diacritical marks
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
