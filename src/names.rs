//! Name normalization for station and month strings.
//!
//! Station names arrive as free text with inconsistent accents, casing and
//! punctuation ("Cnel. Oviedo", "CNEL OVIEDO"). Two locations are the same
//! station iff their normalized keys are equal.

use crate::core::{MonthInput, MonthName};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics and lowercase, keeping every other character.
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical matching key for a free-text name.
///
/// Strips diacritics, lowercases and drops every character that is not an
/// ASCII letter or digit. Total: the empty string maps to the empty key.
///
/// # Example
/// ```
/// use precip_forecast::names::normalize;
///
/// assert_eq!(normalize("Concepción"), "concepcion");
/// assert_eq!(normalize("Cnel. Oviedo"), "cneloviedo");
/// ```
pub fn normalize(text: &str) -> String {
    fold(text)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Resolve a month given as a number, a name or an abbreviation.
///
/// Accepts, in order of precedence:
/// 1. an integer (or numeric string such as `"01"`) in `1..=12`;
/// 2. a full month name, ignoring case and accents;
/// 3. a month whose name starts with the first three letters of the input.
///
/// Returns `None` when nothing matches; callers treat that as unparseable.
pub fn canonicalize_month(input: impl Into<MonthInput>) -> Option<MonthName> {
    match input.into() {
        MonthInput::Number(n) => month_from_number(n),
        MonthInput::Text(text) => canonicalize_month_text(&text),
    }
}

fn month_from_number(n: i64) -> Option<MonthName> {
    if (1..=12).contains(&n) {
        MonthName::from_index((n - 1) as usize)
    } else {
        None
    }
}

fn canonicalize_month_text(text: &str) -> Option<MonthName> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        if let Some(month) = month_from_number(n) {
            return Some(month);
        }
    }

    let folded = fold(trimmed);

    if let Some(month) = MonthName::ALL
        .iter()
        .find(|m| fold(m.name()) == folded)
    {
        return Some(*month);
    }

    let prefix: String = folded.chars().take(3).collect();
    MonthName::ALL
        .iter()
        .find(|m| fold(m.name()).starts_with(&prefix))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_case_and_punctuation() {
        assert_eq!(normalize("Concepción"), "concepcion");
        assert_eq!(normalize("Ñeembucú"), "neembucu");
        assert_eq!(normalize("  Mcal. Estigarribia "), "mcalestigarribia");
        assert_eq!(normalize("Caazapá-2"), "caazapa2");
    }

    #[test]
    fn normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  .-  "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["Pozo Colorado", "SAN JUAN BAUTISTA", "Aeropuerto Int'l Guaraní"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn canonicalize_numbers() {
        for (i, month) in MonthName::ALL.iter().enumerate() {
            assert_eq!(canonicalize_month(i as i64 + 1), Some(*month));
        }
        assert_eq!(canonicalize_month("01"), Some(MonthName::Enero));
        assert_eq!(canonicalize_month(" 12 "), Some(MonthName::Diciembre));
        assert_eq!(canonicalize_month(0), None);
        assert_eq!(canonicalize_month(13), None);
        assert_eq!(canonicalize_month("13"), None);
    }

    #[test]
    fn canonicalize_names_ignore_case_and_accents() {
        assert_eq!(canonicalize_month("marzo"), Some(MonthName::Marzo));
        assert_eq!(canonicalize_month("SETIEMBRE"), Some(MonthName::Setiembre));
        assert_eq!(canonicalize_month("Ábril"), Some(MonthName::Abril));
    }

    #[test]
    fn canonicalize_abbreviations() {
        assert_eq!(canonicalize_month("Ene"), Some(MonthName::Enero));
        assert_eq!(canonicalize_month("dic."), Some(MonthName::Diciembre));
        assert_eq!(canonicalize_month("Jul"), Some(MonthName::Julio));
    }

    #[test]
    fn canonicalize_rejects_garbage() {
        assert_eq!(canonicalize_month(""), None);
        assert_eq!(canonicalize_month("   "), None);
        assert_eq!(canonicalize_month("xyz"), None);
    }
}
