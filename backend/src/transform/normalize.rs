//! Confidence level normalization.

use crate::models::StudyRow;

/// Trim and title-case every row's confidence text.
///
/// Values outside the fixed vocabulary pass through untouched apart from
/// the case change; they later render without a mapped color.
pub fn normalize_confidence(rows: &mut [StudyRow]) {
    for row in rows.iter_mut() {
        row.confidence = title_case(row.confidence.trim());
    }
}

/// Upper-case the first letter of every word, lower-case the rest.
///
/// A word starts after any non-alphabetic character, so `"muito-baixo"`
/// becomes `"Muito-Baixo"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::confidence_color;

    fn row(confidence: &str) -> StudyRow {
        StudyRow {
            confidence: confidence.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("muito baixo"), "Muito Baixo");
        assert_eq!(title_case("VERY HIGH"), "Very High");
        assert_eq!(title_case("nível"), "Nível");
        assert_eq!(title_case("muito-baixo"), "Muito-Baixo");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_moderado_maps_to_color() {
        let mut rows = vec![row(" MODERADO ")];
        normalize_confidence(&mut rows);
        assert_eq!(rows[0].confidence, "Moderado");
        assert_eq!(confidence_color(&rows[0].confidence), Some("#4D79FF"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = vec![row("  alto"), row("very LOW "), row("weird value"), row("")];
        normalize_confidence(&mut once);
        let mut twice = once.clone();
        normalize_confidence(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unrecognized_passes_through() {
        let mut rows = vec![row(" insufficient ")];
        normalize_confidence(&mut rows);
        assert_eq!(rows[0].confidence, "Insufficient");
        assert_eq!(confidence_color(&rows[0].confidence), None);
    }
}
