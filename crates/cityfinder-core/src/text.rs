// crates/cityfinder-core/src/text.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CityError;

/// How names and prefixes are normalized before they touch the index.
///
/// Both the indexed names and the query prefix go through the same folding,
/// so any choice here stays consistent with itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folding {
    /// Unicode lowercase only. `"São Paulo"` is keyed as `"são paulo"`.
    #[default]
    Lowercase,
    /// Transliterate to ASCII, then lowercase (`"Łódź"` -> `"lodz"`).
    ///
    /// The implementation uses the `deunicode` crate, which is a best-effort
    /// mapping. Accented and unaccented spellings then share one key.
    Transliterate,
}

impl Folding {
    /// Convert a string into the key used for indexing and lookup.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cityfinder_core::Folding;
    ///
    /// assert_eq!(Folding::Lowercase.fold("New York"), "new york");
    /// assert_eq!(Folding::Transliterate.fold("Łódź"), "lodz");
    /// ```
    pub fn fold(self, s: &str) -> String {
        match self {
            Folding::Lowercase => lower_chars(s),
            Folding::Transliterate => lower_chars(&deunicode::deunicode(s)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Folding::Lowercase => "lowercase",
            Folding::Transliterate => "ascii",
        }
    }
}

impl fmt::Display for Folding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Folding {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowercase" | "lower" => Ok(Folding::Lowercase),
            "ascii" | "transliterate" => Ok(Folding::Transliterate),
            other => Err(CityError::Other(format!(
                "unknown folding '{other}' (expected 'lowercase' or 'ascii')"
            ))),
        }
    }
}

// Per-char mapping: `str::to_lowercase` turns a word-final 'Σ' into 'ς', which
// would key a prefix differently from the same letters inside a longer name.
fn lower_chars(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// `true` for the empty string and for strings made only of whitespace.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_keeps_diacritics() {
        assert_eq!(Folding::Lowercase.fold("ZÜRICH"), "zürich");
        assert_ne!(Folding::Lowercase.fold("Zürich"), "zurich");
    }

    #[test]
    fn transliterate_strips_diacritics() {
        assert_eq!(Folding::Transliterate.fold("Zürich"), "zurich");
        assert_eq!(Folding::Transliterate.fold("MÜNCHEN"), "munchen");
    }

    #[test]
    fn sigma_folds_the_same_at_the_end_of_a_prefix() {
        assert_eq!(Folding::Lowercase.fold("ΑΣ"), "ασ");
        assert_eq!(Folding::Lowercase.fold("ΑΣΑ"), "ασα");
        assert!(Folding::Lowercase.fold("ΑΣΑ").starts_with(&Folding::Lowercase.fold("ΑΣ")));
    }

    #[test]
    fn parses_folding_names() {
        assert_eq!("ascii".parse::<Folding>().unwrap(), Folding::Transliterate);
        assert_eq!(" Lowercase ".parse::<Folding>().unwrap(), Folding::Lowercase);
        assert!("fuzzy".parse::<Folding>().is_err());
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" a "));
    }
}
