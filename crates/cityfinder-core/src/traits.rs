// crates/cityfinder-core/src/traits.rs

use crate::text::Folding;

/// Name-based matching helpers for types that expose a display name.
///
/// Implementors provide a `&str` view of their name via
/// [`NameMatch::name_str`] and get a prefix check that folds both
/// sides the same way the prefix index does. A linear scan with
/// [`NameMatch::name_starts_with`] returns the same set as an index search,
/// which is what the tests lean on.
///
/// # Examples
/// ```rust
/// use cityfinder_core::traits::NameMatch;
/// use cityfinder_core::Folding;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("London").name_starts_with("LON", Folding::Lowercase));
/// assert!(Place("Łódź").name_starts_with("LODZ", Folding::Transliterate));
/// assert!(!Place("Łódź").name_starts_with("lodz", Folding::Lowercase));
/// ```
pub trait NameMatch {
    /// Returns the display name used for matching.
    fn name_str(&self) -> &str;

    /// `true` if the folded name starts with the folded `prefix`.
    #[inline]
    fn name_starts_with(&self, prefix: &str, folding: Folding) -> bool {
        folding
            .fold(self.name_str())
            .starts_with(&folding.fold(prefix))
    }
}

impl NameMatch for str {
    fn name_str(&self) -> &str {
        self
    }
}

impl NameMatch for String {
    fn name_str(&self) -> &str {
        self
    }
}
