//! Phrase list for the cycler
//!
//! A `PhraseSet` is an ordered, cyclic list of phrases. After the last phrase
//! the cycler wraps back to the first.

use super::error::{CyclerError, CyclerResult};

/// Ordered, cyclic sequence of non-empty phrases.
///
/// An empty set is allowed: a cycler built from it never schedules a tick
/// and keeps rendering the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseSet {
    phrases: Vec<String>,
}

impl PhraseSet {
    /// Build a phrase set, rejecting empty phrase strings.
    pub fn new<I, S>(phrases: I) -> CyclerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if let Some(position) = phrases.iter().position(String::is_empty) {
            return Err(CyclerError::invalid_config(format!(
                "phrase {position} is empty"
            )));
        }
        Ok(Self { phrases })
    }

    /// Number of phrases in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the set has no phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrase at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.phrases.get(index).map(String::as_str)
    }

    /// Index that follows `index`, wrapping after the last phrase.
    ///
    /// Returns 0 for an empty set.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        if self.phrases.is_empty() {
            0
        } else {
            (index + 1) % self.phrases.len()
        }
    }

    /// Iterate over the phrases in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_order() {
        let set = PhraseSet::new(["alpha", "beta", "gamma"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_empty_set_is_allowed() {
        let set = PhraseSet::new(Vec::<String>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.get(0), None);
        assert_eq!(set.next_index(0), 0);
    }

    #[test]
    fn test_reject_empty_phrase() {
        let err = PhraseSet::new(["ok", ""]).unwrap_err();
        assert_eq!(err, CyclerError::invalid_config("phrase 1 is empty"));
    }

    #[test]
    fn test_next_index_wraps() {
        let set = PhraseSet::new(["a", "b"]).unwrap();
        assert_eq!(set.next_index(0), 1);
        assert_eq!(set.next_index(1), 0);
    }

    #[test]
    fn test_single_phrase_wraps_to_itself() {
        let set = PhraseSet::new(["only"]).unwrap();
        assert_eq!(set.next_index(0), 0);
    }
}
