//! Sequence Store - The immutable, ordered list of fragments.
//!
//! A `Sequence` is cheap to clone (the fragment list is shared) and never
//! changes once built. On construction each fragment is split into grapheme
//! clusters so the scheduler can slice the first `n` characters in O(1).
//!
//! # Example
//!
//! ```
//! use spark_typewriter::{Fragment, Sequence};
//!
//! let seq = Sequence::new(vec![Fragment::new("héllo"), Fragment::new("")]);
//!
//! assert_eq!(seq.len(), 2);
//! assert_eq!(seq.char_count(0), Some(5));
//! assert_eq!(seq.prefix(0, 2), Some("hé"));
//! assert_eq!(seq.char_count(1), Some(0));
//! ```

use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Fragment;

/// A fragment plus its precomputed character boundaries.
#[derive(Debug, PartialEq, Eq)]
struct Entry {
    fragment: Fragment,
    /// `boundaries[k]` is the byte offset just past the k-th character.
    /// Always starts with 0, so `len() - 1` is the character count.
    boundaries: Vec<usize>,
}

impl Entry {
    fn new(fragment: Fragment) -> Self {
        let mut boundaries = Vec::with_capacity(fragment.text.len() + 1);
        boundaries.push(0);
        boundaries.extend(
            fragment
                .text
                .grapheme_indices(true)
                .map(|(offset, grapheme)| offset + grapheme.len()),
        );
        Self { fragment, boundaries }
    }

    fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }
}

/// Ordered, immutable fragment list driving one playback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    entries: Rc<[Entry]>,
}

impl Sequence {
    /// Build a sequence from fragments, in order.
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            entries: fragments.into_iter().map(Entry::new).collect(),
        }
    }

    /// The empty sequence (zero fragments).
    pub fn empty() -> Self {
        Self::default()
    }

    /// A one-fragment sequence, the plain "type this line" case.
    pub fn single(text: impl Into<String>) -> Self {
        Self::new(vec![Fragment::new(text)])
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fragment at `index`.
    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.entries.get(index).map(|e| &e.fragment)
    }

    /// Number of characters (grapheme clusters) in fragment `index`.
    pub fn char_count(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(Entry::char_count)
    }

    /// First `count` characters of fragment `index`.
    ///
    /// `count` is clamped to the fragment's length.
    pub fn prefix(&self, index: usize, count: usize) -> Option<&str> {
        let entry = self.entries.get(index)?;
        let end = entry.boundaries[count.min(entry.char_count())];
        Some(&entry.fragment.text[..end])
    }

    /// Iterate over fragments in order.
    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.entries.iter().map(|e| &e.fragment)
    }

    /// True if both handles share the same underlying list.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl From<Vec<Fragment>> for Sequence {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self::new(fragments)
    }
}

/// A missing list is an empty sequence.
impl From<Option<Vec<Fragment>>> for Sequence {
    fn from(fragments: Option<Vec<Fragment>>) -> Self {
        fragments.map(Self::new).unwrap_or_default()
    }
}

impl FromIterator<Fragment> for Sequence {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_empty_sequence() {
        let seq = Sequence::from(None::<Vec<Fragment>>);
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert!(seq.get(0).is_none());
        assert!(seq.prefix(0, 0).is_none());
    }

    #[test]
    fn test_grapheme_counting() {
        // "e" + combining acute accent is one character
        let seq = Sequence::single("e\u{301}x");
        assert_eq!(seq.char_count(0), Some(2));
        assert_eq!(seq.prefix(0, 1), Some("e\u{301}"));
        assert_eq!(seq.prefix(0, 2), Some("e\u{301}x"));
    }

    #[test]
    fn test_prefix_clamps() {
        let seq = Sequence::single("ab");
        assert_eq!(seq.prefix(0, 0), Some(""));
        assert_eq!(seq.prefix(0, 99), Some("ab"));
    }

    #[test]
    fn test_empty_fragment() {
        let seq = Sequence::single("");
        assert_eq!(seq.char_count(0), Some(0));
        assert_eq!(seq.prefix(0, 0), Some(""));
    }

    #[test]
    fn test_clone_shares_list() {
        let a = Sequence::single("x");
        let b = a.clone();
        let c = Sequence::single("x");

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        // Same content, different list
        assert_eq!(a, c);
    }

    #[test]
    fn test_order_preserved() {
        let seq: Sequence = ["one", "two", "three"].into_iter().map(Fragment::new).collect();
        let texts: Vec<_> = seq.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }
}
