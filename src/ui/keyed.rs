//! Keyed diffing for the decoration layers
//!
//! Every drawn decoration carries a key. Between two frames only nodes whose
//! key appeared, disappeared or whose content changed are touched, so items
//! that stay on screen keep their running CSS animation.

use std::fmt::Display;

/// A view item with a stable identity across frames
pub trait Keyed {
    type Key: PartialEq + Display;

    fn key(&self) -> Self::Key;
}

/// Node operations needed to turn one frame's layer into the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedDiff<K> {
    /// Keys drawn last frame that are gone now
    pub removed: Vec<K>,
    /// Indices into the new list of items with a new key
    pub added: Vec<usize>,
    /// Indices into the new list of surviving items whose content changed
    pub changed: Vec<usize>,
}

impl<K> KeyedDiff<K> {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

/// Compare two frames of a layer by key
pub fn diff_by_key<T: Keyed + PartialEq>(prev: &[T], next: &[T]) -> KeyedDiff<T::Key> {
    let mut diff = KeyedDiff {
        removed: Vec::new(),
        added: Vec::new(),
        changed: Vec::new(),
    };

    for (i, item) in next.iter().enumerate() {
        let key = item.key();
        match prev.iter().find(|old| old.key() == key) {
            None => diff.added.push(i),
            Some(old) if old != item => diff.changed.push(i),
            Some(_) => {}
        }
    }
    for old in prev {
        let key = old.key();
        if !next.iter().any(|item| item.key() == key) {
            diff.removed.push(key);
        }
    }
    diff
}
