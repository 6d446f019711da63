use crate::position::Position;

/// Positions reached in the current game, oldest first.
///
/// `entries[i]` is the position produced by move `i`. The start position is
/// not stored here; the session keeps it separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<Position>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, position: Position) {
        self.entries.push(position);
    }

    /// Drop the newest entry. This is the only removal apart from `clear`.
    pub fn pop(&mut self) -> Option<Position> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last(&self) -> Option<&Position> {
        self.entries.last()
    }

    /// Entry `n` places back from the newest (`0` is the newest).
    pub fn back(&self, n: usize) -> Option<&Position> {
        self.entries.len().checked_sub(n + 1).map(|i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.entries.iter()
    }

    /// How often `key` occurs among the stored positions.
    pub fn count_key(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|p| p.repetition_key() == key)
            .count()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
