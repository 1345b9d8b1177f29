use std::cmp::Ordering;

use super::{LinkedList, NodeHandle};

/// A spot in a list's sequence: a node plus its ordinal. Positions compare by
/// ordinal alone, so the end position of a list equals any position that
/// walked off its last node.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    pub(super) node: Option<NodeHandle>,
    pub(super) ordinal: usize,
}

impl Position {
    pub fn node(&self) -> Option<NodeHandle> {
        self.node
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal.cmp(&other.ordinal)
    }
}

/// Walks a list from head to tail.
pub struct Iter<'a, T> {
    pub(super) list: &'a LinkedList<T>,
    pub(super) next: Option<NodeHandle>,
    pub(super) remaining: usize,
}

/// Walks a list from tail to head along the `previous` links.
pub struct RevIter<'a, T> {
    pub(super) list: &'a LinkedList<T>,
    pub(super) next: Option<NodeHandle>,
    pub(super) remaining: usize,
}

/// Drains a list from the head.
pub struct IntoIter<T> {
    pub(super) list: LinkedList<T>,
}

// derive(Clone) would demand T: Clone
impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.links(self.next?);
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> Iterator for RevIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.links(self.next?);
        self.next = node.previous;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for RevIter<'a, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
