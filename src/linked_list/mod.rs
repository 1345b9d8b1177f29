//! A doubly-linked list which flattens all its nodes onto a Vec for storage.
//! Nodes are addressed by [`NodeHandle`]s, so a caller holding a handle can
//! remove or splice around that node without walking the list, and the
//! backward links are plain indices rather than a second owner.
//!
//! Indexed access walks from the head and is O(n). Anything that goes looking
//! for something that isn't there (an index past the end, a stale handle, a
//! predicate nothing satisfies) comes back as `None`.

mod iter;
mod node;

use std::{
    fmt,
    iter::FromIterator,
    mem,
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, trace};

pub use self::iter::{IntoIter, Iter, Position, RevIter};
pub use self::node::{Node, NodeHandle};
use self::node::Slot;

/// Builds a [`LinkedList`] out of its arguments, head first.
///
/// ```
/// use bucket_list::linked_list;
///
/// let list = linked_list![2, 3, 5];
/// assert_eq!(Some(&3), list.get(1));
/// ```
#[macro_export]
macro_rules! linked_list {
    () => {
        $crate::LinkedList::new()
    };
    ($($elem:expr),+ $(,)?) => {
        $crate::LinkedList::from(::std::vec![$($elem),+])
    };
}

/// Source of list ids, so a handle can tell which list issued it.
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

fn next_list_id() -> u64 {
    NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed)
}

#[cold]
#[inline(never)]
fn dangling(handle: NodeHandle) -> ! {
    panic!("list links to a node that doesn't exist: {:?}", handle);
}

/// A doubly-linked list. Every node sits in a single contiguous Vec and is
/// addressed by its position in it; removed nodes are freelisted and their
/// slots reused by later inserts.
pub struct LinkedList<T> {
    /// Stamped into every handle this list issues.
    id: u64,

    /// The nodes in the list.
    store: Vec<Slot<T>>,

    /// Slots which aren't in use anymore. These will be reused.
    free: Vec<usize>,

    /// The first node in the list.
    head: Option<NodeHandle>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList::with_capacity(0)
    }

    /// Creates a new linked list with room for `capacity` nodes before the
    /// storage vec reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: next_list_id(),
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
        }
    }

    /// A list holding a single value.
    pub fn from_value(value: T) -> Self {
        let mut list = LinkedList::with_capacity(1);
        list.append(value);
        list
    }

    /// The length of this linked list.
    pub fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first node in the list.
    pub fn head(&self) -> Option<NodeHandle> {
        self.head
    }

    /// The last node in the list. Walks the whole list to find it.
    pub fn last(&self) -> Option<NodeHandle> {
        let mut node = self.head?;
        while let Some(next) = self.next(node) {
            node = next;
        }

        Some(node)
    }

    /// Looks up a node by handle.
    pub fn node(&self, handle: NodeHandle) -> Option<&Node<T>> {
        self.store
            .get(handle.idx)
            .filter(|slot| handle.list == self.id && slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node<T>> {
        if handle.list != self.id {
            return None;
        }

        self.store
            .get_mut(handle.idx)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn value(&self, handle: NodeHandle) -> Option<&T> {
        self.node(handle).map(|node| &node.value)
    }

    pub fn value_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        self.node_mut(handle).map(|node| &mut node.value)
    }

    pub fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).and_then(|node| node.next)
    }

    pub fn previous(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).and_then(|node| node.previous)
    }

    /// Follows a link the list itself handed out. A miss here means the
    /// chain is corrupt, not that the caller asked for something absent.
    fn links(&self, handle: NodeHandle) -> &Node<T> {
        match self.node(handle) {
            Some(node) => node,
            None => dangling(handle),
        }
    }

    fn links_mut(&mut self, handle: NodeHandle) -> &mut Node<T> {
        match self.node_mut(handle) {
            Some(node) => node,
            None => dangling(handle),
        }
    }

    /// The node `index` steps from the head, if the list is that long.
    pub fn node_at(&self, index: usize) -> Option<NodeHandle> {
        let mut node = self.head?;
        for _ in 0..index {
            node = self.next(node)?;
        }

        Some(node)
    }

    /// The value `index` steps from the head.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_at(index).and_then(|handle| self.value(handle))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let handle = self.node_at(index)?;
        self.value_mut(handle)
    }

    /// Puts a node in a slot, reusing a freelisted one if there is one.
    fn alloc(&mut self, node: Node<T>) -> NodeHandle {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.store[idx];
            slot.node = Some(node);
            return NodeHandle {
                list: self.id,
                idx,
                generation: slot.generation,
            };
        }

        self.store.push(Slot {
            generation: 0,
            node: Some(node),
        });

        NodeHandle {
            list: self.id,
            idx: self.store.len() - 1,
            generation: 0,
        }
    }

    /// Links a node into the chain after `prev`, or in front of the head when
    /// `prev` is `None`. Whatever links the node carried in are discarded.
    fn link_after(&mut self, prev: Option<NodeHandle>, node: Node<T>) -> NodeHandle {
        let handle = self.alloc(node);
        let next = match prev {
            Some(prev) => self.links(prev).next,
            None => self.head,
        };

        {
            let node = self.links_mut(handle);
            node.previous = prev;
            node.next = next;
        }

        match prev {
            Some(prev) => self.links_mut(prev).next = Some(handle),
            None => self.head = Some(handle),
        }

        if let Some(next) = next {
            self.links_mut(next).previous = Some(handle);
        }

        trace!("linked node {} after {:?}", handle.idx, prev.map(|h| h.idx));

        handle
    }

    /// Where a node inserted at `index` should be linked: `Some(None)` for
    /// the front, `Some(Some(prev))` after `prev`, `None` if the list is too
    /// short.
    fn insertion_point(&self, index: usize) -> Option<Option<NodeHandle>> {
        if index == 0 {
            Some(None)
        } else {
            self.node_at(index - 1).map(Some)
        }
    }

    /// Adds a value to the end of the list.
    pub fn append(&mut self, value: T) -> NodeHandle {
        self.append_node(Node::new(value))
    }

    /// Adds a detached node to the end of the list. The new node's previous
    /// link is the old tail.
    pub fn append_node(&mut self, node: Node<T>) -> NodeHandle {
        let tail = self.last();
        let handle = self.link_after(tail, node);

        #[cfg(test)]
        self.continuity_test();

        handle
    }

    /// Adds a copy of every value in `other` to the end of this list, in
    /// order. `other` is left alone.
    pub fn append_list(&mut self, other: &LinkedList<T>)
    where
        T: Clone,
    {
        debug!("appending copy of {} nodes", other.len());
        self.extend(other.iter().cloned());
    }

    /// Inserts a value so that it ends up `index` steps from the head. Returns
    /// `None` and leaves the list alone if `index` is past the end.
    pub fn insert(&mut self, value: T, index: usize) -> Option<NodeHandle> {
        self.insert_node(Node::new(value), index)
    }

    /// Inserts a detached node so that it ends up `index` steps from the head.
    pub fn insert_node(&mut self, node: Node<T>, index: usize) -> Option<NodeHandle> {
        let prev = self.insertion_point(index)?;
        let handle = self.link_after(prev, node);

        #[cfg(test)]
        self.continuity_test();

        Some(handle)
    }

    /// Moves every value out of `other` and splices them, in order, in at
    /// `index`: the first of them ends up `index` steps from the head and the
    /// node previously there follows the last of them.
    ///
    /// `other` is consumed either way. Returns `false`, leaving this list
    /// alone, if `index` is past the end.
    pub fn insert_list(&mut self, other: LinkedList<T>, index: usize) -> bool {
        let mut prev = match self.insertion_point(index) {
            Some(prev) => prev,
            None => return false,
        };

        debug!("splicing {} nodes in at {}", other.len(), index);

        for value in other {
            prev = Some(self.link_after(prev, Node::new(value)));
        }

        #[cfg(test)]
        self.continuity_test();

        true
    }

    /// Pushes a value onto the front of the list and returns its handle, which
    /// is the new head.
    pub fn insert_in_front(&mut self, value: T) -> NodeHandle {
        let handle = self.link_after(None, Node::new(value));

        #[cfg(test)]
        self.continuity_test();

        handle
    }

    /// Unlinks a node and hands it back. Its neighbours are linked to each
    /// other in both directions, its own links are cleared, and its slot is
    /// freelisted. Every removal goes through here.
    pub fn detach(&mut self, handle: NodeHandle) -> Option<Node<T>> {
        if handle.list != self.id {
            return None;
        }

        let slot = self
            .store
            .get_mut(handle.idx)
            .filter(|slot| slot.generation == handle.generation)?;
        let mut node = slot.node.take()?;
        slot.generation += 1;
        self.free.push(handle.idx);

        // link prev to next and next to prev so node doesn't exist in the
        // chain anymore
        match node.previous {
            Some(prev) => self.links_mut(prev).next = node.next,
            None => self.head = node.next,
        }

        if let Some(next) = node.next {
            self.links_mut(next).previous = node.previous;
        }

        node.previous = None;
        node.next = None;

        trace!("detached node {}", handle.idx);

        #[cfg(test)]
        self.continuity_test();

        Some(node)
    }

    /// Removes a node, returning its value.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<T> {
        self.detach(handle).map(Node::into_value)
    }

    pub fn remove_first(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(head)
    }

    /// Removes the tail, returning its value. An empty list gives `None`.
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.last()?;
        self.remove(tail)
    }

    /// Removes the node `index` steps from the head.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let handle = self.node_at(index)?;
        self.remove(handle)
    }

    /// Looks for the node by walking from the head, and removes it if it is
    /// found in the chain. Returns whether anything was removed.
    pub fn delete(&mut self, handle: NodeHandle) -> bool {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            if node == handle {
                return self.detach(node).is_some();
            }
            cursor = self.links(node).next;
        }

        false
    }

    /// Drops every node. Handles issued before this point go stale; the
    /// storage vec keeps its allocation.
    pub fn remove_all(&mut self) {
        debug!("releasing {} nodes", self.len());

        for slot in self.store.iter_mut() {
            if slot.node.take().is_some() {
                slot.generation += 1;
            }
        }

        self.free = (0..self.store.len()).rev().collect();
        self.head = None;

        #[cfg(test)]
        self.continuity_test();
    }

    /// Reverses the list in place by swapping every node's links. Handles stay
    /// valid and keep naming the same values.
    pub fn reverse(&mut self) {
        debug!("reversing {} nodes", self.len());

        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = self.links_mut(handle);
            mem::swap(&mut node.next, &mut node.previous);
            cursor = node.previous;
            self.head = Some(handle);
        }

        #[cfg(test)]
        self.continuity_test();
    }

    /// A new list holding `f` applied to every value, in order.
    pub fn map<U, F>(&self, f: F) -> LinkedList<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    /// A new list holding copies of the values `predicate` accepts, in order.
    pub fn filter<P>(&self, mut predicate: P) -> LinkedList<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|value| predicate(*value)).cloned().collect()
    }

    /// The first node, walking from the head, that `predicate` accepts.
    pub fn first<P>(&self, mut predicate: P) -> Option<NodeHandle>
    where
        P: FnMut(&Node<T>) -> bool,
    {
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = self.links(handle);
            if predicate(node) {
                return Some(handle);
            }
            cursor = node.next;
        }

        None
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len(),
        }
    }

    /// Walks from the tail back to the head.
    pub fn iter_rev(&self) -> RevIter<'_, T> {
        RevIter {
            list: self,
            next: self.last(),
            remaining: self.len(),
        }
    }

    /// The position of the head. Equal to [`LinkedList::end_position`] when
    /// the list is empty.
    pub fn start_position(&self) -> Position {
        Position {
            node: self.head,
            ordinal: 0,
        }
    }

    /// The position one past the tail.
    pub fn end_position(&self) -> Position {
        Position {
            node: None,
            ordinal: self.len(),
        }
    }

    /// The position following `position`. The end position has nothing after
    /// it and comes back unchanged.
    pub fn position_after(&self, position: Position) -> Position {
        match position.node {
            Some(handle) => Position {
                node: self.next(handle),
                ordinal: position.ordinal + 1,
            },
            None => position,
        }
    }

    pub fn value_at(&self, position: Position) -> Option<&T> {
        position.node.and_then(|handle| self.value(handle))
    }

    /// Walks the list both ways and checks the links agree with each other
    /// and with the storage vec.
    #[cfg(test)]
    fn continuity_test(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(handle) = cursor {
            let node = self.links(handle);
            assert_eq!(prev, node.previous);
            count = count + 1;
            assert!(count <= self.len());
            prev = Some(handle);
            cursor = node.next;
        }

        assert_eq!(self.len(), count);
        assert_eq!(self.len(), self.iter_rev().count());
        assert_eq!(self.is_empty(), self.len() == 0);
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        LinkedList::new()
    }
}

/// Clones the values into a fresh list with its own id; handles to the
/// original don't resolve in the clone.
impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut list = LinkedList::with_capacity(self.len());
        list.extend(self.iter().cloned());
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut tail = self.last();
        for value in iter {
            tail = Some(self.link_after(tail, Node::new(value)));
        }

        #[cfg(test)]
        self.continuity_test();
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> From<Vec<T>> for LinkedList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
