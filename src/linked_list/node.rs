/// Names a node in the list that handed it out. Handles are cheap to copy and
/// go stale once their node is removed; a stale handle resolves to `None`
/// rather than to whatever reuses the slot later.
///
/// A handle only means something to the list that issued it; any other list
/// treats it as absent, clones included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    /// Id of the list that issued the handle.
    pub(crate) list: u64,

    /// Position of the node in the list's storage vec.
    pub(crate) idx: usize,

    /// Bumped every time the slot is vacated.
    pub(crate) generation: u64,
}

/// A node that lives in a linked list.
#[derive(Clone, Debug)]
pub struct Node<T> {
    /// The value being stored.
    pub(crate) value: T,

    /// The node previous to this one. Only used to walk backwards; the list
    /// is owned through the `next` links.
    pub(crate) previous: Option<NodeHandle>,

    /// The next node in the list.
    pub(crate) next: Option<NodeHandle>,
}

impl<T> Node<T> {
    /// Makes a detached node, ready to be appended or inserted.
    pub fn new(value: T) -> Self {
        Node {
            value,
            previous: None,
            next: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn next(&self) -> Option<NodeHandle> {
        self.next
    }

    pub fn previous(&self) -> Option<NodeHandle> {
        self.previous
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// An entry in the storage vec. Vacant slots keep their generation so that
/// handles to the old occupant can be told apart from handles to the next.
#[derive(Clone, Debug)]
pub(crate) struct Slot<T> {
    pub(crate) generation: u64,
    pub(crate) node: Option<Node<T>>,
}
