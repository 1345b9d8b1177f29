//! Two small containers with no relation to each other:
//!
//! - [`HashTable`], which chains colliding keys into a fixed number of
//!   buckets and never resizes.
//! - [`LinkedList`], a doubly-linked list whose nodes live in a Vec and are
//!   addressed by [`NodeHandle`]s.
//!
//! Neither is thread-safe on its own; wrap them in whatever lock suits you if
//! you need to share one.
//!
//! ```
//! use bucket_list::{linked_list, HashTable};
//!
//! let mut table = HashTable::with_capacity(5);
//! table.insert("a", 1);
//! table.insert("b", 2);
//! assert_eq!(Some(&1), table.get("a"));
//!
//! let mut list = linked_list![2, 3, 5];
//! list.insert_in_front(4);
//! assert_eq!(vec![4, 2, 3, 5], list.iter().copied().collect::<Vec<_>>());
//! ```

mod error;
pub mod hash_table;
pub mod linked_list;
mod null_hasher;

pub use error::{Error, Result};
pub use hash_table::HashTable;
pub use linked_list::{LinkedList, Node, NodeHandle, Position};
pub use null_hasher::{BuildNullHasher, NullHasher};
