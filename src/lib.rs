//! Red-black tree over a set of unique, ordered keys.
//! 
//! ```
//! use redblack::RBTree;
//! 
//! let mut tree = RBTree::new();
//! assert!(tree.insert(10).0);
//! assert!(!tree.insert(10).0);
//! assert_eq!(tree.find(&10).map(|n| *n.key()), Some(10));
//! assert!(tree.delete(&10));
//! assert!(tree.find(&10).is_none());
//! ```
#![forbid(unsafe_code)]

// not concurrent
pub mod non_concurrent;

pub use non_concurrent::rbtree::{Color, InvariantViolation, NilLeaf, NodeId, NodeRef, RBTree};
