//! A red-black tree over a set of unique keys.
//! 
//! Nodes live in an arena owned by the tree and point at each other through [`NodeId`]s, so the
//! parent back-links never own anything. Absent children are the nil leaves of the textbook
//! algorithm: they count as black everywhere a color is tested, and [`RBTree::collect_leaves`] hands
//! them out as [`NilLeaf`]s.

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::ptr;

mod delete;
mod insert;
mod node;
mod rotate;
mod traverse;
mod validate;

pub use node::{Color, NodeId};
pub use traverse::NilLeaf;
pub use validate::InvariantViolation;

use node::{Arena, Direction};


pub struct RBTree<K> {
    nodes: Arena<K>,
    root: Option<NodeId>,
}

impl<K> RBTree<K> {
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }
    
    /// The amount of keys in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|id| NodeRef::new(self, id))
    }
    
    /// Drops every key in the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }
}

impl<K: Ord> RBTree<K> {
    /// Looks up the node holding `key`.
    /// 
    /// Complexity: O(log(n))
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K>> {
        self.find_node(key).map(|id| NodeRef::new(self, id))
    }
    
    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }
    
    fn find_node(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(node) = current {
            current = match key.cmp(&self.nodes[node].key) {
                Ordering::Less => self.nodes[node][Direction::Left],
                Ordering::Greater => self.nodes[node][Direction::Right],
                Ordering::Equal => return Some(node),
            };
        }
        None
    }
}

impl<K> Default for RBTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for RBTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for RBTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Prints the shape of the tree, e.g. `Black(2, Red(1, nil, nil), nil)`.
impl<K: Debug> Debug for RBTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Subtree<'a, K>(&'a RBTree<K>, Option<NodeId>);
        
        impl<K: Debug> Debug for Subtree<'_, K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let Self(tree, node) = *self;
                let Some(node) = node else { return f.write_str("nil") };
                let node = &tree.nodes[node];
                f.debug_tuple(if node.color.is_red() { "Red" } else { "Black" })
                    .field(&node.key)
                    .field(&Subtree(tree, node[Direction::Left]))
                    .field(&Subtree(tree, node[Direction::Right]))
                    .finish()
            }
        }
        
        f.debug_struct("RBTree")
            .field("len", &self.len())
            .field("root", &Subtree(self, self.root))
            .finish()
    }
}

/// Read-only view of one node, borrowed from its tree.
/// 
/// Since the view borrows the tree, no node can be deleted or relinked while a `NodeRef` to it is
/// alive. Use [`NodeRef::id`] to remember a node's identity across mutations.
pub struct NodeRef<'a, K> {
    tree: &'a RBTree<K>,
    id: NodeId,
}

impl<K> Copy for NodeRef<'_, K> {}
impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K> NodeRef<'a, K> {
    fn new(tree: &'a RBTree<K>, id: NodeId) -> Self {
        Self { tree, id }
    }
    
    fn link(&self, link: Option<NodeId>) -> Option<Self> {
        link.map(|id| Self::new(self.tree, id))
    }
    
    pub fn id(&self) -> NodeId {
        self.id
    }
    
    pub fn key(&self) -> &'a K {
        &self.tree.nodes[self.id].key
    }
    
    pub fn color(&self) -> Color {
        self.tree.nodes[self.id].color
    }
    
    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }
    
    pub fn is_black(&self) -> bool {
        self.color().is_black()
    }
    
    pub fn parent(&self) -> Option<Self> {
        self.link(self.tree.nodes[self.id].parent)
    }
    
    pub fn left(&self) -> Option<Self> {
        self.link(self.tree.nodes[self.id][Direction::Left])
    }
    
    pub fn right(&self) -> Option<Self> {
        self.link(self.tree.nodes[self.id][Direction::Right])
    }
}

/// Two views are equal when they point at the same node of the same tree.
impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
impl<K> Eq for NodeRef<'_, K> {}

impl<K: Debug> Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
