use std::fmt::{self, Debug};

use super::node::{Color, Direction, NodeId};
use super::{NodeRef, RBTree};


/// One of the black nil leaves hanging off the tree.
/// 
/// Nil leaves aren't stored anywhere: this is just the position of an absent child, which reports
/// itself as a black node with no children. A tree with `n` keys has `n + 1` of them (none when
/// empty).
pub struct NilLeaf<'a, K> {
    parent: NodeRef<'a, K>,
    side: Direction,
}

impl<K> Copy for NilLeaf<'_, K> {}
impl<K> Clone for NilLeaf<'_, K> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K> NilLeaf<'a, K> {
    /// The real node this nil leaf is a child of.
    pub fn parent(&self) -> NodeRef<'a, K> {
        self.parent
    }
    
    /// Whether this is the left child slot of its parent.
    pub fn is_left_child(&self) -> bool {
        self.side == Direction::Left
    }
    
    pub fn color(&self) -> Color {
        Color::Black
    }
    
    pub fn is_black(&self) -> bool {
        true
    }
    
    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        None
    }
    
    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        None
    }
}

impl<K> PartialEq for NilLeaf<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.side == other.side
    }
}
impl<K> Eq for NilLeaf<'_, K> {}

impl<K: Debug> Debug for NilLeaf<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NilLeaf")
            .field("parent", self.parent.key())
            .field("side", &self.side)
            .finish()
    }
}

impl<K> RBTree<K> {
    /// Every nil leaf, in key order.
    /// 
    /// Complexity: O(n)
    pub fn collect_leaves(&self) -> Vec<NilLeaf<'_, K>> {
        let mut out = Vec::new();
        self.walk_in_order(|id| {
            let parent = NodeRef::new(self, id);
            for side in [Direction::Left, Direction::Right] {
                if self.nodes[id][side].is_none() {
                    out.push(NilLeaf { parent, side });
                }
            }
        });
        out
    }
    
    /// Every real node, in key order.
    /// 
    /// Counting the nil leaves as children, every key-holding node has two children, so this is the
    /// whole tree minus [`collect_leaves`](Self::collect_leaves).
    /// 
    /// Complexity: O(n)
    pub fn collect_internal(&self) -> Vec<NodeRef<'_, K>> {
        let mut out = Vec::with_capacity(self.len());
        self.walk_in_order(|id| out.push(NodeRef::new(self, id)));
        out
    }
    
    /// In-order walk with an explicit stack (no recursion on the tree height).
    pub(super) fn walk_in_order(&self, mut visit: impl FnMut(NodeId)) {
        let mut stack = Vec::new();
        let mut current = self.root;
        
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = self.nodes[node][Direction::Left];
            }
            let Some(node) = stack.pop() else { break };
            visit(node);
            current = self.nodes[node][Direction::Right];
        }
    }
}
