//! Link surgery shared by both fixups.

use log::trace;

use super::node::{Color, Direction, NodeId};
use super::RBTree;


impl<K> RBTree<K> {
    /// Color of a possibly-absent node. Nil leaves are black.
    pub(super) fn color_of(&self, node: Option<NodeId>) -> Color {
        node.map_or(Color::Black, |id| self.nodes[id].color)
    }
    
    pub(super) fn set_color(&mut self, node: NodeId, color: Color) {
        trace!("recoloring {node:?} {color:?}");
        self.nodes[node].color = color;
    }
    
    /// Which side of `parent` the node `child` hangs on.
    pub(super) fn side_of(&self, parent: NodeId, child: NodeId) -> Direction {
        if self.nodes[parent][Direction::Left] == Some(child) {
            Direction::Left
        } else {
            debug_assert_eq!(self.nodes[parent][Direction::Right], Some(child), "{child:?} is not a child of {parent:?}");
            Direction::Right
        }
    }
    
    /// Leftmost node of the subtree rooted at `node`.
    pub(super) fn minimum(&self, mut node: NodeId) -> NodeId {
        while let Some(left) = self.nodes[node][Direction::Left] {
            node = left;
        }
        node
    }
    
    /// Makes `new` take the place of `old` under `parent` (or as the root, if `parent` is `None`).
    /// 
    /// `old`'s own links are left untouched; the caller is responsible for them.
    pub(super) fn transplant(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, old);
                self.nodes[parent][side] = new;
            }
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }
    
    /// Rotates the subtree rooted at `node` towards `dir`.
    /// 
    /// The child on the opposite side of `dir` (the pivot) takes `node`'s place, and `node` becomes the
    /// pivot's `dir` child. The pivot's inner subtree moves over to `node`. Returns the pivot.
    /// 
    /// ```text
    ///        node                 pivot
    ///       /    \               /     \
    ///      a    pivot   ==>    node     c
    ///          /     \        /    \
    ///        mid      c      a     mid
    /// ```
    /// (drawn for `dir == Left`)
    pub(super) fn rotate(&mut self, node: NodeId, dir: Direction) -> NodeId {
        let pivot = self.nodes[node][dir.opposite()].expect("rotating away from a nil child");
        let middle = self.nodes[pivot][dir];
        let parent = self.nodes[node].parent;
        trace!("rotating {dir:?} at {node:?} (pivot {pivot:?})");
        
        self.nodes[node][dir.opposite()] = middle;
        if let Some(middle) = middle {
            self.nodes[middle].parent = Some(node);
        }
        
        self.transplant(parent, node, Some(pivot));
        self.nodes[pivot][dir] = Some(node);
        self.nodes[node].parent = Some(pivot);
        
        pivot
    }
}
