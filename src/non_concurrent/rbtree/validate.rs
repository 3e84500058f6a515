use std::fmt;

use super::node::{Color, Direction, NodeId};
use super::RBTree;


/// The first broken red-black property [`RBTree::validate`] ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot(NodeId),
    /// A red node has a red child.
    RedChildOfRed { parent: NodeId, child: NodeId },
    /// The two subtrees of `node` have different black heights.
    BlackHeightMismatch { node: NodeId, left: usize, right: usize },
    /// `node`'s key is not strictly between the keys of its ancestors on either side.
    OutOfOrder(NodeId),
    /// `node`'s parent link doesn't point at the node that has it as a child.
    BrokenParentLink(NodeId),
    /// The number of reachable nodes doesn't match the number of allocated nodes.
    LengthMismatch { reachable: usize, allocated: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot(node) => write!(f, "root {node:?} is red"),
            Self::RedChildOfRed { parent, child } => write!(f, "red node {parent:?} has red child {child:?}"),
            Self::BlackHeightMismatch { node, left, right } => {
                write!(f, "subtrees of {node:?} have black heights {left} (left) and {right} (right)")
            }
            Self::OutOfOrder(node) => write!(f, "key of {node:?} is out of order"),
            Self::BrokenParentLink(node) => write!(f, "parent link of {node:?} is broken"),
            Self::LengthMismatch { reachable, allocated } => {
                write!(f, "{reachable} nodes reachable from the root, but {allocated} allocated")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<K: Ord> RBTree<K> {
    /// Checks every red-black and search tree property over the whole tree.
    /// 
    /// On success returns the black height of the tree: the number of black nodes on any path from
    /// the root down to a nil leaf, not counting the nil leaf itself.
    /// 
    /// Complexity: O(n)
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return match self.len() {
                0 => Ok(0),
                allocated => Err(InvariantViolation::LengthMismatch { reachable: 0, allocated }),
            }
        };
        
        if self.nodes[root].parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink(root))
        }
        if self.nodes[root].color.is_red() {
            return Err(InvariantViolation::RedRoot(root))
        }
        
        let mut reachable = 0;
        let black_height = self.validate_subtree(root, None, None, &mut reachable)?;
        
        if reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch { reachable, allocated: self.len() })
        }
        Ok(black_height)
    }
    
    fn validate_subtree(&self, node: NodeId, lower: Option<&K>, upper: Option<&K>, reachable: &mut usize) -> Result<usize, InvariantViolation> {
        *reachable += 1;
        let current = &self.nodes[node];
        
        if lower.is_some_and(|lower| current.key <= *lower) || upper.is_some_and(|upper| current.key >= *upper) {
            return Err(InvariantViolation::OutOfOrder(node))
        }
        
        let mut heights = [0; 2];
        for (height, side) in heights.iter_mut().zip([Direction::Left, Direction::Right]) {
            let Some(child) = current[side] else { continue };
            
            if self.nodes[child].parent != Some(node) {
                return Err(InvariantViolation::BrokenParentLink(child))
            }
            if current.color.is_red() && self.nodes[child].color.is_red() {
                return Err(InvariantViolation::RedChildOfRed { parent: node, child })
            }
            
            *height = match side {
                Direction::Left => self.validate_subtree(child, lower, Some(&current.key), reachable)?,
                Direction::Right => self.validate_subtree(child, Some(&current.key), upper, reachable)?,
            };
        }
        
        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { node, left, right })
        }
        Ok(left + usize::from(current.color == Color::Black))
    }
}

impl<K> RBTree<K> {
    /// Number of black nodes on the leftmost path from the root, nil leaf excluded.
    /// 
    /// Equal to the black height on every other path as long as the tree is valid.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node) = current {
            height += usize::from(self.nodes[node].color.is_black());
            current = self.nodes[node][Direction::Left];
        }
        height
    }
}
