use log::{debug, trace};

use super::node::{Color, Direction, NodeId};
use super::RBTree;


impl<K: Ord> RBTree<K> {
    /// Removes `key` from the tree, returning whether it was there.
    pub fn delete(&mut self, key: &K) -> bool {
        match self.find_node(key) {
            Some(node) => {
                self.remove_node(node);
                true
            }
            None => {
                debug!("delete: key not present");
                false
            }
        }
    }
}

impl<K> RBTree<K> {
    fn remove_node(&mut self, mut node: NodeId) {
        // two children: trade keys with the in-order successor, which has no left child, and unlink
        // that node instead
        if let (Some(_), Some(right)) = (self.nodes[node][Direction::Left], self.nodes[node][Direction::Right]) {
            let successor = self.minimum(right);
            trace!("delete: {node:?} has two children, removing successor {successor:?} instead");
            self.nodes.swap_keys(node, successor);
            node = successor;
        }
        
        let child = self.nodes[node].single_child();
        let parent = self.nodes[node].parent;
        self.transplant(parent, node, child);
        
        let removed = self.nodes.free(node);
        debug!("delete: unlinked {:?} {node:?}, {} nodes left", removed.color, self.len());
        
        if removed.color.is_black() {
            self.delete_fixup(child, parent);
        }
    }
    
    /// Restores equal black heights after a black node was unlinked.
    /// 
    /// `node` is whatever took the removed node's place (possibly nil, hence the separate `parent`);
    /// every path through it is one black node short.
    fn delete_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while let Some(p) = parent {
            // a red node absorbs the missing black below
            if self.color_of(node).is_red() { break }
            
            let side = match node {
                Some(node) => self.side_of(p, node),
                None if self.nodes[p][Direction::Left].is_none() => Direction::Left,
                None => Direction::Right,
            };
            let mut sibling = self.sibling(p, side);
            
            if self.nodes[sibling].color.is_red() {
                trace!("delete fixup under {p:?}: red sibling {sibling:?}");
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.sibling(p, side);
            }
            
            let near = self.nodes[sibling][side];
            let far = self.nodes[sibling][side.opposite()];
            
            if self.color_of(near).is_black() && self.color_of(far).is_black() {
                trace!("delete fixup under {p:?}: black sibling {sibling:?} with black children, moving up");
                self.set_color(sibling, Color::Red);
                node = Some(p);
                parent = self.nodes[p].parent;
                continue
            }
            
            if self.color_of(far).is_black() {
                trace!("delete fixup under {p:?}: red near nephew, rotating at {sibling:?}");
                let near = near.expect("near nephew is red");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                sibling = self.rotate(sibling, side.opposite());
            }
            
            trace!("delete fixup under {p:?}: red far nephew, rotating at {p:?}");
            let far = self.nodes[sibling][side.opposite()].expect("far nephew is red");
            self.set_color(sibling, self.nodes[p].color);
            self.set_color(p, Color::Black);
            self.set_color(far, Color::Black);
            self.rotate(p, side);
            
            node = self.root;
            break
        }
        
        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }
    
    /// The child of `parent` opposite to `side`.
    /// 
    /// Only called on a position that is one black node short, so the other side has a black height
    /// of at least one and can't be nil.
    fn sibling(&self, parent: NodeId, side: Direction) -> NodeId {
        self.nodes[parent][side.opposite()].expect("sibling of a double-black position is nil")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::non_concurrent::rbtree::tests::{init_logging, SCENARIO};
    
    #[test]
    fn delete_from_empty() {
        let mut tree = RBTree::<i32>::new();
        assert!(!tree.delete(&0));
        assert!(tree.is_empty());
    }
    
    #[test]
    fn delete_sole_node_empties_tree() {
        let mut tree = RBTree::from_iter([42]);
        assert!(tree.delete(&42));
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert!(tree.find(&42).is_none());
    }
    
    #[test]
    fn delete_root_promotes_only_child() {
        init_logging();
        let mut tree = RBTree::from_iter([10, 20]);
        assert!(tree.delete(&10));
        
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert!(root.is_black());
        assert!(root.parent().is_none());
        assert!(root.left().is_none() && root.right().is_none());
        assert_eq!(tree.len(), 1);
    }
    
    #[test]
    fn delete_red_leaf_needs_no_fixup() {
        let mut tree = RBTree::from_iter([20, 10, 30]);
        assert!(tree.delete(&30));
        
        let colors: Vec<_> = tree.collect_internal().iter().map(|n| (*n.key(), n.color())).collect();
        assert_eq!(colors, [(10, Color::Red), (20, Color::Black)]);
    }
    
    #[test]
    fn delete_node_with_two_children() {
        let mut tree = RBTree::from_iter(SCENARIO);
        let root = *tree.root().unwrap().key();
        
        assert!(tree.delete(&root));
        assert!(tree.find(&root).is_none());
        assert_eq!(tree.len(), SCENARIO.len() - 1);
        tree.validate().unwrap();
        
        let mut expected: Vec<_> = SCENARIO.iter().copied().filter(|&k| k != root).collect();
        expected.sort();
        let keys: Vec<_> = tree.collect_internal().iter().map(|n| *n.key()).collect();
        assert_eq!(keys, expected);
    }
    
    #[test]
    fn black_leaf_with_red_sibling() {
        // 20B (10B, 40R (30B, 50B)): removing 10 leaves a double-black with a red sibling
        init_logging();
        let mut tree = RBTree::from_iter([20, 10, 40, 30, 50, 60]);
        assert!(tree.delete(&60));
        assert_eq!(tree.find(&40).unwrap().color(), Color::Red);
        
        assert!(tree.delete(&10));
        tree.validate().unwrap();
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 40);
        assert_eq!(tree.collect_internal().iter().map(|n| *n.key()).collect::<Vec<_>>(), [20, 30, 40, 50]);
    }
    
    #[test]
    fn black_sibling_with_black_nephews_pushes_up_to_root() {
        // repaint into a perfect all-black tree, so the deficit travels all the way up
        let mut tree = RBTree::from_iter([4, 2, 6, 1, 3, 5, 7]);
        for k in 1..=7 {
            let node = tree.find(&k).map(|n| n.id()).unwrap();
            tree.nodes[node].color = Color::Black;
        }
        assert_eq!(tree.validate(), Ok(3));
        
        assert!(tree.delete(&1));
        assert_eq!(tree.validate(), Ok(2));
        assert_eq!(tree.find(&3).unwrap().color(), Color::Red);
        assert_eq!(tree.find(&6).unwrap().color(), Color::Red);
        assert_eq!(tree.find(&2).unwrap().color(), Color::Black);
        assert_eq!(*tree.root().unwrap().key(), 4);
    }
    
    #[test]
    fn black_sibling_with_black_nephews_stops_at_red_parent() {
        let mut tree = RBTree::from_iter([4, 2, 6, 1, 3, 5, 7]);
        for k in [1, 3, 5, 7] {
            let node = tree.find(&k).map(|n| n.id()).unwrap();
            tree.nodes[node].color = Color::Black;
        }
        for k in [2, 6] {
            let node = tree.find(&k).map(|n| n.id()).unwrap();
            tree.nodes[node].color = Color::Red;
        }
        assert_eq!(tree.validate(), Ok(2));
        
        assert!(tree.delete(&1));
        assert_eq!(tree.validate(), Ok(2));
        assert_eq!(tree.find(&3).unwrap().color(), Color::Red);
        assert_eq!(tree.find(&2).unwrap().color(), Color::Black);
    }
    
    #[test]
    fn near_and_far_nephews() {
        // sibling 30 with only a near (inner) red child
        let mut tree = RBTree::from_iter([20, 10, 30, 25]);
        assert!(tree.delete(&10));
        tree.validate().unwrap();
        assert_eq!(*tree.root().unwrap().key(), 25);
        
        // sibling 30 with only a far (outer) red child
        let mut tree = RBTree::from_iter([20, 10, 30, 35]);
        assert!(tree.delete(&10));
        tree.validate().unwrap();
        assert_eq!(*tree.root().unwrap().key(), 30);
        
        // and the mirror images
        let mut tree = RBTree::from_iter([20, 10, 30, 15]);
        assert!(tree.delete(&30));
        tree.validate().unwrap();
        assert_eq!(*tree.root().unwrap().key(), 15);
        
        let mut tree = RBTree::from_iter([20, 10, 30, 5]);
        assert!(tree.delete(&30));
        tree.validate().unwrap();
        assert_eq!(*tree.root().unwrap().key(), 10);
    }
    
    #[test]
    fn delete_everything() {
        init_logging();
        let mut tree = RBTree::from_iter(0..500);
        for i in (0..500).rev().step_by(3).chain((0..500).step_by(3)) {
            tree.delete(&i);
            assert!(tree.validate().is_ok(), "invalid after deleting {i}");
        }
        for i in 0..500 {
            tree.delete(&i);
            assert!(tree.validate().is_ok(), "invalid after deleting {i}");
        }
        assert!(tree.is_empty());
        assert!(tree.collect_leaves().is_empty());
    }
}
