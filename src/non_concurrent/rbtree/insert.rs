use std::cmp::Ordering;

use log::{debug, trace};

use super::node::{Color, Direction, NodeId, RBTreeNode};
use super::{NodeRef, RBTree};


impl<K: Ord> RBTree<K> {
    /// Inserts `key` into the tree.
    /// 
    /// Returns `(true, node)` with the freshly linked node, or `(false, node)` with the node that
    /// already holds an equal key. In the second case the tree is left untouched and `key` is
    /// dropped.
    pub fn insert(&mut self, key: K) -> (bool, NodeRef<'_, K>) {
        let (inserted, id) = self.insert_node(key);
        (inserted, NodeRef::new(self, id))
    }
    
    fn insert_node(&mut self, key: K) -> (bool, NodeId) {
        let mut parent = None;
        let mut side = Direction::Left;
        let mut current = self.root;
        
        while let Some(node) = current {
            side = match key.cmp(&self.nodes[node].key) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => {
                    debug!("insert: key already present at {node:?}");
                    return (false, node)
                }
            };
            parent = Some(node);
            current = self.nodes[node][side];
        }
        
        let node = self.nodes.alloc(RBTreeNode::new(key, parent));
        match parent {
            None => self.root = Some(node),
            Some(parent) => self.nodes[parent][side] = Some(node),
        }
        
        self.insert_fixup(node);
        debug!("insert: linked {node:?} under {parent:?}, {} nodes", self.len());
        (true, node)
    }
    
    /// Restores "no red node has a red child" after `node` was linked in red.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].color.is_black() { break }
            
            // a red root just gets painted black below
            let Some(grandparent) = self.nodes[parent].parent else { break };
            
            let parent_side = self.side_of(grandparent, parent);
            let uncle = self.nodes[grandparent][parent_side.opposite()];
            
            match uncle.filter(|&uncle| self.nodes[uncle].color.is_red()) {
                Some(uncle) => {
                    trace!("insert fixup at {node:?}: red uncle {uncle:?}, pushing up");
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                }
                None => {
                    let mut parent = parent;
                    if self.side_of(parent, node) != parent_side {
                        trace!("insert fixup at {node:?}: inner grandchild, straightening");
                        parent = self.rotate(parent, parent_side);
                    }
                    trace!("insert fixup at {node:?}: black uncle, rotating at {grandparent:?}");
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate(grandparent, parent_side.opposite());
                    break
                }
            }
        }
        
        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::non_concurrent::rbtree::tests::{assert_height_bound, height, init_logging, SCENARIO};
    
    #[test]
    fn first_insert_becomes_black_root() {
        init_logging();
        let mut tree = RBTree::new();
        let (inserted, node) = tree.insert(0);
        assert!(inserted);
        assert_eq!(*node.key(), 0);
        assert_eq!(node.color(), Color::Black);
        assert!(node.parent().is_none());
        assert_eq!(tree.len(), 1);
    }
    
    #[test]
    fn duplicate_insert_returns_existing_node() {
        init_logging();
        let mut tree = RBTree::from_iter(SCENARIO);
        
        let first = {
            let (inserted, node) = tree.insert(0);
            assert!(inserted);
            node.id()
        };
        let (inserted, node) = tree.insert(0);
        assert!(!inserted);
        assert_eq!(node.id(), first);
        assert_eq!(*node.key(), 0);
        assert_eq!(tree.len(), SCENARIO.len() + 1);
    }
    
    #[test]
    fn red_uncle_recolors() {
        let mut tree = RBTree::from_iter([20, 10, 30]);
        tree.insert(5);
        
        // 10 and 30 went black, 20 went red and then got repainted as the root
        let colors: Vec<_> = tree.collect_internal().iter().map(|n| (*n.key(), n.color())).collect();
        assert_eq!(colors, [(5, Color::Red), (10, Color::Black), (20, Color::Black), (30, Color::Black)]);
        assert_eq!(tree.validate(), Ok(2));
    }
    
    #[test]
    fn outer_grandchild_single_rotation() {
        let mut tree = RBTree::new();
        tree.extend([30, 20, 10]);
        
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert!(root.is_black());
        assert_eq!(root.left().map(|n| (*n.key(), n.color())), Some((10, Color::Red)));
        assert_eq!(root.right().map(|n| (*n.key(), n.color())), Some((30, Color::Red)));
    }
    
    #[test]
    fn inner_grandchild_double_rotation() {
        let mut tree = RBTree::new();
        tree.extend([10, 30, 20]);
        
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert!(root.is_black());
        assert_eq!(root.left().map(|n| (*n.key(), n.color())), Some((10, Color::Red)));
        assert_eq!(root.right().map(|n| (*n.key(), n.color())), Some((30, Color::Red)));
        assert_eq!(tree.validate(), Ok(1));
    }
    
    #[test]
    fn ascending_inserts_stay_balanced() {
        init_logging();
        let mut tree = RBTree::new();
        for i in 0..1024 {
            tree.insert(i);
            assert!(tree.validate().is_ok(), "invalid after inserting {i}");
        }
        
        assert_height_bound(&tree);
        assert!(height(&tree) <= 20);
    }
}
