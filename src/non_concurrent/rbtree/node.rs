use std::mem;
use std::ops::{Index, IndexMut};


/// Color of a node.
/// 
/// Absent children never get a node of their own: every `None` child slot is a nil leaf, and nil
/// leaves are always `Black`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }
    
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Which child slot of a node we're talking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Identity of a node inside the tree that handed it out.
/// 
/// Ids are only meaningful while the node is alive: the slot of a deleted node is recycled by the
/// next insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

pub(crate) struct RBTreeNode<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    pub(crate) parent: Option<NodeId>,
    children: [Option<NodeId>; 2],
}

impl<K> RBTreeNode<K> {
    /// New nodes are always red, so linking one in never changes a black height.
    pub(crate) fn new(key: K, parent: Option<NodeId>) -> Self {
        Self {
            key,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }
    
    /// The only child of a node with at most one child (or `None` for a leaf).
    pub(crate) fn single_child(&self) -> Option<NodeId> {
        debug_assert!(self.children.iter().any(Option::is_none), "node has two children");
        self.children[0].or(self.children[1])
    }
}

impl<K> Index<Direction> for RBTreeNode<K> {
    type Output = Option<NodeId>;
    
    fn index(&self, dir: Direction) -> &Self::Output {
        match dir {
            Direction::Left => &self.children[0],
            Direction::Right => &self.children[1],
        }
    }
}

impl<K> IndexMut<Direction> for RBTreeNode<K> {
    fn index_mut(&mut self, dir: Direction) -> &mut Self::Output {
        match dir {
            Direction::Left => &mut self.children[0],
            Direction::Right => &mut self.children[1],
        }
    }
}

/// Owning storage for every node of one tree.
/// 
/// Links between nodes are plain [`NodeId`]s, so parent back-references never own anything and
/// dropping the arena drops every key exactly once, whatever shape the tree had.
pub(crate) struct Arena<K> {
    slots: Vec<Option<RBTreeNode<K>>>,
    free: Vec<NodeId>,
    len: usize,
}

impl<K> Arena<K> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
    
    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }
    
    pub(crate) fn alloc(&mut self, node: RBTreeNode<K>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none());
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }
    
    /// Takes a node out of the arena, handing its slot back for reuse.
    /// 
    /// Freed slots are kept around, so the arena stays as big as the most nodes it ever held at once,
    /// until the last node goes and the storage is released.
    pub(crate) fn free(&mut self, id: NodeId) -> RBTreeNode<K> {
        let node = self.slots.get_mut(id.0).and_then(Option::take).expect("node was freed twice");
        self.len -= 1;
        if self.len == 0 {
            self.slots = Vec::new();
            self.free = Vec::new();
        } else {
            self.free.push(id);
        }
        node
    }
    
    /// Number of slots currently allocated, live or free.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
    
    /// Exchanges the keys of two live nodes, leaving links and colors where they are.
    pub(crate) fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        if a == b { return }
        
        let (lo, hi) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let x = head[lo].as_mut().expect("swapping the key of a freed node");
        let y = tail[0].as_mut().expect("swapping the key of a freed node");
        mem::swap(&mut x.key, &mut y.key);
    }
    
    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = RBTreeNode<K>;
    
    fn index(&self, id: NodeId) -> &Self::Output {
        self.slots.get(id.0).and_then(Option::as_ref).expect("dangling node id")
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.slots.get_mut(id.0).and_then(Option::as_mut).expect("dangling node id")
    }
}
