//! A Red-Black Tree (CLRS flavour) over an arena of nodes.
//!
//! Nodes live in a `Vec` of slots and link to each other by index. Slot 0
//! is the sentinel: it never holds a node, its color is always black and
//! nothing writes to it. Parent links are plain indices, so rotations and
//! transplants only ever shuffle integers.
//!
//! Invariants, restored after every insert and delete:
//!
//! - Every node is red or black, the sentinel is black
//!
//! - The root is black
//!
//! - A red node only has black children
//!
//! - Every path from a node down to the sentinel crosses the same number of black nodes
//!
//! - In-order keys are sorted
//!
//! Duplicate keys are allowed: an equal key always descends to the right,
//! so the tree behaves as an ordered multiset.

mod fixup;
mod iter;
mod print;
mod validate;
#[cfg(test)]
mod test;

pub use self::iter::{Order, Traverse};
pub use self::validate::Stats;

use std::cmp::Ordering::*;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

use crate::error::Error;

use self::Color::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Black,
    Red,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Black => write!(f, "black"),
            Red => write!(f, "red"),
        }
    }
}

/// Arena index of a node. `NIL` is the sentinel.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Ref(usize);

pub(crate) const NIL: Ref = Ref(0);

impl Ref {
    fn is_nil(self) -> bool {
        self == NIL
    }
}

/// Side of a parent a child hangs from. Also used as rotation direction:
/// rotating `x` to the `Left` promotes its right child.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Caller-facing reference to a node. Stays valid until that node is
/// deleted; afterwards every accessor returns `None` for it, even if the
/// slot got recycled.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
pub(crate) struct Node<K> {
    key: K,
    color: Color,
    left: Ref,
    right: Ref,
    parent: Ref,
}

#[derive(Debug)]
struct Slot<K> {
    generation: u64,
    node: Option<Node<K>>,
}

pub struct RBTree<K> where K: Ord {
    slots: Vec<Slot<K>>,
    free: Vec<usize>,
    root: Ref,
    len: usize,
}

impl<K> Index<Ref> for RBTree<K> where K: Ord {
    type Output = Node<K>;

    fn index(&self, r: Ref) -> &Node<K> {
        match self.slots[r.0].node {
            Some(ref n) => n,
            None => panic!("dereferenced empty slot {:?}", r),
        }
    }
}

impl<K> IndexMut<Ref> for RBTree<K> where K: Ord {
    fn index_mut(&mut self, r: Ref) -> &mut Node<K> {
        match self.slots[r.0].node {
            Some(ref mut n) => n,
            None => panic!("dereferenced empty slot {:?}", r),
        }
    }
}

impl<K> RBTree<K> where K: Ord {
    pub fn new() -> Self {
        RBTree {
            // slot 0 is the sentinel and stays empty forever
            slots: vec![Slot { generation: 0, node: None }],
            free: vec![],
            root: NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Drop every node at once. Handles taken before the call go stale.
    pub fn clear(&mut self) {
        // new slots start past every generation handed out so far
        let next = self.slots.iter().map(|s| s.generation).max().unwrap_or(0) + 1;
        self.slots.truncate(1);
        self.slots[0].generation = next;
        self.free.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Inserts a key and returns a handle to its node. An equal key
    /// already in the tree is kept: the new node goes to its right.
    pub fn insert(&mut self, key: K) -> Handle {
        let z = self.attach(key);
        self.len += 1;
        self.insert_fixup(z);
        debug!("insert: len {}", self.len);
        self.handle(z)
    }

    /// Remove one node holding `key`. Returns false if there was none.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_ok()
    }

    /// Remove one node holding `key` and hand its key back.
    pub fn remove(&mut self, key: &K) -> Result<K, Error> {
        let z = self.find(key);
        if z.is_nil() {
            return Err(Error::NotFound);
        }
        Ok(self.unlink(z))
    }

    /// Remove the node behind `handle`, `None` if the handle is stale.
    pub fn delete_node(&mut self, handle: Handle) -> Option<K> {
        self.resolve(handle).map(|z| self.unlink(z))
    }

    pub fn search(&self, key: &K) -> Option<Handle> {
        self.live(self.find(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        !self.find(key).is_nil()
    }

    pub fn minimum(&self) -> Option<Handle> {
        if self.root.is_nil() {
            return None;
        }
        self.live(self.minimum_from(self.root))
    }

    pub fn maximum(&self) -> Option<Handle> {
        if self.root.is_nil() {
            return None;
        }
        self.live(self.maximum_from(self.root))
    }

    /// In-order successor of a node.
    pub fn successor(&self, handle: Handle) -> Option<Handle> {
        self.resolve(handle).and_then(|x| self.live(self.neighbour(x, Dir::Right)))
    }

    /// In-order predecessor of a node.
    pub fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.resolve(handle).and_then(|x| self.live(self.neighbour(x, Dir::Left)))
    }

    pub fn root(&self) -> Option<Handle> {
        self.live(self.root)
    }

    pub fn left(&self, handle: Handle) -> Option<Handle> {
        self.resolve(handle).and_then(|x| self.live(self[x].left))
    }

    pub fn right(&self, handle: Handle) -> Option<Handle> {
        self.resolve(handle).and_then(|x| self.live(self[x].right))
    }

    pub fn parent(&self, handle: Handle) -> Option<Handle> {
        self.resolve(handle).and_then(|x| self.live(self[x].parent))
    }

    pub fn key(&self, handle: Handle) -> Option<&K> {
        self.resolve(handle).map(|x| &self[x].key)
    }

    pub fn color(&self, handle: Handle) -> Option<Color> {
        self.resolve(handle).map(|x| self[x].color)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![];
        if !self.root.is_nil() {
            stack.push((self.root, 1));
        }
        while let Some((n, depth)) = stack.pop() {
            height = height.max(depth);
            for &c in [self[n].left, self[n].right].iter() {
                if !c.is_nil() {
                    stack.push((c, depth + 1));
                }
            }
        }
        height
    }
}

// ----- Arena and link helpers ----------------------------------------------------
impl<K> RBTree<K> where K: Ord {
    fn alloc(&mut self, node: Node<K>) -> Ref {
        match self.free.pop() {
            Some(i) => {
                self.slots[i].node = Some(node);
                Ref(i)
            }
            None => {
                let generation = self.slots[0].generation;
                self.slots.push(Slot { generation, node: Some(node) });
                Ref(self.slots.len() - 1)
            }
        }
    }

    /// Release a slot that is no longer linked from anywhere.
    fn release(&mut self, r: Ref) -> K {
        let slot = &mut self.slots[r.0];
        slot.generation += 1;
        self.free.push(r.0);
        match slot.node.take() {
            Some(n) => n.key,
            None => panic!("released empty slot {:?}", r),
        }
    }

    fn handle(&self, r: Ref) -> Handle {
        Handle { index: r.0, generation: self.slots[r.0].generation }
    }

    fn live(&self, r: Ref) -> Option<Handle> {
        if r.is_nil() {
            None
        } else {
            Some(self.handle(r))
        }
    }

    fn resolve(&self, handle: Handle) -> Option<Ref> {
        match self.slots.get(handle.index) {
            Some(slot) if handle.index != 0 && slot.generation == handle.generation && slot.node.is_some() => {
                Some(Ref(handle.index))
            }
            _ => None,
        }
    }

    /// Color of any reference, the sentinel included.
    pub(crate) fn color_of(&self, r: Ref) -> Color {
        if r.is_nil() {
            Black
        } else {
            self[r].color
        }
    }

    /// Recolor a node. Painting the sentinel black is a no-op.
    pub(crate) fn paint(&mut self, r: Ref, color: Color) {
        if r.is_nil() {
            debug_assert_eq!(color, Black, "sentinel painted red");
            return;
        }
        self[r].color = color;
    }

    pub(crate) fn child(&self, r: Ref, dir: Dir) -> Ref {
        match dir {
            Dir::Left => self[r].left,
            Dir::Right => self[r].right,
        }
    }

    fn set_child(&mut self, r: Ref, dir: Dir, c: Ref) {
        match dir {
            Dir::Left => self[r].left = c,
            Dir::Right => self[r].right = c,
        }
    }

    /// Which side of `parent` the (possibly sentinel) `child` hangs from.
    pub(crate) fn side(&self, parent: Ref, child: Ref) -> Dir {
        if self[parent].left == child {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    /// Point whatever linked to `old` (root or a child slot of `parent`) at `new`.
    fn relink(&mut self, parent: Ref, old: Ref, new: Ref) {
        if parent.is_nil() {
            self.root = new;
        } else {
            let dir = self.side(parent, old);
            self.set_child(parent, dir, new);
        }
    }

    /// Replace the subtree at `u` by the one at `v`. `u`'s own links are left alone.
    pub(crate) fn transplant(&mut self, u: Ref, v: Ref) {
        let parent = self[u].parent;
        self.relink(parent, u, v);
        if !v.is_nil() {
            self[v].parent = parent;
        }
    }

    /// Rotate around `x`. `Left` promotes `x.right`, `Right` promotes `x.left`.
    pub(crate) fn rotate(&mut self, x: Ref, dir: Dir) {
        let y = self.child(x, dir.opposite());
        debug_assert!(!y.is_nil(), "rotating {:?} without a child to promote", x);
        let inner = self.child(y, dir);
        self.set_child(x, dir.opposite(), inner);
        if !inner.is_nil() {
            self[inner].parent = x;
        }
        let parent = self[x].parent;
        self[y].parent = parent;
        self.relink(parent, x, y);
        self.set_child(y, dir, x);
        self[x].parent = y;
    }

    #[allow(dead_code)]
    pub(crate) fn left_rotate(&mut self, x: Ref) {
        self.rotate(x, Dir::Left)
    }

    #[allow(dead_code)]
    pub(crate) fn right_rotate(&mut self, x: Ref) {
        self.rotate(x, Dir::Right)
    }
}

// ----- Queries ---------------------------------------------------------------------
impl<K> RBTree<K> where K: Ord {
    fn find(&self, key: &K) -> Ref {
        let mut curr = self.root;
        while !curr.is_nil() {
            match key.cmp(&self[curr].key) {
                Equal => break,
                Less => curr = self[curr].left,
                Greater => curr = self[curr].right,
            }
        }
        curr
    }

    pub(crate) fn minimum_from(&self, mut r: Ref) -> Ref {
        while !self[r].left.is_nil() {
            r = self[r].left;
        }
        r
    }

    pub(crate) fn maximum_from(&self, mut r: Ref) -> Ref {
        while !self[r].right.is_nil() {
            r = self[r].right;
        }
        r
    }

    /// In-order neighbour on the `dir` side, `NIL` at either end.
    fn neighbour(&self, mut x: Ref, dir: Dir) -> Ref {
        let c = self.child(x, dir);
        if !c.is_nil() {
            return match dir {
                Dir::Right => self.minimum_from(c),
                Dir::Left => self.maximum_from(c),
            };
        }
        let mut p = self[x].parent;
        while !p.is_nil() && self.child(p, dir) == x {
            x = p;
            p = self[p].parent;
        }
        p
    }
}

// ----- Insert / delete -------------------------------------------------------------
impl<K> RBTree<K> where K: Ord {
    /// Plain BST insert of a red node, no rebalancing.
    pub(crate) fn attach(&mut self, key: K) -> Ref {
        let mut parent = NIL;
        let mut dir = Dir::Left;
        let mut curr = self.root;
        while !curr.is_nil() {
            parent = curr;
            dir = match key.cmp(&self[curr].key) {
                Less => Dir::Left,
                Equal | Greater => Dir::Right,
            };
            curr = self.child(curr, dir);
        }
        let z = self.alloc(Node { key, color: Red, left: NIL, right: NIL, parent });
        if parent.is_nil() {
            self.root = z;
        } else {
            self.set_child(parent, dir, z);
        }
        z
    }

    /// Take `z` out of the tree, rebalance and free its slot.
    fn unlink(&mut self, z: Ref) -> K {
        let mut removed = self[z].color;
        // `x` moves into the position that may now be short of a black
        // node. It can be the sentinel, so its parent is tracked aside.
        let x;
        let x_parent;
        if self[z].left.is_nil() {
            x = self[z].right;
            x_parent = self[z].parent;
            self.transplant(z, x);
        } else if self[z].right.is_nil() {
            x = self[z].left;
            x_parent = self[z].parent;
            self.transplant(z, x);
        } else {
            let y = self.minimum_from(self[z].right);
            removed = self[y].color;
            x = self[y].right;
            if self[y].parent == z {
                x_parent = y;
            } else {
                x_parent = self[y].parent;
                self.transplant(y, x);
                let right = self[z].right;
                self[y].right = right;
                self[right].parent = y;
            }
            self.transplant(z, y);
            let left = self[z].left;
            self[y].left = left;
            self[left].parent = y;
            self[y].color = self[z].color;
        }
        if removed == Black {
            self.delete_fixup(x, x_parent);
        }
        self.len -= 1;
        debug!("delete: len {}", self.len);
        self.release(z)
    }
}

impl<K> Default for RBTree<K> where K: Ord {
    fn default() -> Self {
        RBTree::new()
    }
}

impl<K> Extend<K> for RBTree<K> where K: Ord {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K> FromIterator<K> for RBTree<K> where K: Ord {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K> fmt::Debug for RBTree<K> where K: Ord + fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
