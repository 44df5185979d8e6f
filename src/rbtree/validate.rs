use std::fmt;

use crate::error::Error;

use super::Color::*;
use super::{RBTree, Ref, NIL};

/// Shape of a tree that passed `validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    entries: usize,
    blacks: usize,
    height: usize,
}

impl Stats {
    /// Number of nodes reached from the root.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Black nodes on every root-to-leaf path, sentinel excluded.
    pub fn blacks(&self) -> usize {
        self.blacks
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Per-subtree result: (blacks, height, entries).
type Walk = (usize, usize, usize);

impl<K> RBTree<K> where K: Ord + fmt::Debug {
    /// Check every red-black and structural invariant. Any error here means
    /// a bug in the tree itself, not bad input.
    pub fn validate(&self) -> Result<Stats, Error> {
        if self.color_of(self.root) == Red {
            return Err(Error::RootNotBlack);
        }
        if !self.root.is_nil() && self[self.root].parent != NIL {
            return Err(Error::BrokenLink(format!("{:?}", self[self.root].key)));
        }

        let mut prev: Option<&K> = None;
        for key in self.iter() {
            if let Some(p) = prev {
                if p > key {
                    return Err(Error::SortError(format!("{:?}", p), format!("{:?}", key)));
                }
            }
            prev = Some(key);
        }

        let (blacks, height, entries) = self.validate_tree(self.root)?;
        if entries != self.len {
            return Err(Error::LengthMismatch(self.len, entries));
        }
        Ok(Stats { entries, blacks, height })
    }

    fn validate_tree(&self, n: Ref) -> Result<Walk, Error> {
        if n.is_nil() {
            return Ok((0, 0, 0));
        }
        let node = &self[n];
        for &c in [node.left, node.right].iter() {
            if c.is_nil() {
                continue;
            }
            if self[c].parent != n {
                return Err(Error::BrokenLink(format!("{:?}", self[c].key)));
            }
            if node.color == Red && self[c].color == Red {
                return Err(Error::ConsecutiveReds(format!("{:?}", node.key)));
            }
        }

        let (lb, lh, le) = self.validate_tree(node.left)?;
        let (rb, rh, re) = self.validate_tree(node.right)?;
        if lb != rb {
            return Err(Error::UnbalancedBlacks(lb, rb));
        }
        let own = if node.color == Black { 1 } else { 0 };
        Ok((lb + own, lh.max(rh) + 1, le + re + 1))
    }
}
