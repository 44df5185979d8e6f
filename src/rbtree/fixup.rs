//! Rebalancing after insert and delete.
//!
//! Both fix-ups are loops over a small state machine: a classifier looks at
//! the nodes around the current position and names the case, an applier
//! recolors/rotates and says where to continue. Neither ever recurses.

use super::Color::*;
use super::{Dir, RBTree, Ref};

/// Rebalancing step for a red node `z` whose parent is also red.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum InsertCase {
    /// Uncle is red: push the grandparent's blackness down a level.
    UncleRed,
    /// Uncle is black and `z` is the inner grandchild.
    InnerChild,
    /// Uncle is black and `z` is the outer grandchild.
    OuterChild,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum InsertStep {
    Continue(Ref),
    Done,
}

/// Rebalancing step for a position `x` that is one black node short.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum DeleteCase {
    SiblingRed,
    /// Black sibling with two black children.
    NephewsBlack,
    /// Black sibling, far child black, near child red.
    NearNephewRed,
    /// Black sibling with a red far child.
    FarNephewRed,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum DeleteStep {
    Continue { x: Ref, parent: Ref },
    Done,
}

impl<K> RBTree<K> where K: Ord {
    /// Case for `z`, plus the side its parent hangs from the grandparent.
    /// `None` once the parent is black and nothing is left to fix.
    pub(crate) fn insert_case(&self, z: Ref) -> Option<(InsertCase, Dir)> {
        let parent = self[z].parent;
        if self.color_of(parent) == Black {
            return None;
        }
        // a red parent is never the root, so the grandparent is real
        let grandparent = self[parent].parent;
        let side = self.side(grandparent, parent);
        let uncle = self.child(grandparent, side.opposite());
        let case = if self.color_of(uncle) == Red {
            InsertCase::UncleRed
        } else if self.side(parent, z) != side {
            InsertCase::InnerChild
        } else {
            InsertCase::OuterChild
        };
        Some((case, side))
    }

    pub(crate) fn apply_insert_case(&mut self, z: Ref, case: InsertCase, side: Dir) -> InsertStep {
        let parent = self[z].parent;
        let grandparent = self[parent].parent;
        match case {
            InsertCase::UncleRed => {
                let uncle = self.child(grandparent, side.opposite());
                self.paint(parent, Black);
                self.paint(uncle, Black);
                self.paint(grandparent, Red);
                InsertStep::Continue(grandparent)
            }
            InsertCase::InnerChild => {
                // z moves above its parent, which becomes the outer grandchild
                self.rotate(parent, side);
                InsertStep::Continue(parent)
            }
            InsertCase::OuterChild => {
                self.paint(parent, Black);
                self.paint(grandparent, Red);
                self.rotate(grandparent, side.opposite());
                InsertStep::Done
            }
        }
    }

    pub(crate) fn insert_fixup(&mut self, mut z: Ref) {
        while let Some((case, side)) = self.insert_case(z) {
            trace!("insert fixup: {:?} on {:?} side", case, side);
            match self.apply_insert_case(z, case, side) {
                InsertStep::Continue(next) => z = next,
                InsertStep::Done => break,
            }
        }
        let root = self.root;
        self.paint(root, Black);
    }

    /// Case for the deficient position `x`, hanging on `side` of `parent`.
    pub(crate) fn delete_case(&self, parent: Ref, side: Dir) -> DeleteCase {
        // x is short of a black node, so its sibling cannot be the sentinel
        let sibling = self.child(parent, side.opposite());
        if self.color_of(sibling) == Red {
            return DeleteCase::SiblingRed;
        }
        let near = self.child(sibling, side);
        let far = self.child(sibling, side.opposite());
        if self.color_of(far) == Red {
            DeleteCase::FarNephewRed
        } else if self.color_of(near) == Red {
            DeleteCase::NearNephewRed
        } else {
            DeleteCase::NephewsBlack
        }
    }

    pub(crate) fn apply_delete_case(&mut self, x: Ref, parent: Ref, side: Dir, case: DeleteCase) -> DeleteStep {
        let sibling = self.child(parent, side.opposite());
        match case {
            DeleteCase::SiblingRed => {
                self.paint(sibling, Black);
                self.paint(parent, Red);
                self.rotate(parent, side);
                DeleteStep::Continue { x, parent }
            }
            DeleteCase::NephewsBlack => {
                self.paint(sibling, Red);
                let grandparent = self[parent].parent;
                DeleteStep::Continue { x: parent, parent: grandparent }
            }
            DeleteCase::NearNephewRed => {
                let near = self.child(sibling, side);
                self.paint(near, Black);
                self.paint(sibling, Red);
                self.rotate(sibling, side.opposite());
                DeleteStep::Continue { x, parent }
            }
            DeleteCase::FarNephewRed => {
                let far = self.child(sibling, side.opposite());
                let color = self.color_of(parent);
                self.paint(sibling, color);
                self.paint(parent, Black);
                self.paint(far, Black);
                self.rotate(parent, side);
                DeleteStep::Done
            }
        }
    }

    /// `x` may be the sentinel, which carries no parent link of its own,
    /// hence the explicit `parent`.
    pub(crate) fn delete_fixup(&mut self, mut x: Ref, mut parent: Ref) {
        while x != self.root && self.color_of(x) == Black {
            let side = self.side(parent, x);
            let case = self.delete_case(parent, side);
            trace!("delete fixup: {:?} on {:?} side", case, side);
            match self.apply_delete_case(x, parent, side, case) {
                DeleteStep::Continue { x: next, parent: next_parent } => {
                    x = next;
                    parent = next_parent;
                }
                DeleteStep::Done => {
                    x = self.root;
                    break;
                }
            }
        }
        self.paint(x, Black);
    }
}
