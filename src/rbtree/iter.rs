use super::{RBTree, Ref};

/// Depth-first visiting order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Order {
    Inorder,
    Preorder,
    Postorder,
}

/// Lazy depth-first walk over the keys of a tree. Keeps its own stack, so
/// it never recurses; every call to `traverse` starts a fresh walk.
pub struct Traverse<'a, K> where K: Ord {
    tree: &'a RBTree<K>,
    order: Order,
    // (node, expanded): an expanded node is yielded when popped, an
    // unexpanded one gets its children scheduled first
    stack: Vec<(Ref, bool)>,
}

impl<'a, K> Iterator for Traverse<'a, K> where K: Ord {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let tree = self.tree;
        while let Some((n, expanded)) = self.stack.pop() {
            if expanded {
                return Some(&tree[n].key);
            }
            let (left, right) = (tree[n].left, tree[n].right);
            // pushed in reverse: the last one pushed is visited first
            match self.order {
                Order::Preorder => {
                    self.push(right, false);
                    self.push(left, false);
                    self.push(n, true);
                }
                Order::Inorder => {
                    self.push(right, false);
                    self.push(n, true);
                    self.push(left, false);
                }
                Order::Postorder => {
                    self.push(n, true);
                    self.push(right, false);
                    self.push(left, false);
                }
            }
        }
        None
    }
}

impl<'a, K> Traverse<'a, K> where K: Ord {
    fn push(&mut self, n: Ref, expanded: bool) {
        if !n.is_nil() {
            self.stack.push((n, expanded));
        }
    }
}

impl<K> RBTree<K> where K: Ord {
    pub fn traverse(&self, order: Order) -> Traverse<K> {
        let mut walk = Traverse { tree: self, order, stack: vec![] };
        walk.push(self.root, false);
        walk
    }

    /// Keys in sorted order.
    pub fn iter(&self) -> Traverse<K> {
        self.traverse(Order::Inorder)
    }
}

impl<'a, K> IntoIterator for &'a RBTree<K> where K: Ord {
    type Item = &'a K;
    type IntoIter = Traverse<'a, K>;

    fn into_iter(self) -> Traverse<'a, K> {
        self.iter()
    }
}
