use std::collections::VecDeque;
use std::fmt::Debug;
use std::io::{self, Write};

use super::{RBTree, Ref};

impl<K> RBTree<K> where K: Ord + Debug {
    /// Pre-order dump, one `Node: <key> - Color: <color>` line per node,
    /// drawn as a tree with box connectors.
    pub fn print_tree<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.root.is_nil() {
            return writeln!(out, "Empty tree");
        }
        // (node, prefix, is_left), right pushed before left so left prints first
        let mut stack: Vec<(Ref, String, bool)> = vec![(self.root, String::new(), true)];
        while let Some((n, prefix, is_left)) = stack.pop() {
            let node = &self[n];
            writeln!(out, "{}{}Node: {:?} - Color: {}",
                     prefix, if is_left { "├── " } else { "└── " }, node.key, node.color)?;
            let prefix = prefix + if is_left { "│   " } else { "    " };
            if !node.right.is_nil() {
                stack.push((node.right, prefix.clone(), false));
            }
            if !node.left.is_nil() {
                stack.push((node.left, prefix, true));
            }
        }
        Ok(())
    }

    /// Print keys in breadth first order, one line per height.
    pub fn breadth_first_print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.root.is_nil() {
            return writeln!(out, "Empty tree");
        }
        let mut queue = VecDeque::new();
        queue.push_back(self.root);
        let mut height = 0;
        let mut height_nodes = 1; // tracks how many nodes we still need to pop in this height
        let mut next_height_nodes = 0; // accumulator for the number of nodes on the next height
        while let Some(n) = queue.pop_front() {
            height_nodes -= 1;
            let node = &self[n];
            write!(out, "{:?}:{:?} ", node.key, node.color)?;

            for &c in [node.left, node.right].iter() {
                if !c.is_nil() {
                    next_height_nodes += 1;
                    queue.push_back(c);
                }
            }

            if height_nodes == 0 {
                // finished printing this height
                height += 1;
                height_nodes = next_height_nodes;
                next_height_nodes = 0;
                writeln!(out)?;
            }
        }
        writeln!(out, "Tree has height {}", height)
    }
}
