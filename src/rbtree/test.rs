use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::fixup::{DeleteCase, DeleteStep, InsertCase, InsertStep};
use super::Color::*;
use super::{Color, Dir, Handle, Order, RBTree, Ref};
use crate::error::Error;

const SCENARIO: [i32; 8] = [10, 20, 30, 15, 25, 5, 1, 21];

fn scenario() -> RBTree<i32> {
    SCENARIO.iter().cloned().collect()
}

fn keys(tree: &RBTree<i32>, order: Order) -> Vec<i32> {
    tree.traverse(order).cloned().collect()
}

/// Pre-order (key, color) pairs, walked through the public handle API.
fn shape(tree: &RBTree<i32>) -> Vec<(i32, Color)> {
    fn walk(tree: &RBTree<i32>, h: Option<Handle>, acc: &mut Vec<(i32, Color)>) {
        if let Some(h) = h {
            acc.push((*tree.key(h).unwrap(), tree.color(h).unwrap()));
            walk(tree, tree.left(h), acc);
            walk(tree, tree.right(h), acc);
        }
    }
    let mut acc = vec![];
    walk(tree, tree.root(), &mut acc);
    acc
}

/// BST attach without rebalancing, keeping the length in step.
fn attach(tree: &mut RBTree<i32>, key: i32) -> Ref {
    tree.len += 1;
    tree.attach(key)
}

#[test]
fn test_scenario_insert() {
    let tree = scenario();
    assert_eq!(tree.len(), 8);
    let root = tree.root().unwrap();
    assert_eq!(tree.key(root), Some(&20));
    assert_eq!(tree.color(root), Some(Black));
    assert_eq!(keys(&tree, Order::Inorder), vec![1, 5, 10, 15, 20, 21, 25, 30]);
    assert_eq!(
        shape(&tree),
        vec![(20, Black), (10, Red), (5, Black), (1, Red), (15, Black), (25, Black), (21, Red), (30, Red)]
    );
    tree.validate().unwrap();
}

#[test]
fn test_scenario_before_last_insert() {
    let tree: RBTree<i32> = SCENARIO[..7].iter().cloned().collect();
    assert_eq!(tree.color(tree.search(&30).unwrap()), Some(Black));
    assert_eq!(tree.color(tree.search(&25).unwrap()), Some(Red));
    // 21 lands under the red 25 and the outer-child rotation swaps their colors
    let tree = scenario();
    assert_eq!(tree.color(tree.search(&30).unwrap()), Some(Red));
    assert_eq!(tree.color(tree.search(&25).unwrap()), Some(Black));
}

#[test]
fn test_scenario_traversals() {
    let tree = scenario();
    assert_eq!(keys(&tree, Order::Preorder), vec![20, 10, 5, 1, 15, 25, 21, 30]);
    assert_eq!(keys(&tree, Order::Postorder), vec![1, 5, 15, 10, 21, 30, 25, 20]);
    // restartable: a second walk starts over
    assert_eq!(keys(&tree, Order::Preorder), vec![20, 10, 5, 1, 15, 25, 21, 30]);
    assert_eq!((&tree).into_iter().count(), 8);
}

#[test]
fn test_scenario_delete() {
    let mut tree = scenario();
    assert!(tree.delete(&10));
    assert_eq!(keys(&tree, Order::Inorder), vec![1, 5, 15, 20, 21, 25, 30]);
    assert_eq!(
        shape(&tree),
        vec![(20, Black), (5, Red), (1, Black), (15, Black), (25, Black), (21, Red), (30, Red)]
    );
    tree.validate().unwrap();

    // root with two children, successor 21 is not its direct right child
    assert!(tree.delete(&20));
    assert_eq!(
        shape(&tree),
        vec![(21, Black), (5, Red), (1, Black), (15, Black), (25, Black), (30, Red)]
    );
    tree.validate().unwrap();
}

#[test]
fn test_scenario_search_miss() {
    let tree = scenario();
    assert_eq!(tree.search(&99), None);
    assert!(!tree.contains(&99));
    assert!(tree.contains(&21));
}

#[test]
fn test_get() {
    let mut tree = RBTree::new();

    for i in (1..1000).rev() {
        tree.insert(i);
    }

    for i in 1..1000 {
        let h = tree.search(&i).unwrap();
        assert_eq!(tree.key(h), Some(&i));
    }

    assert_eq!(tree.search(&1000), None);
    assert_eq!(tree.key(tree.minimum().unwrap()), Some(&1));
    assert_eq!(tree.key(tree.maximum().unwrap()), Some(&999));
}

#[test]
fn test_empty() {
    let mut tree: RBTree<i32> = RBTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.root(), None);
    assert_eq!(tree.minimum(), None);
    assert_eq!(tree.maximum(), None);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.iter().next(), None);
    assert!(!tree.delete(&1));
    let stats = tree.validate().unwrap();
    assert_eq!(stats.entries(), 0);
    assert_eq!(stats.blacks(), 0);
}

#[test]
fn test_insert_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut tree = RBTree::new();
    let mut oracle = vec![];
    for _ in 0..2000 {
        let k = rng.gen_range(0..500);
        tree.insert(k);
        oracle.push(k);
        tree.validate().unwrap();
    }
    oracle.sort();
    assert_eq!(keys(&tree, Order::Inorder), oracle);
}

#[test]
fn test_remove() {
    let mut tree = RBTree::new();

    for i in (1..1000).rev() {
        tree.insert(i);
    }
    for i in 1..1000 {
        assert_eq!(tree.remove(&i), Ok(i));
    }
    assert!(tree.is_empty());

    let mut rng = StdRng::seed_from_u64(7);
    let mut shuffled = (1..1000).collect::<Vec<_>>();
    shuffled.shuffle(&mut rng);
    for &i in shuffled.iter() {
        tree.insert(i);
    }
    shuffled.shuffle(&mut rng);
    for &i in shuffled.iter() {
        assert_eq!(tree.remove(&i), Ok(i));
        tree.validate().unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn test_delete_matches_survivors() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut all = (0..600).collect::<Vec<i32>>();
    all.shuffle(&mut rng);

    let mut tree: RBTree<i32> = all.iter().cloned().collect();
    let (gone, kept) = all.split_at(250);
    for k in gone.iter() {
        assert!(tree.delete(k));
        tree.validate().unwrap();
    }

    let rebuilt: RBTree<i32> = kept.iter().cloned().collect();
    assert_eq!(tree.len(), rebuilt.len());
    assert_eq!(keys(&tree, Order::Inorder), keys(&rebuilt, Order::Inorder));
    let (a, b) = (tree.validate().unwrap(), rebuilt.validate().unwrap());
    assert_eq!(a.entries(), b.entries());
    for k in gone.iter() {
        assert_eq!(tree.search(k), None);
    }
}

#[test]
fn test_delete_absent() {
    let mut tree = scenario();
    let before = shape(&tree);
    assert!(!tree.delete(&99));
    assert_eq!(tree.remove(&99), Err(Error::NotFound));
    assert_eq!(shape(&tree), before);
    assert_eq!(tree.len(), 8);
}

#[test]
fn test_round_trip() {
    let mut tree = RBTree::new();
    for k in 0..64 {
        let h = tree.insert(k * 3);
        assert_eq!(tree.search(&(k * 3)).map(|s| tree.key(s)), Some(Some(&(k * 3))));
        assert_eq!(tree.key(h), Some(&(k * 3)));
    }
    for k in 0..64 {
        assert!(tree.delete(&(k * 3)));
        assert_eq!(tree.search(&(k * 3)), None);
    }
}

#[test]
fn test_height_bound() {
    for &n in [1usize, 2, 3, 10, 100, 1000, 4095].iter() {
        let asc: RBTree<usize> = (0..n).collect();
        let bound = 2.0 * ((n + 1) as f64).log2();
        assert!(asc.height() as f64 <= bound, "n={} height={}", n, asc.height());
        assert_eq!(asc.validate().unwrap().height(), asc.height());

        let desc: RBTree<usize> = (0..n).rev().collect();
        assert!(desc.height() as f64 <= bound, "n={} height={}", n, desc.height());
    }
}

#[test]
fn test_duplicates() {
    let mut tree = RBTree::new();
    let first = tree.insert(5);
    tree.insert(3);
    let second = tree.insert(5);
    tree.insert(5);
    assert_eq!(tree.len(), 4);
    assert_eq!(keys(&tree, Order::Inorder), vec![3, 5, 5, 5]);
    tree.validate().unwrap();

    assert_eq!(tree.delete_node(second), Some(5));
    assert_eq!(tree.delete_node(second), None);
    assert_eq!(tree.key(first), Some(&5));
    assert!(tree.delete(&5));
    assert_eq!(keys(&tree, Order::Inorder), vec![3, 5]);
    tree.validate().unwrap();
}

#[test]
fn test_stale_handle() {
    let mut tree = RBTree::new();
    let h = tree.insert(1);
    assert!(tree.delete(&1));
    assert_eq!(tree.key(h), None);
    assert_eq!(tree.color(h), None);
    // the freed slot is reused, the old handle must not see the new node
    let h2 = tree.insert(2);
    assert_ne!(h, h2);
    assert_eq!(tree.key(h), None);
    assert_eq!(tree.key(h2), Some(&2));

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.key(h2), None);
    let h3 = tree.insert(3);
    assert_eq!(tree.key(h2), None);
    assert_eq!(tree.key(h3), Some(&3));
    tree.validate().unwrap();
}

#[test]
fn test_neighbours() {
    let tree = scenario();
    let expected = [1, 5, 10, 15, 20, 21, 25, 30];

    let mut h = tree.minimum();
    let mut forward = vec![];
    while let Some(n) = h {
        forward.push(*tree.key(n).unwrap());
        h = tree.successor(n);
    }
    assert_eq!(forward, expected);

    let mut h = tree.maximum();
    let mut backward = vec![];
    while let Some(n) = h {
        backward.push(*tree.key(n).unwrap());
        h = tree.predecessor(n);
    }
    backward.reverse();
    assert_eq!(backward, expected);

    let root = tree.root().unwrap();
    assert_eq!(tree.parent(root), None);
    let left = tree.left(root).unwrap();
    assert_eq!(tree.parent(left), Some(root));
}

#[test]
fn test_rotations() {
    let mut tree: RBTree<i32> = (1..=7).collect();
    let before = shape(&tree);
    let inorder = keys(&tree, Order::Inorder);

    let root = tree.root;
    tree.left_rotate(root);
    assert_eq!(keys(&tree, Order::Inorder), inorder);
    assert_eq!(tree[tree.root].parent, super::NIL);
    assert_eq!(tree[root].parent, tree.root);

    let new_root = tree.root;
    tree.right_rotate(new_root);
    assert_eq!(tree.root, root);
    assert_eq!(shape(&tree), before);
    tree.validate().unwrap();

    // rotating an inner node rewires its parent's child link
    let right = tree[root].right;
    tree.right_rotate(right);
    assert_eq!(keys(&tree, Order::Inorder), inorder);
    assert_eq!(tree[tree[root].right].parent, root);
    assert_eq!(tree[tree[root].right].key, 3);
}

#[test]
fn test_insert_case_uncle_red() {
    let mut tree: RBTree<i32> = vec![10, 5, 15].into_iter().collect();
    let z = attach(&mut tree, 1);
    assert_eq!(tree.insert_case(z), Some((InsertCase::UncleRed, Dir::Left)));
    let root = tree.root;
    assert_eq!(tree.apply_insert_case(z, InsertCase::UncleRed, Dir::Left), InsertStep::Continue(root));
    assert_eq!(tree.insert_case(root), None);
    tree.insert_fixup(root);
    assert_eq!(shape(&tree), vec![(10, Black), (5, Black), (1, Red), (15, Black)]);
    tree.validate().unwrap();
}

#[test]
fn test_insert_case_inner_child() {
    let mut tree: RBTree<i32> = vec![10, 5].into_iter().collect();
    let z = attach(&mut tree, 7);
    assert_eq!(tree.insert_case(z), Some((InsertCase::InnerChild, Dir::Left)));
    let parent = tree[z].parent;
    assert_eq!(tree.apply_insert_case(z, InsertCase::InnerChild, Dir::Left), InsertStep::Continue(parent));
    // the old parent is now the outer grandchild
    assert_eq!(tree.insert_case(parent), Some((InsertCase::OuterChild, Dir::Left)));
    tree.insert_fixup(parent);
    assert_eq!(shape(&tree), vec![(7, Black), (5, Red), (10, Red)]);
    tree.validate().unwrap();

    let mut tree: RBTree<i32> = vec![10, 15].into_iter().collect();
    let z = attach(&mut tree, 12);
    assert_eq!(tree.insert_case(z), Some((InsertCase::InnerChild, Dir::Right)));
}

#[test]
fn test_insert_case_outer_child() {
    let mut tree: RBTree<i32> = vec![10, 15].into_iter().collect();
    let z = attach(&mut tree, 20);
    assert_eq!(tree.insert_case(z), Some((InsertCase::OuterChild, Dir::Right)));
    assert_eq!(tree.apply_insert_case(z, InsertCase::OuterChild, Dir::Right), InsertStep::Done);
    assert_eq!(shape(&tree), vec![(15, Black), (10, Red), (20, Red)]);
    tree.validate().unwrap();
}

#[test]
fn test_delete_cases() {
    let mut tree: RBTree<i32> = vec![10, 5, 15].into_iter().collect();
    let root = tree.root;
    assert_eq!(tree.delete_case(root, Dir::Left), DeleteCase::SiblingRed);

    let (five, fifteen) = (tree.find(&5), tree.find(&15));
    tree.paint(five, Black);
    tree.paint(fifteen, Black);
    assert_eq!(tree.delete_case(root, Dir::Left), DeleteCase::NephewsBlack);
    assert_eq!(tree.delete_case(root, Dir::Right), DeleteCase::NephewsBlack);

    attach(&mut tree, 12);
    assert_eq!(tree.delete_case(root, Dir::Left), DeleteCase::NearNephewRed);
    attach(&mut tree, 17);
    assert_eq!(tree.delete_case(root, Dir::Left), DeleteCase::FarNephewRed);
    tree.validate().unwrap();
}

#[test]
fn test_delete_case_steps() {
    // black sibling, black nephews: the deficiency moves up
    let mut tree: RBTree<i32> = vec![10, 5, 15].into_iter().collect();
    let (root, five, fifteen) = (tree.root, tree.find(&5), tree.find(&15));
    tree.paint(five, Black);
    tree.paint(fifteen, Black);
    let step = tree.apply_delete_case(five, root, Dir::Left, DeleteCase::NephewsBlack);
    assert_eq!(step, DeleteStep::Continue { x: root, parent: super::NIL });
    assert_eq!(tree.color_of(fifteen), Red);

    // red far nephew: one rotation finishes the job
    let mut tree: RBTree<i32> = vec![10, 5, 15].into_iter().collect();
    let (five, fifteen) = (tree.find(&5), tree.find(&15));
    tree.paint(five, Black);
    tree.paint(fifteen, Black);
    attach(&mut tree, 17);
    assert!(tree.delete(&5));
    assert_eq!(shape(&tree), vec![(15, Black), (10, Black), (17, Black)]);
    tree.validate().unwrap();

    // red near nephew is turned into a far one first
    let mut tree: RBTree<i32> = vec![10, 5, 15].into_iter().collect();
    let (five, fifteen) = (tree.find(&5), tree.find(&15));
    tree.paint(five, Black);
    tree.paint(fifteen, Black);
    attach(&mut tree, 12);
    assert!(tree.delete(&5));
    assert_eq!(shape(&tree), vec![(12, Black), (10, Black), (15, Black)]);
    tree.validate().unwrap();
}

#[test]
fn test_validate_detects_violations() {
    let mut tree = scenario();
    let root = tree.root;
    tree.paint(root, Red);
    assert_eq!(tree.validate().unwrap_err(), Error::RootNotBlack);
    tree.paint(root, Black);

    let five = tree.find(&5);
    tree.paint(five, Red);
    assert_eq!(tree.validate().unwrap_err(), Error::ConsecutiveReds("10".to_string()));
    tree.paint(five, Black);

    let thirty = tree.find(&30);
    tree.paint(thirty, Black);
    assert_eq!(tree.validate().unwrap_err(), Error::UnbalancedBlacks(0, 1));
    tree.paint(thirty, Red);

    tree[thirty].key = 0;
    match tree.validate() {
        Err(Error::SortError(_, _)) => (),
        other => panic!("expected sort error, got {:?}", other),
    }
}

#[test]
fn test_print_tree() {
    let tree = scenario();
    let mut out = vec![];
    tree.print_tree(&mut out).unwrap();
    let expected = [
        "├── Node: 20 - Color: black",
        "│   ├── Node: 10 - Color: red",
        "│   │   ├── Node: 5 - Color: black",
        "│   │   │   ├── Node: 1 - Color: red",
        "│   │   └── Node: 15 - Color: black",
        "│   └── Node: 25 - Color: black",
        "│       ├── Node: 21 - Color: red",
        "│       └── Node: 30 - Color: red",
    ];
    assert_eq!(String::from_utf8(out).unwrap(), expected.join("\n") + "\n");
    assert_eq!(format!("{:?}", tree), "{1, 5, 10, 15, 20, 21, 25, 30}");
}

#[test]
#[ignore]
fn test_debug_breadth_print() {
    let mut tree = RBTree::new();

    for i in (1..100).rev() {
        tree.insert(i);
    }
    tree.breadth_first_print(&mut std::io::stdout()).unwrap();
}
