extern crate redblack;
extern crate rand;

use rand::seq::SliceRandom;
use rand::thread_rng;
use redblack::RBTree;
use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

const N: usize = 1_000_000;

fn do_print_duration<F>(what: &str, mut f: F) where F: FnMut() {
    let start = Instant::now();
    f();
    let duration = start.elapsed();
    println!("{}: operation took {}.{:03}s", what, duration.as_secs(), duration.subsec_millis());
}

fn bench_rbtree(keys: &[usize]) {
    let mut t = RBTree::new();

    do_print_duration("rbtree insert", || {
        for &n in keys {
            t.insert(n);
        }
    });
    println!("height: {}", t.height());

    do_print_duration("rbtree search", || {
        for n in keys {
            assert!(t.search(n).is_some());
        }
    });

    do_print_duration("rbtree delete", || {
        for n in keys {
            assert!(t.delete(n));
        }
    });
}

fn bench_btreemap(keys: &[usize]) {
    let mut t = BTreeMap::new();

    do_print_duration("btreemap insert", || {
        for &n in keys {
            t.insert(n, ());
        }
    });

    do_print_duration("btreemap search", || {
        for n in keys {
            assert!(t.get(n).is_some());
        }
    });

    do_print_duration("btreemap delete", || {
        for n in keys {
            assert!(t.remove(n).is_some());
        }
    });
}

fn main() {
    let n = env::args().nth(1).and_then(|s| s.parse::<usize>().ok()).unwrap_or(N);
    let mut keys = (0..n).collect::<Vec<_>>();
    keys.shuffle(&mut thread_rng());
    println!("{} shuffled keys", n);

    bench_rbtree(&keys);
    bench_btreemap(&keys);
}
