extern crate redblack;
#[macro_use]
extern crate log;
extern crate env_logger;

use std::env;
use std::io::{self, Write};
use std::process;

use redblack::{loader, Error, Order, RBTree};

const DEMO_KEYS: [i64; 8] = [10, 20, 30, 15, 25, 5, 1, 21];
const DEMO_DELETE: i64 = 10;

fn run(path: Option<&String>, deletes: Vec<i64>) -> Result<(), Error> {
    let mut tree: RBTree<i64> = match path {
        Some(path) => loader::load_file(path)?.into_iter().map(|r| r.key).collect(),
        None => DEMO_KEYS.iter().cloned().collect(),
    };
    info!("loaded {} keys", tree.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Tree structure:")?;
    tree.print_tree(&mut out)?;

    for &(name, order) in [("Inorder", Order::Inorder), ("Preorder", Order::Preorder), ("Postorder", Order::Postorder)].iter() {
        let keys: Vec<String> = tree.traverse(order).map(|k| k.to_string()).collect();
        writeln!(out, "\n{} visit:\n{}", name, keys.join(" "))?;
    }

    for key in deletes {
        match tree.remove(&key) {
            Ok(_) => info!("deleted {}", key),
            Err(Error::NotFound) => warn!("key {} not found", key),
            Err(e) => return Err(e),
        }
    }

    let stats = tree.validate()?;
    info!("valid tree: {} entries, black height {}, height {}", stats.entries(), stats.blacks(), stats.height());

    writeln!(out, "\npost-delete:")?;
    tree.print_tree(&mut out)?;
    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        env_logger::Builder::new().parse_filters("info").init();
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let deletes = if args.is_empty() {
        vec![DEMO_DELETE]
    } else {
        let mut deletes = vec![];
        for arg in args[1..].iter() {
            match arg.parse::<i64>() {
                Ok(key) => deletes.push(key),
                Err(_) => {
                    error!("invalid key to delete: {:?}", arg);
                    process::exit(2);
                }
            }
        }
        deletes
    };
    if let Err(e) = run(args.first(), deletes) {
        error!("{}", e);
        process::exit(1);
    }
}
