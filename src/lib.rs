//! Red-Black Tree ordered container with an arena-backed node store.
//!
//! - `rbtree`: the tree itself, its rotations and the insert/delete fix-ups
//!
//! - `loader`: reads `<key, aux>` records from text and bulk-loads a tree
//!
//! - `error`: the crate's error type

#[macro_use]
extern crate log;

pub mod error;
pub mod loader;
pub mod rbtree;

pub use crate::error::Error;
pub use crate::rbtree::{Color, Handle, Order, RBTree, Stats, Traverse};
