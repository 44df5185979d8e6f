use std::error;
use std::fmt;
use std::io;

/// Errors returned by the tree and the record loader.
#[derive(Debug)]
pub enum Error {
    /// Lookup or delete on a key that is not in the tree.
    NotFound,
    /// The root node is red.
    RootNotBlack,
    /// A red node has a red child. Carries the parent's key.
    ConsecutiveReds(String),
    /// Black-height of the left subtree differs from the right one.
    UnbalancedBlacks(usize, usize),
    /// In-order keys out of sort order. The two keys are the mismatching items.
    SortError(String, String),
    /// A child's parent link does not point back to its parent.
    BrokenLink(String),
    /// Tracked length differs from the number of reachable nodes.
    LengthMismatch(usize, usize),
    Io(io::Error),
    /// Malformed loader input, with the 1-based line number.
    Parse { line: usize, text: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NotFound => write!(f, "key not found"),
            Error::RootNotBlack => write!(f, "root node is red"),
            Error::ConsecutiveReds(ref key) => write!(f, "red node {} has a red child", key),
            Error::UnbalancedBlacks(l, r) => {
                write!(f, "unbalanced black height: left {} right {}", l, r)
            }
            Error::SortError(ref a, ref b) => write!(f, "keys out of order: {} before {}", a, b),
            Error::BrokenLink(ref key) => write!(f, "broken parent link at node {}", key),
            Error::LengthMismatch(expected, found) => {
                write!(f, "length mismatch: tracked {} reachable {}", expected, found)
            }
            Error::Io(ref err) => write!(f, "io error: {}", err),
            Error::Parse { line, ref text } => write!(f, "invalid record at line {}: {:?}", line, text),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        use self::Error::*;

        match (self, other) {
            (NotFound, NotFound) => true,
            (RootNotBlack, RootNotBlack) => true,
            (ConsecutiveReds(a), ConsecutiveReds(b)) => a == b,
            (UnbalancedBlacks(a, b), UnbalancedBlacks(c, d)) => a == c && b == d,
            (SortError(a, b), SortError(c, d)) => a == c && b == d,
            (BrokenLink(a), BrokenLink(b)) => a == b,
            (LengthMismatch(a, b), LengthMismatch(c, d)) => a == c && b == d,
            (Parse { line: a, text: b }, Parse { line: c, text: d }) => a == c && b == d,
            _ => false,
        }
    }
}
