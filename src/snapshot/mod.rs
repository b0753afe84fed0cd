mod hash;
mod document;

pub use hash::ContentHash;
pub use document::{RawSnapshot, Snapshot};
