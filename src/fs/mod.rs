//! Remote filesystem model and operations.

pub(crate) mod node;
mod operations;

pub use node::{Node, NodeKind, FOLDER_MIME_TYPE};
pub use operations::{mirror_tree, RemoteStore};
