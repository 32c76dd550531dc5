//! Remote filesystem operations split into focused modules.

mod browse;
mod mirror;
mod mkdir;
mod upload;

pub use mirror::{mirror_tree, RemoteStore};
