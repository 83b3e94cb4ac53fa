// src/scene/mod.rs
//! Scene graph: nodes, parent/child attachment and absolute geometry.

pub mod affine;
pub mod graph;
pub mod node;

// Re-export key types for easier use via `crate::scene::X`
pub use affine::Affine;
pub use graph::SceneGraph;
pub use node::{Node, NodeId};
