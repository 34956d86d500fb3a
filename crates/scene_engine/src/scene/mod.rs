//! Retained-mode scene graph
//!
//! A [`Scene`] owns an arena of [`Node`]s addressed by stable [`NodeId`]
//! handles. Each node carries a local [`Transform`], an ordered child list
//! (insertion order is draw order) and an optional renderable [`Payload`].
//! World matrices are composed lazily up the parent chain and cached behind
//! per-node dirty flags.

mod graph;
mod node;
mod payload;
mod transform;

pub use graph::{Scene, SceneError};
pub use node::{Node, NodeId};
pub use payload::{Payload, ShaderProgram, TexturedQuad, TextureSource};
pub use transform::Transform;
