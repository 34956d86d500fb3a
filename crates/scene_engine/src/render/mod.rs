//! Rendering abstraction
//!
//! The scene graph never talks to a graphics API directly; every GPU
//! operation goes through the [`RenderBackend`] trait. Real hosts implement
//! it over their GL context, while [`HeadlessBackend`] serves tests and
//! offline use.

mod backend;

pub use backend::{
    BackendCall, BackendResult, HeadlessBackend, ProgramId, RenderBackend, RenderError, ShaderId,
    ShaderStage, TextureId, QUAD_POSITIONS, QUAD_TEX_COORDS,
};
