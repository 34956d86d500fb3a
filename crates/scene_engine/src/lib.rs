//! # Scene Engine
//!
//! A retained-mode scene graph for OpenGL-style rendering: a tree of
//! transformable nodes, each optionally carrying a renderable payload
//! (textured quad or shader program).
//!
//! ## Features
//!
//! - **Hierarchical Transforms**: World matrices composed up the parent
//!   chain, with lazy recomputation driven by per-node dirty flags
//! - **Renderable Payloads**: Textured quads and shader programs attached
//!   to nodes, with an init/update/draw lifecycle
//! - **Backend Abstraction**: All GPU work goes through the
//!   [`render::RenderBackend`] trait; a headless backend is provided for
//!   tests and offline hosts
//! - **Asset Loading**: RGBA texture decoding and plain-text shader source
//!   loading
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut scene = Scene::new();
//! let quad = scene.spawn_with_payload(
//!     "billboard",
//!     Payload::TexturedQuad(TexturedQuad::new("assets/billboard.png")),
//! );
//! scene.attach(scene.root(), quad).unwrap();
//! scene.set_translation(quad, Vec3::new(0.0, 2.0, 0.0));
//!
//! let mut backend = HeadlessBackend::new();
//! scene.init(&mut backend);
//! scene.update();
//! scene.draw(&mut backend);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData, ShaderSource},
        config::{SceneConfig, ShaderConfig, TextureFilter, TextureParams, TextureWrap},
        foundation::math::{Mat4, Vec3},
        render::{
            HeadlessBackend, ProgramId, RenderBackend, RenderError, ShaderId, ShaderStage,
            TextureId,
        },
        scene::{Node, NodeId, Payload, Scene, SceneError, ShaderProgram, TexturedQuad, Transform},
    };
}
