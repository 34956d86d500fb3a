//! Backend abstraction for the rendering system
//!
//! Defines the trait a graphics backend must implement for the scene graph
//! to initialize resources and issue draw calls, plus the opaque handles
//! those operations exchange.

use crate::assets::ImageData;
use crate::config::TextureParams;
use crate::foundation::math::Mat4;
use std::fmt;
use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Errors raised by a render backend
#[derive(Debug, Error)]
pub enum RenderError {
    /// A shader stage failed to compile
    #[error("failed to compile {stage} shader: {reason}")]
    CompileFailed {
        /// The stage that failed
        stage: ShaderStage,
        /// Compiler diagnostics
        reason: String,
    },

    /// A shader program failed to link
    #[error("failed to link shader program: {0}")]
    LinkFailed(String),

    /// A texture upload was rejected
    #[error("failed to upload texture: {0}")]
    UploadFailed(String),
}

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Handle to a compiled shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

impl ProgramId {
    /// The fixed-function default program (program 0)
    pub const DEFAULT: ProgramId = ProgramId(0);
}

/// Handle to an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Corner positions of the unit square every quad draw uses, in fan order
pub const QUAD_POSITIONS: [[f32; 2]; 4] = [[-1.0, 1.0], [1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]];

/// Texture coordinates matching [`QUAD_POSITIONS`]
pub const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Graphics backend trait
///
/// Implementations own the underlying graphics context. All calls happen on
/// the thread owning that context; the trait assumes no concurrency.
pub trait RenderBackend {
    /// Compile one shader stage from source text
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> BackendResult<ShaderId>;

    /// Link a vertex/fragment pair into a program
    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> BackendResult<ProgramId>;

    /// Make a program the active one ([`ProgramId::DEFAULT`] deactivates)
    fn use_program(&mut self, program: ProgramId);

    /// Upload decoded RGBA8 pixels as a new texture
    fn create_texture(
        &mut self,
        image: &ImageData,
        params: &TextureParams,
    ) -> BackendResult<TextureId>;

    /// Bind a texture for subsequent draws
    fn bind_texture(&mut self, texture: TextureId);

    /// Unbind a previously bound texture
    fn unbind_texture(&mut self, texture: TextureId);

    /// Draw the unit quad ([`QUAD_POSITIONS`]) under the given world matrix
    fn draw_quad(&mut self, world: &Mat4, texture: Option<TextureId>);
}

/// One recorded backend invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    /// `compile_shader` for the given stage
    CompileShader(ShaderStage),
    /// `link_program` producing the given program
    LinkProgram(ProgramId),
    /// `use_program`
    UseProgram(ProgramId),
    /// `create_texture` producing the given texture
    CreateTexture(TextureId),
    /// `bind_texture`
    BindTexture(TextureId),
    /// `unbind_texture`
    UnbindTexture(TextureId),
    /// `draw_quad` with the texture that was passed
    DrawQuad(Option<TextureId>),
}

/// In-process backend that hands out sequential handles and records calls
///
/// Used by the test suite to assert traversal order and state-stack
/// behavior, and by hosts that want to run a scene without a GPU. Failure
/// injection flags let tests exercise the unready-resource paths.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_shader: u32,
    next_program: u32,
    next_texture: u32,
    calls: Vec<BackendCall>,
    fail_compiles: bool,
    fail_uploads: bool,
}

impl HeadlessBackend {
    /// Create a backend with empty call history
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered list of recorded calls
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Forget recorded calls (handle counters keep advancing)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of quads drawn so far
    pub fn drawn_quads(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::DrawQuad(_)))
            .count()
    }

    /// Make every subsequent `compile_shader` fail
    pub fn set_fail_compiles(&mut self, fail: bool) {
        self.fail_compiles = fail;
    }

    /// Make every subsequent `create_texture` fail
    pub fn set_fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }
}

impl RenderBackend for HeadlessBackend {
    fn compile_shader(&mut self, stage: ShaderStage, _source: &str) -> BackendResult<ShaderId> {
        self.calls.push(BackendCall::CompileShader(stage));
        if self.fail_compiles {
            return Err(RenderError::CompileFailed {
                stage,
                reason: "compilation disabled".to_string(),
            });
        }
        self.next_shader += 1;
        Ok(ShaderId(self.next_shader))
    }

    fn link_program(&mut self, _vertex: ShaderId, _fragment: ShaderId) -> BackendResult<ProgramId> {
        // Program ids start at 1; 0 is reserved for the default program.
        self.next_program += 1;
        let program = ProgramId(self.next_program);
        self.calls.push(BackendCall::LinkProgram(program));
        Ok(program)
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(BackendCall::UseProgram(program));
    }

    fn create_texture(
        &mut self,
        _image: &ImageData,
        _params: &TextureParams,
    ) -> BackendResult<TextureId> {
        if self.fail_uploads {
            return Err(RenderError::UploadFailed("uploads disabled".to_string()));
        }
        self.next_texture += 1;
        let texture = TextureId(self.next_texture);
        self.calls.push(BackendCall::CreateTexture(texture));
        Ok(texture)
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.calls.push(BackendCall::BindTexture(texture));
    }

    fn unbind_texture(&mut self, texture: TextureId) {
        self.calls.push(BackendCall::UnbindTexture(texture));
    }

    fn draw_quad(&mut self, _world: &Mat4, texture: Option<TextureId>) {
        self.calls.push(BackendCall::DrawQuad(texture));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_handles() {
        let mut backend = HeadlessBackend::new();
        let vs = backend
            .compile_shader(ShaderStage::Vertex, "void main() {}")
            .unwrap();
        let fs = backend
            .compile_shader(ShaderStage::Fragment, "void main() {}")
            .unwrap();
        assert_ne!(vs, fs);

        let program = backend.link_program(vs, fs).unwrap();
        assert_ne!(program, ProgramId::DEFAULT);
    }

    #[test]
    fn test_call_recording_order() {
        let mut backend = HeadlessBackend::new();
        let image = ImageData::solid_color(2, 2, [255, 255, 255, 255]);
        let texture = backend
            .create_texture(&image, &TextureParams::default())
            .unwrap();
        backend.bind_texture(texture);
        backend.draw_quad(&Mat4::identity(), Some(texture));
        backend.unbind_texture(texture);

        assert_eq!(
            backend.calls(),
            &[
                BackendCall::CreateTexture(texture),
                BackendCall::BindTexture(texture),
                BackendCall::DrawQuad(Some(texture)),
                BackendCall::UnbindTexture(texture),
            ]
        );
        assert_eq!(backend.drawn_quads(), 1);
    }

    #[test]
    fn test_failure_injection() {
        let mut backend = HeadlessBackend::new();
        backend.set_fail_compiles(true);
        assert!(backend
            .compile_shader(ShaderStage::Vertex, "void main() {}")
            .is_err());

        backend.set_fail_uploads(true);
        let image = ImageData::solid_color(1, 1, [0, 0, 0, 0]);
        assert!(backend
            .create_texture(&image, &TextureParams::default())
            .is_err());
    }
}
