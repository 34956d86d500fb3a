//! Renderable payloads attached to scene nodes
//!
//! A payload participates in the init/update/draw lifecycle of its node.
//! Resource failures are logged and leave the payload in an unready state;
//! the scene keeps traversing and the node keeps drawing without the
//! resource.

use crate::assets::ImageData;
use crate::config::TextureParams;
use crate::foundation::math::Mat4;
use crate::render::{ProgramId, RenderBackend, ShaderId, ShaderStage, TextureId};
use std::path::PathBuf;

/// The renderable payload kinds a node can carry
#[derive(Debug)]
pub enum Payload {
    /// A unit-square quad with an optional texture
    TexturedQuad(TexturedQuad),
    /// A compiled vertex/fragment shader program applied to this subtree
    ShaderProgram(ShaderProgram),
}

impl Payload {
    pub(crate) fn init(&mut self, backend: &mut dyn RenderBackend) {
        match self {
            Payload::TexturedQuad(quad) => quad.init(backend),
            Payload::ShaderProgram(shader) => shader.init(backend),
        }
    }

    /// Per-frame hook; no payload kind currently carries frame state
    pub(crate) fn update(&mut self) {}

    pub(crate) fn draw(&mut self, backend: &mut dyn RenderBackend, world: &Mat4) {
        match self {
            Payload::TexturedQuad(quad) => quad.draw(backend, world),
            // Program activation is handled by the draw traversal so it can
            // bracket the whole subtree.
            Payload::ShaderProgram(_) => {}
        }
    }
}

/// Where a quad's texture pixels come from
#[derive(Debug, Clone)]
pub enum TextureSource {
    /// Decode from an image file on first init
    File(PathBuf),
    /// Use an already decoded image
    Image(ImageData),
}

/// A textured unit-square quad
///
/// Geometry is fixed ([`crate::render::QUAD_POSITIONS`]); use the node's
/// scale to resize. Until init succeeds the quad draws untextured.
#[derive(Debug)]
pub struct TexturedQuad {
    source: Option<TextureSource>,
    params: TextureParams,
    texture: Option<TextureId>,
}

impl TexturedQuad {
    /// Quad textured from an image file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(TextureSource::File(path.into())),
            params: TextureParams::default(),
            texture: None,
        }
    }

    /// Quad textured from an already decoded image
    pub fn from_image(image: ImageData) -> Self {
        Self {
            source: Some(TextureSource::Image(image)),
            params: TextureParams::default(),
            texture: None,
        }
    }

    /// Quad with no texture at all
    pub fn untextured() -> Self {
        Self {
            source: None,
            params: TextureParams::default(),
            texture: None,
        }
    }

    /// Override the default sampling parameters (repeat wrap, linear filter)
    pub fn with_params(mut self, params: TextureParams) -> Self {
        self.params = params;
        self
    }

    /// True once the texture has been uploaded
    pub fn is_ready(&self) -> bool {
        self.texture.is_some()
    }

    /// Handle of the uploaded texture, if ready
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    fn init(&mut self, backend: &mut dyn RenderBackend) {
        if self.texture.is_some() {
            return;
        }
        let image = match &self.source {
            Some(TextureSource::File(path)) => match ImageData::from_file(path) {
                Ok(image) => image,
                Err(err) => {
                    log::error!("failed to load texture {}: {}", path.display(), err);
                    return;
                }
            },
            Some(TextureSource::Image(image)) => image.clone(),
            None => return,
        };
        match backend.create_texture(&image, &self.params) {
            Ok(texture) => {
                log::debug!("uploaded texture {:?}", texture);
                self.texture = Some(texture);
            }
            Err(err) => log::error!("texture upload failed: {}", err),
        }
    }

    fn draw(&self, backend: &mut dyn RenderBackend, world: &Mat4) {
        if let Some(texture) = self.texture {
            backend.bind_texture(texture);
        }
        backend.draw_quad(world, self.texture);
        if let Some(texture) = self.texture {
            backend.unbind_texture(texture);
        }
    }
}

/// A vertex/fragment shader pair compiled and linked on init
///
/// While attached to a node, the linked program is activated for the whole
/// subtree during draw, and descendants without their own shader inherit it
/// through [`crate::scene::Scene::shader_program`]. Compile or link failure
/// is logged; the program stays unready and the node non-functional.
#[derive(Debug)]
pub struct ShaderProgram {
    vertex_source: String,
    fragment_source: String,
    vertex: Option<ShaderId>,
    fragment: Option<ShaderId>,
    program: Option<ProgramId>,
}

impl ShaderProgram {
    /// Shader from in-memory source text
    pub fn new(vertex_source: impl Into<String>, fragment_source: impl Into<String>) -> Self {
        Self {
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
            vertex: None,
            fragment: None,
            program: None,
        }
    }

    /// Shader from a loaded source pair
    pub fn from_source(source: crate::assets::ShaderSource) -> Self {
        Self::new(source.vertex, source.fragment)
    }

    /// True once both stages compiled and the program linked
    pub fn is_ready(&self) -> bool {
        self.program.is_some()
    }

    /// Handle of the linked program, if ready
    pub fn program(&self) -> Option<ProgramId> {
        self.program
    }

    /// Handles of the compiled vertex and fragment stages
    ///
    /// A stage stays `None` when its compilation never ran or failed.
    pub fn stages(&self) -> (Option<ShaderId>, Option<ShaderId>) {
        (self.vertex, self.fragment)
    }

    fn init(&mut self, backend: &mut dyn RenderBackend) {
        if self.program.is_some() {
            return;
        }
        let vertex = match backend.compile_shader(ShaderStage::Vertex, &self.vertex_source) {
            Ok(id) => id,
            Err(err) => {
                log::error!("{}", err);
                return;
            }
        };
        self.vertex = Some(vertex);

        let fragment = match backend.compile_shader(ShaderStage::Fragment, &self.fragment_source) {
            Ok(id) => id,
            Err(err) => {
                log::error!("{}", err);
                return;
            }
        };
        self.fragment = Some(fragment);

        match backend.link_program(vertex, fragment) {
            Ok(program) => {
                log::debug!("linked shader program {:?}", program);
                self.program = Some(program);
            }
            Err(err) => log::error!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BackendCall, HeadlessBackend};

    const VS: &str = "void main() { gl_Position = vec4(0.0); }";
    const FS: &str = "void main() { gl_FragColor = vec4(1.0); }";

    #[test]
    fn test_quad_init_uploads_embedded_image() {
        let mut backend = HeadlessBackend::new();
        let mut quad = TexturedQuad::from_image(ImageData::solid_color(2, 2, [255, 0, 0, 255]));
        assert!(!quad.is_ready());

        quad.init(&mut backend);
        assert!(quad.is_ready());

        // A second init must not upload again.
        quad.init(&mut backend);
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn test_quad_draws_untextured_after_upload_failure() {
        let mut backend = HeadlessBackend::new();
        backend.set_fail_uploads(true);

        let mut quad = TexturedQuad::from_image(ImageData::solid_color(1, 1, [0, 0, 0, 255]));
        quad.init(&mut backend);
        assert!(!quad.is_ready());

        backend.clear_calls();
        quad.draw(&mut backend, &Mat4::identity());
        assert_eq!(backend.calls(), &[BackendCall::DrawQuad(None)]);
    }

    #[test]
    fn test_quad_missing_file_stays_unready() {
        let mut backend = HeadlessBackend::new();
        let mut quad = TexturedQuad::new("no/such/texture.png");
        quad.init(&mut backend);
        assert!(!quad.is_ready());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_shader_links_program() {
        let mut backend = HeadlessBackend::new();
        let mut shader = ShaderProgram::new(VS, FS);
        shader.init(&mut backend);

        assert!(shader.is_ready());
        assert!(matches!(shader.stages(), (Some(_), Some(_))));
        let program = shader.program().unwrap();
        assert_eq!(
            backend.calls(),
            &[
                BackendCall::CompileShader(ShaderStage::Vertex),
                BackendCall::CompileShader(ShaderStage::Fragment),
                BackendCall::LinkProgram(program),
            ]
        );
    }

    #[test]
    fn test_shader_compile_failure_leaves_unready() {
        let mut backend = HeadlessBackend::new();
        backend.set_fail_compiles(true);

        let mut shader = ShaderProgram::new(VS, FS);
        shader.init(&mut backend);
        assert!(!shader.is_ready());
        assert_eq!(shader.program(), None);
        assert_eq!(shader.stages(), (None, None));
    }
}
