//! Scene tree, world-matrix composition and lifecycle traversals

use crate::foundation::math::{Mat4, Vec3};
use crate::render::{ProgramId, RenderBackend};
use crate::scene::{Node, NodeId, Payload};
use slotmap::SlotMap;
use thiserror::Error;

/// Errors raised by structural scene operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// A handle did not resolve to a live node
    #[error("unknown node handle")]
    UnknownNode,

    /// A node cannot be attached to itself
    #[error("cannot attach a node to itself")]
    SelfAttach,

    /// The root node never gets a parent
    #[error("the root node cannot be reparented")]
    RootReparent,

    /// Attaching here would make the node its own ancestor
    #[error("attachment would create a cycle")]
    Cycle,
}

/// Explicit draw-traversal state: the active program and matrix stacks
///
/// Replaces the implicit GL push/pop state machine; shader nodes push onto
/// the program stack for the duration of their subtree.
struct DrawContext {
    programs: Vec<ProgramId>,
    matrices: Vec<Mat4>,
}

impl DrawContext {
    fn new() -> Self {
        Self {
            programs: Vec::new(),
            matrices: Vec::new(),
        }
    }

    fn current_program(&self) -> ProgramId {
        self.programs.last().copied().unwrap_or(ProgramId::DEFAULT)
    }

    fn current_matrix(&self) -> Mat4 {
        self.matrices.last().copied().unwrap_or_else(Mat4::identity)
    }
}

/// A scene: an arena of nodes under a single fixed root
///
/// The root is created with the scene and never replaced. All node access
/// goes through [`NodeId`] handles; transform mutation is proxied through
/// the scene so invalidation can reach every descendant.
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene containing only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("root", None));
        Self { nodes, root }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached node with no payload
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(Node::new(name, None))
    }

    /// Create a detached node carrying a payload
    pub fn spawn_with_payload(&mut self, name: impl Into<String>, payload: Payload) -> NodeId {
        self.nodes.insert(Node::new(name, Some(payload)))
    }

    /// Attach or replace the payload on a node
    pub fn set_payload(&mut self, id: NodeId, payload: Option<Payload>) {
        match self.nodes.get_mut(id) {
            Some(node) => node.set_payload(payload),
            None => log::warn!("set_payload on stale node handle"),
        }
    }

    /// Attach `child` under `parent`, reparenting if necessary
    ///
    /// The child is removed from its previous parent's list first, then
    /// appended to the new parent's list (draw order is insertion order).
    /// The moved subtree is invalidated since its parent chain changed.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::SelfAttach);
        }
        if child == self.root {
            return Err(SceneError::RootReparent);
        }
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(SceneError::UnknownNode);
        }
        // Walking up from the new parent must never reach the child.
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(SceneError::Cycle);
            }
            cursor = self.nodes[current].parent();
        }

        if let Some(old_parent) = self.nodes[child].parent() {
            self.nodes[old_parent].children_mut().retain(|c| *c != child);
        }
        self.nodes[parent].children_mut().push(child);
        self.nodes[child].set_parent(Some(parent));
        self.mark_subtree_dirty(child);
        Ok(())
    }

    /// Detach `child` from `parent`
    ///
    /// Returns false when `child` was not in `parent`'s list. The detached
    /// subtree stays in the arena and is invalidated.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let children = parent_node.children_mut();
        let Some(index) = children.iter().position(|c| *c == child) else {
            return false;
        };
        children.remove(index);
        self.nodes[child].set_parent(None);
        self.mark_subtree_dirty(child);
        true
    }

    /// Remove a node and its whole subtree from the arena
    ///
    /// The root cannot be removed. GPU handles held by removed payloads are
    /// not released; they live until the process (or the backend) tears the
    /// context down.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }
        if let Some(parent) = self.nodes[id].parent() {
            self.detach(parent, id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend_from_slice(node.children());
            }
        }
        true
    }

    /// Set per-axis scale on a node, invalidating its subtree
    pub fn set_scale(&mut self, id: NodeId, scale: Vec3) {
        self.mutate_transform(id, |t| t.set_scale(scale));
    }

    /// Set a uniform scale on a node, invalidating its subtree
    pub fn set_uniform_scale(&mut self, id: NodeId, scale: f32) {
        self.mutate_transform(id, |t| t.set_uniform_scale(scale));
    }

    /// Set translation on a node, invalidating its subtree
    pub fn set_translation(&mut self, id: NodeId, translation: Vec3) {
        self.mutate_transform(id, |t| t.set_translation(translation));
    }

    /// Set x/y translation (z = 0) on a node, invalidating its subtree
    pub fn set_translation_xy(&mut self, id: NodeId, x: f32, y: f32) {
        self.mutate_transform(id, |t| t.set_translation_xy(x, y));
    }

    /// Set axis-angle rotation (degrees, unit axis) on a node, invalidating
    /// its subtree
    pub fn set_rotation(&mut self, id: NodeId, degrees: f32, axis: Vec3) {
        self.mutate_transform(id, |t| t.set_rotation(degrees, axis));
    }

    /// Reset a node's transform to defaults, invalidating its subtree
    pub fn reset_transform(&mut self, id: NodeId) {
        self.mutate_transform(id, |t| t.reset());
    }

    fn mutate_transform(&mut self, id: NodeId, f: impl FnOnce(&mut crate::scene::Transform)) {
        match self.nodes.get_mut(id) {
            Some(node) => {
                f(node.transform_mut());
                self.mark_subtree_dirty(id);
            }
            None => log::warn!("transform mutation on stale node handle"),
        }
    }

    /// Mark a node and every descendant as needing recomputation
    ///
    /// Invalidation only travels downward: a node's change can affect its
    /// subtree but never nodes above it.
    fn mark_subtree_dirty(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                node.transform_mut().mark_dirty();
                stack.extend_from_slice(node.children());
            }
        }
    }

    /// World matrix of a node: local transform composed with the parent's
    /// world matrix
    ///
    /// Clean nodes return the cached matrix without touching the parent.
    /// Dirty nodes recompute `parent_world * local`, forcing the parent's
    /// own recomputation if needed, then cache the result.
    pub fn world_matrix(&mut self, id: NodeId) -> Mat4 {
        let (local, parent) = {
            let Some(node) = self.nodes.get(id) else {
                log::warn!("world_matrix on stale node handle");
                return Mat4::identity();
            };
            if !node.transform().is_dirty() {
                return node.transform().cached_world();
            }
            (node.transform().local_matrix(), node.parent())
        };
        let world = match parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        };
        self.nodes[id].transform_mut().store_world(world);
        world
    }

    /// Program applied to a node, inherited up the parent chain
    ///
    /// The nearest ancestor (the node itself included) with a linked shader
    /// payload reports its program; without one this is
    /// [`ProgramId::DEFAULT`].
    pub fn shader_program(&self, id: NodeId) -> ProgramId {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            if let Some(Payload::ShaderProgram(shader)) = node.payload() {
                if let Some(program) = shader.program() {
                    return program;
                }
            }
            cursor = node.parent();
        }
        ProgramId::DEFAULT
    }

    /// Initialization pass: depth-first pre-order from the root
    ///
    /// Caches every node's world matrix and lets payloads acquire GPU
    /// resources. Resource failures are logged by the payloads and are
    /// never fatal.
    pub fn init(&mut self, backend: &mut dyn RenderBackend) {
        self.init_node(self.root, backend);
    }

    fn init_node(&mut self, id: NodeId, backend: &mut dyn RenderBackend) {
        // Forces the initial composition.
        self.world_matrix(id);
        if let Some(payload) = self.nodes[id].payload_mut() {
            payload.init(backend);
        }
        let children = self.nodes[id].children().to_vec();
        for child in children {
            self.init_node(child, backend);
        }
    }

    /// Per-frame update pass: depth-first pre-order from the root
    pub fn update(&mut self) {
        self.update_node(self.root);
    }

    fn update_node(&mut self, id: NodeId) {
        if let Some(payload) = self.nodes[id].payload_mut() {
            payload.update();
        }
        let children = self.nodes[id].children().to_vec();
        for child in children {
            self.update_node(child);
        }
    }

    /// Draw pass: depth-first pre-order from the root
    ///
    /// Each node draws under its own world matrix; shader nodes activate
    /// their program before their subtree and restore the enclosing one
    /// afterwards, so nested shaders override only their own subtree.
    pub fn draw(&mut self, backend: &mut dyn RenderBackend) {
        let mut ctx = DrawContext::new();
        self.draw_node(self.root, backend, &mut ctx);
    }

    fn draw_node(&mut self, id: NodeId, backend: &mut dyn RenderBackend, ctx: &mut DrawContext) {
        let world = self.world_matrix(id);

        let activated = match self.nodes[id].payload() {
            Some(Payload::ShaderProgram(shader)) => shader.program(),
            _ => None,
        };
        if let Some(program) = activated {
            backend.use_program(program);
            ctx.programs.push(program);
        }
        ctx.matrices.push(world);

        let matrix = ctx.current_matrix();
        if let Some(payload) = self.nodes[id].payload_mut() {
            payload.draw(backend, &matrix);
        }

        let children = self.nodes[id].children().to_vec();
        for child in children {
            self.draw_node(child, backend, ctx);
        }

        ctx.matrices.pop();
        if activated.is_some() {
            ctx.programs.pop();
            backend.use_program(ctx.current_program());
        }
    }
}
