//! Scene graph node

use crate::scene::{Payload, Transform};
use std::fmt;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`crate::scene::Scene`] arena
    pub struct NodeId;
}

/// A single node in the scene tree
///
/// Stores a diagnostic name, the parent/child links as arena handles, one
/// local [`Transform`] and an optional renderable [`Payload`]. Nodes are
/// created through the scene and wired into the tree with
/// [`crate::scene::Scene::attach`].
#[derive(Debug)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transform: Transform,
    payload: Option<Payload>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, payload: Option<Payload>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            payload,
        }
    }

    /// Diagnostic name of this node
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle of the parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in draw order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The node's local transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The attached payload, if any
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Attach or replace the payload
    ///
    /// GPU resources held by a replaced payload are not released.
    pub fn set_payload(&mut self, payload: Option<Payload>) {
        self.payload = payload;
    }

    pub(crate) fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    pub(crate) fn payload_mut(&mut self) -> Option<&mut Payload> {
        self.payload.as_mut()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node: {} with ({}) children",
            self.name,
            self.children.len()
        )
    }
}
