//! Scene - ordered collection of nodes, masks and gradients
//!
//! Nodes are painted in insertion order. Masks and gradients live beside
//! the nodes and are referenced by handle, the same way SVG keeps them in
//! `<defs>`.

use super::gradient::{GradientId, RadialGradient};
use super::mask::{Mask, MaskId};
use super::primitives::{Paint, Primitive};
use super::transform::{Affine, Rotate};

/// Handle to a node stored in a `Scene`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node entry in the scene
#[derive(Clone, Debug)]
pub struct Node {
    /// Name for logs and SVG ids
    pub name: String,
    /// Geometry in local coordinates
    pub primitive: Primitive,
    /// Fill, stroke and opacity
    pub paint: Paint,
    /// Static local transform, applied before `rotation`
    pub local: Affine,
    /// Absolute rotation about a pivot, replaced on every update
    pub rotation: Rotate,
    /// Optional clipping mask (in scene coordinates, not rotated)
    pub mask: Option<MaskId>,
}

impl Node {
    /// Create a node with no transform and no mask
    pub fn new(name: impl Into<String>, primitive: Primitive, paint: Paint) -> Self {
        Self {
            name: name.into(),
            primitive,
            paint,
            local: Affine::identity(),
            rotation: Rotate::none(),
            mask: None,
        }
    }

    /// Set the static local transform
    pub fn with_local(mut self, local: Affine) -> Self {
        self.local = local;
        self
    }

    /// Clip the node with a mask
    pub fn with_mask(mut self, mask: MaskId) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set the absolute rotation about (cx, cy)
    pub fn rotate(&mut self, angle: f32, cx: f32, cy: f32) {
        self.rotation = Rotate::new(angle, cx, cy);
    }

    /// Full transform from local to scene coordinates
    pub fn world(&self) -> Affine {
        self.local.then_apply(&self.rotation.to_affine())
    }

    /// Center of the primitive in scene coordinates
    pub fn world_center(&self) -> (f32, f32) {
        let (x, y) = self.primitive.center();
        self.world().apply(x, y)
    }
}

/// A scene containing the instrument's nodes
pub struct Scene {
    /// Canvas width in scene units
    width: f32,
    /// Canvas height in scene units
    height: f32,
    /// Nodes in paint order
    nodes: Vec<Node>,
    masks: Vec<Mask>,
    gradients: Vec<RadialGradient>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
            masks: Vec::new(),
            gradients: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Add a node on top of everything added so far
    pub fn add_node(&mut self, node: Node) -> NodeId {
        log::trace!("scene: add {} '{}'", node.primitive.kind(), node.name);
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Register a mask
    pub fn add_mask(&mut self, mask: Mask) -> MaskId {
        self.masks.push(mask);
        MaskId(self.masks.len() - 1)
    }

    /// Register a gradient
    pub fn add_gradient(&mut self, gradient: RadialGradient) -> GradientId {
        self.gradients.push(gradient);
        GradientId(self.gradients.len() - 1)
    }

    /// Get a node
    ///
    /// Ids are only handed out by `add_node` and nodes are never removed,
    /// so an id from this scene always resolves.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable node
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn mask(&self, id: MaskId) -> Option<&Mask> {
        self.masks.get(id.0)
    }

    pub fn gradient(&self, id: GradientId) -> Option<&RadialGradient> {
        self.gradients.get(id.0)
    }

    /// Iterate over nodes in paint order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate over masks with their ids
    pub fn masks(&self) -> impl Iterator<Item = (MaskId, &Mask)> {
        self.masks.iter().enumerate().map(|(i, m)| (MaskId(i), m))
    }

    /// Iterate over gradients with their ids
    pub fn gradients(&self) -> impl Iterator<Item = (GradientId, &RadialGradient)> {
        self.gradients
            .iter()
            .enumerate()
            .map(|(i, g)| (GradientId(i), g))
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if scene is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Paint-order position of a node
    pub fn index_of(&self, id: NodeId) -> usize {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::primitives::Color;

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new(360.0, 360.0);
        assert!(scene.is_empty());
        assert_eq!(scene.width(), 360.0);
    }

    #[test]
    fn test_nodes_keep_paint_order() {
        let mut scene = Scene::new(100.0, 100.0);
        let a = scene.add_node(Node::new(
            "a",
            Primitive::rect(0.0, 0.0, 10.0, 10.0),
            Paint::filled(Color::WHITE),
        ));
        let b = scene.add_node(Node::new(
            "b",
            Primitive::circle(5.0, 5.0, 4.0),
            Paint::filled(Color::BLACK),
        ));
        assert!(scene.index_of(a) < scene.index_of(b));
        let names: Vec<&str> = scene.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_rotation_is_absolute() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = scene.add_node(Node::new(
            "tick",
            Primitive::line(50.0, 0.0, 50.0, 10.0),
            Paint::stroked(Color::WHITE, 1.0),
        ));

        scene.node_mut(id).rotate(30.0, 50.0, 50.0);
        scene.node_mut(id).rotate(30.0, 50.0, 50.0);
        assert_eq!(scene.node(id).rotation.angle, 30.0);
    }

    #[test]
    fn test_world_center_applies_rotation() {
        let mut node = Node::new(
            "tick",
            Primitive::line(50.0, 0.0, 50.0, 10.0),
            Paint::stroked(Color::WHITE, 1.0),
        );
        node.rotate(180.0, 50.0, 50.0);
        let (x, y) = node.world_center();
        assert!((x - 50.0).abs() < 0.001);
        assert!((y - 95.0).abs() < 0.001);
    }

    #[test]
    fn test_masks_and_gradients_resolve() {
        let mut scene = Scene::new(100.0, 100.0);
        let mask = scene.add_mask(Mask::disc(50.0, 50.0, 50.0));
        let gradient = scene.add_gradient(RadialGradient::new(Vec::new()));
        assert!(scene.mask(mask).is_some());
        assert!(scene.gradient(gradient).is_some());
        assert_eq!(scene.masks().count(), 1);
        assert_eq!(scene.gradients().count(), 1);
    }
}
