//! Scene graph and hierarchical scene organization.
//!
//! A [`Scene`] is an arena that owns every node, geometry and material built
//! for one mount. Nodes refer to their parent, geometry and material by index,
//! so there are no shared pointers and nothing outlives the scene itself.

use cgmath::{Matrix4, Vector3};

use crate::{
    data_structures::{
        instance::Transform,
        material::{Colour, Material},
    },
    resources::geometry::Geometry,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl GeometryId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// Transform-only container.
    Group,
    Mesh {
        geometry: GeometryId,
        material: MaterialId,
    },
    Points {
        geometry: GeometryId,
        material: MaterialId,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// Linear distance fog: no fog before `near`, fully `colour` after `far`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub colour: Colour,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub colour: Colour,
    pub intensity: f32,
}

/// Omni light whose influence fades to zero at `distance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub colour: Colour,
    pub intensity: f32,
    pub distance: f32,
    pub position: Vector3<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub fog: Fog,
    pub ambient: AmbientLight,
    pub point: PointLight,
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
    materials: Vec<Material>,
}

impl Scene {
    pub fn new(fog: Fog, ambient: AmbientLight, point: PointLight) -> Self {
        Self {
            fog,
            ambient,
            point,
            nodes: Vec::new(),
            geometries: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.push(material.into());
        MaterialId(self.materials.len() - 1)
    }

    fn add_node(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        // Parents always precede their children, which keeps world_matrices a single pass
        debug_assert!(parent.is_none_or(|p| p.0 < self.nodes.len()));
        self.nodes.push(Node {
            name: name.to_string(),
            transform,
            parent,
            kind,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_group(&mut self, name: &str, parent: Option<NodeId>, transform: Transform) -> NodeId {
        self.add_node(name, parent, transform, NodeKind::Group)
    }

    pub fn add_mesh(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        transform: Transform,
        geometry: GeometryId,
        material: MaterialId,
    ) -> NodeId {
        self.add_node(name, parent, transform, NodeKind::Mesh { geometry, material })
    }

    pub fn add_points(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        transform: Transform,
        geometry: GeometryId,
        material: MaterialId,
    ) -> NodeId {
        self.add_node(name, parent, transform, NodeKind::Points { geometry, material })
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn geometry(&self, id: GeometryId) -> &Geometry {
        &self.geometries[id.0]
    }

    pub fn geometries(&self) -> impl Iterator<Item = (GeometryId, &Geometry)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (GeometryId(i), g))
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i), m))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let node = &self.nodes[id.0];
        let local = node.transform.to_matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// World matrices of every node, indexed like the nodes themselves.
    pub fn world_matrices(&self) -> Vec<Matrix4<f32>> {
        let mut worlds: Vec<Matrix4<f32>> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.to_matrix();
            let world = match node.parent {
                Some(parent) => worlds[parent.0] * local,
                None => local,
            };
            worlds.push(world);
        }
        worlds
    }
}

impl Default for Scene {
    fn default() -> Self {
        let black = Colour::BLACK;
        Self::new(
            Fog {
                colour: black,
                near: 1.0,
                far: 1000.0,
            },
            AmbientLight {
                colour: black,
                intensity: 0.0,
            },
            PointLight {
                colour: black,
                intensity: 0.0,
                distance: 0.0,
                position: Vector3::new(0.0, 0.0, 0.0),
            },
        )
    }
}
