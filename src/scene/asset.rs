//! Parsed GLTF asset, retained as a flat node graph.
//!
//! The viewport keeps one of these alive per page and writes animated
//! local transforms back into it every frame, so the graph is stored in
//! mutable flattened form rather than walked through the `gltf` document
//! on each use.

use anyhow::{bail, Context, Result};
use glam::{Mat4, Quat, Vec3};
use std::collections::VecDeque;
use std::path::Path;

use crate::math::Aabb;

/// Index of a node inside a [`ParkAsset`]. Resolved once by name and then
/// used for every per-frame transform write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    /// Position of the node in the asset's node list, usable as an index
    /// into [`ParkAsset::global_transforms`] output.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the flattened scene graph, local TRS decomposed so a
/// single channel (rotation or translation) can be animated in place.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: Option<String>,
    pub parent: Option<usize>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub mesh: Option<usize>,
    pub camera: Option<usize>,
}

/// Triangle geometry of one GLTF primitive, flattened to what the
/// viewport uploads: positions, normals, indices and a base color.
#[derive(Debug, Clone)]
pub struct MeshPrimitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: Option<String>,
    pub primitives: Vec<MeshPrimitive>,
}

/// Perspective parameters of a camera embedded in the asset. The vertical
/// field of view is overridden per page, so only near/far survive as-is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EmbeddedCamera {
    pub yfov: f32,
    pub znear: f32,
    pub zfar: Option<f32>,
}

/// A self-contained exhibit scene loaded from a `.glb`/`.gltf` file.
#[derive(Debug)]
pub struct ParkAsset {
    label: String,
    nodes: Vec<SceneNode>,
    meshes: Vec<MeshData>,
    /// Indexed by GLTF camera index; None for non-perspective cameras.
    cameras: Vec<Option<EmbeddedCamera>>,
    /// Node indices in parent-before-child order.
    visit_order: Vec<usize>,
    /// First node (in visit order) that references a perspective camera.
    camera_node: Option<usize>,
}

impl ParkAsset {
    /// Load an asset from disk. Used by tools and tests; the viewer itself
    /// goes through [`crate::scene::loader`] for progress reporting.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let (document, buffers, _images) = gltf::import(path)
            .with_context(|| format!("failed to load GLTF asset {:?}", path))?;
        Self::from_document(label, &document, &buffers)
    }

    /// Parse an already-read asset. The bytes must be self-contained
    /// (`.glb`, or `.gltf` with data-URI buffers); external `.bin`
    /// references cannot be resolved from a slice.
    pub fn from_slice(label: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let label = label.into();
        let (document, buffers, _images) = gltf::import_slice(bytes)
            .with_context(|| format!("failed to parse GLTF asset {label:?}"))?;
        Self::from_document(label, &document, &buffers)
    }

    fn from_document(
        label: String,
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
    ) -> Result<Self> {
        let mut nodes = Vec::with_capacity(document.nodes().count());
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); document.nodes().count()];

        for node in document.nodes() {
            let (translation, rotation, scale) = node.transform().decomposed();
            nodes.push(SceneNode {
                name: node.name().map(str::to_owned),
                parent: None,
                translation: Vec3::from_array(translation),
                rotation: Quat::from_array(rotation),
                scale: Vec3::from_array(scale),
                mesh: node.mesh().map(|mesh| mesh.index()),
                camera: node.camera().map(|camera| camera.index()),
            });
            for child in node.children() {
                children[node.index()].push(child.index());
            }
        }
        for (parent, child_list) in children.iter().enumerate() {
            for &child in child_list {
                nodes[child].parent = Some(parent);
            }
        }

        let visit_order = breadth_first_order(document, &children, nodes.len());

        let meshes = document
            .meshes()
            .map(|mesh| read_mesh(&mesh, buffers))
            .collect::<Result<Vec<_>>>()?;

        let cameras: Vec<Option<EmbeddedCamera>> = document
            .cameras()
            .map(|camera| match camera.projection() {
                gltf::camera::Projection::Perspective(persp) => Some(EmbeddedCamera {
                    yfov: persp.yfov(),
                    znear: persp.znear(),
                    zfar: persp.zfar(),
                }),
                gltf::camera::Projection::Orthographic(_) => None,
            })
            .collect();

        let camera_node = visit_order
            .iter()
            .copied()
            .find(|&index| {
                nodes[index]
                    .camera
                    .and_then(|cam| cameras.get(cam).copied().flatten())
                    .is_some()
            });

        if meshes.is_empty() {
            bail!("asset {label:?} contains no mesh geometry");
        }

        Ok(Self {
            label,
            nodes,
            meshes,
            cameras,
            visit_order,
            camera_node,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes
            .iter()
            .flat_map(|mesh| &mesh.primitives)
            .map(|prim| prim.indices.len() / 3)
            .sum()
    }

    /// Look up a node by exact name match.
    pub fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .position(|node| node.name.as_deref() == Some(name))
            .map(NodeHandle)
    }

    pub fn node(&self, handle: NodeHandle) -> &SceneNode {
        &self.nodes[handle.0]
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    /// Local translation and rotation of a node, as currently animated.
    pub fn local_trs(&self, handle: NodeHandle) -> (Vec3, Quat, Vec3) {
        let node = &self.nodes[handle.0];
        (node.translation, node.rotation, node.scale)
    }

    pub fn set_local_rotation(&mut self, handle: NodeHandle, rotation: Quat) {
        self.nodes[handle.0].rotation = rotation;
    }

    pub fn set_local_translation(&mut self, handle: NodeHandle, translation: Vec3) {
        self.nodes[handle.0].translation = translation;
    }

    /// The asset's active camera: its perspective parameters and the node
    /// carrying it. The first camera in scene order wins.
    pub fn camera(&self) -> Option<(EmbeddedCamera, NodeHandle)> {
        let index = self.camera_node?;
        let camera = self.nodes[index]
            .camera
            .and_then(|cam| self.cameras.get(cam).copied().flatten())?;
        Some((camera, NodeHandle(index)))
    }

    /// Global transform of every node, parents resolved before children.
    pub fn global_transforms(&self) -> Vec<Mat4> {
        let mut transforms = vec![Mat4::IDENTITY; self.nodes.len()];
        for &index in &self.visit_order {
            let node = &self.nodes[index];
            let local =
                Mat4::from_scale_rotation_translation(node.scale, node.rotation, node.translation);
            transforms[index] = match node.parent {
                Some(parent) => transforms[parent] * local,
                None => local,
            };
        }
        transforms
    }

    /// World-space bounds of all mesh geometry under the given global
    /// transforms.
    pub fn bounds(&self, transforms: &[Mat4]) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        for (index, node) in self.nodes.iter().enumerate() {
            let Some(mesh) = node.mesh else { continue };
            let transform = transforms[index];
            for primitive in &self.meshes[mesh].primitives {
                for position in &primitive.positions {
                    bounds.grow(transform.transform_point3(Vec3::from_array(*position)));
                }
            }
        }
        bounds
    }
}

/// Parent-before-child node order, breadth-first from the scene roots.
/// Nodes outside every scene are appended last as detached roots so that
/// transform propagation stays total.
fn breadth_first_order(
    document: &gltf::Document,
    children: &[Vec<usize>],
    node_count: usize,
) -> Vec<usize> {
    let mut order = Vec::with_capacity(node_count);
    let mut visited = vec![false; node_count];
    let mut queue = VecDeque::new();

    for scene in document.scenes() {
        for root in scene.nodes() {
            queue.push_back(root.index());
        }
    }

    while let Some(index) = queue.pop_front() {
        if visited[index] {
            continue;
        }
        visited[index] = true;
        order.push(index);
        queue.extend(children[index].iter().copied());
    }

    for index in 0..node_count {
        if !visited[index] {
            order.push(index);
        }
    }

    order
}

fn read_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Result<MeshData> {
    let mut primitives = Vec::new();

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .with_context(|| format!("mesh {:?} primitive has no positions", mesh.name()))?
            .collect();
        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            // Non-indexed primitives are already a triangle list.
            None => (0..positions.len() as u32).collect(),
        };

        let normals: Vec<[f32; 3]> = match reader.read_normals() {
            Some(normals) => normals.collect(),
            None => flat_normals(&positions, &indices),
        };

        let base_color = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();

        primitives.push(MeshPrimitive {
            positions,
            normals,
            indices,
            base_color,
        });
    }

    Ok(MeshData {
        name: mesh.name().map(str::to_owned),
        primitives,
    })
}

/// Per-vertex normals for primitives that ship without them: accumulate
/// face normals, then normalize. Degenerate triangles contribute nothing.
fn flat_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks(3) {
        if triangle.len() < 3 {
            continue;
        }
        let v0 = Vec3::from_array(positions[triangle[0] as usize]);
        let v1 = Vec3::from_array(positions[triangle[1] as usize]);
        let v2 = Vec3::from_array(positions[triangle[2] as usize]);
        let face = (v1 - v0).cross(v2 - v0);
        for &vertex in triangle {
            accumulated[vertex as usize] += face;
        }
    }

    accumulated
        .into_iter()
        .map(|normal| normal.normalize_or(Vec3::Y).to_array())
        .collect()
}
