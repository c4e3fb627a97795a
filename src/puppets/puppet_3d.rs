use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::model::viseme;
use crate::Logger;

/// Handle to a mesh registered with a [`Puppet3d`].
///
/// Embedders hold on to these and read the weight buffers back through
/// [`Puppet3d::mesh`] after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHandle(pub(crate) usize);

/// A skinned mesh with morph targets.
///
/// Each mesh owns its own shape-name table and weight buffer; the same
/// shape name may sit at a different index on every mesh, so writes
/// always go through the table.
#[derive(Debug, Clone)]
pub struct MorphMesh {
    /// Node name of the mesh, e.g. `Wolf3D_Head`.
    pub name: String,
    shape_index: HashMap<String, usize>,
    weights: Vec<f32>,
}

impl MorphMesh {
    /// Creates a mesh from its shape-name table and influence count.
    ///
    /// `weight_count` is the length of the mesh's influence array,
    /// which can exceed the number of named shapes.
    pub fn new(
        name: impl Into<String>,
        shape_index: HashMap<String, usize>,
        weight_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            shape_index,
            weights: vec![0.0; weight_count],
        }
    }

    /// The mesh's full influence array, indexed per its own table.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The current weight of a named shape, if the mesh has it.
    pub fn weight(&self, shape: &str) -> Option<f32> {
        self.shape_index
            .get(shape)
            .and_then(|i| self.weights.get(*i))
            .copied()
    }

    /// Writes a named shape's weight. Meshes without the shape (or with
    /// a table entry pointing past the buffer) ignore the write rather
    /// than poisoning the frame.
    fn set(&mut self, shape: &str, value: f32) {
        if let Some(&i) = self.shape_index.get(shape) {
            if let Some(w) = self.weights.get_mut(i) {
                *w = value;
            }
        }
    }
}

/// A named skeletal node with a local pose.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
}

impl Bone {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// A flat list of named bones.
///
/// Just enough skeleton for pose writes; hierarchy and skinning live in
/// the host engine.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new(bones: Vec<Bone>) -> Self {
        Self { bones }
    }

    pub fn add_bone(&mut self, bone: Bone) -> usize {
        self.bones.push(bone);
        self.bones.len() - 1
    }

    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    pub fn bone(&self, id: usize) -> Option<&Bone> {
        self.bones.get(id)
    }

    pub fn bone_pose_rotation(&self, id: usize) -> Option<Quat> {
        self.bones.get(id).map(|b| b.rotation)
    }

    pub fn set_bone_pose_rotation(&mut self, id: usize, rotation: Quat) {
        if let Some(bone) = self.bones.get_mut(id) {
            bone.rotation = rotation;
        }
    }
}

/// A 3D avatar puppet: the morph-bearing meshes plus the skeleton they
/// hang off of.
#[derive(Debug)]
pub struct Puppet3d {
    logger: Logger,

    /// The skeleton of the puppet.
    pub skeleton: Skeleton,
    /// The index of the head bone in the skeleton.
    head_bone_id: Option<usize>,

    meshes: Vec<MorphMesh>,
}

impl Puppet3d {
    /// Builds a puppet around a skeleton, resolving the head bone once.
    ///
    /// A missing head bone is logged and tolerated; the puppet then
    /// animates everything except the gaze.
    pub fn new(skeleton: Skeleton, head_bone: &str) -> Self {
        let logger = Logger::create("Puppet3d");

        let head_bone_id = skeleton.find_bone(head_bone);
        if head_bone_id.is_none() {
            logger.error("No head bone found!");
        }

        Self {
            logger,
            skeleton,
            head_bone_id,
            meshes: Vec::new(),
        }
    }

    /// Registers a morph mesh and returns its handle.
    pub fn register_mesh(&mut self, mesh: MorphMesh) -> MeshHandle {
        self.logger
            .debug(format!("Registering morph mesh {}", mesh.name));

        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MorphMesh> {
        self.meshes.get(handle.0)
    }

    pub fn meshes(&self) -> &[MorphMesh] {
        &self.meshes
    }

    /// Puts the puppet into its rest presentation.
    ///
    /// Called once after every mesh is registered, before playback
    /// starts; the first tick overwrites the shape as soon as real cue
    /// data arrives.
    pub fn ready(&mut self, initial_shape: Option<&str>) {
        self.logger.debug("Starting ready!");

        if initial_shape.is_some() {
            self.apply_mouth_shape(initial_shape);
        }
    }

    /// Applies `shape` as the only active mouth shape.
    ///
    /// Every managed weight on every mesh is cleared first so the
    /// previous frame's shape can never stick, then the active shape is
    /// set to full weight wherever a mesh indexes it. Weights are
    /// binary, exactly zero or one per shape per frame.
    pub fn apply_mouth_shape(&mut self, shape: Option<&str>) {
        for mesh in &mut self.meshes {
            for managed in viseme::managed_shapes() {
                mesh.set(managed, 0.0);
            }
        }

        if let Some(shape) = shape {
            for mesh in &mut self.meshes {
                mesh.set(shape, 1.0);
            }
        }
    }

    /// Points the head bone's local forward (+Z) axis at `target`.
    ///
    /// Snap orientation, recomputed every frame after the body
    /// animation has posed the skeleton. A target sitting exactly on
    /// the bone leaves the pose untouched.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(id) = self.head_bone_id else {
            return;
        };
        let Some(bone) = self.skeleton.bone(id) else {
            return;
        };

        let direction = target - bone.position;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }

        let rotation = Quat::from_rotation_arc(Vec3::Z, direction.normalize());
        self.skeleton.set_bone_pose_rotation(id, rotation);
    }

    pub fn has_head_bone(&self) -> bool {
        self.head_bone_id.is_some()
    }
}
