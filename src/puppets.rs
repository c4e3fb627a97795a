pub mod puppet_3d;

pub use puppet_3d::{Bone, MeshHandle, MorphMesh, Puppet3d, Skeleton};
