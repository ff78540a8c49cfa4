//! Wavefront OBJ splitting (OBJ -> per-material course models)

mod compact;
mod mtl;
mod partition;
mod reader;
mod types;
mod writer;

// Re-export public API
pub use compact::compact_faces;
pub use partition::partition_group;
pub use reader::{read_obj, SMOOTHING_OFF};
pub use types::{
    CompactedMesh, CoordBounds, Face, GeometryPools, MaterialGroup, ObjScene, VertexRef,
    VERTEX_BUDGET,
};
pub use writer::write_obj;
