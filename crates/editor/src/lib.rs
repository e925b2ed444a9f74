// Library crate: the headless editor core, exposed for integration tests and
// embedding scene hosts. Rendering, cameras, and UI chrome stay with the host.

pub mod error;
pub mod fixtures;
pub mod harness;
pub mod path;
pub mod share;
pub mod state;

/// Ray/plane/AABB math used for pointer picking. The host owns the camera
/// and turns pointer coordinates into the rays consumed here.
pub mod viewport {
    pub mod picking;
}
