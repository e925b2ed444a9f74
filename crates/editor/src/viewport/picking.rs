//! Ray math for pointer interaction: gate hit-testing and ground projection.
//!
//! The scene host owns the camera and converts pointer coordinates into
//! world-space rays; everything here works on those rays.

use glam::DVec3;

use crate::state::scene::{Gate, GateId};

/// Horizontal grid resolution gates snap to while dragged
pub const GRID_RESOLUTION: f64 = 0.5;

/// A ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Vertical ray pointing straight down over a ground position.
    /// Convenient for tests and scripted input.
    pub fn downward(x: f64, z: f64) -> Self {
        Self {
            origin: DVec3::new(x, 50.0, z),
            direction: DVec3::NEG_Y,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}

/// Bounding box of a placed gate, widened for its yaw so a rotated frame
/// stays pickable without per-triangle tests.
pub fn gate_aabb(gate: &Gate) -> Aabb {
    let (w, h, d) = gate.kind.dimensions();
    let (sin, cos) = gate.yaw.sin_cos();
    let half_x = (w * cos.abs() + d * sin.abs()) * 0.5;
    let half_z = (w * sin.abs() + d * cos.abs()) * 0.5;
    Aabb {
        min: DVec3::new(
            gate.position.x - half_x,
            gate.position.y,
            gate.position.z - half_z,
        ),
        max: DVec3::new(
            gate.position.x + half_x,
            gate.position.y + h,
            gate.position.z + half_z,
        ),
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f64> {
    let inv_dir = DVec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the gate nearest along the ray, if any
pub fn pick_gate(ray: &Ray, gates: &[Gate]) -> Option<GateId> {
    let mut best: Option<(GateId, f64)> = None;

    for gate in gates {
        if let Some(dist) = ray_aabb(ray, &gate_aabb(gate)) {
            if best.as_ref().is_none_or(|(_, d)| dist < *d) {
                best = Some((gate.id.clone(), dist));
            }
        }
    }

    best.map(|(id, _)| id)
}

/// Intersect the ray with the horizontal plane at `height`.
/// Returns the hit point, or None when the ray runs parallel to the plane
/// or the plane lies behind the origin.
pub fn ray_ground(ray: &Ray, height: f64) -> Option<DVec3> {
    if ray.direction.y.abs() < 1e-9 {
        return None;
    }
    let t = (height - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }
    Some(ray.origin + ray.direction * t)
}

/// Snap a coordinate to the drag grid
pub fn snap_to_grid(value: f64) -> f64 {
    (value / GRID_RESOLUTION).round() * GRID_RESOLUTION
}
