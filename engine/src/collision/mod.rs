pub mod aabb;
pub mod colliders;
pub mod resolve;

pub use aabb::{Aabb, ranges_overlap_1d};
pub use colliders::{Collider, Interactions, interaction};
pub use resolve::{Side, resolve_side, snap_out};
