pub mod camera;
pub mod collision;
pub mod combat;
pub mod elimination;
pub mod enemies;
pub mod physics;
pub mod players;
pub mod timers;

pub use camera::camera_system;
pub use collision::{actor_contact_system, projectile_contact_system, strike_system, terrain_contact_system};
pub use combat::combat_system;
pub use elimination::apply_eliminations;
pub use enemies::{death_system, patrol_system, ranged_attack_system, teleport_system, volley_system, wander_system};
pub use physics::{physics_system, settle_system, terrain_push_system};
pub use players::player_control_system;
pub use timers::timers_system;
