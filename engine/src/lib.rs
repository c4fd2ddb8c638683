pub mod actor;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod components;
pub mod config;
pub mod constants;
pub mod controllers;
pub mod cooldown;
pub mod events;
pub mod input;
pub mod level;
pub mod markers;
pub mod profiles;
pub mod projectile;
pub mod resources;
pub mod simulation;
pub mod state;
pub mod systems;
pub mod terrain;

pub use config::SimConfig;
pub use events::SimEvent;
pub use input::{InputState, Key};
pub use level::Level;
pub use simulation::{ActorBlueprint, ActorView, Simulation, TickReport};
