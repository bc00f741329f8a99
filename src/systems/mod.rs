//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod arena;
pub mod boss;
pub mod collision;
pub mod components;
pub mod difficulty;
pub mod economy;
pub mod enemy;
pub mod formatting;
pub mod input;
pub mod particle;
pub mod player;
pub mod projectile;
pub mod spawn;
pub mod stage;
pub mod weapon;

pub use self::arena::*;
pub use self::boss::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::difficulty::*;
pub use self::economy::*;
pub use self::enemy::*;
pub use self::input::*;
pub use self::particle::*;
pub use self::player::*;
pub use self::projectile::*;
pub use self::spawn::*;
pub use self::stage::*;
pub use self::weapon::*;
