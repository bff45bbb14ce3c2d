//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the
//! repository traits defined in the parent module.

mod breaking;
mod car;
mod connection;
mod task;
mod user;
mod weight;

#[cfg(test)]
mod car_test;
#[cfg(test)]
mod connection_test;
#[cfg(test)]
mod user_test;
#[cfg(test)]
mod weight_test;

pub use breaking::SqliteBreakingVehicleRepository;
pub use car::SqliteCarRepository;
pub use connection::SqliteDatabase;
pub use task::SqliteTaskRepository;
pub use user::SqliteUserRepository;
pub use weight::SqliteWeightRepository;
