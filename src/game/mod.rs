//! The arcade simulation.
//!
//! A bird falls under gravity and flaps upward on input while trees scroll in
//! from the right. Leaving the surface or hitting a tree ends the session;
//! every tree the bird clears scores a point.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
