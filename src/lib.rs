//! Simulation core of a vertically scrolling arcade shooter.
//!
//! Everything that decides the game lives in the library:
//!
//! * [`entities`] holds the plain data types and sprite footprints.
//! * [`pool`] recycles short-lived entities through stable handles.
//! * [`combat`] implements movement, fire patterns and hit tests.
//! * [`waves`] owns spawn cadences and difficulty escalation.
//! * [`compute`] drives one fixed-timestep frame through all of it.
//! * [`config`] is the tuning table the rest reads its numbers from.
//!
//! The binary target is a thin crossterm front end. It turns key events into
//! an [`entities::InputState`], calls [`compute::Round::advance_frame`] sixty
//! times a second and draws whatever the round exposes. No rule lives there.

pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod pool;
pub mod waves;
