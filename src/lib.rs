//! Damped 2D ripple surface.
//!
//! A scalar wave field advanced with a leapfrog finite-difference step,
//! disturbed by kernel-shaped pokes and colored into an RGB frame each tick.
//! Nothing here knows about windows, terminals or clocks; callers feed
//! [`Command`]s and a millisecond timestamp and pull a [`Frame`].

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod kernel;
pub mod poke;
pub mod scheduler;
pub mod session;
pub mod wave;

pub use color::{ColorMode, Frame, Gradient, Rgb};
pub use config::SimConfig;
pub use error::ConfigError;
pub use field::{Buffers, Field, FieldStats};
pub use kernel::{Kernel, KernelSpec};
pub use poke::{EdgePolicy, PokeSign, PokeStyle};
pub use scheduler::{AutoConfig, AutoEvent, Draws, Scheduler};
pub use session::{Command, Session};
pub use wave::{BoundaryMode, Stencil, WaveParams};
