//! Procedural animation engine for the halo clock.
//!
//! The engine owns three rings of numerals (seconds, minutes, hours). Every
//! frame [`ClockEngine::step`] reads the wall clock, pulses the highlighted
//! numeral with a damped spring, pushes its neighbours aside, rotates the
//! rings, wobbles their radii with coherent noise and threads a closed
//! curve through each ring. Rendering is left to the caller.

mod angle;
mod error;
mod noise;
mod position;
mod push;
mod ring;
mod spline;
mod spring;
mod state;
mod time;

pub use angle::lerp_angle;
pub use error::EngineError;
pub use noise::NoiseField;
pub use position::{dynamic_radius, orbit, to_world};
pub use push::{propagate, push_target, wrapped_diff};
pub use ring::{Ring, RingElement, RingLayout};
pub use spline::{CurveBuffer, catmull_rom_closed};
pub use spring::Spring;
pub use state::{ClockEngine, ElementFrame, FrameOutput, RingFrame};
pub use time::TimeSample;
