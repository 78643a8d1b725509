//! The per-frame clock engine.

use std::f32::consts::TAU;

use chrono::Timelike;
use glam::{Vec2, Vec3};
use halo_config::Config;
use halo_core::{Rgb, RingKind};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::angle::lerp_angle;
use crate::error::EngineError;
use crate::position::{dynamic_radius, orbit, to_world};
use crate::push;
use crate::ring::Ring;
use crate::spline::CurveBuffer;
use crate::time::TimeSample;

/// Render state of one numeral for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFrame {
    pub index: usize,
    /// Numeral to display.
    pub label: u32,
    /// Orbit radius after noise.
    pub radius: f32,
    /// Angle in the ring frame after the push offset.
    pub angle: f32,
    /// Position in the ring's rotating frame.
    pub position: Vec2,
    /// Position after ring rotation and depth.
    pub world: Vec3,
    /// Own rotation; cancels the ring rotation so glyphs stay upright.
    pub rotation: f32,
    pub scale: f32,
    pub color: Rgb,
    pub highlighted: bool,
}

/// Render state of one ring for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RingFrame {
    pub kind: RingKind,
    /// World-space center of the ring.
    pub center: Vec3,
    /// Rotation of the whole ring.
    pub rotation: f32,
    /// Index of the numeral matching the current time.
    pub highlighted: usize,
    pub elements: Vec<ElementFrame>,
    pub curve: CurveBuffer,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Wall-clock time the frame was computed for.
    pub time: TimeSample,
    /// Seconds, minutes and hours, in that order.
    pub rings: Vec<RingFrame>,
}

impl FrameOutput {
    pub fn ring(&self, kind: RingKind) -> &RingFrame {
        &self.rings[ring_slot(kind)]
    }

    pub fn ring_mut(&mut self, kind: RingKind) -> &mut RingFrame {
        &mut self.rings[ring_slot(kind)]
    }
}

fn ring_slot(kind: RingKind) -> usize {
    match kind {
        RingKind::Seconds => 0,
        RingKind::Minutes => 1,
        RingKind::Hours => 2,
    }
}

/// Owner of all ring state. Drive it by calling [`ClockEngine::step`] once
/// per displayed frame.
#[derive(Debug)]
pub struct ClockEngine {
    config: Config,
    noise_seed: u64,
    rings: Vec<Ring>,
    output: FrameOutput,
}

impl ClockEngine {
    /// Build the three rings with every numeral at rest.
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let config = config.sanitized();
        let noise_seed = config
            .noise_seed
            .map(u64::from)
            .unwrap_or_else(rand::random);
        let seeds = ring_seeds(noise_seed);

        let rings = RingKind::ALL
            .iter()
            .zip(seeds)
            .map(|(&kind, seed)| Ring::new(kind, config.time_format, seed))
            .collect::<Result<Vec<_>, _>>()?;
        let output = FrameOutput {
            time: TimeSample::default(),
            rings: rings
                .iter()
                .map(|ring| rest_frame(ring, &config))
                .collect::<Result<Vec<_>, _>>()?,
        };
        debug!(
            noise_seed,
            time_format = ?config.time_format,
            "clock engine ready"
        );

        Ok(Self {
            config,
            noise_seed,
            rings,
            output,
        })
    }

    /// Replace the configuration snapshot.
    ///
    /// Physics state and noise fields carry over. Switching the time format
    /// rebuilds the hours ring at rest, since its numeral count changes.
    pub fn apply_config(&mut self, config: Config) -> Result<(), EngineError> {
        let config = config.sanitized();

        if config.time_format != self.config.time_format {
            let slot = ring_slot(RingKind::Hours);
            let seed = self.rings[slot].noise().seed();
            let ring = Ring::new(RingKind::Hours, config.time_format, seed)?;
            self.output.rings[slot] = rest_frame(&ring, &config)?;
            self.rings[slot] = ring;
            debug!(time_format = ?config.time_format, "rebuilt hours ring");
        }
        if config.spline.samples != self.config.spline.samples {
            for frame in &mut self.output.rings {
                frame.curve = CurveBuffer::new(config.spline.samples)?;
            }
        }

        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seed the noise fields were derived from.
    pub fn noise_seed(&self) -> u64 {
        self.noise_seed
    }

    pub fn ring(&self, kind: RingKind) -> &Ring {
        &self.rings[ring_slot(kind)]
    }

    /// Output of the most recent frame.
    pub fn output(&self) -> &FrameOutput {
        &self.output
    }

    /// Mutable output, for renderers that clear the curve upload flags.
    pub fn output_mut(&mut self) -> &mut FrameOutput {
        &mut self.output
    }

    /// Advance one frame.
    ///
    /// `dt` is the time since the previous frame and `elapsed` the time
    /// since the animation started, both in seconds. `now` supplies the
    /// time of day.
    pub fn step<T: Timelike>(&mut self, dt: f32, elapsed: f64, now: &T) -> &FrameOutput {
        self.step_sample(dt, elapsed, TimeSample::from_time(now))
    }

    /// Advance one frame from an already sampled time of day.
    pub fn step_sample(&mut self, dt: f32, elapsed: f64, time: TimeSample) -> &FrameOutput {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            debug!(dt, "clamping invalid frame delta to zero");
            0.0
        };
        let elapsed = if elapsed.is_finite() && elapsed >= 0.0 {
            elapsed
        } else {
            debug!(elapsed, "clamping invalid elapsed time to zero");
            0.0
        };

        // Fields are public, so a hand-built sample may be out of range.
        let time = TimeSample::new(time.hour, time.minute, time.second, time.millisecond);

        let config = &self.config;
        self.output.time = time;
        for (ring, frame) in self.rings.iter_mut().zip(&mut self.output.rings) {
            let kind = ring.kind();
            let layout = *ring.layout();
            let ring_config = *config.ring(kind);
            let highlighted = time.highlighted_index(kind, layout.format);
            if highlighted != frame.highlighted {
                trace!(ring = %kind, highlighted, "highlight moved");
            }

            for element in ring.elements_mut() {
                element.spring.target = if element.index == highlighted {
                    config.highlight_scale
                } else {
                    1.0
                };
                element
                    .spring
                    .step(dt, config.spring.stiffness, config.spring.damping);
            }

            push::propagate(
                ring.elements_mut(),
                highlighted,
                &config.push,
                config.smoothing.offset_lerp,
            );

            // Seconds already move continuously; easing them would only add lag.
            ring.rotation = match kind {
                RingKind::Seconds => time.seconds_fraction() / 60.0 * TAU,
                RingKind::Minutes | RingKind::Hours => lerp_angle(
                    ring.rotation,
                    layout.rotation_for(highlighted),
                    config.smoothing.angle_lerp,
                )
                .rem_euclid(TAU),
            };

            frame.center = Vec3::new(0.0, 0.0, ring_config.z);
            frame.rotation = ring.rotation;
            frame.highlighted = highlighted;
            for (element, out) in ring.elements().iter().zip(&mut frame.elements) {
                let radius = dynamic_radius(
                    ring.noise(),
                    element.initial_angle,
                    layout.noise_offset(),
                    elapsed,
                    &ring_config,
                );
                let is_highlighted = element.index == highlighted;
                out.radius = radius;
                out.angle = element.final_angle();
                out.position = orbit(radius, out.angle);
                out.world = to_world(out.position, ring.rotation, frame.center);
                out.rotation = -ring.rotation;
                out.scale = element.spring.current;
                out.highlighted = is_highlighted;
                out.color = if is_highlighted {
                    config.highlight_color
                } else {
                    ring_config.color
                };
            }

            frame.curve.rebuild(
                frame.center,
                frame.elements.iter().map(|element| element.world),
                config.spline.pull,
            );
        }

        &self.output
    }
}

/// Derive one independent seed per ring.
fn ring_seeds(seed: u64) -> [u64; 3] {
    let mut rng = StdRng::seed_from_u64(seed);
    [rng.random(), rng.random(), rng.random()]
}

/// Frame for a ring whose numerals sit undisturbed at their base radius.
fn rest_frame(ring: &Ring, config: &Config) -> Result<RingFrame, EngineError> {
    let ring_config = config.ring(ring.kind());
    let center = Vec3::new(0.0, 0.0, ring_config.z);
    let elements: Vec<ElementFrame> = ring
        .elements()
        .iter()
        .map(|element| {
            let position = orbit(ring_config.radius, element.initial_angle);
            ElementFrame {
                index: element.index,
                label: element.label,
                radius: ring_config.radius,
                angle: element.initial_angle,
                position,
                world: to_world(position, ring.rotation, center),
                rotation: -ring.rotation,
                scale: element.spring.current,
                color: ring_config.color,
                highlighted: false,
            }
        })
        .collect();

    let mut curve = CurveBuffer::new(config.spline.samples)?;
    curve.rebuild(
        center,
        elements.iter().map(|element| element.world),
        config.spline.pull,
    );

    Ok(RingFrame {
        kind: ring.kind(),
        center,
        rotation: ring.rotation,
        highlighted: 0,
        elements,
        curve,
    })
}
