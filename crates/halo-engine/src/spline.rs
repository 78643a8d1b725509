//! Closed Catmull-Rom curve through the numerals of a ring.

use glam::Vec3;

use crate::error::EngineError;

/// Tangent scale of the curve; 0.5 gives the classic Catmull-Rom shape.
const TENSION: f32 = 0.5;

/// Evaluate a closed Catmull-Rom curve through `controls` at `u` in `[0, 1]`.
///
/// Control points wrap, so `u = 0` and `u = 1` both land exactly on the
/// first point.
pub fn catmull_rom_closed(controls: &[Vec3], u: f32) -> Vec3 {
    let n = controls.len();
    if n == 0 {
        return Vec3::ZERO;
    }
    let scaled = u * n as f32;
    let segment = scaled.floor();
    let t = scaled - segment;
    let i1 = (segment as i64).rem_euclid(n as i64) as usize;

    let p0 = controls[(i1 + n - 1) % n];
    let p1 = controls[i1];
    let p2 = controls[(i1 + 1) % n];
    let p3 = controls[(i1 + 2) % n];
    hermite(p0, p1, p2, p3, t)
}

fn hermite(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let v0 = (p2 - p0) * TENSION;
    let v1 = (p3 - p1) * TENSION;

    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p1 * h00 + v0 * h10 + p2 * h01 + v1 * h11
}

/// Fixed-size vertex buffer holding one resampled closed curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveBuffer {
    controls: Vec<Vec3>,
    points: Vec<Vec3>,
    dirty: bool,
}

impl CurveBuffer {
    /// Allocate a buffer of `samples + 1` points.
    pub fn new(samples: usize) -> Result<Self, EngineError> {
        if samples == 0 {
            return Err(EngineError::InvalidSplineSamples);
        }
        Ok(Self {
            controls: Vec::new(),
            points: vec![Vec3::ZERO; samples + 1],
            dirty: false,
        })
    }

    /// Number of curve segments.
    pub fn samples(&self) -> usize {
        self.points.len() - 1
    }

    /// Resampled curve points; the last equals the first.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Control points used by the last rebuild.
    pub fn controls(&self) -> &[Vec3] {
        &self.controls
    }

    /// Whether the points changed since the renderer last took them.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer after uploading the points.
    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }

    /// Rebuild from numeral world positions.
    ///
    /// Each position is pulled toward `center` so only `pull` of its
    /// distance remains, keeping the line just inside the numerals.
    pub fn rebuild(
        &mut self,
        center: Vec3,
        positions: impl IntoIterator<Item = Vec3>,
        pull: f32,
    ) {
        self.controls.clear();
        self.controls
            .extend(positions.into_iter().map(|p| center + (p - center) * pull));

        let samples = self.samples() as f32;
        for (i, point) in self.points.iter_mut().enumerate() {
            *point = catmull_rom_closed(&self.controls, i as f32 / samples);
        }
        self.dirty = true;
    }
}
