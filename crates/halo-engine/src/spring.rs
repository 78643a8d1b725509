//! Damped spring driving numeral scale.

/// Scale state of one numeral: a mass-1 damped oscillator.
///
/// Integration is explicit Euler with multiplicative damping. No
/// stability clamp is applied: a large `stiffness * dt` with little
/// damping will diverge, so callers pick parameters that stay stable for
/// their frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub current: f32,
    pub velocity: f32,
    pub target: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self::at_rest(1.0)
    }
}

impl Spring {
    /// A spring resting at `value`.
    pub fn at_rest(value: f32) -> Self {
        Self {
            current: value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// A zero `dt` (the first frame) changes nothing. Negative or
    /// non-finite steps are treated as zero.
    pub fn step(&mut self, dt: f32, stiffness: f32, damping: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt == 0.0 {
            return;
        }
        let force = (self.target - self.current) * stiffness;
        self.velocity += force * dt;
        self.velocity *= 1.0 - damping;
        self.current += self.velocity * dt;
    }
}
