//! Rings of numerals and their per-element physics state.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use halo_core::{RingKind, TimeFormat};

use crate::error::EngineError;
use crate::noise::NoiseField;
use crate::spring::Spring;

/// Fixed arrangement of numerals on a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingLayout {
    pub kind: RingKind,
    pub format: TimeFormat,
}

impl RingLayout {
    pub fn new(kind: RingKind, format: TimeFormat) -> Self {
        Self { kind, format }
    }

    /// Number of numerals.
    pub fn units(&self) -> usize {
        self.kind.units(self.format)
    }

    /// Numeral shown by the element at `index`.
    pub fn label(&self, index: usize) -> u32 {
        match (self.kind, self.format) {
            (RingKind::Hours, TimeFormat::TwelveHour) => index as u32 + 1,
            _ => index as u32,
        }
    }

    /// Clock position of the element at `index`, in units from 12 o'clock.
    ///
    /// The 12-hour label 12 sits at the top, so its slot is 0.
    pub fn slot(&self, index: usize) -> usize {
        match (self.kind, self.format) {
            (RingKind::Hours, TimeFormat::TwelveHour) => (index + 1) % 12,
            _ => index,
        }
    }

    /// Angle of the element at `index` before any deformation. Numerals
    /// run clockwise starting from the top.
    pub fn initial_angle(&self, index: usize) -> f32 {
        FRAC_PI_2 - (self.slot(index) as f32 / self.units() as f32) * TAU
    }

    /// Group rotation that brings the element at `index` to the top.
    pub fn rotation_for(&self, index: usize) -> f32 {
        (self.slot(index) as f32 / self.units() as f32) * TAU
    }

    /// Offset added to noise coordinates so each ring samples its own
    /// region of the field.
    pub fn noise_offset(&self) -> Vec2 {
        match self.kind {
            RingKind::Seconds => Vec2::ZERO,
            RingKind::Minutes => Vec2::splat(10.0),
            RingKind::Hours => Vec2::splat(20.0),
        }
    }
}

/// Physics state of one numeral.
#[derive(Debug, Clone, PartialEq)]
pub struct RingElement {
    /// Position in the ring, fixed at creation.
    pub index: usize,
    pub label: u32,
    /// Undeformed angle in the ring's rotating frame.
    pub initial_angle: f32,
    pub spring: Spring,
    pub current_offset: f32,
    pub target_offset: f32,
}

impl RingElement {
    pub fn new(index: usize, label: u32, initial_angle: f32) -> Self {
        Self {
            index,
            label,
            initial_angle,
            spring: Spring::default(),
            current_offset: 0.0,
            target_offset: 0.0,
        }
    }

    /// Angle after the push offset is applied.
    pub fn final_angle(&self) -> f32 {
        self.initial_angle + self.current_offset
    }
}

/// One ring of numerals with its own noise field and group rotation.
#[derive(Debug, Clone)]
pub struct Ring {
    layout: RingLayout,
    elements: Vec<RingElement>,
    noise: NoiseField,
    /// Current rotation of the whole ring.
    pub rotation: f32,
}

impl Ring {
    /// Build a ring with every numeral at rest.
    pub fn new(kind: RingKind, format: TimeFormat, noise_seed: u64) -> Result<Self, EngineError> {
        let layout = RingLayout::new(kind, format);
        let elements = (0..layout.units())
            .map(|index| RingElement::new(index, layout.label(index), layout.initial_angle(index)))
            .collect();
        Self::from_elements(layout, elements, NoiseField::new(noise_seed))
    }

    /// Build a ring from existing elements.
    ///
    /// Fails unless there is exactly one element per unit and each element
    /// sits at the position matching its index.
    pub fn from_elements(
        layout: RingLayout,
        elements: Vec<RingElement>,
        noise: NoiseField,
    ) -> Result<Self, EngineError> {
        if elements.len() != layout.units() {
            return Err(EngineError::ElementCount {
                ring: layout.kind,
                expected: layout.units(),
                found: elements.len(),
            });
        }
        if let Some((position, element)) = elements
            .iter()
            .enumerate()
            .find(|(position, element)| element.index != *position)
        {
            return Err(EngineError::IndexMismatch {
                ring: layout.kind,
                position,
                index: element.index,
            });
        }
        Ok(Self {
            layout,
            elements,
            noise,
            rotation: 0.0,
        })
    }

    pub fn kind(&self) -> RingKind {
        self.layout.kind
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn elements(&self) -> &[RingElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [RingElement] {
        &mut self.elements
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }
}
