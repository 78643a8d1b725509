//! Named color presets for the three rings.

use crate::{Rgb, RingKind};

/// Color preset applied to the ring base colors and the highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Classic,
    Ember,
    Ocean,
    Forest,
    Mono,
}

impl Palette {
    /// Every palette, in cycling order.
    pub const ALL: [Palette; 5] = [
        Palette::Classic,
        Palette::Ember,
        Palette::Ocean,
        Palette::Forest,
        Palette::Mono,
    ];

    /// The palette whose ring and highlight colors are exactly these, if any.
    pub fn matching(rings: [Rgb; 3], highlight: Rgb) -> Option<Self> {
        Self::ALL.into_iter().find(|palette| {
            palette.highlight() == highlight
                && RingKind::ALL
                    .iter()
                    .zip(rings)
                    .all(|(&kind, color)| palette.ring_color(kind) == color)
        })
    }

    /// Cycle to the next palette.
    pub fn next(&self) -> Self {
        match self {
            Palette::Classic => Palette::Ember,
            Palette::Ember => Palette::Ocean,
            Palette::Ocean => Palette::Forest,
            Palette::Forest => Palette::Mono,
            Palette::Mono => Palette::Classic,
        }
    }

    /// Base color for a ring.
    pub fn ring_color(self, kind: RingKind) -> Rgb {
        let hex = match (self, kind) {
            (Palette::Classic, RingKind::Seconds) => 0xffffff,
            (Palette::Classic, RingKind::Minutes) => 0xaaaaff,
            (Palette::Classic, RingKind::Hours) => 0xffffaa,
            (Palette::Ember, RingKind::Seconds) => 0xffd8b0,
            (Palette::Ember, RingKind::Minutes) => 0xff9a5c,
            (Palette::Ember, RingKind::Hours) => 0xd9482b,
            (Palette::Ocean, RingKind::Seconds) => 0xc8f0ff,
            (Palette::Ocean, RingKind::Minutes) => 0x5cc8ff,
            (Palette::Ocean, RingKind::Hours) => 0x2a6fdb,
            (Palette::Forest, RingKind::Seconds) => 0xd8ffd0,
            (Palette::Forest, RingKind::Minutes) => 0x7ad66b,
            (Palette::Forest, RingKind::Hours) => 0x2e8b57,
            (Palette::Mono, RingKind::Seconds) => 0xf0f0f0,
            (Palette::Mono, RingKind::Minutes) => 0xb0b0b0,
            (Palette::Mono, RingKind::Hours) => 0x808080,
        };
        Rgb::from_hex(hex)
    }

    /// Color of the highlighted numeral.
    pub fn highlight(self) -> Rgb {
        match self {
            Palette::Classic => Rgb::from_hex(0xffaa00),
            Palette::Ember => Rgb::from_hex(0xfff36b),
            Palette::Ocean => Rgb::from_hex(0xff6bd5),
            Palette::Forest => Rgb::from_hex(0xffd23f),
            Palette::Mono => Rgb::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_back() {
        let mut palette = Palette::default();
        for _ in 0..5 {
            palette = palette.next();
        }
        assert_eq!(palette, Palette::Classic);
    }

    #[test]
    fn test_matching() {
        for palette in Palette::ALL {
            let rings = RingKind::ALL.map(|kind| palette.ring_color(kind));
            assert_eq!(Palette::matching(rings, palette.highlight()), Some(palette));
        }
        let custom = [Rgb::new(1, 2, 3); 3];
        assert_eq!(Palette::matching(custom, Rgb::WHITE), None);
    }

    #[test]
    fn test_classic_matches_default_colors() {
        assert_eq!(Palette::Classic.highlight(), Rgb::from_hex(0xffaa00));
        assert_eq!(
            Palette::Classic.ring_color(RingKind::Minutes),
            Rgb::from_hex(0xaaaaff)
        );
    }
}
