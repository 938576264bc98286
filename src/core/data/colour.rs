#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Empty plot area.
    pub const BACKGROUND: Self = Self::opaque(13, 14, 18);
    /// Preview strokes and the top of the density ramp.
    pub const ACCENT: Self = Self::opaque(56, 189, 248);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Sum of per-channel differences, ignoring alpha.
    #[must_use]
    pub fn distance(self, other: Self) -> u32 {
        u32::from(self.r.abs_diff(other.r))
            + u32::from(self.g.abs_diff(other.g))
            + u32::from(self.b.abs_diff(other.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_sets_full_alpha() {
        let colour = Colour::opaque(1, 2, 3);

        assert_eq!(colour, Colour { r: 1, g: 2, b: 3, a: 255 });
    }

    #[test]
    fn test_distance_is_symmetric() {
        assert_eq!(Colour::BACKGROUND.distance(Colour::ACCENT), 43 + 175 + 230);
        assert_eq!(
            Colour::ACCENT.distance(Colour::BACKGROUND),
            Colour::BACKGROUND.distance(Colour::ACCENT)
        );
        assert_eq!(Colour::WHITE.distance(Colour::WHITE), 0);
    }
}
