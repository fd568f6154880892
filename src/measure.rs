use crate::error::{MoonError, Result};

const MODE_SHIFT: u32 = 30;
const MODE_MASK: u32 = 0x3 << MODE_SHIFT;
const SIZE_MASK: u32 = !MODE_MASK;

/// How a host constrains one axis during measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The host dictates the size.
    Exactly,
    /// The widget may be at most this large.
    AtMost,
    /// No constraint; the widget picks its intrinsic size.
    Unspecified,
}

impl MeasureMode {
    fn bits(self) -> u32 {
        match self {
            MeasureMode::Unspecified => 0,
            MeasureMode::Exactly => 1 << MODE_SHIFT,
            MeasureMode::AtMost => 2 << MODE_SHIFT,
        }
    }

    fn from_bits(bits: u32) -> Result<Self> {
        match bits >> MODE_SHIFT {
            0 => Ok(MeasureMode::Unspecified),
            1 => Ok(MeasureMode::Exactly),
            2 => Ok(MeasureMode::AtMost),
            other => Err(MoonError::UnrecognizedMeasureMode(other)),
        }
    }
}

/// A (mode, size) constraint for a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: u32,
}

impl MeasureSpec {
    pub const fn new(mode: MeasureMode, size: u32) -> Self {
        Self { mode, size }
    }

    pub const fn exactly(size: u32) -> Self {
        Self::new(MeasureMode::Exactly, size)
    }

    pub const fn at_most(size: u32) -> Self {
        Self::new(MeasureMode::AtMost, size)
    }

    pub const fn unspecified() -> Self {
        Self::new(MeasureMode::Unspecified, 0)
    }

    /// Packs into one word: mode in the top two bits, size in the low 30.
    pub fn pack(self) -> u32 {
        self.mode.bits() | (self.size & SIZE_MASK)
    }

    /// Decodes a packed spec. The reserved mode `0b11` is a configuration error.
    pub fn unpack(packed: u32) -> Result<Self> {
        let mode = MeasureMode::from_bits(packed & MODE_MASK)?;
        Ok(Self::new(mode, packed & SIZE_MASK))
    }

    /// Resolves this axis against the widget's preferred size.
    pub fn resolve(self, preferred: u32) -> u32 {
        resolve_dimension(self.mode, self.size, preferred)
    }
}

/// Pixel size reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

pub fn resolve_dimension(mode: MeasureMode, proposed: u32, preferred: u32) -> u32 {
    match mode {
        MeasureMode::Exactly => proposed,
        MeasureMode::AtMost => preferred.min(proposed),
        MeasureMode::Unspecified => preferred,
    }
}

/// Resolves both axes independently, then keeps the smaller one so the
/// footprint is always square.
pub fn measure_square(width: MeasureSpec, height: MeasureSpec, preferred: u32) -> Size {
    let side = width.resolve(preferred).min(height.resolve(preferred));
    Size::square(side)
}

/// Converts a device-independent length to pixels.
pub fn dp_to_px(dp: u32, density: f64) -> u32 {
    (dp as f64 * density).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_ignores_preference() {
        for preferred in [0, 1, 80, 500] {
            assert_eq!(resolve_dimension(MeasureMode::Exactly, 123, preferred), 123);
        }
    }

    #[test]
    fn at_most_takes_the_smaller_value() {
        assert_eq!(resolve_dimension(MeasureMode::AtMost, 200, 80), 80);
        assert_eq!(resolve_dimension(MeasureMode::AtMost, 50, 80), 50);
        assert_eq!(resolve_dimension(MeasureMode::AtMost, 80, 80), 80);
    }

    #[test]
    fn unspecified_uses_preference() {
        for proposed in [0, 10, 10_000] {
            assert_eq!(resolve_dimension(MeasureMode::Unspecified, proposed, 80), 80);
        }
    }

    #[test]
    fn square_is_min_of_both_axes() {
        let size = measure_square(MeasureSpec::exactly(300), MeasureSpec::at_most(60), 80);
        assert_eq!(size, Size::square(60));

        let size = measure_square(MeasureSpec::unspecified(), MeasureSpec::exactly(120), 80);
        assert_eq!(size, Size::square(80));

        let size = measure_square(MeasureSpec::at_most(200), MeasureSpec::at_most(200), 80);
        assert_eq!(size, Size::square(80));
    }

    #[test]
    fn packed_specs_decode() {
        let spec = MeasureSpec::at_most(200);
        assert_eq!(MeasureSpec::unpack(spec.pack()).unwrap(), spec);

        let spec = MeasureSpec::unpack(1 << 30 | 42).unwrap();
        assert_eq!(spec, MeasureSpec::exactly(42));

        assert_eq!(MeasureSpec::unpack(7).unwrap(), MeasureSpec::new(MeasureMode::Unspecified, 7));
    }

    #[test]
    fn reserved_mode_bits_are_rejected() {
        let err = MeasureSpec::unpack(3 << 30 | 80).unwrap_err();
        assert!(matches!(err, MoonError::UnrecognizedMeasureMode(3)));
    }

    #[test]
    fn density_scales_preferred_size() {
        assert_eq!(dp_to_px(80, 1.0), 80);
        assert_eq!(dp_to_px(80, 2.0), 160);
        assert_eq!(dp_to_px(80, 1.5), 120);
        assert_eq!(dp_to_px(80, 1.33), 106);
    }
}
