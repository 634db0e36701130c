//! Pixel-to-engine unit conversion.

/// Converts design pixels into a target's native units.
///
/// Every numeric pixel attribute an emitter writes goes through this one
/// method, so a target with a different unit system only has to swap the
/// implementation.
pub trait UnitConversion: Send + Sync {
    fn to_engine(&self, px: f64) -> f64;
}

/// One design pixel is one engine unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelUnits;

impl UnitConversion for PixelUnits {
    fn to_engine(&self, px: f64) -> f64 {
        px
    }
}

/// Uniform scale factor, e.g. for a runtime that renders at a fixed DPI ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledUnits(pub f64);

impl UnitConversion for ScaledUnits {
    fn to_engine(&self, px: f64) -> f64 {
        px * self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_units() {
        assert_eq!(PixelUnits.to_engine(12.5), 12.5);
    }

    #[test]
    fn test_scaled_units() {
        assert_eq!(ScaledUnits(2.0).to_engine(12.5), 25.0);
    }
}
