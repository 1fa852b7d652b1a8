// sn-core/src/units.rs

use uom::si::f64::{Length as UomLength, Ratio as UomRatio};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Ratio = UomRatio;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Length in meters, the unit of every elevation and pipe length in the network.
#[inline]
pub fn in_m(v: Length) -> f64 {
    use uom::si::length::meter;
    v.get::<meter>()
}

#[inline]
pub fn as_fraction(v: Ratio) -> f64 {
    use uom::si::ratio::ratio;
    v.get::<ratio>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_round_trip() {
        assert_eq!(in_m(m(0.3)), 0.3);
        assert_eq!(as_fraction(unitless(0.01)), 0.01);
    }
}
