use crate::bodies::ShapeKind;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Unordered pairing of two shape kinds, keying the narrow-phase test.
///
/// Each pairing has a canonical role order (the first-listed shape is the
/// first role). Detection always computes its normal for that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PairKind {
    /// Sphere, sphere (argument order)
    SphereSphere,

    /// Car, then sphere
    CarSphere,

    /// House, then car
    CarHouse,

    /// House, then sphere
    SphereHouse,

    /// Car, then ramp
    CarRamp,

    /// Sphere, then ramp
    SphereRamp,

    /// No test defined for this pairing
    Unsupported,
}

impl PairKind {
    /// Looks up the pairing for two shape kinds.
    ///
    /// The flag is true when `(a, b)` arrives in the reverse of the canonical
    /// role order, in which case the detected normal must be negated.
    pub fn classify(a: ShapeKind, b: ShapeKind) -> (PairKind, bool) {
        use ShapeKind::{Car, House, Ramp, Sphere};

        match (a, b) {
            (Sphere, Sphere) => (PairKind::SphereSphere, false),
            (Car, Sphere) => (PairKind::CarSphere, false),
            (Sphere, Car) => (PairKind::CarSphere, true),
            (House, Car) => (PairKind::CarHouse, false),
            (Car, House) => (PairKind::CarHouse, true),
            (House, Sphere) => (PairKind::SphereHouse, false),
            (Sphere, House) => (PairKind::SphereHouse, true),
            (Car, Ramp) => (PairKind::CarRamp, false),
            (Ramp, Car) => (PairKind::CarRamp, true),
            (Sphere, Ramp) => (PairKind::SphereRamp, false),
            (Ramp, Sphere) => (PairKind::SphereRamp, true),
            (Car, Car) | (House, House) | (Ramp, Ramp) | (House, Ramp) | (Ramp, House) => {
                (PairKind::Unsupported, false)
            }
        }
    }

    /// Whether a house takes part
    pub fn involves_house(self) -> bool {
        matches!(self, PairKind::CarHouse | PairKind::SphereHouse)
    }

    /// Whether a ramp takes part
    pub fn involves_ramp(self) -> bool {
        matches!(self, PairKind::CarRamp | PairKind::SphereRamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_unordered() {
        for a in [ShapeKind::Sphere, ShapeKind::Car, ShapeKind::House, ShapeKind::Ramp] {
            for b in [ShapeKind::Sphere, ShapeKind::Car, ShapeKind::House, ShapeKind::Ramp] {
                let (ab, swapped_ab) = PairKind::classify(a, b);
                let (ba, swapped_ba) = PairKind::classify(b, a);
                assert_eq!(ab, ba);
                if a != b && ab != PairKind::Unsupported {
                    assert_ne!(swapped_ab, swapped_ba);
                }
            }
        }
    }

    #[test]
    fn static_pairs_have_no_test() {
        assert_eq!(PairKind::classify(ShapeKind::House, ShapeKind::Ramp).0, PairKind::Unsupported);
        assert_eq!(PairKind::classify(ShapeKind::Car, ShapeKind::Car).0, PairKind::Unsupported);
    }
}
