//! Value decoding
//!
//! Turns a raw [`Multivector`] into a classified, drawable quantity. The
//! classification is a pure function of which grade components are non-zero
//! (exact comparison, no epsilon); anything mixed-grade or trivector-bearing
//! degrades to [`DecodedValue::Other`] and is never drawn. Decoding never
//! fails: values stream in continuously from live typing and must not crash
//! the visualization.

use crate::multivector::{Multivector, BIVECTOR, SCALAR, TRIVECTOR, VECTOR};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dot-product threshold above which the plane normal counts as parallel
/// to the Z reference axis and the fallback spanning vector is used.
///
/// Part of the fixed drawing convention; changing it changes rendered
/// output for existing expressions.
const PARALLEL_THRESHOLD: f64 = 0.99;

/// Grade classification of a decoded value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueClass {
    /// Only the scalar component is non-zero
    Scalar,
    /// Only grade-1 components are non-zero
    Vector,
    /// Only grade-2 components are non-zero
    Bivector,
    /// Zero, mixed-grade, trivector-bearing, or malformed; not drawable
    Other,
}

/// A multivector decoded into drawable geometry
///
/// Vectors carry one 3D direction; bivectors carry the two spanning vectors
/// of their oriented plane segment. Scalars carry their magnitude (drawn as
/// a direction-free indicator by the scene layer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecodedValue {
    /// A pure scalar value
    Scalar(f64),
    /// A pure vector, mapped directly to (x, y, z)
    Vector(DVec3),
    /// A pure bivector, decomposed into two spanning vectors whose
    /// parallelogram reproduces the bivector's plane and magnitude
    Bivector {
        /// First spanning vector.
        v1: DVec3,
        /// Second spanning vector.
        v2: DVec3,
    },
    /// Not drawable
    Other,
}

impl DecodedValue {
    /// The grade classification of this value
    pub fn class(&self) -> ValueClass {
        match self {
            DecodedValue::Scalar(_) => ValueClass::Scalar,
            DecodedValue::Vector(_) => ValueClass::Vector,
            DecodedValue::Bivector { .. } => ValueClass::Bivector,
            DecodedValue::Other => ValueClass::Other,
        }
    }

    /// True if the scene layer can draw this value
    pub fn is_drawable(&self) -> bool {
        !matches!(self, DecodedValue::Other)
    }

    /// The direction vectors this value contributes to the scene:
    /// none for scalars and `Other`, one for vectors, two for bivectors.
    pub fn directions(&self) -> Vec<DVec3> {
        match self {
            DecodedValue::Vector(v) => vec![*v],
            DecodedValue::Bivector { v1, v2 } => vec![*v1, *v2],
            _ => Vec::new(),
        }
    }
}

/// Decode a multivector into drawable geometry
///
/// Never fails; malformed input (non-finite components) and undrawable
/// grades both return [`DecodedValue::Other`].
pub fn decode(value: &Multivector) -> DecodedValue {
    if value.has_non_finite() {
        debug!(%value, "non-finite components, decoding as undrawable");
        return DecodedValue::Other;
    }

    let scalar = value.any_nonzero(SCALAR..SCALAR + 1);
    let vector = value.any_nonzero(VECTOR);
    let bivector = value.any_nonzero(BIVECTOR);
    let trivector = value.any_nonzero(TRIVECTOR..TRIVECTOR + 1);

    match (scalar, vector, bivector, trivector) {
        (true, false, false, false) => DecodedValue::Scalar(value.scalar_part()),
        (false, true, false, false) => {
            let [x, y, z] = value.vector_part();
            DecodedValue::Vector(DVec3::new(x, y, z))
        }
        (false, false, true, false) => {
            let (v1, v2) = span_bivector(value.bivector_part());
            DecodedValue::Bivector { v1, v2 }
        }
        _ => DecodedValue::Other,
    }
}

/// Decompose a bivector into two spanning vectors.
///
/// Fixed drawing convention (kept for render compatibility, not a
/// mathematical necessity): the components `(e12, e13, e23)` are rotated
/// into a normal-like vector `n = (e12, -e13, e23)`, then one spanning
/// vector is taken as the component of the Z axis orthogonal to `n`
/// (falling back to X when `n` is nearly parallel to Z), scaled so the
/// spanned parallelogram area matches the bivector magnitude. Fully
/// deterministic: the same input always produces the same pair.
fn span_bivector([e12, e13, e23]: [f64; 3]) -> (DVec3, DVec3) {
    let n = DVec3::new(e12, -e13, e23);
    let len = n.length();
    if len == 0.0 {
        return (DVec3::ZERO, DVec3::ZERO);
    }
    let n_hat = n / len;

    let z = DVec3::Z;
    let candidate = if n_hat.dot(z).abs() < PARALLEL_THRESHOLD {
        z - n_hat * z.dot(n_hat)
    } else {
        DVec3::X
    };

    let v1 = candidate.normalize() * len;
    let v2 = n.cross(v1).normalize() * len;
    (v1, v2)
}
