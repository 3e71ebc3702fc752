//! Multivector value model
//!
//! The evaluator collaborator computes with full R(3,0,0) multivectors; this
//! module is the data carrier for those values. Eight real components in the
//! fixed basis order `[1, e1, e2, e3, e12, e13, e23, e123]`, serialized as a
//! plain array so the value can cross the collaborator boundary opaquely.
//!
//! Arithmetic (products, duals, norms used during evaluation) belongs to the
//! evaluator and is deliberately not reproduced here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Basis blade names, in component order.
pub const BASIS: [&str; 8] = ["1", "e1", "e2", "e3", "e12", "e13", "e23", "e123"];

/// Component index of the scalar part.
pub const SCALAR: usize = 0;
/// Component indices of the vector part (e1, e2, e3).
pub const VECTOR: std::ops::Range<usize> = 1..4;
/// Component indices of the bivector part (e12, e13, e23).
pub const BIVECTOR: std::ops::Range<usize> = 4..7;
/// Component index of the trivector part (e123).
pub const TRIVECTOR: usize = 7;

/// Components smaller than this are treated as zero by [`Multivector::is_zero`]
/// and when formatting. Grade classification compares exactly.
pub const COMPONENT_EPSILON: f64 = 1e-12;

/// A multivector over R(3,0,0)
///
/// One value of the geometric algebra of 3D space: a scalar, three vector
/// components, three bivector components, and a trivector component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multivector {
    components: [f64; 8],
}

impl Multivector {
    /// The zero multivector
    pub const fn zero() -> Self {
        Self {
            components: [0.0; 8],
        }
    }

    /// A multivector with a single component set
    pub const fn basis(value: f64, index: usize) -> Self {
        let mut ret = Self::zero();
        ret.components[index] = value;
        ret
    }

    /// A pure scalar
    pub const fn scalar(s: f64) -> Self {
        Self::basis(s, SCALAR)
    }

    /// A pure grade-1 vector (e1, e2, e3)
    pub fn vector(e1: f64, e2: f64, e3: f64) -> Self {
        let mut ret = Self::zero();
        ret.components[1] = e1;
        ret.components[2] = e2;
        ret.components[3] = e3;
        ret
    }

    /// A pure grade-2 bivector (e12, e13, e23)
    pub fn bivector(e12: f64, e13: f64, e23: f64) -> Self {
        let mut ret = Self::zero();
        ret.components[4] = e12;
        ret.components[5] = e13;
        ret.components[6] = e23;
        ret
    }

    /// Construct from raw components in basis order
    pub const fn from_components(components: [f64; 8]) -> Self {
        Self { components }
    }

    /// Raw components in basis order
    pub const fn components(&self) -> &[f64; 8] {
        &self.components
    }

    /// The scalar part
    pub fn scalar_part(&self) -> f64 {
        self.components[SCALAR]
    }

    /// The vector part as (e1, e2, e3)
    pub fn vector_part(&self) -> [f64; 3] {
        [self.components[1], self.components[2], self.components[3]]
    }

    /// The bivector part as (e12, e13, e23)
    pub fn bivector_part(&self) -> [f64; 3] {
        [self.components[4], self.components[5], self.components[6]]
    }

    /// The trivector (e123) component
    pub fn trivector_part(&self) -> f64 {
        self.components[TRIVECTOR]
    }

    /// True if every component is (numerically) zero
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|c| c.abs() < COMPONENT_EPSILON)
    }

    /// True if any component is non-finite
    pub fn has_non_finite(&self) -> bool {
        self.components.iter().any(|c| !c.is_finite())
    }

    /// True if any component in the given index range is exactly non-zero
    pub(crate) fn any_nonzero(&self, range: std::ops::Range<usize>) -> bool {
        self.components[range].iter().any(|c| *c != 0.0)
    }
}

impl Default for Multivector {
    fn default() -> Self {
        Self::zero()
    }
}

impl Index<usize> for Multivector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl IndexMut<usize> for Multivector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.components[index]
    }
}

impl fmt::Display for Multivector {
    /// Renders only the non-zero blades, e.g. `1 + 2e12`, or `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, &coeff) in self.components.iter().enumerate() {
            if coeff.abs() < COMPONENT_EPSILON {
                continue;
            }
            if !first {
                write!(f, " {} ", if coeff < 0.0 { "-" } else { "+" })?;
            } else if coeff < 0.0 {
                write!(f, "-")?;
            }
            let mag = coeff.abs();
            if i == 0 {
                write!(f, "{}", mag)?;
            } else if (mag - 1.0).abs() < COMPONENT_EPSILON {
                write!(f, "{}", BASIS[i])?;
            } else {
                write!(f, "{}{}", mag, BASIS[i])?;
            }
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
