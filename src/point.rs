//! Curve points.
//!
//! A `Point` is either the point-at-infinity (the neutral element of the
//! curve group, which has no affine coordinates), or a pair of affine
//! coordinates `(x, y)`, both elements of the curve base field.
//!
//! A point does not know which curve it belongs to; the group law is
//! implemented by `Curve`. Points obtained from the group law of a
//! `Curve` are always on that curve. Points built from externally
//! provided coordinates must go through `Point::from_affine()` or
//! `Curve::point()`, both of which verify the curve equation.

// Points are traditionally named with uppercase letters.
#![allow(non_snake_case)]

use core::fmt;
use core::ops::Neg;
use crate::curve::Curve;
use crate::field::FieldElement;

/// A point on a short Weierstraß curve, in affine coordinates.
///
/// Finite points can be obtained only through validating constructors
/// or through the group law of a `Curve`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point(Repr);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Infinity,
    Affine {
        x: FieldElement,
        y: FieldElement,
    },
}

impl Point {

    /// The point-at-infinity.
    pub const INFINITY: Self = Self(Repr::Infinity);

    /// The neutral element (point-at-infinity).
    pub const NEUTRAL: Self = Self::INFINITY;

    /// Creates a point from its affine coordinates.
    ///
    /// The coordinates are verified to comply with the curve equation
    /// (and to belong to the curve base field); if they do not, then
    /// `None` is returned.
    pub fn from_affine(curve: &Curve, x: FieldElement, y: FieldElement)
        -> Option<Self>
    {
        let P = Self::affine(x, y);
        if P.is_on_curve(curve) {
            Some(P)
        } else {
            None
        }
    }

    // Builds a finite point from coordinates computed by the group law.
    #[inline(always)]
    pub(crate) fn affine(x: FieldElement, y: FieldElement) -> Self {
        Self(Repr::Affine { x, y })
    }

    /// Tests whether this point is the neutral (point-at-infinity).
    #[inline(always)]
    pub fn is_infinity(&self) -> bool {
        matches!(self.0, Repr::Infinity)
    }

    /// Gets the x coordinate (`None` for the point-at-infinity).
    #[inline]
    pub fn x(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(x, _)| x)
    }

    /// Gets the y coordinate (`None` for the point-at-infinity).
    #[inline]
    pub fn y(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(_, y)| y)
    }

    /// Gets both affine coordinates (`None` for the point-at-infinity).
    #[inline]
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        match &self.0 {
            Repr::Infinity => None,
            Repr::Affine { x, y } => Some((x, y)),
        }
    }

    // (x, y) -> (x, -y)
    fn neg_inner(&self) -> Self {
        match self.coordinates() {
            None => Self::INFINITY,
            Some((x, y)) => Self::affine(x.clone(), -y),
        }
    }

    /// Tests whether this point is on the provided curve.
    ///
    /// The point-at-infinity is on every curve. A finite point is on
    /// the curve if both its coordinates are in the curve base field,
    /// and `y^2 = x^3 + a*x + b`.
    pub fn is_on_curve(&self, curve: &Curve) -> bool {
        let (x, y) = match self.coordinates() {
            None => return true,
            Some(xy) => xy,
        };
        if x.prime() != curve.prime() || y.prime() != curve.prime() {
            return false;
        }

        // y^2 - ((x^2 + a)*x + b) == 0
        let rhs = (x.square() + curve.a()) * x + curve.b();
        (y.square() - rhs).is_zero()
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        self.neg_inner()
    }
}

impl Neg for &Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        self.neg_inner()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coordinates() {
            None => f.write_str("infinity"),
            Some((x, y)) => write!(f, "({}, {})", x, y),
        }
    }
}

// ========================================================================
