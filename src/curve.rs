//! Short Weierstraß curves and their group law.
//!
//! A `Curve` is defined by the equation `y^2 = x^3 + a*x + b` over the
//! field of integers modulo a prime `p`, together with a conventional
//! generator `G` and the order `n` of the subgroup generated by `G`.
//! Scalars (private keys, nonces, ECDSA signature halves) are integers
//! modulo `n`; take care that `n` and `p` are distinct moduli, and that
//! coordinates and scalars live in different fields.
//!
//! The group law uses affine coordinates and the textbook chord-and-tangent
//! formulas; each addition or doubling costs one field inversion. The
//! point-at-infinity is handled explicitly. Multiplication of a point by
//! an integer uses the binary double-and-add method, with the scalar bits
//! processed from most to least significant: cost is linear in the
//! bit length of the scalar.
//!
//! Nothing here is constant-time: execution time depends on the bits of
//! the scalars and on the point values.

// Points are traditionally named with uppercase letters.
#![allow(non_snake_case)]

use core::fmt;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::params::{self, CurveParams};
use crate::point::Point;

/// A short Weierstraß curve with a designated generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    name: String,
    prime: Arc<BigUint>,
    a: FieldElement,
    b: FieldElement,
    G: Point,
    n: Arc<BigUint>,
}

impl Curve {

    /// Creates a curve from its integer parameters.
    ///
    /// Only basic consistency checks are performed:
    ///
    ///  - `p` is odd and greater than 3 (its primality is not verified);
    ///
    ///  - `a` and `b` are lower than `p`, and the curve is not singular
    ///    (`4*a^3 + 27*b^2 != 0`);
    ///
    ///  - the generator coordinates are lower than `p`, and the generator
    ///    is on the curve;
    ///
    ///  - `n` is greater than 1, and `n*G` is the point-at-infinity.
    ///
    /// `n` is not verified to be prime, nor to be the exact order of `G`.
    pub fn new(name: &str, p: BigUint, a: BigUint, b: BigUint,
               gx: BigUint, gy: BigUint, n: BigUint) -> Result<Self>
    {
        if p <= BigUint::from(3u32) || !p.bit(0) {
            return Err(Error::InvalidParameters(
                "field prime must be an odd integer greater than 3"));
        }
        if a >= p || b >= p {
            return Err(Error::InvalidParameters(
                "curve coefficients must be lower than the field prime"));
        }
        if gx >= p || gy >= p {
            return Err(Error::InvalidParameters(
                "generator coordinates must be lower than the field prime"));
        }
        if n <= BigUint::one() {
            return Err(Error::InvalidParameters(
                "subgroup order must be greater than 1"));
        }

        let prime = Arc::new(p);
        let a = FieldElement::new(a, prime.clone());
        let b = FieldElement::new(b, prime.clone());

        // 4*a^3 + 27*b^2 == 0 means the cubic has a repeated root.
        let disc = FieldElement::from_u64(4, prime.clone()) * a.square() * &a
            + FieldElement::from_u64(27, prime.clone()) * b.square();
        if disc.is_zero() {
            return Err(Error::InvalidParameters("curve is singular"));
        }

        let mut curve = Self {
            name: name.to_string(),
            prime: prime.clone(),
            a,
            b,
            G: Point::INFINITY,
            n: Arc::new(n),
        };
        let G = Point::from_affine(&curve,
            FieldElement::new(gx, prime.clone()),
            FieldElement::new(gy, prime))
            .ok_or(Error::InvalidParameters("generator is not on the curve"))?;
        if !curve.scalar_mul(&G, &curve.n).is_infinity() {
            return Err(Error::InvalidParameters(
                "subgroup order does not annihilate the generator"));
        }
        curve.G = G;
        Ok(curve)
    }

    /// Creates a curve from textual (hexadecimal) parameters.
    ///
    /// Parameters are parsed, then validated as in `Curve::new()`.
    pub fn from_params(params: &CurveParams) -> Result<Self> {
        let pp = params.parse()?;
        Self::new(params.name, pp.p, pp.a, pp.b, pp.gx, pp.gy, pp.n)
    }

    /// Gets curve secp256k1 (equation `y^2 = x^3 + 7`, SEC 2).
    ///
    /// The parameters are compiled-in constants, known to be valid; they
    /// are not re-validated.
    pub fn secp256k1() -> Self {
        let prime = Arc::new(params::w64be(&params::SECP256K1_P));
        let gx = params::w64be(&params::SECP256K1_GX);
        let gy = params::w64be(&params::SECP256K1_GY);
        Self {
            name: params::SECP256K1.name.to_string(),
            prime: prime.clone(),
            a: FieldElement::zero(prime.clone()),
            b: FieldElement::new(params::w64be(&params::SECP256K1_B),
                                 prime.clone()),
            G: Point::affine(FieldElement::new(gx, prime.clone()),
                             FieldElement::new(gy, prime)),
            n: Arc::new(params::w64be(&params::SECP256K1_N)),
        }
    }

    /// Gets the curve name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the base field prime `p`.
    #[inline(always)]
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Gets the curve equation coefficient `a`.
    #[inline(always)]
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// Gets the curve equation coefficient `b`.
    #[inline(always)]
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    /// Gets the conventional generator `G`.
    #[inline(always)]
    pub fn generator(&self) -> &Point {
        &self.G
    }

    /// Gets the order `n` of the subgroup generated by `G`.
    #[inline(always)]
    pub fn order(&self) -> &BigUint {
        &self.n
    }

    /// Gets the shared handle on the order `n` (the scalar field modulus).
    #[inline(always)]
    pub fn order_modulus(&self) -> &Arc<BigUint> {
        &self.n
    }

    /// Gets the size of the base field prime, in bits.
    pub fn bit_size(&self) -> u64 {
        self.prime.bits()
    }

    /// Creates a base field element (integer modulo `p`).
    pub fn field_element(&self, v: BigUint) -> FieldElement {
        FieldElement::new(v, self.prime.clone())
    }

    /// Creates a scalar (integer modulo `n`).
    pub fn scalar(&self, v: BigUint) -> FieldElement {
        FieldElement::new(v, self.n.clone())
    }

    /// Creates a point from untrusted affine coordinates.
    ///
    /// `Error::NotOnCurve` is returned if the coordinates do not fulfill
    /// the curve equation.
    pub fn point(&self, x: FieldElement, y: FieldElement) -> Result<Point> {
        Point::from_affine(self, x, y).ok_or(Error::NotOnCurve)
    }

    /// Tests whether the provided point is on this curve.
    #[inline]
    pub fn is_on_curve(&self, P: &Point) -> bool {
        P.is_on_curve(self)
    }

    /// Adds points `P` and `Q`.
    ///
    /// Both points must be on this curve. All cases are handled: either
    /// point may be the point-at-infinity, `Q` may be equal to `P` or to
    /// `-P`.
    pub fn add(&self, P: &Point, Q: &Point) -> Point {
        let ((x1, y1), (x2, y2)) = match (P.coordinates(), Q.coordinates()) {
            (None, _) => return Q.clone(),
            (_, None) => return P.clone(),
            (Some(c1), Some(c2)) => (c1, c2),
        };

        let L = if x1 == x2 {
            // Same x: Q is either -P or P. P + (-P) = 0; this also
            // covers the doubling of a point with y = 0 (vertical tangent).
            if *y1 == -y2 {
                return Point::INFINITY;
            }

            // Doubling: L = (3*x1^2 + a) / (2*y1)
            let xx = x1.square();
            (&xx + &xx + &xx + &self.a) / (y1 + y1)
        } else {
            // L = (y2 - y1) / (x2 - x1)
            (y2 - y1) / (x2 - x1)
        };

        // x3 = L^2 - x1 - x2
        // y3 = L*(x1 - x3) - y1
        let x3 = L.square() - x1 - x2;
        let y3 = L * (x1 - &x3) - y1;
        Point::affine(x3, y3)
    }

    /// Doubles point `P`.
    #[inline]
    pub fn double(&self, P: &Point) -> Point {
        self.add(P, P)
    }

    /// Negates point `P`.
    #[inline]
    pub fn neg(&self, P: &Point) -> Point {
        -P
    }

    /// Subtracts point `Q` from point `P`.
    #[inline]
    pub fn sub(&self, P: &Point, Q: &Point) -> Point {
        self.add(P, &-Q)
    }

    /// Multiplies point `P` by the non-negative integer `k`.
    ///
    /// If `k` is zero or `P` is the point-at-infinity, then the
    /// point-at-infinity is returned. `k` is not reduced modulo the curve
    /// order; any size is accepted, and the cost is one doubling per bit
    /// of `k`, plus one addition per non-zero bit.
    pub fn scalar_mul(&self, P: &Point, k: &BigUint) -> Point {
        if k.is_zero() || P.is_infinity() {
            return Point::INFINITY;
        }

        let mut R = Point::INFINITY;
        for i in (0..k.bits()).rev() {
            R = self.double(&R);
            if k.bit(i) {
                R = self.add(&R, P);
            }
        }
        R
    }

    /// Multiplies the generator `G` by the non-negative integer `k`.
    #[inline]
    pub fn scalar_base_mul(&self, k: &BigUint) -> Point {
        self.scalar_mul(&self.G, k)
    }

    /// Computes `u*P + v*G`, with `G` the curve generator.
    ///
    /// Both products share a single sequence of doublings (with `P + G`
    /// precomputed), which makes this function about twice faster than
    /// computing the two products separately. This is the main cost of
    /// ECDSA signature verification.
    pub fn mul_add_base(&self, P: &Point, u: &BigUint, v: &BigUint) -> Point {
        let PG = self.add(P, &self.G);
        let nbits = core::cmp::max(u.bits(), v.bits());
        let mut R = Point::INFINITY;
        for i in (0..nbits).rev() {
            R = self.double(&R);
            match (u.bit(i), v.bit(i)) {
                (true, true) => R = self.add(&R, &PG),
                (true, false) => R = self.add(&R, P),
                (false, true) => R = self.add(&R, &self.G),
                (false, false) => {}
            }
        }
        R
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: y^2 = x^3 + 0x{:x}*x + 0x{:x} mod 0x{:x}, G = {}, n = 0x{:x}",
               self.name, self.a, self.b, self.prime.as_ref(), self.G, self.n.as_ref())
    }
}

// ========================================================================
