//! Prime fields.
//!
//! A `FieldElement` is an integer modulo a prime `p`, together with that
//! prime. Fields are not types: any odd prime (or, in fact, any modulus
//! greater than 1) chosen at runtime can be used, and every element
//! carries its own modulus, so that values are self-describing. The
//! modulus is held in an `Arc`, hence cloning an element only copies the
//! value itself, and elements can be freely shared between threads.
//!
//! The value is always kept in its canonical range `[0, p)`. Constructors
//! reduce their input; `from_bigint()` and `from_i64()` accept negative
//! integers and map them to their non-negative representative (this is
//! a mathematical modulus, not a truncating remainder: -1 becomes p - 1).
//!
//! The usual arithmetic operators are implemented (`+`, `-`, `*`, `/`,
//! unary `-`, and the compound assignments `+=`, `-=`, `*=` and `/=`),
//! on both the values and references thereof. None of them modifies its
//! operands; a new element is returned.
//!
//! Both operands of a binary operator must belong to the same field.
//! Mixing two primes is a bug in the calling code, and triggers a panic.
//! Division by zero also panics, since zero has no inverse; `invert()`
//! can be used when the divisor is not known to be invertible.
//!
//! None of the functions in this module is constant-time.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use std::sync::Arc;

/// An element of the finite field of integers modulo a prime.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,         // always lower than prime
    prime: Arc<BigUint>,
}

impl FieldElement {

    /// Creates an element from an unsigned integer, reduced modulo `prime`.
    ///
    /// The modulus must be at least 2; it is not verified to be prime.
    pub fn new(value: BigUint, prime: impl Into<Arc<BigUint>>) -> Self {
        let prime = prime.into();
        Self::check_modulus(&prime);
        let value = if value < *prime {
            value
        } else {
            value % prime.as_ref()
        };
        Self { value, prime }
    }

    /// Creates an element from a signed integer.
    ///
    /// Negative integers are mapped to their representative in `[0, prime)`
    /// (e.g. -1 yields `prime - 1`).
    pub fn from_bigint(value: &BigInt, prime: impl Into<Arc<BigUint>>) -> Self {
        let prime = prime.into();
        Self::check_modulus(&prime);
        let m = BigInt::from_biguint(Sign::Plus, prime.as_ref().clone());
        let mut r = value % &m;
        if r.sign() == Sign::Minus {
            r += &m;
        }
        Self { value: r.magnitude().clone(), prime }
    }

    /// Creates an element from a signed 64-bit integer.
    pub fn from_i64(value: i64, prime: impl Into<Arc<BigUint>>) -> Self {
        Self::from_bigint(&BigInt::from(value), prime)
    }

    /// Creates an element from an unsigned 64-bit integer.
    pub fn from_u64(value: u64, prime: impl Into<Arc<BigUint>>) -> Self {
        Self::new(BigUint::from(value), prime)
    }

    /// Gets the zero element of the field modulo `prime`.
    pub fn zero(prime: impl Into<Arc<BigUint>>) -> Self {
        Self::new(BigUint::zero(), prime)
    }

    /// Gets the element of value 1 in the field modulo `prime`.
    pub fn one(prime: impl Into<Arc<BigUint>>) -> Self {
        Self::new(BigUint::one(), prime)
    }

    fn check_modulus(prime: &BigUint) {
        if *prime <= BigUint::one() {
            panic!("FieldElement: invalid modulus {} (must be at least 2)", prime);
        }
    }

    /// Gets the canonical value of this element (in `[0, prime)`).
    #[inline(always)]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Gets the field modulus.
    #[inline(always)]
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Gets the shared handle on the field modulus.
    ///
    /// New elements of the same field should be created from this handle,
    /// so that the modulus storage is shared rather than copied.
    #[inline(always)]
    pub fn modulus(&self) -> &Arc<BigUint> {
        &self.prime
    }

    /// Tests whether this element is zero.
    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Tests whether this element and `rhs` belong to the same field.
    #[inline]
    pub fn same_field(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.prime, &rhs.prime) || self.prime == rhs.prime
    }

    /// Reinterprets the canonical integer value of this element in
    /// another field (the value is reduced modulo the new prime).
    ///
    /// This is how an x coordinate (modulo the curve field prime) is
    /// turned into an integer modulo the curve order.
    pub fn reduce(&self, prime: impl Into<Arc<BigUint>>) -> Self {
        Self::new(self.value.clone(), prime)
    }

    // Both operands of every binary operation must use the same prime.
    #[inline]
    fn check_prime(&self, rhs: &Self, op: &str) {
        if !self.same_field(rhs) {
            panic!("FieldElement::{}: the primes of the operands differ \
                    (lhs prime: {}, rhs prime: {})", op, self.prime, rhs.prime);
        }
    }

    fn add_inner(&self, rhs: &Self) -> Self {
        self.check_prime(rhs, "add");
        let mut value = &self.value + &rhs.value;
        if value >= *self.prime {
            value -= self.prime.as_ref();
        }
        Self { value, prime: self.prime.clone() }
    }

    fn sub_inner(&self, rhs: &Self) -> Self {
        self.check_prime(rhs, "sub");
        let value = if self.value >= rhs.value {
            &self.value - &rhs.value
        } else {
            (self.prime.as_ref() - &rhs.value) + &self.value
        };
        Self { value, prime: self.prime.clone() }
    }

    fn mul_inner(&self, rhs: &Self) -> Self {
        self.check_prime(rhs, "mul");
        let value = (&self.value * &rhs.value) % self.prime.as_ref();
        Self { value, prime: self.prime.clone() }
    }

    fn div_inner(&self, rhs: &Self) -> Self {
        self.check_prime(rhs, "div");
        match rhs.invert() {
            Some(inv) => self.mul_inner(&inv),
            None => panic!("FieldElement::div: {} has no inverse modulo {}",
                           rhs.value, rhs.prime),
        }
    }

    fn neg_inner(&self) -> Self {
        let value = if self.value.is_zero() {
            BigUint::zero()
        } else {
            self.prime.as_ref() - &self.value
        };
        Self { value, prime: self.prime.clone() }
    }

    /// Squares this element.
    #[inline]
    pub fn square(&self) -> Self {
        self.mul_inner(self)
    }

    /// Raises this element to the power `e`.
    ///
    /// By convention, 0^0 = 1.
    pub fn pow(&self, e: &BigUint) -> Self {
        Self {
            value: self.value.modpow(e, &self.prime),
            prime: self.prime.clone(),
        }
    }

    /// Computes the multiplicative inverse of this element.
    ///
    /// `None` is returned if the element is not invertible; with a prime
    /// modulus, this happens only for zero.
    pub fn invert(&self) -> Option<Self> {
        let value = self.value.modinv(&self.prime)?;
        Some(Self { value, prime: self.prime.clone() })
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

// Binary operators: all four owned/borrowed combinations, plus the
// compound assignment with both an owned and a borrowed right operand.
macro_rules! impl_field_binop {
    ($tr:ident, $fname:ident, $atr:ident, $aname:ident, $inner:ident) => {
        impl $tr<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline(always)]
            fn $fname(self, other: FieldElement) -> FieldElement {
                self.$inner(&other)
            }
        }

        impl $tr<&FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline(always)]
            fn $fname(self, other: &FieldElement) -> FieldElement {
                self.$inner(other)
            }
        }

        impl $tr<FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline(always)]
            fn $fname(self, other: FieldElement) -> FieldElement {
                self.$inner(&other)
            }
        }

        impl $tr<&FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline(always)]
            fn $fname(self, other: &FieldElement) -> FieldElement {
                self.$inner(other)
            }
        }

        impl $atr<FieldElement> for FieldElement {
            #[inline(always)]
            fn $aname(&mut self, other: FieldElement) {
                *self = self.$inner(&other);
            }
        }

        impl $atr<&FieldElement> for FieldElement {
            #[inline(always)]
            fn $aname(&mut self, other: &FieldElement) {
                *self = self.$inner(other);
            }
        }
    };
}

impl_field_binop!(Add, add, AddAssign, add_assign, add_inner);
impl_field_binop!(Sub, sub, SubAssign, sub_assign, sub_inner);
impl_field_binop!(Mul, mul, MulAssign, mul_assign, mul_inner);
impl_field_binop!(Div, div, DivAssign, div_assign, div_inner);

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn neg(self) -> FieldElement {
        self.neg_inner()
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline(always)]
    fn neg(self) -> FieldElement {
        self.neg_inner()
    }
}

// ========================================================================
