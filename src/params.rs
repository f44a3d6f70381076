//! Curve parameters, as configuration.
//!
//! Curves are normally described by a handful of large integers: the
//! field prime `p`, the equation coefficients `a` and `b` (for the
//! equation `y^2 = x^3 + a*x + b`), the coordinates `(gx, gy)` of the
//! conventional generator `G`, and the order `n` of the subgroup
//! generated by `G`. `CurveParams` holds these values in their usual
//! textual form (hexadecimal, as found in SEC 2 and similar standards);
//! `Curve::from_params()` parses and validates them.
//!
//! Hexadecimal strings may use either case, may have a `0x` prefix, and
//! may be surrounded by whitespace.

use num_bigint::BigUint;
use crate::error::{Error, Result};

/// Textual curve parameters (hexadecimal integers).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParams<'a> {
    pub name: &'a str,
    pub p: &'a str,
    pub a: &'a str,
    pub b: &'a str,
    pub gx: &'a str,
    pub gy: &'a str,
    pub n: &'a str,
}

/// Parameters for curve secp256k1 (SEC 2, section 2.4.1).
pub const SECP256K1: CurveParams<'static> = CurveParams {
    name: "secp256k1",
    p:  "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
    a:  "0",
    b:  "7",
    gx: "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
    gy: "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
    n:  "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
};

/// Integer parameters, after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParsedParams {
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    pub gx: BigUint,
    pub gy: BigUint,
    pub n: BigUint,
}

impl<'a> CurveParams<'a> {

    pub(crate) fn parse(&self) -> Result<ParsedParams> {
        Ok(ParsedParams {
            p: parse_hex("p", self.p)?,
            a: parse_hex("a", self.a)?,
            b: parse_hex("b", self.b)?,
            gx: parse_hex("gx", self.gx)?,
            gy: parse_hex("gy", self.gy)?,
            n: parse_hex("n", self.n)?,
        })
    }
}

/// Parses an unsigned hexadecimal integer.
pub(crate) fn parse_hex(field: &'static str, value: &str) -> Result<BigUint> {
    let s = value.trim();
    let s = s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if s.is_empty() || !s.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex { field, value: value.to_string() });
    }
    BigUint::parse_bytes(s.as_bytes(), 16)
        .ok_or_else(|| Error::InvalidHex { field, value: value.to_string() })
}

// The same secp256k1 constants, as four 64-bit words in big-endian
// order, so that the built-in curve needs no parsing.
pub(crate) const SECP256K1_P: [u64; 4] = [
    0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF, 0xFFFFFFFEFFFFFC2F ];
pub(crate) const SECP256K1_B: [u64; 4] = [ 0, 0, 0, 7 ];
pub(crate) const SECP256K1_GX: [u64; 4] = [
    0x79BE667EF9DCBBAC, 0x55A06295CE870B07,
    0x029BFCDB2DCE28D9, 0x59F2815B16F81798 ];
pub(crate) const SECP256K1_GY: [u64; 4] = [
    0x483ADA7726A3C465, 0x5DA4FBFC0E1108A8,
    0xFD17B448A6855419, 0x9C47D08FFB10D4B8 ];
pub(crate) const SECP256K1_N: [u64; 4] = [
    0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFE,
    0xBAAEDCE6AF48A03B, 0xBFD25E8CD0364141 ];

/// Builds an integer from 64-bit words (most significant word first).
pub(crate) fn w64be(w: &[u64]) -> BigUint {
    let mut buf = Vec::with_capacity(w.len() * 8);
    for x in w {
        buf.extend_from_slice(&x.to_be_bytes());
    }
    BigUint::from_bytes_be(&buf)
}

// ========================================================================
