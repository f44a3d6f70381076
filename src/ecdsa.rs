//! ECDSA signatures.
//!
//! This module implements key generation, signature generation and
//! signature verification with ECDSA, over any `Curve`. All scalar
//! arithmetic (private keys, nonces, signature halves) is performed
//! modulo the curve order `n`, which is a different modulus than the
//! base field prime `p`.
//!
//! The `PrivateKey` structure wraps a non-zero secret scalar `d`. The
//! `PublicKey` structure wraps the point `Q = d*G`, which is never the
//! point-at-infinity. A `KeyPair` holds both. A `Signature` is the pair
//! of scalars `(r, t)`.
//!
//! Messages are hashed with SHA-256 by `sign()` and `verify()`; any
//! other hash function can be used through `sign_digest()` and
//! `verify_digest()`, and callers who hash the message themselves can
//! use `sign_prehashed()` and `verify_prehashed()`. The hash value is
//! interpreted as an unsigned big-endian integer, and reduced modulo
//! `n`.
//!
//! Signing is randomized: each signature uses a fresh nonce `k`, drawn
//! uniformly in `[1, n)` from the provided cryptographically secure
//! random source. If that source fails, the error is returned to the
//! caller. Nonces must never be reused: two signatures with the same
//! nonce and the same key reveal the private key. `sign_with_nonce()`
//! exists for test vectors and for callers that derive nonces by other
//! means; it shifts that responsibility to the caller.
//!
//! None of this is constant-time.

// Points are traditionally named with uppercase letters.
#![allow(non_snake_case)]

use core::fmt;
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Sha256, Digest};
use std::sync::Arc;
use super::{CryptoRng, RngCore};
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::point::Point;

/// An ECDSA private key simply wraps around a non-zero scalar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    d: FieldElement,   // secret scalar, modulo n
}

/// An ECDSA public key simply wraps around a curve point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: Point,
}

/// A private key along with the matching public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub private: PrivateKey,
    pub public: PublicKey,
}

/// An ECDSA signature: two scalars `r` and `t`, modulo the curve order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    r: FieldElement,
    t: FieldElement,
}

/// Converts a hash value into a scalar.
///
/// The hash value is interpreted with the unsigned big-endian convention,
/// then reduced modulo the curve order.
pub fn hash_to_scalar(curve: &Curve, hv: &[u8]) -> FieldElement {
    curve.scalar(BigUint::from_bytes_be(hv))
}

/// Draws a scalar uniformly in `[1, n)`.
///
/// Random integers of the bit length of `n` are generated until one
/// falls in the proper range. Since `n` is at least half the size of
/// the sampled range, each draw is accepted with probability close to
/// 1/2 in the worst case (and very close to 1 for curves such as
/// secp256k1, whose order is just below a power of two); the loop
/// terminates after two draws on average. An error is returned if the
/// random source fails, or if `n` is lower than 2 (no integer can then
/// be drawn).
pub fn random_scalar<T: CryptoRng + RngCore>(n: &Arc<BigUint>, rng: &mut T)
    -> Result<FieldElement>
{
    if **n <= BigUint::from(1u32) {
        return Err(Error::InvalidParameters(
            "scalar modulus must be greater than 1"));
    }
    let nbits = n.bits();
    let len = ((nbits + 7) >> 3) as usize;
    let excess = (len as u64) * 8 - nbits;
    let mut buf = vec![0u8; len];
    loop {
        rng.try_fill_bytes(&mut buf)?;
        buf[0] &= 0xFFu8 >> excess;
        let k = BigUint::from_bytes_be(&buf);

        // Reject 0 and out-of-range values.
        if !k.is_zero() && k < **n {
            return Ok(FieldElement::new(k, n.clone()));
        }
    }
}

impl PrivateKey {

    /// Creates a private key from its secret scalar.
    ///
    /// The scalar is reduced modulo the curve order; `Error::ZeroScalar`
    /// is returned if the result is zero. If the curve order is only a
    /// multiple of the order of `G`, some non-zero scalars map to the
    /// point-at-infinity; they are rejected with
    /// `Error::InfinityPublicKey`.
    pub fn new(curve: &Curve, d: &BigUint) -> Result<Self> {
        Ok(Self::derive(curve, curve.scalar(d.clone()))?.0)
    }

    /// Generates a new private key from a cryptographically secure RNG.
    pub fn generate<T: CryptoRng + RngCore>(curve: &Curve, rng: &mut T)
        -> Result<Self>
    {
        Ok(Self::generate_pair(curve, rng)?.0)
    }

    // Validates the scalar and computes the matching public key.
    fn derive(curve: &Curve, d: FieldElement) -> Result<(Self, PublicKey)> {
        if d.is_zero() {
            return Err(Error::ZeroScalar);
        }
        let Q = curve.scalar_base_mul(d.value());
        if Q.is_infinity() {
            return Err(Error::InfinityPublicKey);
        }
        Ok((Self { d }, PublicKey { point: Q }))
    }

    // Draws scalars until one yields a valid key pair. With a prime
    // curve order, the first draw is always accepted.
    fn generate_pair<T: CryptoRng + RngCore>(curve: &Curve, rng: &mut T)
        -> Result<(Self, PublicKey)>
    {
        loop {
            let d = random_scalar(curve.order_modulus(), rng)?;
            match Self::derive(curve, d) {
                Err(Error::InfinityPublicKey) => continue,
                r => return r,
            }
        }
    }

    /// Gets the secret scalar.
    #[inline(always)]
    pub fn scalar(&self) -> &FieldElement {
        &self.d
    }

    /// Gets the public key corresponding to that private key.
    pub fn to_public_key(&self, curve: &Curve) -> PublicKey {
        PublicKey { point: curve.scalar_base_mul(self.d.value()) }
    }

    /// Signs a message, hashed with SHA-256.
    pub fn sign<T: CryptoRng + RngCore>(&self, curve: &Curve, msg: &[u8],
                                        rng: &mut T) -> Result<Signature>
    {
        self.sign_digest::<Sha256, T>(curve, msg, rng)
    }

    /// Signs a message, hashed with the hash function `D`.
    pub fn sign_digest<D: Digest, T: CryptoRng + RngCore>(&self,
        curve: &Curve, msg: &[u8], rng: &mut T) -> Result<Signature>
    {
        self.sign_prehashed(curve, &D::digest(msg), rng)
    }

    /// Signs a hash value.
    ///
    /// The provided hash value (`hv`) MUST be a real hash value, not a
    /// raw unhashed message.
    pub fn sign_prehashed<T: CryptoRng + RngCore>(&self, curve: &Curve,
        hv: &[u8], rng: &mut T) -> Result<Signature>
    {
        loop {
            let k = random_scalar(curve.order_modulus(), rng)?;
            if let Some(sig) = self.sign_with_nonce(curve, hv, &k) {
                return Ok(sig);
            }

            // Degenerate nonce or signature. With a prime curve order,
            // this means r or t was zero, which has negligible
            // probability; a fresh nonce is drawn.
        }
    }

    /// Signs a hash value with the provided nonce `k`.
    ///
    /// `None` is returned if `k` is not an invertible scalar modulo the
    /// curve order (in particular if it is zero, or if it was built
    /// modulo another integer), or if it yields a degenerate signature
    /// (`r = 0`, or `t` not invertible). The nonce MUST be secret, and
    /// MUST NOT be used for any other signature.
    pub fn sign_with_nonce(&self, curve: &Curve, hv: &[u8], k: &FieldElement)
        -> Option<Signature>
    {
        if k.prime() != curve.order() {
            return None;
        }
        let kinv = k.invert()?;
        let z = hash_to_scalar(curve, hv);

        // R = k*G; r = x(R) mod n
        let R = curve.scalar_base_mul(k.value());
        let r = R.x()?.reduce(curve.order_modulus().clone());
        if r.is_zero() {
            return None;
        }

        // t = (z + r*d) / k
        let t = (z + &r * &self.d) * kinv;
        if t.invert().is_none() {
            return None;
        }
        Some(Signature { r, t })
    }
}

impl PublicKey {

    /// Creates a public key from a curve point.
    ///
    /// The point must be on the curve, and must not be the
    /// point-at-infinity.
    pub fn new(curve: &Curve, point: Point) -> Result<Self> {
        if point.is_infinity() {
            return Err(Error::InfinityPublicKey);
        }
        if !curve.is_on_curve(&point) {
            return Err(Error::NotOnCurve);
        }
        Ok(Self { point })
    }

    /// Gets the public point `Q`.
    #[inline(always)]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Verifies a signature on a message, hashed with SHA-256.
    pub fn verify(&self, curve: &Curve, msg: &[u8], sig: &Signature) -> bool {
        self.verify_digest::<Sha256>(curve, msg, sig)
    }

    /// Verifies a signature on a message, hashed with the hash function
    /// `D`.
    pub fn verify_digest<D: Digest>(&self, curve: &Curve, msg: &[u8],
                                    sig: &Signature) -> bool
    {
        self.verify_prehashed(curve, &D::digest(msg), sig)
    }

    /// Verifies a signature on a hash value.
    ///
    /// Signatures with a zero half, or with halves that are not scalars
    /// for this curve, are rejected.
    pub fn verify_prehashed(&self, curve: &Curve, hv: &[u8], sig: &Signature)
        -> bool
    {
        let (r, t) = (&sig.r, &sig.t);
        if r.prime() != curve.order() || t.prime() != curve.order() {
            return false;
        }
        if r.is_zero() || t.is_zero() {
            return false;
        }
        let z = hash_to_scalar(curve, hv);

        // w = 1/t; u1 = z*w; u2 = r*w
        let w = match t.invert() {
            Some(w) => w,
            None => return false,
        };
        let u1 = &z * &w;
        let u2 = r * &w;

        // R = u1*G + u2*Q; the signature is valid if x(R) = r mod n.
        let R = curve.mul_add_base(&self.point, u2.value(), u1.value());
        match R.x() {
            None => false,
            Some(x) => x.reduce(curve.order_modulus().clone()) == *r,
        }
    }
}

impl KeyPair {

    /// Derives the key pair for the provided private scalar.
    pub fn new(curve: &Curve, d: &BigUint) -> Result<Self> {
        let (private, public) =
            PrivateKey::derive(curve, curve.scalar(d.clone()))?;
        Ok(Self { private, public })
    }

    /// Generates a new key pair from a cryptographically secure RNG.
    pub fn generate<T: CryptoRng + RngCore>(curve: &Curve, rng: &mut T)
        -> Result<Self>
    {
        let (private, public) = PrivateKey::generate_pair(curve, rng)?;
        Ok(Self { private, public })
    }
}

impl Signature {

    /// Creates a signature from its two halves.
    ///
    /// No verification is performed here; signatures with a zero half
    /// or with halves modulo another integer than the curve order are
    /// rejected by the verification functions.
    pub fn new(r: FieldElement, t: FieldElement) -> Self {
        Self { r, t }
    }

    /// Gets the `r` half.
    #[inline(always)]
    pub fn r(&self) -> &FieldElement {
        &self.r
    }

    /// Gets the `t` half.
    #[inline(always)]
    pub fn t(&self) -> &FieldElement {
        &self.t
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(0x{:x}, 0x{:x})", self.r, self.t)
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::params::SECP256K1;
    use core::num::NonZeroU32;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;
    use sha3::Sha3_256;

    const PRIV: &[u8] =
        b"83ecb3984a4f9ff03e84d5f9c0d7f888a81833643047acc58eb6431e01d9bac8";

    fn hex_int(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    fn fixed_key(curve: &Curve) -> KeyPair {
        KeyPair::new(curve, &BigUint::parse_bytes(PRIV, 16).unwrap()).unwrap()
    }

    // A source that always fails.
    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8])
            -> core::result::Result<(), rand_core::Error>
        {
            Err(rand_core::Error::from(
                NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap()))
        }
    }

    impl CryptoRng for FailingRng {}

    // A source that returns predefined blocks (each block fills one
    // request entirely).
    struct ScriptedRng {
        blocks: Vec<Vec<u8>>,
        calls: usize,
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }
        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.try_fill_bytes(dest).unwrap();
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8])
            -> core::result::Result<(), rand_core::Error>
        {
            dest.copy_from_slice(&self.blocks[self.calls]);
            self.calls += 1;
            Ok(())
        }
    }

    impl CryptoRng for ScriptedRng {}

    #[test]
    fn keygen() {
        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let Q = curve.point(
            curve.field_element(hex_int(
                "653bd02ba1367e5d4cd695b6f857d1cd90d4d8d42bc155d85377b7d2d0ed2e71")),
            curve.field_element(hex_int(
                "04e8f5da403ab78decec1f19e2396739ea544e2b14159beb5091b30b418b813a")))
            .unwrap();
        assert_eq!(kp.public.point(), &Q);
        assert_eq!(kp.public, PublicKey::new(&curve, Q).unwrap());
        assert_eq!(kp.private.scalar().prime(), curve.order());

        // Scalars are reduced modulo n; zero is rejected.
        let n = curve.order().clone();
        assert!(matches!(PrivateKey::new(&curve, &BigUint::from(0u32)),
                         Err(Error::ZeroScalar)));
        assert!(matches!(PrivateKey::new(&curve, &n),
                         Err(Error::ZeroScalar)));
        assert_eq!(PrivateKey::new(&curve, &(&n + 5u32)).unwrap(),
                   PrivateKey::new(&curve, &BigUint::from(5u32)).unwrap());
    }

    #[test]
    fn public_key_validation() {
        let curve = Curve::secp256k1();
        assert!(matches!(PublicKey::new(&curve, Point::INFINITY),
                         Err(Error::InfinityPublicKey)));
        let P = Point::affine(curve.field_element(BigUint::from(1u32)),
                              curve.field_element(BigUint::from(1u32)));
        assert!(matches!(PublicKey::new(&curve, P), Err(Error::NotOnCurve)));
    }

    #[test]
    fn sign_verify_hello() {
        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let sig = kp.private.sign(&curve, b"hello", &mut rng).unwrap();
        assert!(kp.public.verify(&curve, b"hello", &sig));
        assert!(!kp.public.verify(&curve, b"hollo", &sig));
        assert!(!kp.public.verify(&curve, b"hello ", &sig));
        assert!(!kp.public.verify(&curve, b"", &sig));

        // The same signature must not verify under another key.
        let other = KeyPair::generate(&curve, &mut rng).unwrap();
        assert!(!other.public.verify(&curve, b"hello", &sig));
    }

    #[test]
    fn fixed_nonce_vectors() {
        // Values computed independently for d = PRIV and message "hello".
        const VECTORS: [(&str, &str, &str); 2] = [
            (
                "2a",
                "fe8d1eb1bcb3432b1db5833ff5f2226d9cb5e65cee430558c18ed3a3c86ce1af",
                "efa9d5df8f8e68cb8167d508a9574cac77720fb96ac9e5a903775f38984d722c",
            ),
            (
                "deadbeef",
                "76d2fdf1302d1fa9556f4df94ec84cefba6d482e54f47c6c2a238c1baa560f0e",
                "9231343c6208e73dbe06a773b4081fb6829666d8dc23f681c996f0f49ce80ae5",
            ),
        ];

        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let hv = Sha256::digest(b"hello");
        assert_eq!(hv[..], hex::decode(
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
            .unwrap()[..]);
        assert_eq!(hash_to_scalar(&curve, &hv), curve.scalar(hex_int(
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")));

        let mut sigs = Vec::new();
        for (k, r, t) in VECTORS {
            let k = curve.scalar(hex_int(k));
            let sig = kp.private.sign_with_nonce(&curve, &hv, &k).unwrap();
            assert_eq!(sig.r(), &curve.scalar(hex_int(r)));
            assert_eq!(sig.t(), &curve.scalar(hex_int(t)));
            assert!(kp.public.verify(&curve, b"hello", &sig));
            assert!(kp.public.verify_prehashed(&curve, &hv, &sig));
            assert!(!kp.public.verify(&curve, b"hollo", &sig));
            sigs.push(sig);
        }

        // Distinct nonces yield distinct signatures (both valid).
        assert_ne!(sigs[0], sigs[1]);
        assert_ne!(sigs[0].r(), sigs[1].r());
        assert_eq!(format!("{}", sigs[0]),
            "(0xfe8d1eb1bcb3432b1db5833ff5f2226d9cb5e65cee430558c18ed3a3c86ce1af, \
             0xefa9d5df8f8e68cb8167d508a9574cac77720fb96ac9e5a903775f38984d722c)");

        // Zero nonce is refused.
        assert!(kp.private.sign_with_nonce(&curve, &hv, &curve.scalar(
            BigUint::from(0u32))).is_none());
    }

    #[test]
    fn fresh_nonces() {
        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let sig1 = kp.private.sign(&curve, b"hello", &mut rng).unwrap();
        let sig2 = kp.private.sign(&curve, b"hello", &mut rng).unwrap();
        assert!(kp.public.verify(&curve, b"hello", &sig1));
        assert!(kp.public.verify(&curve, b"hello", &sig2));
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn nonce_rejection_sampling() {
        // The first two draws are out of range (zero, then a value not
        // lower than n); the third one is 42.
        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let mut k42 = vec![0u8; 32];
        k42[31] = 0x2A;
        let mut rng = ScriptedRng {
            blocks: vec![vec![0u8; 32], vec![0xFFu8; 32], k42],
            calls: 0,
        };
        let sig = kp.private.sign(&curve, b"hello", &mut rng).unwrap();
        assert_eq!(rng.calls, 3);
        let hv = Sha256::digest(b"hello");
        let k = curve.scalar(BigUint::from(42u32));
        assert_eq!(Some(sig), kp.private.sign_with_nonce(&curve, &hv, &k));
    }

    #[test]
    fn random_scalar_range() {
        // Order 21 (5 bits): values 0 and 21..31 must be rejected.
        let n = Arc::new(BigUint::from(21u32));
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let mut seen = [false; 21];
        for _ in 0..2000 {
            let k = random_scalar(&n, &mut rng).unwrap();
            assert_eq!(k.prime(), n.as_ref());
            assert!(!k.is_zero());
            let v = k.value().to_u32_digits();
            assert_eq!(v.len(), 1);
            assert!(v[0] < 21);
            seen[v[0] as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&b| b));
    }

    #[test]
    fn rng_failure() {
        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let r = kp.private.sign(&curve, b"hello", &mut FailingRng);
        assert!(matches!(r, Err(Error::Rng(_))));
        assert!(matches!(PrivateKey::generate(&curve, &mut FailingRng),
                         Err(Error::Rng(_))));
        assert!(matches!(KeyPair::generate(&curve, &mut FailingRng),
                         Err(Error::Rng(_))));
    }

    #[test]
    fn malformed_signatures() {
        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let sig = kp.private.sign(&curve, b"hello", &mut rng).unwrap();
        let zero = curve.scalar(BigUint::from(0u32));
        let one = curve.scalar(BigUint::from(1u32));

        let pk = &kp.public;
        assert!(pk.verify(&curve, b"hello", &sig));
        assert!(!pk.verify(&curve, b"hello",
                           &Signature::new(zero.clone(), sig.t().clone())));
        assert!(!pk.verify(&curve, b"hello",
                           &Signature::new(sig.r().clone(), zero.clone())));
        assert!(!pk.verify(&curve, b"hello",
                           &Signature::new(sig.r() + &one, sig.t().clone())));
        assert!(!pk.verify(&curve, b"hello",
                           &Signature::new(sig.r().clone(), sig.t() + &one)));
        assert!(!pk.verify(&curve, b"hello",
                           &Signature::new(sig.t().clone(), sig.r().clone())));

        // Halves taken modulo the field prime instead of the order.
        let wrong = Signature::new(sig.r().reduce(curve.prime().clone()),
                                   sig.t().reduce(curve.prime().clone()));
        assert!(!pk.verify(&curve, b"hello", &wrong));
    }

    #[test]
    fn other_digests() {
        let curve = Curve::from_params(&SECP256K1).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let kp = KeyPair::generate(&curve, &mut rng).unwrap();
        let sig = kp.private.sign_digest::<Sha3_256, _>(&curve, b"hello", &mut rng)
            .unwrap();
        assert!(kp.public.verify_digest::<Sha3_256>(&curve, b"hello", &sig));
        assert!(!kp.public.verify_digest::<Sha3_256>(&curve, b"hollo", &sig));
        assert!(!kp.public.verify(&curve, b"hello", &sig));
    }

    #[test]
    fn signatures() {
        let curve = Curve::secp256k1();
        let mut sh = Sha256::new();
        sh.update(b"123400");
        let hv1: [u8; 32] = sh.finalize_reset().into();
        sh.update(b"123400");
        sh.update(&[0u8]);
        let hv2: [u8; 32] = sh.finalize_reset().into();

        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let kp0 = KeyPair::generate(&curve, &mut rng).unwrap();
        for _ in 0..5 {
            let kp = KeyPair::generate(&curve, &mut rng).unwrap();
            let sig1 = kp.private.sign_prehashed(&curve, &hv1, &mut rng).unwrap();
            let sig2 = kp.private.sign_prehashed(&curve, &hv2, &mut rng).unwrap();
            assert!(kp.public.verify_prehashed(&curve, &hv1, &sig1));
            assert!(kp.public.verify_prehashed(&curve, &hv2, &sig2));
            assert!(!kp.public.verify_prehashed(&curve, &hv2, &sig1));
            assert!(!kp.public.verify_prehashed(&curve, &hv1, &sig2));
            assert!(!kp0.public.verify_prehashed(&curve, &hv1, &sig1));
            assert!(!kp0.public.verify_prehashed(&curve, &hv2, &sig2));
        }
    }

    // y^2 = x^3 + 7 over GF(223); G = (47, 71) has order 21. The
    // declared order n may be 21 or a multiple of it.
    fn toy_curve(n: u32) -> Curve {
        Curve::new("toy223",
            BigUint::from(223u32), BigUint::from(0u32), BigUint::from(7u32),
            BigUint::from(47u32), BigUint::from(71u32), BigUint::from(n))
            .unwrap()
    }

    #[test]
    fn composite_order() {
        // n = 21 = 3*7: nonces sharing a factor with n are not
        // invertible, and are refused instead of panicking.
        let curve = toy_curve(21);
        let kp = KeyPair::new(&curve, &BigUint::from(5u32)).unwrap();
        let hv = Sha256::digest(b"hello");
        for k in [3u32, 6, 7, 14, 18] {
            let k = curve.scalar(BigUint::from(k));
            assert!(kp.private.sign_with_nonce(&curve, &hv, &k).is_none());
        }

        // Signing retries until it finds a usable nonce; every produced
        // signature verifies.
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        for i in 0..50u32 {
            let msg = i.to_le_bytes();
            let sig = kp.private.sign(&curve, &msg, &mut rng).unwrap();
            assert!(sig.t().invert().is_some());
            assert!(kp.public.verify(&curve, &msg, &sig));
        }
    }

    #[test]
    fn nonce_modulus() {
        // A nonce taken modulo the field prime instead of the curve
        // order is refused.
        let curve = Curve::secp256k1();
        let kp = fixed_key(&curve);
        let hv = Sha256::digest(b"hello");
        let k = curve.field_element(BigUint::from(42u32));
        assert!(kp.private.sign_with_nonce(&curve, &hv, &k).is_none());
        let k = curve.scalar(BigUint::from(42u32));
        assert!(kp.private.sign_with_nonce(&curve, &hv, &k).is_some());

        let toy = toy_curve(21);
        let kp = KeyPair::new(&toy, &BigUint::from(5u32)).unwrap();
        let k = toy.field_element(BigUint::from(4u32));
        assert!(kp.private.sign_with_nonce(&toy, &hv, &k).is_none());
    }

    #[test]
    fn infinity_public_key() {
        // n = 42 is twice the order of G: 21*G is the point-at-infinity
        // although 21 is not zero modulo n.
        let curve = toy_curve(42);
        assert!(matches!(PrivateKey::new(&curve, &BigUint::from(21u32)),
                         Err(Error::InfinityPublicKey)));
        assert!(matches!(KeyPair::new(&curve, &BigUint::from(63u32)),
                         Err(Error::InfinityPublicKey)));
        assert!(matches!(KeyPair::new(&curve, &BigUint::from(42u32)),
                         Err(Error::ZeroScalar)));
        let kp = KeyPair::new(&curve, &BigUint::from(22u32)).unwrap();
        assert_eq!(kp.public.point(), curve.generator());

        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..100 {
            let kp = KeyPair::generate(&curve, &mut rng).unwrap();
            assert!(!kp.public.point().is_infinity());
            assert_eq!(kp.private.to_public_key(&curve), kp.public);
            let sk = PrivateKey::generate(&curve, &mut rng).unwrap();
            assert!(!sk.to_public_key(&curve).point().is_infinity());
        }
    }

    #[test]
    fn random_scalar_small_modulus() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        for n in [0u32, 1] {
            let n = Arc::new(BigUint::from(n));
            assert!(matches!(random_scalar(&n, &mut rng),
                             Err(Error::InvalidParameters(_))));
        }
        let n = Arc::new(BigUint::from(2u32));
        for _ in 0..10 {
            assert_eq!(random_scalar(&n, &mut rng).unwrap().value(),
                       &BigUint::from(1u32));
        }
    }

    #[cfg(feature = "os-rng")]
    #[test]
    fn os_rng() {
        let curve = Curve::secp256k1();
        let kp = KeyPair::generate(&curve, &mut crate::OsRng).unwrap();
        let sig = kp.private.sign(&curve, b"hello", &mut crate::OsRng).unwrap();
        assert!(kp.public.verify(&curve, b"hello", &sig));
        assert!(!kp.public.verify(&curve, b"hollo", &sig));
    }
}
