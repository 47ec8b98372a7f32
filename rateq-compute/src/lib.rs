//! Exact arithmetic for single-variable rational equations.
//!
//! Everything here works over the rationals using [`rug`]: dense polynomials ([`poly::Poly`]),
//! factorization into rational linear factors and an irreducible remainder ([`factor`]),
//! ratios of polynomials built from parsed expressions ([`ratfn::RationalFn`]), exact roots of
//! the form `a + b*sqrt(d)` ([`surd::Surd`]) and the root solver itself ([`solve`]).
//!
//! Potentially long computations take a [`budget::Budget`] and stop with a timeout error once it
//! runs out.

pub mod approx;
pub mod budget;
pub mod error;
pub mod eval;
pub mod factor;
pub mod poly;
pub mod primitive;
pub mod ratfn;
pub mod root;
pub mod solve;
pub mod surd;
