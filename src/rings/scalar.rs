//! Capability levels of scalar types.
//!
//! A scalar is either a [`Field`] or a [`EuclideanRing`], never both; every
//! scalar is a [`RingWithOne`]. The ring axioms themselves (associativity,
//! distributivity, ...) are preconditions and are not checked: algorithms
//! built on a type breaking them produce meaningless results.
//!
//! The determinant and characteristic polynomial algorithms depend on the
//! capability of the scalar, not on its value. [`RingWithOne`] carries them
//! as provided methods using the division free algorithms, and field types
//! override them with the elimination based ones.

use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Div, Neg, Rem, Sub};

use crate::error::Result;
use crate::matrix::matrix::Matrix;
use crate::rings::polynomial::Polynomial;
use crate::utils::gcd;

pub trait RingWithOne:
    Clone + PartialEq + Debug + Display + Zero + One + Sub<Output = Self> + Neg<Output = Self> + Send + Sync
{
    /// Image of `n` under the canonical map from the integers.
    fn from_integer(n: i64) -> Self {
        let mut result = Self::zero();
        let mut power = Self::one();
        let mut rest = n.unsigned_abs();
        while rest > 0 {
            if rest & 1 == 1 {
                result = result + power.clone();
            }
            rest >>= 1;
            if rest > 0 {
                power = power.clone() + power;
            }
        }
        if n < 0 {
            -result
        } else {
            result
        }
    }

    /// Determinant by permutation expansion, overridden by fields.
    fn determinant(matrix: &Matrix<Self>) -> Result<Self> {
        matrix.leibniz_determinant()
    }

    /// `det(xI - A)` over `Polynomial<Self>`, overridden by fields.
    fn characteristic_polynomial(matrix: &Matrix<Self>) -> Result<Polynomial<Self>> {
        matrix.char_poly_by_expansion()
    }
}

/// Ring with truncating division and remainder. The remainder must be
/// strictly smaller than the divisor in some well-founded sense so that
/// Euclid's algorithm terminates.
pub trait EuclideanRing: RingWithOne + Div<Output = Self> + Rem<Output = Self> {
    fn gcd(&self, other: &Self) -> Self {
        gcd(self, other)
    }

    /// The unit `u` such that `self / u` is the canonical associate of
    /// `self` (non-negative integer, monic polynomial). ONE for zero.
    fn unit_part(&self) -> Self;

    fn is_unit(&self) -> bool;
}

/// Ring where every nonzero element is invertible.
pub trait Field: RingWithOne + Div<Output = Self> {}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
