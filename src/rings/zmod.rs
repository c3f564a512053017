use num_traits::{One, Zero};
use std::fmt;
use std::ops;

use crate::error::Result;
use crate::matrix::matrix::Matrix;
use crate::rings::polynomial::Polynomial;
use crate::rings::scalar::{Field, RingWithOne};
use crate::utils::fastpow;

/// Integers modulo `P`. `P` must be prime for this to be a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zmod<const P: u64> {
    value: u64,
}

impl<const P: u64> Zmod<P> {
    pub fn new(value: i64) -> Self {
        Zmod {
            value: (value as i128).rem_euclid(P as i128) as u64,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn inverse(&self) -> Option<Self> {
        if self.value == 0 {
            return None;
        }
        Some(fastpow(self, P - 2))
    }
}

impl<const P: u64> ops::Add for Zmod<P> {
    type Output = Zmod<P>;

    fn add(self, rhs: Zmod<P>) -> Zmod<P> {
        Zmod {
            value: ((self.value as u128 + rhs.value as u128) % P as u128) as u64,
        }
    }
}

impl<const P: u64> ops::Sub for Zmod<P> {
    type Output = Zmod<P>;

    fn sub(self, rhs: Zmod<P>) -> Zmod<P> {
        Zmod {
            value: if rhs.value > self.value {
                self.value + (P - rhs.value)
            } else {
                self.value - rhs.value
            },
        }
    }
}

impl<const P: u64> ops::Neg for Zmod<P> {
    type Output = Zmod<P>;

    fn neg(self) -> Zmod<P> {
        Zmod::zero() - self
    }
}

impl<const P: u64> ops::Mul for Zmod<P> {
    type Output = Zmod<P>;

    fn mul(self, rhs: Zmod<P>) -> Zmod<P> {
        Zmod {
            value: ((self.value as u128 * rhs.value as u128) % P as u128) as u64,
        }
    }
}

impl<const P: u64> ops::Div for Zmod<P> {
    type Output = Zmod<P>;

    fn div(self, rhs: Zmod<P>) -> Zmod<P> {
        match rhs.inverse() {
            Some(inverse) => self * inverse,
            None => panic!("Division by zero"),
        }
    }
}

impl<const P: u64> Zero for Zmod<P> {
    fn zero() -> Zmod<P> {
        Zmod { value: 0 }
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl<const P: u64> One for Zmod<P> {
    fn one() -> Zmod<P> {
        Zmod { value: 1 % P }
    }
}

impl<const P: u64> fmt::Display for Zmod<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<const P: u64> RingWithOne for Zmod<P> {
    fn from_integer(n: i64) -> Self {
        Zmod::new(n)
    }

    fn determinant(matrix: &Matrix<Self>) -> Result<Self> {
        matrix.gauss_determinant()
    }

    fn characteristic_polynomial(matrix: &Matrix<Self>) -> Result<Polynomial<Self>> {
        matrix.char_poly_by_elimination()
    }
}

impl<const P: u64> Field for Zmod<P> {}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
