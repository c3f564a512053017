use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops;
use std::str::FromStr;

use crate::rings::scalar::{EuclideanRing, RingWithOne};

/// Machine integer scalar. Arithmetic follows `i64` and is not protected
/// against overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(pub i64);

impl Integer {
    pub fn of(value: i64) -> Self {
        Integer(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Integer(self.0.abs())
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer(value)
    }
}

impl ops::Add for Integer {
    type Output = Integer;

    fn add(self, rhs: Integer) -> Integer {
        Integer(self.0 + rhs.0)
    }
}

impl ops::Sub for Integer {
    type Output = Integer;

    fn sub(self, rhs: Integer) -> Integer {
        Integer(self.0 - rhs.0)
    }
}

impl ops::Mul for Integer {
    type Output = Integer;

    fn mul(self, rhs: Integer) -> Integer {
        Integer(self.0 * rhs.0)
    }
}

impl ops::Div for Integer {
    type Output = Integer;

    fn div(self, rhs: Integer) -> Integer {
        Integer(self.0 / rhs.0)
    }
}

impl ops::Rem for Integer {
    type Output = Integer;

    fn rem(self, rhs: Integer) -> Integer {
        Integer(self.0 % rhs.0)
    }
}

impl ops::Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        Integer(-self.0)
    }
}

impl Zero for Integer {
    fn zero() -> Integer {
        Integer(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl One for Integer {
    fn one() -> Integer {
        Integer(1)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Integer {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Integer(s.trim().parse()?))
    }
}

impl RingWithOne for Integer {
    fn from_integer(n: i64) -> Self {
        Integer(n)
    }
}

impl EuclideanRing for Integer {
    fn unit_part(&self) -> Self {
        if self.0 < 0 {
            Integer(-1)
        } else {
            Integer(1)
        }
    }

    fn is_unit(&self) -> bool {
        self.0 == 1 || self.0 == -1
    }
}

impl RingWithOne for BigInt {
    fn from_integer(n: i64) -> Self {
        BigInt::from(n)
    }
}

impl EuclideanRing for BigInt {
    fn gcd(&self, other: &Self) -> Self {
        num_integer::Integer::gcd(self, other)
    }

    fn unit_part(&self) -> Self {
        match self.sign() {
            Sign::Minus => -BigInt::one(),
            _ => BigInt::one(),
        }
    }

    fn is_unit(&self) -> bool {
        self.abs().is_one()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_ops() {
        let a = Integer::of(17);
        let b = Integer::of(-5);
        assert_eq!(a + b, Integer::of(12));
        assert_eq!(a - b, Integer::of(22));
        assert_eq!(a * b, Integer::of(-85));
        assert_eq!(a / b, Integer::of(-3));
        assert_eq!(a % b, Integer::of(2));
        assert_eq!(-a, Integer::of(-17));
        assert_eq!("  -42 ".parse::<Integer>().unwrap(), Integer::of(-42));
        assert_eq!(format!("{}", b), "-5");
    }

    #[test]
    fn test_bigint_euclidean() {
        let bi = |s: &str| BigInt::parse_bytes(s.as_bytes(), 10).unwrap();

        let a = bi("-100000000000000000000000000000000000000");
        let b = bi("600000000000000000000");
        assert_eq!(
            EuclideanRing::gcd(&a, &b),
            bi("200000000000000000000")
        );
        assert_eq!(a.unit_part(), bi("-1"));
        assert!(bi("-1").is_unit());
        assert!(!b.is_unit());
        assert_eq!(BigInt::from_integer(-9), bi("-9"));
    }
}
