use num_bigint::BigInt;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::integer::Integer;
use crate::rings::polynomial::Polynomial;
use crate::rings::scalar::{EuclideanRing, Field, RingWithOne};

pub type Rational = Fraction<Integer>;
pub type BigRational = Fraction<BigInt>;

/// Field of fractions of a Euclidean ring.
///
/// Always stored in lowest terms, with the denominator in canonical form
/// (positive for integers, monic for polynomials), so every class of equal
/// fractions has exactly one representation.
#[derive(Debug, Clone)]
pub struct Fraction<T> {
    num: T,
    den: T,
}

impl<T: EuclideanRing> Fraction<T> {
    pub fn new(num: T, den: T) -> Result<Self> {
        if den.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::reduced(num, den))
    }

    pub fn from_int(value: i64) -> Self {
        Fraction {
            num: T::from_integer(value),
            den: T::one(),
        }
    }

    // `den` must be nonzero
    fn reduced(num: T, den: T) -> Self {
        let g = num.gcd(&den);
        let num = num / g.clone();
        let den = den / g;

        let unit = den.unit_part();
        if unit.is_one() {
            return Self { num, den };
        }
        Self {
            num: num / unit.clone(),
            den: den / unit,
        }
    }

    pub fn numerator(&self) -> &T {
        &self.num
    }

    pub fn denominator(&self) -> &T {
        &self.den
    }

    pub fn integer_part(&self) -> T {
        self.num.clone() / self.den.clone()
    }

    pub fn fractional_part(&self) -> Self {
        Self::reduced(self.num.clone() % self.den.clone(), self.den.clone())
    }

    /// Lower back into the ring, failing unless the denominator is a unit.
    pub fn into_integral(self) -> Result<T> {
        if !self.den.is_unit() {
            return Err(Error::NotDivisible);
        }
        Ok(self.num / self.den)
    }

    pub fn try_div(self, rhs: Fraction<T>) -> Result<Self> {
        if rhs.num.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::reduced(self.num * rhs.den, self.den * rhs.num))
    }
}

impl<T: EuclideanRing> From<T> for Fraction<T> {
    fn from(value: T) -> Self {
        Fraction {
            num: value,
            den: T::one(),
        }
    }
}

impl<T: EuclideanRing + FromStr> FromStr for Fraction<T> {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let mut nums = s.split('/');
        let num = nums.next().ok_or("No number")?;
        let den = nums.next().unwrap_or("1");
        if nums.next().is_some() {
            return Err("Too many '/'".into());
        }

        let num = num.trim().parse::<T>().map_err(|_| "Invalid number")?;
        let den = den.trim().parse::<T>().map_err(|_| "Invalid number")?;
        Fraction::new(num, den).map_err(|e| e.to_string())
    }
}

impl<T: EuclideanRing> ops::Add for Fraction<T> {
    type Output = Fraction<T>;

    fn add(self, rhs: Fraction<T>) -> Fraction<T> {
        if self.den == rhs.den {
            return Fraction::reduced(self.num + rhs.num, self.den);
        }

        Fraction::reduced(
            self.num * rhs.den.clone() + rhs.num * self.den.clone(),
            self.den * rhs.den,
        )
    }
}

impl<T: EuclideanRing> ops::Sub for Fraction<T> {
    type Output = Fraction<T>;

    fn sub(self, rhs: Fraction<T>) -> Fraction<T> {
        self + -rhs
    }
}

impl<T: EuclideanRing> ops::Neg for Fraction<T> {
    type Output = Fraction<T>;

    fn neg(self) -> Fraction<T> {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl<T: EuclideanRing> ops::Mul for Fraction<T> {
    type Output = Fraction<T>;

    fn mul(self, rhs: Fraction<T>) -> Fraction<T> {
        Fraction::reduced(self.num * rhs.num, self.den * rhs.den)
    }
}

impl<T: EuclideanRing> ops::Div for Fraction<T> {
    type Output = Fraction<T>;

    /// Panics when `rhs` is zero, see [`Fraction::try_div`].
    fn div(self, rhs: Fraction<T>) -> Fraction<T> {
        match self.try_div(rhs) {
            Ok(result) => result,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<T: EuclideanRing> One for Fraction<T> {
    fn one() -> Fraction<T> {
        Fraction {
            num: T::one(),
            den: T::one(),
        }
    }
}

impl<T: EuclideanRing> Zero for Fraction<T> {
    fn zero() -> Fraction<T> {
        Fraction {
            num: T::zero(),
            den: T::one(),
        }
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl<T: EuclideanRing> Display for Fraction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        let wrap = |part: &T| {
            let s = part.to_string();
            if s.contains(' ') {
                format!("({})", s)
            } else {
                s
            }
        };
        write!(f, "{}/{}", wrap(&self.num), wrap(&self.den))
    }
}

impl<T: EuclideanRing> PartialEq<Fraction<T>> for Fraction<T> {
    fn eq(&self, rhs: &Fraction<T>) -> bool {
        self.num.clone() * rhs.den.clone() == rhs.num.clone() * self.den.clone()
    }
}

impl<T: EuclideanRing> Eq for Fraction<T> {}

impl<T: EuclideanRing + PartialOrd> PartialOrd<Fraction<T>> for Fraction<T> {
    fn partial_cmp(&self, rhs: &Fraction<T>) -> Option<Ordering> {
        let a = self.num.clone() * rhs.den.clone();
        let b = rhs.num.clone() * self.den.clone();
        a.partial_cmp(&b)
    }
}

impl<T: EuclideanRing> std::iter::Sum<Fraction<T>> for Fraction<T> {
    fn sum<I: Iterator<Item = Fraction<T>>>(iter: I) -> Fraction<T> {
        iter.fold(Fraction::zero(), |acc, f| acc + f)
    }
}

impl<T: EuclideanRing> RingWithOne for Fraction<T> {
    fn determinant(matrix: &Matrix<Self>) -> Result<Self> {
        matrix.gauss_determinant()
    }

    fn characteristic_polynomial(matrix: &Matrix<Self>) -> Result<Polynomial<Self>> {
        matrix.char_poly_by_elimination()
    }
}

impl<T: EuclideanRing> Field for Fraction<T> {}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn q(num: i64, den: i64) -> Rational {
        Fraction::new(Integer::of(num), Integer::of(den)).unwrap()
    }

    #[test]
    fn test_canonical_form() {
        let a = q(4, 8);
        assert_eq!((a.numerator(), a.denominator()), (&Integer(1), &Integer(2)));

        let a = q(-3, -6);
        assert_eq!((a.numerator(), a.denominator()), (&Integer(1), &Integer(2)));

        let a = q(3, -6);
        assert_eq!((a.numerator(), a.denominator()), (&Integer(-1), &Integer(2)));

        let a = q(0, -6);
        assert_eq!((a.numerator(), a.denominator()), (&Integer(0), &Integer(1)));

        for k in [-7, -1, 2, 5, 12] {
            let b = q(5 * k, 35 * k);
            assert_eq!(b.numerator(), &Integer(1));
            assert_eq!(b.denominator(), &Integer(7));
        }

        assert_eq!(
            Fraction::new(Integer::of(1), Integer::of(0)).unwrap_err(),
            Error::DivisionByZero
        );
    }

    #[test]
    fn test_fraction_ops() {
        assert_eq!(q(1, 2) + q(1, 3), q(5, 6));
        assert_eq!(q(1, 2) - q(1, 3), q(1, 6));
        assert_eq!(q(2, 3) * q(9, 4), q(3, 2));
        assert_eq!(q(2, 3) / q(4, 9), q(3, 2));
        assert_eq!(-q(2, 3), q(-2, 3));
        assert_eq!(q(1, 4) + q(3, 4), Rational::one());
        assert_eq!(
            q(1, 2).try_div(Rational::zero()).unwrap_err(),
            Error::DivisionByZero
        );
        assert_eq!(
            vec![q(1, 2), q(1, 3), q(1, 6)].into_iter().sum::<Rational>(),
            Rational::one()
        );
    }

    #[test]
    #[should_panic]
    fn test_fraction_div_by_zero_panics() {
        let _ = q(1, 2) / Rational::zero();
    }

    #[test]
    fn test_fraction_cmp() {
        assert!(q(1, 3) < q(1, 2));
        assert!(q(-1, 2) < q(-1, 3));
        assert!(q(7, 2) > Rational::from_int(3));
        assert_eq!(q(2, 4), q(1, 2));
    }

    #[test]
    fn test_integer_and_fractional_part() {
        let a = q(17, 5);
        assert_eq!(a.integer_part(), Integer(3));
        assert_eq!(a.fractional_part(), q(2, 5));
        assert_eq!(q(10, 5).into_integral(), Ok(Integer(2)));
        assert_eq!(q(11, 5).into_integral(), Err(Error::NotDivisible));
    }

    #[test]
    fn test_fraction_display_and_parse() {
        assert_eq!(format!("{}", q(6, 3)), "2");
        assert_eq!(format!("{}", q(-3, 6)), "-1/2");
        assert_eq!("12/-8".parse::<Rational>().unwrap(), q(-3, 2));
        assert_eq!("7".parse::<Rational>().unwrap(), Rational::from_int(7));
        assert!("x/2".parse::<Rational>().is_err());
        assert!("1/0".parse::<Rational>().is_err());

        let bi = |s: &str| BigInt::parse_bytes(s.as_bytes(), 10).unwrap();
        let big = "100000000000000000000000000000/300000000000000000000000000000"
            .parse::<BigRational>()
            .unwrap();
        assert_eq!(big, BigRational::new(bi("1"), bi("3")).unwrap());
    }

    #[test]
    fn test_rational_functions() {
        // (x^2 - 1) / (2x - 2) == (x + 1) / 2
        let p = |c: Vec<i64>| Polynomial::from_coefficients(c.into_iter().map(Rational::from_int).collect());
        let f = Fraction::new(p(vec![-1, 0, 1]), p(vec![-2, 2])).unwrap();
        assert_eq!(f.denominator(), &Polynomial::constant(Rational::one()));
        assert_eq!(f.numerator(), &p(vec![1, 1]).scale(&q(1, 2)));
        assert_eq!(f.clone().into_integral().unwrap(), p(vec![1, 1]).scale(&q(1, 2)));

        let g = Fraction::new(p(vec![1]), p(vec![0, 1])).unwrap();
        assert_eq!(g.into_integral(), Err(Error::NotDivisible));
    }
}
