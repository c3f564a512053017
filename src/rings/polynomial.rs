use num_traits::{One, Zero};
use std::collections::BTreeMap;
use std::fmt;
use std::ops;

use crate::error::{Error, Result};
use crate::rings::scalar::{EuclideanRing, Field, RingWithOne};
use crate::utils::fastpow;

/// Range of integer candidates scanned by [`Polynomial::try_solve_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootSearch {
    /// Candidates are `-bound..=bound`.
    pub bound: i64,
}

impl Default for RootSearch {
    fn default() -> Self {
        RootSearch { bound: 100 }
    }
}

/// Sparse univariate polynomial in `x`.
///
/// Maps exponents to coefficients and never stores a zero coefficient, so
/// structural equality is polynomial equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<T> {
    coefficients: BTreeMap<usize, T>,
}

impl<T: RingWithOne> Polynomial<T> {
    pub fn new() -> Self {
        Polynomial {
            coefficients: BTreeMap::new(),
        }
    }

    pub fn constant(coefficient: T) -> Self {
        Self::monomial(coefficient, 0)
    }

    pub fn monomial(coefficient: T, power: usize) -> Self {
        let mut coefficients = BTreeMap::new();
        if !coefficient.is_zero() {
            coefficients.insert(power, coefficient);
        }
        Polynomial { coefficients }
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::monomial(T::one(), 1)
    }

    /// Build from coefficients in ascending order of power.
    pub fn from_coefficients(coefficients: Vec<T>) -> Self {
        Polynomial {
            coefficients: coefficients
                .into_iter()
                .enumerate()
                .filter(|(_, c)| !c.is_zero())
                .collect(),
        }
    }

    /// Largest exponent, 0 for the zero polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.keys().next_back().copied().unwrap_or(0)
    }

    /// Coefficient of the largest exponent, ZERO for the zero polynomial.
    pub fn leading_coefficient(&self) -> T {
        self.coefficients
            .values()
            .next_back()
            .cloned()
            .unwrap_or_else(T::zero)
    }

    pub fn coefficient(&self, power: usize) -> T {
        self.coefficients
            .get(&power)
            .cloned()
            .unwrap_or_else(T::zero)
    }

    /// Nonzero terms as `(power, coefficient)`, highest power first.
    pub fn terms(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.coefficients.iter().rev().map(|(p, c)| (*p, c))
    }

    pub fn evaluate(&self, x: &T) -> T {
        self.coefficients
            .iter()
            .fold(T::zero(), |acc, (power, c)| {
                acc + fastpow(x, *power as u64) * c.clone()
            })
    }

    pub fn scale(&self, factor: &T) -> Self {
        Polynomial {
            coefficients: self
                .coefficients
                .iter()
                .map(|(p, c)| (*p, c.clone() * factor.clone()))
                .filter(|(_, c)| !c.is_zero())
                .collect(),
        }
    }

    fn cleaned(mut self) -> Self {
        self.coefficients.retain(|_, c| !c.is_zero());
        self
    }
}

impl<T: Field> Polynomial<T> {
    /// Long division, returning `(quotient, remainder)` with
    /// `deg(remainder) < deg(divisor)` or a zero remainder.
    pub fn try_divide(&self, divisor: &Polynomial<T>) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let lead = divisor.leading_coefficient();
        let mut quotient = Polynomial::new();
        let mut remainder = self.clone();
        while !remainder.is_zero() && remainder.degree() >= divisor.degree() {
            let shift = remainder.degree() - divisor.degree();
            let term = Polynomial::monomial(remainder.leading_coefficient() / lead.clone(), shift);
            remainder = remainder - divisor.clone() * term.clone();
            quotient = quotient + term;
        }
        Ok((quotient, remainder))
    }

    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        self.scale(&(T::one() / self.leading_coefficient()))
    }

    /// Integer roots with their multiplicities, scanning the default
    /// [`RootSearch`] range.
    pub fn try_solve(&self) -> Vec<(T, usize)> {
        self.try_solve_with(&RootSearch::default())
    }

    /// Integer roots with their multiplicities, in increasing candidate
    /// order. Only images of the integers in `-bound..=bound` are tried:
    /// other roots are silently missed. The zero polynomial has no roots.
    pub fn try_solve_with(&self, search: &RootSearch) -> Vec<(T, usize)> {
        let mut roots = vec![];
        if self.is_zero() {
            return roots;
        }

        let mut rest = self.clone();
        for candidate in -search.bound..=search.bound {
            if rest.degree() == 0 {
                break;
            }
            let value = T::from_integer(candidate);
            let factor = Polynomial::from_coefficients(vec![-value.clone(), T::one()]);

            let mut multiplicity = 0;
            while rest.degree() > 0 && rest.evaluate(&value).is_zero() {
                rest = rest / factor.clone();
                multiplicity += 1;
            }
            if multiplicity > 0 {
                roots.push((value, multiplicity));
            }
        }

        tracing::debug!(polynomial = %self, roots = roots.len(), "root search");
        roots
    }
}

impl<T: RingWithOne> Default for Polynomial<T> {
    fn default() -> Self {
        Polynomial::new()
    }
}

impl<T: RingWithOne> ops::Add for Polynomial<T> {
    type Output = Polynomial<T>;

    fn add(mut self, rhs: Polynomial<T>) -> Polynomial<T> {
        for (power, coefficient) in rhs.coefficients {
            let entry = self.coefficients.entry(power).or_insert_with(T::zero);
            *entry = entry.clone() + coefficient;
        }
        self.cleaned()
    }
}

impl<T: RingWithOne> ops::Neg for Polynomial<T> {
    type Output = Polynomial<T>;

    fn neg(self) -> Polynomial<T> {
        Polynomial {
            coefficients: self
                .coefficients
                .into_iter()
                .map(|(p, c)| (p, -c))
                .collect(),
        }
    }
}

impl<T: RingWithOne> ops::Sub for Polynomial<T> {
    type Output = Polynomial<T>;

    fn sub(self, rhs: Polynomial<T>) -> Polynomial<T> {
        self + -rhs
    }
}

impl<T: RingWithOne> ops::Mul for Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Polynomial<T>) -> Polynomial<T> {
        let mut coefficients: BTreeMap<usize, T> = BTreeMap::new();
        for (p1, c1) in &self.coefficients {
            for (p2, c2) in &rhs.coefficients {
                let entry = coefficients.entry(p1 + p2).or_insert_with(T::zero);
                *entry = entry.clone() + c1.clone() * c2.clone();
            }
        }
        Polynomial { coefficients }.cleaned()
    }
}

impl<T: Field> ops::Div for Polynomial<T> {
    type Output = Polynomial<T>;

    /// Quotient of the long division. Panics when `rhs` is zero.
    fn div(self, rhs: Polynomial<T>) -> Polynomial<T> {
        match self.try_divide(&rhs) {
            Ok((quotient, _)) => quotient,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<T: Field> ops::Rem for Polynomial<T> {
    type Output = Polynomial<T>;

    /// Remainder of the long division. Panics when `rhs` is zero.
    fn rem(self, rhs: Polynomial<T>) -> Polynomial<T> {
        match self.try_divide(&rhs) {
            Ok((_, remainder)) => remainder,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<T: RingWithOne> Zero for Polynomial<T> {
    fn zero() -> Polynomial<T> {
        Polynomial::new()
    }

    fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl<T: RingWithOne> One for Polynomial<T> {
    fn one() -> Polynomial<T> {
        Polynomial::constant(T::one())
    }
}

impl<T: RingWithOne> fmt::Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (i, (power, coefficient)) in self.terms().enumerate() {
            let rendered = coefficient.to_string();
            let (negative, magnitude) = match rendered.strip_prefix('-') {
                Some(magnitude) => (true, magnitude.to_string()),
                None => (false, rendered),
            };

            if i == 0 {
                if negative {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", if negative { '-' } else { '+' })?;
            }

            if power == 0 {
                write!(f, "{}", magnitude)?;
                continue;
            }
            if magnitude.contains(' ') || magnitude.contains('/') {
                write!(f, "({})", magnitude)?;
            } else if magnitude != "1" {
                write!(f, "{}", magnitude)?;
            }
            match power {
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", power)?,
            }
        }
        Ok(())
    }
}

impl<T: RingWithOne> RingWithOne for Polynomial<T> {}

impl<T: Field> EuclideanRing for Polynomial<T> {
    fn unit_part(&self) -> Self {
        if self.is_zero() {
            return Polynomial::one();
        }
        Polynomial::constant(self.leading_coefficient())
    }

    fn is_unit(&self) -> bool {
        !self.is_zero() && self.degree() == 0
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Rational;
    use crate::rings::integer::Integer;
    use crate::rings::zmod::Zmod;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn p(coefficients: &[i64]) -> Polynomial<Rational> {
        Polynomial::from_coefficients(coefficients.iter().map(|c| Rational::from_int(*c)).collect())
    }

    fn pi(coefficients: &[i64]) -> Polynomial<Integer> {
        Polynomial::from_coefficients(coefficients.iter().map(|c| Integer::of(*c)).collect())
    }

    fn random_poly(rng: &mut StdRng, max_degree: usize) -> Polynomial<Rational> {
        let degree = rng.gen_range(0..=max_degree);
        Polynomial::from_coefficients(
            (0..=degree)
                .map(|_| Rational::from_int(rng.gen_range(-9..=9)))
                .collect(),
        )
    }

    #[test]
    fn test_clean_invariant() {
        let a = pi(&[1, 0, 3, 0, 0]);
        assert_eq!(a.degree(), 2);
        assert_eq!(a.terms().count(), 2);
        assert_eq!(a.clone() - a.clone(), Polynomial::zero());
        assert_eq!((a.clone() - a).degree(), 0);
        assert_eq!(Polynomial::<Integer>::zero().leading_coefficient(), Integer::of(0));
        assert_eq!(Polynomial::monomial(Integer::of(0), 5), Polynomial::zero());
    }

    #[test]
    fn test_polynomial_ring_ops() {
        let a = pi(&[1, 1]);
        let b = pi(&[-1, 1]);
        assert_eq!(a.clone() * b.clone(), pi(&[-1, 0, 1]));
        assert_eq!(a.clone() + b.clone(), pi(&[0, 2]));
        assert_eq!(a.clone() - b.clone(), pi(&[2]));
        assert_eq!(-a.clone(), pi(&[-1, -1]));
        assert_eq!(a.scale(&Integer::of(3)), pi(&[3, 3]));
        assert_eq!(a.coefficient(1), Integer::of(1));
        assert_eq!(a.coefficient(7), Integer::of(0));
        assert_eq!(Polynomial::<Integer>::x() * Polynomial::x(), pi(&[0, 0, 1]));
    }

    #[test]
    fn test_evaluate() {
        let a = pi(&[4, -4, 1]);
        assert_eq!(a.evaluate(&Integer::of(2)), Integer::of(0));
        assert_eq!(a.evaluate(&Integer::of(0)), Integer::of(4));
        assert_eq!(a.evaluate(&Integer::of(-3)), Integer::of(25));
    }

    #[test]
    fn test_divide() {
        let (q, r) = p(&[-1, 0, 0, 1]).try_divide(&p(&[-1, 1])).unwrap();
        assert_eq!(q, p(&[1, 1, 1]));
        assert_eq!(r, Polynomial::zero());

        let (q, r) = p(&[1, 0, 1]).try_divide(&p(&[0, 2])).unwrap();
        assert_eq!(q, Polynomial::monomial(Rational::new(Integer(1), Integer(2)).unwrap(), 1));
        assert_eq!(r, p(&[1]));

        let (q, r) = p(&[3]).try_divide(&p(&[0, 1])).unwrap();
        assert_eq!(q, Polynomial::zero());
        assert_eq!(r, p(&[3]));

        assert_eq!(p(&[1, 1]).try_divide(&Polynomial::zero()), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_divide_multiply_roundtrip() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let a = random_poly(&mut rng, 5);
            let b = random_poly(&mut rng, 4);
            if b.is_zero() {
                continue;
            }
            let product = a.clone() * b.clone();
            assert_eq!(product.clone() / b.clone(), a);
            assert_eq!(product % b.clone(), Polynomial::zero());
            if !a.is_zero() {
                assert_eq!((a.clone() * b.clone()).degree(), a.degree() + b.degree());
            }

            let (q, r) = a.try_divide(&b).unwrap();
            assert_eq!(q * b.clone() + r.clone(), a);
            assert!(r.is_zero() || r.degree() < b.degree());
        }
    }

    #[test]
    fn test_gcd() {
        // (x - 1)(x + 2) and (x - 1)(x - 3)
        let a = p(&[-1, 1]) * p(&[2, 1]);
        let b = p(&[-1, 1]) * p(&[-3, 1]);
        assert_eq!(EuclideanRing::gcd(&a, &b).monic(), p(&[-1, 1]));
        assert_eq!(p(&[0, 3]).unit_part(), p(&[3]));
        assert!(p(&[5]).is_unit());
        assert!(!p(&[0, 1]).is_unit());
        assert!(!Polynomial::<Rational>::zero().is_unit());
    }

    #[test]
    fn test_try_solve() {
        // (x - 2)^2 (x + 3)
        let a = p(&[-2, 1]) * p(&[-2, 1]) * p(&[3, 1]);
        assert_eq!(
            a.try_solve(),
            vec![(Rational::from_int(-3), 1), (Rational::from_int(2), 2)]
        );

        // x^2 + 1 has no rational roots
        assert_eq!(p(&[1, 0, 1]).try_solve(), vec![]);
        assert_eq!(Polynomial::<Rational>::zero().try_solve(), vec![]);

        // 150 is out of the default range
        let b = p(&[-150, 1]) * p(&[1, 1]);
        assert_eq!(b.try_solve(), vec![(Rational::from_int(-1), 1)]);
        assert_eq!(
            b.try_solve_with(&RootSearch { bound: 200 }),
            vec![(Rational::from_int(-1), 1), (Rational::from_int(150), 1)]
        );
    }

    #[test]
    fn test_try_solve_zmod() {
        type Z5 = Zmod<5>;
        // x^2 - 1 = (x - 1)(x + 1) over Z/5
        let a = Polynomial::from_coefficients(vec![Z5::new(-1), Z5::new(0), Z5::new(1)]);
        let mut roots = a.try_solve();
        roots.sort_by_key(|(r, _)| r.value());
        assert_eq!(roots, vec![(Z5::new(1), 1), (Z5::new(4), 1)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", pi(&[4, -4, 1])), "x^2 - 4x + 4");
        assert_eq!(format!("{}", pi(&[0, 1])), "x");
        assert_eq!(format!("{}", pi(&[-1, 0, -3])), "-3x^2 - 1");
        assert_eq!(format!("{}", pi(&[0, -1, 1])), "x^2 - x");
        assert_eq!(format!("{}", pi(&[7])), "7");
        assert_eq!(format!("{}", pi(&[])), "0");
        assert_eq!(format!("{}", pi(&[1, 2, 0, 1])), "x^3 + 2x + 1");

        let half = Rational::new(Integer(-1), Integer(2)).unwrap();
        assert_eq!(format!("{}", Polynomial::monomial(half, 2)), "-(1/2)x^2");
    }
}
