use crate::error::Result;
use crate::matrix::matrix::Matrix;
use crate::permutation::AllPermutations;
use crate::rings::fraction::Fraction;
use crate::rings::polynomial::Polynomial;
use crate::rings::scalar::{EuclideanRing, Field, RingWithOne};

impl<T: RingWithOne> Matrix<T> {
    /// Signed sum over all permutations. Needs no division, at the price of
    /// `n!` terms.
    pub fn leibniz_determinant(&self) -> Result<T> {
        self.ensure_square()?;
        let n = self.rows();

        let mut sum = T::zero();
        for p in &AllPermutations::new(n) {
            let product = (0..n).fold(T::one(), |acc, i| acc * self[(i, p[i])].clone());
            if p.sign() > 0 {
                sum = sum + product;
            } else {
                sum = sum - product;
            }
        }
        Ok(sum)
    }

    /// `xI - self` with entries in `Polynomial<T>`.
    pub fn char_matrix(&self) -> Result<Matrix<Polynomial<T>>> {
        self.ensure_square()?;
        let mut result = self.map(|a| -Polynomial::constant(a.clone()));
        for i in 0..self.rows() {
            result[(i, i)] = Polynomial::x() - Polynomial::constant(self[(i, i)].clone());
        }
        Ok(result)
    }

    pub fn char_poly_by_expansion(&self) -> Result<Polynomial<T>> {
        self.char_matrix()?.leibniz_determinant()
    }

    /// `det(xI - self)`, monic of degree `n`.
    pub fn char_poly(&self) -> Result<Polynomial<T>> {
        T::characteristic_polynomial(self)
    }
}

impl<T: EuclideanRing> Matrix<T> {
    /// Fraction-free elimination (Bareiss). Every division is exact: after
    /// step `k` each entry of the trailing block is a `(k + 1)`-minor of the
    /// input, so intermediate values stay as small as the minors themselves.
    pub fn bareiss_determinant(&self) -> Result<T> {
        self.ensure_square()?;
        let n = self.rows();
        if n == 0 {
            return Ok(T::one());
        }

        let mut m = self.clone();
        let mut negate = false;
        let mut previous = T::one();
        for k in 0..n - 1 {
            if m[(k, k)].is_zero() {
                let Some(pivot) = (k + 1..n).find(|&i| !m[(i, k)].is_zero()) else {
                    return Ok(T::zero());
                };
                m.swap_rows(k, pivot);
                negate = !negate;
            }

            for i in k + 1..n {
                for j in k + 1..n {
                    let value = m[(i, j)].clone() * m[(k, k)].clone()
                        - m[(i, k)].clone() * m[(k, j)].clone();
                    m[(i, j)] = value / previous.clone();
                }
            }
            previous = m[(k, k)].clone();
        }

        let det = m[(n - 1, n - 1)].clone();
        Ok(if negate { -det } else { det })
    }
}

impl<T: Field> Matrix<T> {
    /// `det(xI - self)` by fraction-free elimination in `Polynomial<T>`.
    /// Exact polynomial division keeps the coefficients at the size of the
    /// minors of `xI - self`.
    pub fn char_poly_by_elimination(&self) -> Result<Polynomial<T>> {
        let poly = self.char_matrix()?.bareiss_determinant()?;
        tracing::trace!(n = self.rows(), char_poly = %poly, "characteristic polynomial");
        Ok(poly)
    }

    /// Characteristic polynomial computed by elimination over the field of
    /// rational functions, then lowered back into `Polynomial<T>`. The gcd
    /// reductions inflate intermediate coefficients, so this is only
    /// suitable for unbounded scalars such as `BigRational`.
    pub fn char_poly_by_fractions(&self) -> Result<Polynomial<T>> {
        let lifted = self.char_matrix()?.map(|p| Fraction::from(p.clone()));
        let det = lifted.gauss_determinant()?;
        det.into_integral()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
