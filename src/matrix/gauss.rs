#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::matrix::matrix::Matrix;
use crate::matrix::vector::Vector;
use crate::rings::scalar::Field;

impl<T: Field> Matrix<T> {
    /// Reduce `self` in place to reduced row echelon form and return the
    /// pivot column of every nonzero row.
    ///
    /// Pivots are the first nonzero entry at or below the current row, so
    /// the result does not depend on the scalar's ordering.
    pub fn gauss(&mut self) -> Vec<usize> {
        self.eliminate().0
    }

    // Returns the pivot columns and `(-1)^swaps * product of pivots`.
    fn eliminate(&mut self) -> (Vec<usize>, T) {
        let (rows, cols) = self.shape();
        let mut pivots = Vec::with_capacity(rows.min(cols));
        let mut factor = T::one();

        for col in 0..cols {
            let r = pivots.len();
            if r == rows {
                break;
            }
            let Some(found) = (r..rows).find(|&i| !self[(i, col)].is_zero()) else {
                continue;
            };
            if found != r {
                self.swap_rows(found, r);
                factor = -factor;
            }

            let pivot = self[(r, col)].clone();
            factor = factor * pivot.clone();
            let inverse = T::one() / pivot;
            let pivot_row: Vec<T> = self
                .row(r)
                .iter()
                .map(|x| x.clone() * inverse.clone())
                .collect();

            let update = |(i, row): (usize, &mut [T])| {
                if i == r {
                    row.clone_from_slice(&pivot_row);
                    return;
                }
                let k = row[col].clone();
                if k.is_zero() {
                    return;
                }
                for (x, p) in row.iter_mut().zip(&pivot_row) {
                    *x = x.clone() - k.clone() * p.clone();
                }
            };
            #[cfg(feature = "rayon")]
            self.cells_mut()
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(update);
            #[cfg(not(feature = "rayon"))]
            self.cells_mut().chunks_mut(cols).enumerate().for_each(update);

            pivots.push(col);
        }

        tracing::trace!(rows, cols, rank = pivots.len(), "gauss");
        (pivots, factor)
    }

    pub fn rank(&self) -> usize {
        self.clone().gauss().len()
    }

    pub fn gauss_determinant(&self) -> Result<T> {
        self.ensure_square()?;
        let mut reduced = self.clone();
        let (pivots, factor) = reduced.eliminate();
        if pivots.len() < self.rows() {
            return Ok(T::zero());
        }
        Ok(factor)
    }

    pub fn inverse(&self) -> Result<Matrix<T>> {
        self.ensure_square()?;
        let n = self.rows();
        let mut augmented = self.augment(&Matrix::identity(n))?;
        let pivots = augmented.gauss();

        if pivots.iter().filter(|&&c| c < n).count() < n {
            tracing::debug!(n, "inverse of a singular matrix");
            return Err(Error::SingularMatrix);
        }
        augmented.slice(n, n, 0, n)
    }

    /// One solution of `self * x = target`, free variables set to ZERO.
    pub fn solve(&self, target: &Vector<T>) -> Result<Vector<T>> {
        if target.len() != self.rows() {
            return Err(Error::shape("solve", self.shape(), (target.len(), 1)));
        }
        let cols = self.cols();
        let mut augmented = self.augment(&target.to_column())?;
        let pivots = augmented.gauss();

        if pivots.last() == Some(&cols) {
            return Err(Error::NotSolvable);
        }
        let mut x = vec![T::zero(); cols];
        for (r, &c) in pivots.iter().enumerate() {
            x[c] = augmented[(r, cols)].clone();
        }
        Ok(Vector::new(x))
    }

    pub fn is_rref(&self) -> bool {
        let mut last_pivot = None;
        let mut seen_zero_row = false;

        for r in 0..self.rows() {
            let Some(c) = self.row(r).iter().position(|x| !x.is_zero()) else {
                seen_zero_row = true;
                continue;
            };
            if seen_zero_row || last_pivot.is_some_and(|p| c <= p) || !self[(r, c)].is_one() {
                return false;
            }
            if (0..self.rows()).any(|i| i != r && !self[(i, c)].is_zero()) {
                return false;
            }
            last_pivot = Some(c);
        }
        true
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Rational;
    use crate::rings::zmod::Zmod;
    use num_traits::{One, Zero};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn q(lines: Vec<Vec<i64>>) -> Matrix<Rational> {
        Matrix::from_list(
            lines
                .into_iter()
                .map(|l| l.into_iter().map(Rational::from_int).collect())
                .collect(),
        )
        .unwrap()
    }

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<Rational> {
        q((0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(-3..=3)).collect())
            .collect())
    }

    #[test]
    fn test_gauss() {
        let mut a = q(vec![vec![0, 2, 4], vec![1, 1, 1], vec![2, 4, 6]]);
        let pivots = a.gauss();
        assert_eq!(pivots, vec![0, 1]);
        assert!(a.is_rref());
        assert_eq!(a, q(vec![vec![1, 0, -1], vec![0, 1, 2], vec![0, 0, 0]]));

        let mut z = Matrix::<Rational>::zeros(2, 3);
        assert!(z.gauss().is_empty());
        assert!(z.is_rref());
    }

    #[test]
    fn test_gauss_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let rows = rng.gen_range(1..5);
            let cols = rng.gen_range(1..5);
            let a = random_matrix(&mut rng, rows, cols);
            let mut reduced = a.clone();
            let pivots = reduced.gauss();
            assert!(reduced.is_rref());
            assert!(pivots.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(pivots.len(), a.transpose().rank());
        }
    }

    #[test]
    fn test_is_rref() {
        assert!(q(vec![vec![1, 0, 3], vec![0, 1, 4]]).is_rref());
        assert!(!q(vec![vec![0, 1], vec![1, 0]]).is_rref());
        assert!(!q(vec![vec![2, 0], vec![0, 1]]).is_rref());
        assert!(!q(vec![vec![1, 1], vec![0, 1]]).is_rref());
        assert!(!q(vec![vec![0, 0], vec![0, 1]]).is_rref());
    }

    #[test]
    fn test_gauss_determinant() {
        assert_eq!(
            q(vec![vec![0, 1], vec![1, 0]]).gauss_determinant(),
            Ok(Rational::from_int(-1))
        );
        assert_eq!(
            q(vec![vec![2, 1, 3], vec![0, -1, 4], vec![1, 0, 5]]).gauss_determinant(),
            Ok(Rational::from_int(-3))
        );
        assert_eq!(
            q(vec![vec![1, 2], vec![2, 4]]).gauss_determinant(),
            Ok(Rational::zero())
        );
        assert_eq!(
            Matrix::<Rational>::zeros(0, 0).gauss_determinant(),
            Ok(Rational::one())
        );
        assert!(matches!(
            q(vec![vec![1, 2]]).gauss_determinant(),
            Err(Error::WrongSize(_))
        ));
    }

    #[test]
    fn test_inverse() {
        let a = q(vec![vec![2, 1], vec![7, 4]]);
        let inv = a.inverse().unwrap();
        assert_eq!(inv, q(vec![vec![4, -1], vec![-7, 2]]));

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let n = rng.gen_range(1..5);
            let a = random_matrix(&mut rng, n, n);
            match a.inverse() {
                Ok(inv) => {
                    assert_eq!(a.rank(), n);
                    assert_eq!((&a * &inv).unwrap(), Matrix::identity(n));
                    assert_eq!((&inv * &a).unwrap(), Matrix::identity(n));
                }
                Err(e) => {
                    assert_eq!(e, Error::SingularMatrix);
                    assert!(a.rank() < n);
                    assert!(a.determinant().unwrap().is_zero());
                }
            }
        }
    }

    #[test]
    fn test_rank() {
        assert_eq!(q(vec![vec![1, 2, 3], vec![2, 4, 6], vec![1, 0, 1]]).rank(), 2);
        assert_eq!(Matrix::<Rational>::identity(4).rank(), 4);
        assert_eq!(Matrix::<Rational>::zeros(3, 2).rank(), 0);
    }

    #[test]
    fn test_solve() {
        let a = q(vec![vec![1, 1, 1], vec![1, -1, 0]]);
        let b = Vector::new(vec![Rational::from_int(6), Rational::from_int(0)]);
        let x = a.solve(&b).unwrap();
        assert_eq!(a.apply(&x).unwrap(), b);

        let inconsistent = q(vec![vec![1, 1], vec![2, 2]]);
        let b = Vector::new(vec![Rational::from_int(1), Rational::from_int(3)]);
        assert_eq!(inconsistent.solve(&b), Err(Error::NotSolvable));

        let short = Vector::new(vec![Rational::one()]);
        assert!(matches!(a.solve(&short), Err(Error::WrongSize(_))));
    }

    #[test]
    fn test_zmod_elimination() {
        type Z5 = Zmod<5>;
        let a = Matrix::from_list(vec![
            vec![Z5::new(1), Z5::new(2)],
            vec![Z5::new(3), Z5::new(1)],
        ])
        .unwrap();
        // 1 - 6 = -5 = 0 (mod 5)
        assert_eq!(a.rank(), 1);
        assert_eq!(a.inverse(), Err(Error::SingularMatrix));
    }
}
