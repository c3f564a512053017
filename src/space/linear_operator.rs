use std::fmt;
use std::ops;

use crate::error::{Error, Result};
use crate::matrix::matrix::Matrix;
use crate::matrix::vector::Vector;
use crate::rings::polynomial::{Polynomial, RootSearch};
use crate::rings::scalar::Field;
use crate::space::vector_space::VectorSpace;

/// Jordan block `J_size(eigenvalue)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JordanBlock<T> {
    pub eigenvalue: T,
    pub size: usize,
}

/// Endomorphism of `T^n`, written in the standard basis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearOperator<T> {
    matrix: Matrix<T>,
}

impl<T: Field> LinearOperator<T> {
    pub fn new(matrix: Matrix<T>) -> Result<Self> {
        matrix.ensure_square()?;
        Ok(LinearOperator { matrix })
    }

    pub fn zero(n: usize) -> Self {
        LinearOperator {
            matrix: Matrix::zeros(n, n),
        }
    }

    pub fn identity(n: usize) -> Self {
        LinearOperator {
            matrix: Matrix::identity(n),
        }
    }

    /// The operator with the given image and kernel, which must satisfy
    /// `dim(image) + dim(kernel) == n`.
    pub fn from_image_and_kernel(image: &VectorSpace<T>, kernel: &VectorSpace<T>) -> Result<Self> {
        let n = image.vector_size();
        if kernel.vector_size() != n || image.dim() + kernel.dim() != n {
            return Err(Error::WrongSize(format!(
                "image of dimension {} in T^{} and kernel of dimension {} in T^{}",
                image.dim(),
                n,
                kernel.dim(),
                kernel.vector_size()
            )));
        }
        let matrix = (&image.basis_matrix() * &kernel.equations())?;
        Ok(LinearOperator { matrix })
    }

    pub fn size(&self) -> usize {
        self.matrix.rows()
    }

    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix<T> {
        self.matrix
    }

    pub fn apply(&self, vector: &Vector<T>) -> Result<Vector<T>> {
        self.matrix.apply(vector)
    }

    pub fn scale(&self, lambda: &T) -> Self {
        LinearOperator {
            matrix: self.matrix.scale(lambda),
        }
    }

    pub fn power(&self, exponent: u64) -> Result<Self> {
        Ok(LinearOperator {
            matrix: self.matrix.power(exponent)?,
        })
    }

    pub fn trace(&self) -> Result<T> {
        self.matrix.trace()
    }

    pub fn determinant(&self) -> Result<T> {
        self.matrix.determinant()
    }

    pub fn char_poly(&self) -> Result<Polynomial<T>> {
        self.matrix.char_poly()
    }

    /// Column space.
    pub fn image(&self) -> VectorSpace<T> {
        VectorSpace::column_space(&self.matrix)
    }

    pub fn kernel(&self) -> VectorSpace<T> {
        VectorSpace::solutions(&self.matrix)
    }

    /// Jordan blocks, searching eigenvalues in the default [`RootSearch`]
    /// range.
    pub fn jordan_blocks(&self) -> Result<Vec<JordanBlock<T>>> {
        self.jordan_blocks_with(&RootSearch::default())
    }

    /// Jordan blocks grouped by eigenvalue (in root search order), larger
    /// blocks first. Fails with `NotSplit` unless every eigenvalue is found
    /// by `search`.
    pub fn jordan_blocks_with(&self, search: &RootSearch) -> Result<Vec<JordanBlock<T>>> {
        let n = self.size();
        let roots = self.char_poly()?.try_solve_with(search);
        if roots.iter().map(|(_, m)| m).sum::<usize>() != n {
            return Err(Error::NotSplit);
        }

        let mut blocks = vec![];
        for (eigenvalue, multiplicity) in roots {
            let shifted = self.shifted(&eigenvalue)?;

            let mut power = Matrix::identity(n);
            let found = block_sizes(n, multiplicity, |_| {
                power = (&power * &shifted)?;
                Ok(power.rank())
            })?;

            tracing::debug!(eigenvalue = %eigenvalue, multiplicity, blocks = ?found, "jordan blocks");
            blocks.extend(found.into_iter().rev().map(|size| JordanBlock {
                eigenvalue: eigenvalue.clone(),
                size,
            }));
        }
        Ok(blocks)
    }

    /// Block diagonal matrix of [`Self::jordan_blocks`], eigenvalues on the
    /// diagonal and ONE right above it inside each block.
    pub fn jordan_normal_form(&self) -> Result<Matrix<T>> {
        let mut result = Matrix::zeros(self.size(), self.size());
        let mut start = 0;
        for block in self.jordan_blocks()? {
            for i in start..start + block.size {
                result[(i, i)] = block.eigenvalue.clone();
                if i + 1 < start + block.size {
                    result[(i, i + 1)] = T::one();
                }
            }
            start += block.size;
        }
        Ok(result)
    }

    /// Invertible `P` with `P^-1 * A * P == self.jordan_normal_form()`.
    ///
    /// Each block contributes a chain `B^(k-1) v, ..., B v, v` where
    /// `B = A - eigenvalue * I` and `v` lies in `ker B^k` but not in
    /// `ker B^(k-1)`.
    pub fn jordan_basis(&self) -> Result<Matrix<T>> {
        let n = self.size();
        let blocks = self.jordan_blocks()?;

        let mut basis: Vec<Vector<T>> = Vec::with_capacity(n);
        let mut start = 0;
        while start < blocks.len() {
            let eigenvalue = &blocks[start].eigenvalue;
            let end = start
                + blocks[start..]
                    .iter()
                    .take_while(|b| &b.eigenvalue == eigenvalue)
                    .count();
            let largest = blocks[start].size;

            for chain in self.jordan_chains(eigenvalue, largest)? {
                basis.extend(chain.into_iter().rev());
            }
            start = end;
        }

        tracing::debug!(n, vectors = basis.len(), "jordan basis");
        Matrix::from_columns(n, &basis)
    }

    // Chains for one eigenvalue, longest first, each as `v, B v, ...`.
    fn jordan_chains(&self, eigenvalue: &T, largest: usize) -> Result<Vec<Vec<Vector<T>>>> {
        let shifted = LinearOperator::new(self.shifted(eigenvalue)?)?;
        let kernels = (0..=largest)
            .map(|j| -> Result<VectorSpace<T>> { Ok(shifted.power(j as u64)?.kernel()) })
            .collect::<Result<Vec<_>>>()?;

        let mut chains: Vec<Vec<Vector<T>>> = vec![];
        // images under B of the level j + 1 chain vectors
        let mut level: Vec<Vector<T>> = vec![];
        for j in (1..=largest).rev() {
            let lower = &kernels[j - 1];
            let candidates: Vec<Vector<T>> = lower
                .basis()
                .iter()
                .chain(&level)
                .chain(kernels[j].basis())
                .cloned()
                .collect();
            let combined = VectorSpace::span(self.size(), &candidates)?;
            let fresh = combined.into_basis().split_off(lower.dim() + level.len());

            for head in fresh {
                let mut chain = vec![head];
                for _ in 1..j {
                    let next = shifted.apply(&chain[chain.len() - 1])?;
                    chain.push(next);
                }
                level.push(chain[0].clone());
                chains.push(chain);
            }

            level = level
                .iter()
                .map(|v| shifted.apply(v))
                .collect::<Result<Vec<_>>>()?;
        }
        Ok(chains)
    }

    // A - lambda * I
    fn shifted(&self, lambda: &T) -> Result<Matrix<T>> {
        &self.matrix - &Matrix::scalar(self.size(), lambda.clone())
    }
}

impl<T: Field> ops::Add<&LinearOperator<T>> for &LinearOperator<T> {
    type Output = Result<LinearOperator<T>>;

    fn add(self, rhs: &LinearOperator<T>) -> Result<LinearOperator<T>> {
        Ok(LinearOperator {
            matrix: (&self.matrix + &rhs.matrix)?,
        })
    }
}

impl<T: Field> ops::Sub<&LinearOperator<T>> for &LinearOperator<T> {
    type Output = Result<LinearOperator<T>>;

    fn sub(self, rhs: &LinearOperator<T>) -> Result<LinearOperator<T>> {
        Ok(LinearOperator {
            matrix: (&self.matrix - &rhs.matrix)?,
        })
    }
}

impl<T: Field> ops::Mul<&LinearOperator<T>> for &LinearOperator<T> {
    type Output = Result<LinearOperator<T>>;

    /// Composition, `rhs` applied first.
    fn mul(self, rhs: &LinearOperator<T>) -> Result<LinearOperator<T>> {
        Ok(LinearOperator {
            matrix: (&self.matrix * &rhs.matrix)?,
        })
    }
}

impl<T: fmt::Display> fmt::Display for LinearOperator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.matrix)
    }
}

/// Sizes of the Jordan blocks of one eigenvalue, smallest first.
/// `rank(k)` is `rk(B^k)` and is called for `k = 1, 2, ...` in order.
/// Blocks of size `k` number `rk(B^(k+1)) + rk(B^(k-1)) - 2 rk(B^k)`.
fn block_sizes(
    n: usize,
    multiplicity: usize,
    mut rank: impl FnMut(usize) -> Result<usize>,
) -> Result<Vec<usize>> {
    let mut ranks = vec![n, rank(1)?];
    let mut found = vec![];
    let mut consumed = 0;
    let mut k = 1;
    while consumed < multiplicity && k <= n {
        ranks.push(rank(k + 1)?);
        let count = (ranks[k + 1] + ranks[k - 1]).saturating_sub(2 * ranks[k]);
        found.extend((0..count).map(|_| k));
        consumed += count * k;
        k += 1;
    }
    assert_eq!(
        consumed, multiplicity,
        "Jordan block sizes {:?} do not match the multiplicity",
        found
    );
    Ok(found)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
