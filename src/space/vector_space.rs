use std::fmt;
use std::ops;

use crate::error::{Error, Result};
use crate::matrix::matrix::Matrix;
use crate::matrix::vector::Vector;
use crate::rings::scalar::Field;

/// Subspace of `T^n` given by a basis.
///
/// The basis vectors are linearly independent and all have `vector_size()`
/// coordinates. A zero-dimensional space keeps its ambient size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSpace<T> {
    size: usize,
    basis: Vec<Vector<T>>,
}

impl<T: Field> VectorSpace<T> {
    pub fn zero(size: usize) -> Self {
        VectorSpace {
            size,
            basis: vec![],
        }
    }

    pub fn full(size: usize) -> Self {
        VectorSpace {
            size,
            basis: (0..size).map(|i| Vector::unit(size, i)).collect(),
        }
    }

    /// Span of `vectors`. Keeps every input vector that is independent of
    /// the ones before it, so leading vectors stay in the basis when they
    /// can.
    pub fn span(size: usize, vectors: &[Vector<T>]) -> Result<Self> {
        Ok(VectorSpace::column_space(&Matrix::from_columns(size, vectors)?))
    }

    /// Span of the columns of `matrix`, keeping the pivot columns.
    pub fn column_space(matrix: &Matrix<T>) -> Self {
        let mut reduced = matrix.clone();
        let pivots = reduced.gauss();
        VectorSpace {
            size: matrix.rows(),
            basis: pivots.into_iter().map(|c| matrix.column(c)).collect(),
        }
    }

    /// Null space of `equations`: all `x` with `equations * x == 0`.
    ///
    /// One basis vector per free column of the echelon form, with a ONE at
    /// the free coordinate.
    pub fn solutions(equations: &Matrix<T>) -> Self {
        let size = equations.cols();
        let mut reduced = equations.clone();
        let pivots = reduced.gauss();

        let mut is_pivot = vec![false; size];
        for &c in &pivots {
            is_pivot[c] = true;
        }

        let basis = (0..size)
            .filter(|&free| !is_pivot[free])
            .map(|free| {
                let mut v = Vector::unit(size, free);
                for (r, &c) in pivots.iter().enumerate() {
                    v[c] = -reduced[(r, free)].clone();
                }
                v
            })
            .collect();
        VectorSpace { size, basis }
    }

    pub fn dim(&self) -> usize {
        self.basis.len()
    }

    pub fn vector_size(&self) -> usize {
        self.size
    }

    pub fn basis(&self) -> &[Vector<T>] {
        &self.basis
    }

    pub fn into_basis(self) -> Vec<Vector<T>> {
        self.basis
    }

    /// Basis vectors as columns, `vector_size() x dim()`.
    pub fn basis_matrix(&self) -> Matrix<T> {
        self.row_basis_matrix().transpose()
    }

    /// Basis vectors as rows, `dim() x vector_size()`.
    pub fn row_basis_matrix(&self) -> Matrix<T> {
        let cells = self.basis.iter().flat_map(|v| v.iter().cloned()).collect();
        Matrix::from_cells(self.dim(), self.size, cells)
    }

    /// A system whose solutions are exactly this space, one independent
    /// equation per row (`vector_size() - dim()` rows).
    pub fn equations(&self) -> Matrix<T> {
        let complement = VectorSpace::solutions(&self.row_basis_matrix());
        complement.row_basis_matrix()
    }

    pub fn contains(&self, vector: &Vector<T>) -> Result<bool> {
        if vector.len() != self.size {
            return Err(Error::shape("contains", (self.size, 1), (vector.len(), 1)));
        }
        let equations = self.equations();
        Ok(equations.apply(vector)?.is_zero())
    }

    pub fn intersection(&self, other: &VectorSpace<T>) -> Result<Self> {
        self.check_size("intersection", other)?;
        let equations = self.equations().stack(&other.equations())?;
        Ok(VectorSpace::solutions(&equations))
    }

    /// Extend the basis with standard basis vectors until it spans the
    /// whole ambient space. Existing basis vectors keep their positions.
    pub fn make_full_basis(&mut self) {
        let mut rows = self.row_basis_matrix();
        let pivots = rows.gauss();

        let mut is_pivot = vec![false; self.size];
        for c in pivots {
            is_pivot[c] = true;
        }
        for i in (0..self.size).filter(|&i| !is_pivot[i]) {
            self.basis.push(Vector::unit(self.size, i));
        }
    }

    fn check_size(&self, what: &str, other: &VectorSpace<T>) -> Result<()> {
        if self.size != other.size {
            return Err(Error::WrongSize(format!(
                "{}: subspaces of T^{} and T^{}",
                what, self.size, other.size
            )));
        }
        Ok(())
    }
}

impl<T: Field> ops::Add<&VectorSpace<T>> for &VectorSpace<T> {
    type Output = Result<VectorSpace<T>>;

    /// The sum `self + rhs`, the smallest space containing both.
    fn add(self, rhs: &VectorSpace<T>) -> Result<VectorSpace<T>> {
        self.check_size("sum", rhs)?;
        let vectors: Vec<Vector<T>> = self.basis.iter().chain(&rhs.basis).cloned().collect();
        VectorSpace::span(self.size, &vectors)
    }
}

impl<T: fmt::Display> fmt::Display for VectorSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "span{{")?;
        for (i, v) in self.basis.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}} in T^{}", self.size)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
