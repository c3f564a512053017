use std::fmt;
use std::ops;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::matrix::vector::Vector;
use crate::rings::scalar::RingWithOne;
use crate::utils::write_grid;

/// Dense `rows x cols` matrix stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Entry-wise conversion, e.g. to lift entries into a larger ring.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    // `cells.len()` must be `rows * cols`
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Matrix { rows, cols, cells }
    }

    pub(crate) fn ensure_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(Error::WrongSize(format!(
                "square matrix expected, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for k in 0..self.cols {
            self.cells.swap(a * self.cols + k, b * self.cols + k);
        }
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

impl<T: RingWithOne> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Matrix<T> {
        Matrix {
            rows,
            cols,
            cells: vec![T::zero(); rows * cols],
        }
    }

    pub fn scalar(n: usize, lambda: T) -> Matrix<T> {
        let mut ans = Matrix::zeros(n, n);
        for i in 0..n {
            ans[(i, i)] = lambda.clone();
        }
        ans
    }

    pub fn identity(n: usize) -> Matrix<T> {
        Matrix::scalar(n, T::one())
    }

    /// Rows must all have the same length.
    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Matrix<T>> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);
        if let Some(line) = lines.iter().find(|l| l.len() != cols) {
            return Err(Error::WrongSize(format!(
                "row of length {} in a matrix with {} columns",
                line.len(),
                cols
            )));
        }

        Ok(Matrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    /// Build from column vectors of equal length.
    pub fn from_columns(size: usize, columns: &[Vector<T>]) -> Result<Matrix<T>> {
        if let Some(column) = columns.iter().find(|c| c.len() != size) {
            return Err(Error::WrongSize(format!(
                "vector of size {} among vectors of size {}",
                column.len(),
                size
            )));
        }
        Ok(Matrix {
            rows: size,
            cols: columns.len(),
            cells: (0..size)
                .flat_map(|i| columns.iter().map(move |c| c[i].clone()))
                .collect(),
        })
    }

    /// Build from row vectors of equal length.
    pub fn from_rows(size: usize, rows: &[Vector<T>]) -> Result<Matrix<T>> {
        Ok(Matrix::from_columns(size, rows)?.transpose())
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    pub fn column(&self, col: usize) -> Vector<T> {
        Vector::new((0..self.rows).map(|r| self[(r, col)].clone()).collect())
    }

    pub fn columns(&self) -> Vec<Vector<T>> {
        (0..self.cols).map(|c| self.column(c)).collect()
    }

    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self[(r, c)].clone()))
                .collect(),
        }
    }

    /// `[self | other]`.
    pub fn augment(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.rows != other.rows {
            return Err(Error::shape("augment", self.shape(), other.shape()));
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols + other.cols,
            cells: (0..self.rows)
                .flat_map(|r| self.row(r).iter().chain(other.row(r)).cloned())
                .collect(),
        })
    }

    /// `self` on top of `other`.
    pub fn stack(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != other.cols {
            return Err(Error::shape("stack", self.shape(), other.shape()));
        }
        Ok(Matrix {
            rows: self.rows + other.rows,
            cols: self.cols,
            cells: self.cells.iter().chain(&other.cells).cloned().collect(),
        })
    }

    /// The `len_i x len_j` block starting at `(start_i, start_j)`.
    pub fn slice(&self, len_i: usize, len_j: usize, start_i: usize, start_j: usize) -> Result<Matrix<T>> {
        if start_i + len_i > self.rows || start_j + len_j > self.cols {
            return Err(Error::WrongSize(format!(
                "{}x{} block at ({}, {}) of a {}x{} matrix",
                len_i, len_j, start_i, start_j, self.rows, self.cols
            )));
        }
        Ok(Matrix {
            rows: len_i,
            cols: len_j,
            cells: (start_i..start_i + len_i)
                .flat_map(|r| self.row(r)[start_j..start_j + len_j].iter().cloned())
                .collect(),
        })
    }

    pub fn scale(&self, lambda: &T) -> Matrix<T> {
        self.map(|x| lambda.clone() * x.clone())
    }

    pub fn trace(&self) -> Result<T> {
        self.ensure_square()?;
        Ok((0..self.rows).fold(T::zero(), |acc, i| acc + self[(i, i)].clone()))
    }

    pub fn power(&self, mut exponent: u64) -> Result<Matrix<T>> {
        self.ensure_square()?;
        let mut result = Matrix::identity(self.rows);
        let mut square = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = (&result * &square)?;
            }
            exponent >>= 1;
            if exponent > 0 {
                square = (&square * &square)?;
            }
        }
        Ok(result)
    }

    pub fn apply(&self, vector: &Vector<T>) -> Result<Vector<T>> {
        if vector.len() != self.cols {
            return Err(Error::shape("apply", self.shape(), (vector.len(), 1)));
        }
        Ok(Vector::new(
            (0..self.rows)
                .map(|r| {
                    self.row(r)
                        .iter()
                        .zip(vector.iter())
                        .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
                })
                .collect(),
        ))
    }

    /// `det(self)`, by elimination for fields and by permutation expansion
    /// otherwise.
    pub fn determinant(&self) -> Result<T> {
        T::determinant(self)
    }

    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|x| x.is_zero())
    }
}

impl<T> ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[row * self.cols + col]
    }
}

impl<T> ops::IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.cells[row * self.cols + col]
    }
}

impl<T: RingWithOne> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.shape() != rhs.shape() {
            return Err(Error::shape("add", self.shape(), rhs.shape()));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
        })
    }
}

impl<T: RingWithOne> ops::Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn sub(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.shape() != rhs.shape() {
            return Err(Error::shape("sub", self.shape(), rhs.shape()));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.clone() - b.clone())
                .collect(),
        })
    }
}

impl<T: RingWithOne> ops::Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|x| -x.clone())
    }
}

impl<T: RingWithOne> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.rows {
            return Err(Error::shape("mul", self.shape(), rhs.shape()));
        }

        let mut cells = vec![T::zero(); self.rows * rhs.cols];
        if rhs.cols > 0 {
            let fill = |(i, out): (usize, &mut [T])| {
                for (j, cell) in out.iter_mut().enumerate() {
                    *cell = (0..self.cols).fold(T::zero(), |acc, k| {
                        acc + self[(i, k)].clone() * rhs[(k, j)].clone()
                    });
                }
            };
            #[cfg(feature = "rayon")]
            cells.par_chunks_mut(rhs.cols).enumerate().for_each(fill);
            #[cfg(not(feature = "rayon"))]
            cells.chunks_mut(rhs.cols).enumerate().for_each(fill);
        }

        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            cells,
        })
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = (0..self.rows)
            .map(|r| self.row(r).iter().map(|x| x.to_string()).collect())
            .collect();
        write_grid(f, &cells)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
