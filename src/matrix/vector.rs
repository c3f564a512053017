use itertools::Itertools;
use std::fmt;
use std::ops;

use crate::error::{Error, Result};
use crate::matrix::matrix::Matrix;
use crate::rings::scalar::RingWithOne;

/// Coordinate vector, the column `n x 1` matrices act on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    pub fn new(data: Vec<T>) -> Self {
        Vector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: RingWithOne> Vector<T> {
    pub fn zeros(n: usize) -> Self {
        Vector::new(vec![T::zero(); n])
    }

    /// The `i`-th standard basis vector of length `n`.
    pub fn unit(n: usize, i: usize) -> Self {
        let mut v = Vector::zeros(n);
        v.data[i] = T::one();
        v
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| x.is_zero())
    }

    pub fn dot(&self, other: &Vector<T>) -> Result<T> {
        self.check_len("dot", other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }

    pub fn scale(&self, lambda: &T) -> Vector<T> {
        Vector::new(self.iter().map(|x| lambda.clone() * x.clone()).collect())
    }

    pub fn to_column(&self) -> Matrix<T> {
        Matrix::from_cells(self.len(), 1, self.data.clone())
    }

    pub fn to_row(&self) -> Matrix<T> {
        self.to_column().transpose()
    }

    /// The only column (or only row) of a `n x 1` (or `1 x n`) matrix.
    pub fn from_matrix(matrix: &Matrix<T>) -> Result<Vector<T>> {
        match matrix.shape() {
            (_, 1) => Ok(matrix.column(0)),
            (1, _) => Ok(Vector::new(matrix.row(0).to_vec())),
            shape => Err(Error::WrongSize(format!(
                "{}x{} matrix is not a vector",
                shape.0, shape.1
            ))),
        }
    }

    fn check_len(&self, what: &str, other: &Vector<T>) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::shape(what, (self.len(), 1), (other.len(), 1)));
        }
        Ok(())
    }
}

impl<T> ops::Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> ops::IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T: RingWithOne> ops::Add<&Vector<T>> for &Vector<T> {
    type Output = Result<Vector<T>>;

    fn add(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        self.check_len("add", rhs)?;
        Ok(Vector::new(
            self.iter()
                .zip(rhs.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
        ))
    }
}

impl<T: RingWithOne> ops::Sub<&Vector<T>> for &Vector<T> {
    type Output = Result<Vector<T>>;

    fn sub(self, rhs: &Vector<T>) -> Result<Vector<T>> {
        self.check_len("sub", rhs)?;
        Ok(Vector::new(
            self.iter()
                .zip(rhs.iter())
                .map(|(a, b)| a.clone() - b.clone())
                .collect(),
        ))
    }
}

impl<T: RingWithOne> ops::Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        Vector::new(self.iter().map(|x| -x.clone()).collect())
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Vector::new(data)
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.data.iter().join(", "))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
