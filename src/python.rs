use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::error::Error;
use crate::matrix::matrix::Matrix;
use crate::rings::fraction::BigRational;
use crate::space::linear_operator::LinearOperator;

fn value_error(error: Error) -> PyErr {
    PyValueError::new_err(error.to_string())
}

fn parse_lines(lines: &[Vec<String>]) -> PyResult<Matrix<BigRational>> {
    let lines = lines
        .iter()
        .map(|l| {
            l.iter()
                .map(|x| x.parse::<BigRational>())
                .collect::<Result<Vec<_>, String>>()
        })
        .collect::<Result<Vec<_>, String>>()
        .map_err(PyValueError::new_err)?;

    Matrix::from_list(lines).map_err(value_error)
}

/// Exact matrix over the rationals, entries exchanged as `"n/d"` strings.
#[derive(Debug, Clone)]
#[pyclass(frozen)]
pub struct RationalMatrix {
    inner: Matrix<BigRational>,
}

#[pymethods]
impl RationalMatrix {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<String>>) -> PyResult<Self> {
        Ok(RationalMatrix {
            inner: parse_lines(&lines)?,
        })
    }

    pub fn to_list(&self) -> Vec<Vec<String>> {
        self.inner
            .to_list()
            .iter()
            .map(|l| l.iter().map(|x| x.to_string()).collect())
            .collect()
    }

    #[getter]
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    pub fn det(&self) -> PyResult<String> {
        Ok(self.inner.determinant().map_err(value_error)?.to_string())
    }

    pub fn inverse(&self) -> PyResult<RationalMatrix> {
        Ok(RationalMatrix {
            inner: self.inner.inverse().map_err(value_error)?,
        })
    }

    pub fn rank(&self) -> usize {
        self.inner.rank()
    }

    pub fn char_poly(&self) -> PyResult<String> {
        Ok(self.inner.char_poly().map_err(value_error)?.to_string())
    }

    pub fn jordan_normal_form(&self) -> PyResult<RationalMatrix> {
        let operator = LinearOperator::new(self.inner.clone()).map_err(value_error)?;
        Ok(RationalMatrix {
            inner: operator.jordan_normal_form().map_err(value_error)?,
        })
    }

    pub fn __add__(&self, rhs: &RationalMatrix) -> PyResult<RationalMatrix> {
        match &self.inner + &rhs.inner {
            Ok(inner) => Ok(RationalMatrix { inner }),
            Err(error) => Err(value_error(error)),
        }
    }

    pub fn __mul__(&self, rhs: &RationalMatrix) -> PyResult<RationalMatrix> {
        match &self.inner * &rhs.inner {
            Ok(inner) => Ok(RationalMatrix { inner }),
            Err(error) => Err(value_error(error)),
        }
    }

    pub fn __eq__(&self, rhs: &RationalMatrix) -> bool {
        self.inner == rhs.inner
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("RationalMatrix({:?})", self.to_list())
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn rust_algebra(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RationalMatrix>()?;
    Ok(())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
