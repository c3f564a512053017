use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Wrong sizes: {0}")]
    WrongSize(String),

    #[error("Matrix is singular")]
    SingularMatrix,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("System has no solution")]
    NotSolvable,

    #[error("The numerator is not divisible by the denominator")]
    NotDivisible,

    #[error("Not a permutation: {0}")]
    NotAPermutation(String),

    #[error("Characteristic polynomial does not split over the searched roots")]
    NotSplit,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape(what: &str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Error::WrongSize(format!(
            "{}: {}x{} and {}x{}",
            what, lhs.0, lhs.1, rhs.0, rhs.1
        ))
    }
}
