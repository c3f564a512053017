pub mod error;

pub mod expression {
    pub mod linear_combination;
    pub mod variables;
}
pub mod matrix {
    pub mod determinant;
    pub mod gauss;
    pub mod matrix;
    pub mod vector;
}
pub mod rings {
    pub mod fraction;
    pub mod integer;
    pub mod polynomial;
    pub mod scalar;
    pub mod zmod;
}
pub mod space {
    pub mod linear_operator;
    pub mod vector_space;
}

pub mod permutation;

pub mod utils;

#[cfg(feature = "python")]
pub mod python;

pub use error::{Error, Result};
