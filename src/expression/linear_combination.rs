use std::collections::BTreeMap;
use std::fmt;
use std::ops;

use crate::error::{Error, Result};
use crate::expression::variables::Variable;
use crate::matrix::matrix::Matrix;
use crate::matrix::vector::Vector;
use crate::rings::scalar::{Field, RingWithOne};

/// `c_1 * x_1 + ... + c_k * x_k + constant`.
///
/// Zero coefficients are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearCombination<T> {
    coefficients: BTreeMap<Variable, T>,
    constant: T,
}

impl<T: RingWithOne> LinearCombination<T> {
    pub fn constant(value: T) -> Self {
        LinearCombination {
            coefficients: BTreeMap::new(),
            constant: value,
        }
    }

    pub fn constant_term(&self) -> &T {
        &self.constant
    }

    pub fn coefficient(&self, variable: &Variable) -> T {
        self.coefficients
            .get(variable)
            .cloned()
            .unwrap_or_else(T::zero)
    }

    /// Variables with a nonzero coefficient, in registry order.
    pub fn terms(&self) -> impl Iterator<Item = (&Variable, &T)> + '_ {
        self.coefficients.iter()
    }

    pub fn is_constant(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn degree(&self) -> u32 {
        if self.is_constant() {
            0
        } else {
            1
        }
    }

    /// The name of the variable if `self` is exactly one variable.
    pub fn var_name(&self) -> Option<&str> {
        if self.coefficients.len() != 1 || !self.constant.is_zero() {
            return None;
        }
        let (variable, coefficient) = self.coefficients.iter().next()?;
        coefficient.is_one().then(|| variable.name())
    }

    fn combine(mut self, rhs: LinearCombination<T>, op: fn(T, T) -> T) -> LinearCombination<T> {
        for (variable, coefficient) in rhs.coefficients {
            let current = self.coefficients.remove(&variable).unwrap_or_else(T::zero);
            let value = op(current, coefficient);
            if !value.is_zero() {
                self.coefficients.insert(variable, value);
            }
        }
        self.constant = op(self.constant, rhs.constant);
        self
    }
}

impl<T: RingWithOne> From<Variable> for LinearCombination<T> {
    fn from(variable: Variable) -> Self {
        LinearCombination {
            coefficients: BTreeMap::from([(variable, T::one())]),
            constant: T::zero(),
        }
    }
}

impl<T: RingWithOne> ops::Add<LinearCombination<T>> for LinearCombination<T> {
    type Output = LinearCombination<T>;

    fn add(self, rhs: LinearCombination<T>) -> LinearCombination<T> {
        self.combine(rhs, |a, b| a + b)
    }
}

impl<T: RingWithOne> ops::Sub<LinearCombination<T>> for LinearCombination<T> {
    type Output = LinearCombination<T>;

    fn sub(self, rhs: LinearCombination<T>) -> LinearCombination<T> {
        self.combine(rhs, |a, b| a - b)
    }
}

impl<T: RingWithOne> ops::Add<T> for LinearCombination<T> {
    type Output = LinearCombination<T>;

    fn add(mut self, rhs: T) -> LinearCombination<T> {
        self.constant = self.constant + rhs;
        self
    }
}

impl<T: RingWithOne> ops::Sub<T> for LinearCombination<T> {
    type Output = LinearCombination<T>;

    fn sub(mut self, rhs: T) -> LinearCombination<T> {
        self.constant = self.constant - rhs;
        self
    }
}

impl<T: RingWithOne> ops::Neg for LinearCombination<T> {
    type Output = LinearCombination<T>;

    fn neg(self) -> LinearCombination<T> {
        LinearCombination {
            coefficients: self
                .coefficients
                .into_iter()
                .map(|(variable, c)| (variable, -c))
                .collect(),
            constant: -self.constant,
        }
    }
}

impl<T: RingWithOne> ops::Mul<T> for LinearCombination<T> {
    type Output = LinearCombination<T>;

    fn mul(self, rhs: T) -> LinearCombination<T> {
        if rhs.is_zero() {
            return LinearCombination::constant(T::zero());
        }
        LinearCombination {
            coefficients: self
                .coefficients
                .into_iter()
                .map(|(variable, c)| (variable, c * rhs.clone()))
                .filter(|(_, c)| !c.is_zero())
                .collect(),
            constant: self.constant * rhs,
        }
    }
}

impl<T: RingWithOne> fmt::Display for LinearCombination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .coefficients
            .iter()
            .map(|(variable, c)| {
                if c.is_one() {
                    variable.to_string()
                } else if (-c.clone()).is_one() {
                    format!("-{}", variable)
                } else {
                    format!("{} * {}", c, variable)
                }
            })
            .collect();
        if !self.constant.is_zero() || parts.is_empty() {
            parts.push(self.constant.to_string());
        }

        for (i, part) in parts.iter().enumerate() {
            match (i, part.strip_prefix('-')) {
                (0, _) => write!(f, "{}", part)?,
                (_, Some(rest)) => write!(f, " - {}", rest)?,
                (_, None) => write!(f, " + {}", part)?,
            }
        }
        Ok(())
    }
}

/// Coefficient matrix `A` and right-hand side `b` of the system
/// `equation == 0`, written as `A x = b` over `unknowns`.
pub fn to_matrix<T: RingWithOne>(
    equations: &[LinearCombination<T>],
    unknowns: &[Variable],
) -> Result<(Matrix<T>, Vector<T>)> {
    let mut a = Matrix::zeros(equations.len(), unknowns.len());
    let mut b = Vec::with_capacity(equations.len());
    for (row, equation) in equations.iter().enumerate() {
        for (variable, c) in equation.terms() {
            let Some(col) = unknowns.iter().position(|u| u == variable) else {
                return Err(Error::WrongSize(format!(
                    "{} is not among the unknowns",
                    variable
                )));
            };
            a[(row, col)] = c.clone();
        }
        b.push(-equation.constant_term().clone());
    }
    Ok((a, Vector::new(b)))
}

/// Values for `unknowns` making every equation (read as `== 0`) hold.
/// Unknowns left free by the system are set to ZERO.
pub fn solve_system<T: Field>(equations: &[LinearCombination<T>], unknowns: &[Variable]) -> Result<Vec<T>> {
    let (a, b) = to_matrix(equations, unknowns)?;
    let solution = a.solve(&b)?;
    tracing::debug!(
        equations = equations.len(),
        unknowns = unknowns.len(),
        "linear system solved"
    );
    Ok(solution.into_vec())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::variables::Variables;
    use crate::rings::fraction::Rational;
    use crate::rings::integer::Integer;

    fn r(num: i64, den: i64) -> Rational {
        Rational::new(Integer(num), Integer(den)).unwrap()
    }

    fn var<T: RingWithOne>(v: &Variable) -> LinearCombination<T> {
        LinearCombination::from(v.clone())
    }

    #[test]
    fn test_linear_combination_ops() {
        let mut vars = Variables::new();
        let x = vars.gen("x");
        let y = vars.gen("y");

        let e: LinearCombination<Integer> = var(&x) * Integer(2) + var(&y) - Integer(3);
        assert_eq!(e.coefficient(&x), Integer(2));
        assert_eq!(e.coefficient(&y), Integer(1));
        assert_eq!(e.constant_term(), &Integer(-3));
        assert_eq!(e.degree(), 1);

        let cancelled = e.clone() - var(&y);
        assert_eq!(cancelled.terms().count(), 1);
        assert_eq!(cancelled.coefficient(&y), Integer(0));

        let zero = e.clone() - e.clone();
        assert!(zero.is_constant());
        assert_eq!(zero.degree(), 0);
        assert_eq!(zero, LinearCombination::constant(Integer(0)));
        assert_eq!(-(-e.clone()), e);
        assert!((e.clone() * Integer(0)).is_constant());
        assert_eq!((e + Integer(3)).constant_term(), &Integer(0));
    }

    #[test]
    fn test_var_name() {
        let mut vars = Variables::new();
        let x = vars.gen("x");
        assert_eq!(var::<Integer>(&x).var_name(), Some("x"));
        assert_eq!((var::<Integer>(&x) * Integer(2)).var_name(), None);
        assert_eq!((var::<Integer>(&x) + Integer(1)).var_name(), None);
        assert_eq!(LinearCombination::constant(Integer(1)).var_name(), None);
    }

    #[test]
    fn test_display() {
        let mut vars = Variables::new();
        let x = vars.gen("x");
        let y = vars.gen("y");
        let z = vars.gen("z");
        let e = var(&x) * Integer(2) - var(&y) + var(&z) * Integer(-4) + Integer(7);
        assert_eq!(format!("{}", e), "2 * x - y - 4 * z + 7");
        assert_eq!(format!("{}", -var::<Integer>(&x) - Integer(1)), "-x - 1");
        assert_eq!(format!("{}", LinearCombination::constant(Integer(0))), "0");
        assert_eq!(format!("{}", var(&y) * r(1, 2)), "1/2 * y");
    }

    #[test]
    fn test_solve_system() {
        let mut vars = Variables::new();
        let unknowns = vars.gens("x", 3);
        let [x, y, z] = [&unknowns[0], &unknowns[1], &unknowns[2]];

        // x + y + z = 6, x = y, 2z - x = 4
        let equations = vec![
            var(x) + var(y) + var(z) - r(6, 1),
            var(x) - var(y),
            var(z) * r(2, 1) - var(x) - r(4, 1),
        ];
        assert_eq!(
            solve_system(&equations, &unknowns),
            Ok(vec![r(8, 5), r(8, 5), r(14, 5)])
        );

        let (a, b) = to_matrix(&equations, &unknowns).unwrap();
        assert_eq!(a.shape(), (3, 3));
        assert_eq!(b, Vector::new(vec![r(6, 1), r(0, 1), r(4, 1)]));
    }

    #[test]
    fn test_solve_underdetermined() {
        let mut vars = Variables::new();
        let x = vars.gen("x");
        let y = vars.gen("y");
        let equations = vec![var(&x) + var(&y) - r(2, 1)];
        let solution = solve_system(&equations, &[x.clone(), y.clone()]).unwrap();
        assert_eq!(solution, vec![r(2, 1), r(0, 1)]);
        assert_eq!(solve_system::<Rational>(&[], &[x, y]), Ok(vec![r(0, 1), r(0, 1)]));
    }

    #[test]
    fn test_solve_failures() {
        let mut vars = Variables::new();
        let x = vars.gen("x");
        let y = vars.gen("y");
        let inconsistent = vec![var(&x) + var(&y) - r(1, 1), var(&x) + var(&y) - r(2, 1)];
        assert_eq!(
            solve_system(&inconsistent, &[x.clone(), y.clone()]),
            Err(Error::NotSolvable)
        );

        let unknown = vec![var::<Rational>(&x) + var(&y)];
        assert!(matches!(
            solve_system(&unknown, &[x]),
            Err(Error::WrongSize(_))
        ));
    }
}
