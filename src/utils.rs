use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Mul, Rem};

/// Binary exponentiation in any multiplicative monoid, `base ^ 0 == ONE`.
pub fn fastpow<T>(base: &T, mut exponent: u64) -> T
where
    T: Clone + One + Mul<Output = T>,
{
    let mut result = T::one();
    let mut square = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * square.clone();
        }
        exponent >>= 1;
        if exponent > 0 {
            square = square.clone() * square;
        }
    }
    result
}

/// Euclid's algorithm. The result is defined up to a unit.
pub fn gcd<T>(a: &T, b: &T) -> T
where
    T: Clone + Zero + Rem<Output = T>,
{
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = a % b.clone();
        a = b;
        b = r;
    }
    a
}

/// Write `cells` (rendered row by row) as a boxed grid with right aligned
/// columns:
///
/// ```text
/// ⎛ 1 -2 ⎞
/// ⎝ 3  4 ⎠
/// ```
pub fn write_grid(f: &mut fmt::Formatter<'_>, cells: &[Vec<String>]) -> fmt::Result {
    let cols = cells.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut widths = vec![0; cols];
    for row in cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let last = cells.len().saturating_sub(1);
    for (i, row) in cells.iter().enumerate() {
        let (open, close) = match i {
            _ if cells.len() == 1 => ("(", ")"),
            0 => ("⎛", "⎞"),
            i if i == last => ("⎝", "⎠"),
            _ => ("⎜", "⎟"),
        };
        write!(f, "{} ", open)?;
        for (j, (cell, width)) in row.iter().zip(&widths).enumerate() {
            if j > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:>width$}", cell, width = *width)?;
        }
        writeln!(f, " {}", close)?;
    }
    Ok(())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Grid(Vec<Vec<String>>);

    impl fmt::Display for Grid {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_grid(f, &self.0)
        }
    }

    #[test]
    fn test_fastpow() {
        assert_eq!(fastpow(&3i64, 0), 1);
        assert_eq!(fastpow(&3i64, 1), 3);
        assert_eq!(fastpow(&3i64, 13), 1594323);
        assert_eq!(fastpow(&-2i64, 7), -128);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&12i64, &18i64), 6);
        assert_eq!(gcd(&7i64, &0i64), 7);
        assert_eq!(gcd(&0i64, &5i64), 5);
        assert_eq!(gcd(&17i64, &5i64), 1);
    }

    #[test]
    fn test_write_grid() {
        let grid = Grid(vec![
            vec!["1".into(), "-2".into()],
            vec!["30".into(), "4".into()],
        ]);
        assert_eq!(format!("{}", grid), "⎛  1 -2 ⎞\n⎝ 30  4 ⎠\n");

        let grid = Grid(vec![vec!["1".into(), "2".into()]]);
        assert_eq!(format!("{}", grid), "( 1 2 )\n");

        let grid = Grid(vec![vec!["1".into()], vec!["2".into()], vec!["3".into()]]);
        assert_eq!(format!("{}", grid), "⎛ 1 ⎞\n⎜ 2 ⎟\n⎝ 3 ⎠\n");
    }
}
