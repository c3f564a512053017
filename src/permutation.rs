use itertools::Itertools;
use std::fmt;
use std::ops;

use crate::error::{Error, Result};

/// Bijection of `0..n`, stored as the images of `0, 1, ..., n - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    data: Vec<usize>,
}

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Permutation {
            data: (0..n).collect(),
        }
    }

    pub fn new(data: Vec<usize>) -> Result<Self> {
        let mut seen = vec![false; data.len()];
        for &value in &data {
            if value >= data.len() || seen[value] {
                return Err(Error::NotAPermutation(format!("{:?}", data)));
            }
            seen[value] = true;
        }
        Ok(Permutation { data })
    }

    /// Product of disjoint cycles on `0..n`, e.g. `[[0, 6], [1, 5, 7]]`.
    pub fn from_cycles(n: usize, cycles: &[Vec<usize>]) -> Result<Self> {
        let mut data: Vec<usize> = (0..n).collect();
        let mut used = vec![false; n];
        for cycle in cycles {
            for (&from, &to) in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
                if from >= n || to >= n || used[from] {
                    return Err(Error::NotAPermutation(format!("{:?}", cycles)));
                }
                used[from] = true;
                data[from] = to;
            }
        }
        Ok(Permutation { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.data
    }

    pub fn inverse(&self) -> Self {
        let mut data = vec![0; self.len()];
        for (i, &value) in self.data.iter().enumerate() {
            data[value] = i;
        }
        Permutation { data }
    }

    pub fn power(&self, mut exponent: u64) -> Self {
        let mut result = Permutation::identity(self.len());
        let mut square = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.compose(&square);
            }
            exponent >>= 1;
            if exponent > 0 {
                square = square.compose(&square);
            }
        }
        result
    }

    /// +1 for even permutations, -1 for odd ones.
    pub fn sign(&self) -> i32 {
        let mut used = vec![false; self.len()];
        let mut cycles = 0;
        for start in 0..self.len() {
            if used[start] {
                continue;
            }
            let mut vertex = start;
            while !used[vertex] {
                used[vertex] = true;
                vertex = self.data[vertex];
            }
            cycles += 1;
        }
        if (self.len() - cycles) % 2 == 0 {
            1
        } else {
            -1
        }
    }

    // same length only
    fn compose(&self, other: &Permutation) -> Permutation {
        Permutation {
            data: other.data.iter().map(|&i| self.data[i]).collect(),
        }
    }

    /// Rearrange `self` into the next permutation in lexicographic order.
    /// Returns `false` (leaving `self` untouched) if it is the last one.
    fn advance(&mut self) -> bool {
        let data = &mut self.data;
        let Some(i) = (0..data.len().saturating_sub(1))
            .rev()
            .find(|&i| data[i] < data[i + 1])
        else {
            return false;
        };
        let j = (i + 1..data.len())
            .rev()
            .find(|&j| data[j] > data[i])
            .unwrap_or(i + 1);
        data.swap(i, j);
        data[i + 1..].reverse();
        true
    }
}

impl ops::Mul<&Permutation> for &Permutation {
    type Output = Result<Permutation>;

    /// `(p * q)[i] == p[q[i]]`: `q` is applied first.
    fn mul(self, rhs: &Permutation) -> Result<Permutation> {
        if self.len() != rhs.len() {
            return Err(Error::WrongSize(format!(
                "permutations of {} and {} elements",
                self.len(),
                rhs.len()
            )));
        }
        Ok(self.compose(rhs))
    }
}

impl ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.data[index]
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data.iter().map(|i| i + 1).join(" "))
    }
}

/// All permutations of `0..n` in lexicographic order, starting from the
/// identity. Iterate it as many times as needed.
#[derive(Debug, Clone, Copy)]
pub struct AllPermutations {
    n: usize,
}

impl AllPermutations {
    pub fn new(n: usize) -> Self {
        AllPermutations { n }
    }

    pub fn iter(&self) -> Permutations {
        Permutations {
            next: Some(Permutation::identity(self.n)),
        }
    }
}

impl IntoIterator for &AllPermutations {
    type Item = Permutation;
    type IntoIter = Permutations;

    fn into_iter(self) -> Permutations {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Permutations {
    next: Option<Permutation>,
}

impl Iterator for Permutations {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        let current = self.next.take()?;
        let mut following = current.clone();
        if following.advance() {
            self.next = Some(following);
        }
        Some(current)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
