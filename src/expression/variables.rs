use std::fmt;

/// Unknown of a linear system, created by a [`Variables`] registry.
///
/// Variables compare by their position in the registry that created them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    index: usize,
    name: String,
}

impl Variable {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Interns variable names. Asking twice for the same name returns the same
/// variable.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    names: Vec<String>,
}

impl Variables {
    pub fn new() -> Self {
        Variables { names: vec![] }
    }

    pub fn gen(&mut self, name: &str) -> Variable {
        let index = self
            .names
            .iter()
            .position(|x| x == name)
            .unwrap_or_else(|| {
                self.names.push(name.to_owned());
                self.names.len() - 1
            });

        Variable {
            index,
            name: name.to_owned(),
        }
    }

    /// `name_0, name_1, ..., name_{n-1}`.
    pub fn gens(&mut self, name: &str, n: usize) -> Vec<Variable> {
        (0..n).map(|i| self.gen(&format!("{}_{}", name, i))).collect()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_interns_names() {
        let mut vars = Variables::new();
        let x = vars.gen("x");
        let y = vars.gen("y");
        assert_eq!(vars.gen("x"), x);
        assert_ne!(x, y);
        assert!(x < y);
        assert_eq!(vars.names(), &["x".to_string(), "y".to_string()]);
        assert_eq!(y.index(), 1);
        assert_eq!(y.name(), "y");
    }

    #[test]
    fn test_gens() {
        let mut vars = Variables::default();
        assert!(vars.is_empty());
        let a = vars.gens("a", 3);
        assert_eq!(
            a.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
            vec!["a_0", "a_1", "a_2"]
        );
        assert_eq!(vars.gens("a", 2), a[..2].to_vec());
        assert_eq!(vars.len(), 3);
    }
}
