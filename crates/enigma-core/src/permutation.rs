// Permutation over an alphabet's index space, defined by disjoint cycles.
//
// The cycle list is kept for display and derangement checks; forward and
// inverse lookup tables are maintained alongside it so that `permute` and
// `invert` are O(1).

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// A permutation of `0..alphabet.size()` in cycle notation.
///
/// Indices that appear in no cycle map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    /// Disjoint cycles `c0 -> c1 -> ... -> cm -> c0`, as alphabet indices.
    cycles: Vec<Vec<usize>>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
    /// Whether each index is listed in some cycle.
    covered: Vec<bool>,
}

impl Permutation {
    /// The identity permutation over `alphabet`.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let n = alphabet.size();
        Self {
            alphabet,
            cycles: Vec::new(),
            forward: (0..n).collect(),
            inverse: (0..n).collect(),
            covered: vec![false; n],
        }
    }

    /// Parse cycle notation such as `"(ABC) (DE)"`.
    ///
    /// Groups may be separated by whitespace or written back to back
    /// (`"(AB)(CD)"`). An empty or all-whitespace string is the identity.
    /// Whitespace inside a group, nested or unbalanced parentheses, empty
    /// groups and text outside a group are configuration errors; a symbol
    /// outside the alphabet is a range error.
    pub fn parse(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self, EnigmaError> {
        let mut perm = Self::identity(alphabet);
        let mut current: Option<Vec<usize>> = None;

        for ch in cycles.chars() {
            match current.take() {
                None => match ch {
                    c if c.is_whitespace() => {}
                    '(' => current = Some(Vec::new()),
                    ')' => {
                        return Err(EnigmaError::MalformedCycles(format!(
                            "unbalanced ')' in {cycles:?}"
                        )));
                    }
                    c => {
                        return Err(EnigmaError::MalformedCycles(format!(
                            "{c:?} outside of a cycle in {cycles:?}"
                        )));
                    }
                },
                Some(mut cycle) => match ch {
                    ')' => perm.push_cycle(cycle)?,
                    '(' => {
                        return Err(EnigmaError::MalformedCycles(format!(
                            "nested '(' in {cycles:?}"
                        )));
                    }
                    c if c.is_whitespace() => {
                        return Err(EnigmaError::MalformedCycles(format!(
                            "space inside cycle in {cycles:?}"
                        )));
                    }
                    c => {
                        cycle.push(perm.alphabet.to_index(c)?);
                        current = Some(cycle);
                    }
                },
            }
        }

        if current.is_some() {
            return Err(EnigmaError::MalformedCycles(format!(
                "missing ')' in {cycles:?}"
            )));
        }
        Ok(perm)
    }

    /// Add the cycle `c0 -> c1 -> ... -> cm -> c0`, where `cycle` is the
    /// symbol string `c0c1...cm` without parentheses.
    ///
    /// The permutation is unchanged if this fails.
    pub fn add_cycle(&mut self, cycle: &str) -> Result<(), EnigmaError> {
        let indices = cycle
            .chars()
            .map(|c| self.alphabet.to_index(c))
            .collect::<Result<Vec<_>, _>>()?;
        self.push_cycle(indices)
    }

    fn push_cycle(&mut self, cycle: Vec<usize>) -> Result<(), EnigmaError> {
        if cycle.is_empty() {
            return Err(EnigmaError::MalformedCycles("empty cycle".to_string()));
        }
        let mut seen = vec![false; self.size()];
        for &i in &cycle {
            if self.covered[i] || seen[i] {
                let sym = self.alphabet.to_symbol(i)?;
                return Err(EnigmaError::RepeatedCycleSymbol(sym));
            }
            seen[i] = true;
        }

        let len = cycle.len();
        for (k, &from) in cycle.iter().enumerate() {
            let to = cycle[(k + 1) % len];
            self.forward[from] = to;
            self.inverse[to] = from;
            self.covered[from] = true;
        }
        self.cycles.push(cycle);
        Ok(())
    }

    /// Size of the permuted alphabet.
    #[inline]
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// The alphabet this permutation acts on.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// The cycles, as alphabet indices, in insertion order.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// `p` modulo the alphabet size, always in `0..size()`.
    #[inline]
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Apply this permutation to `p` (taken modulo the alphabet size).
    #[inline]
    pub fn permute(&self, p: isize) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Apply the inverse of this permutation to `c` (taken modulo the
    /// alphabet size).
    #[inline]
    pub fn invert(&self, c: isize) -> usize {
        self.inverse[self.wrap(c)]
    }

    /// Apply this permutation to a symbol.
    pub fn permute_symbol(&self, p: char) -> Result<char, EnigmaError> {
        let i = self.alphabet.to_index(p)?;
        self.alphabet.to_symbol(self.forward[i])
    }

    /// Apply the inverse of this permutation to a symbol.
    pub fn invert_symbol(&self, c: char) -> Result<char, EnigmaError> {
        let i = self.alphabet.to_index(c)?;
        self.alphabet.to_symbol(self.inverse[i])
    }

    /// Whether no symbol maps to itself: every cycle has length >= 2 and the
    /// cycles cover the whole alphabet.
    pub fn is_derangement(&self) -> bool {
        let mut covered = 0;
        for cycle in &self.cycles {
            if cycle.len() < 2 {
                return false;
            }
            covered += cycle.len();
        }
        covered == self.size()
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.alphabet.symbols();
        for (n, cycle) in self.cycles.iter().enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            f.write_str("(")?;
            for &i in cycle {
                write!(f, "{}", symbols[i])?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
