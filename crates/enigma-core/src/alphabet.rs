// Alphabet: ordered, duplicate-free symbol set with symbol <-> index mapping.

use std::fmt;

use hashbrown::HashMap;

use crate::error::EnigmaError;

/// Characters with syntactic meaning in cycle notation and configuration
/// lines. None of them may be an alphabet symbol.
pub const RESERVED_SYMBOLS: [char; 4] = ['(', ')', '-', '*'];

/// The 26 upper-case Latin letters.
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of symbols, indexed `0..size()`.
///
/// Immutable after construction. `to_index` and `to_symbol` are mutual
/// inverses over the contained symbols.
#[derive(Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    index_of: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `symbols`, in order.
    ///
    /// Fails if `symbols` is empty, contains whitespace or one of
    /// [`RESERVED_SYMBOLS`], or repeats a character.
    pub fn new(symbols: &str) -> Result<Self, EnigmaError> {
        Self::from_chars(symbols.chars())
    }

    /// Build the contiguous alphabet `first..=last` (e.g. `A-Z`).
    pub fn range(first: char, last: char) -> Result<Self, EnigmaError> {
        if first > last {
            return Err(EnigmaError::BadRange { first, last });
        }
        Self::from_chars(first..=last)
    }

    /// The upper-case Latin alphabet `A..=Z`.
    pub fn upper() -> Self {
        let symbols: Vec<char> = UPPER.chars().collect();
        let index_of = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index_of }
    }

    fn from_chars(chars: impl IntoIterator<Item = char>) -> Result<Self, EnigmaError> {
        let mut symbols = Vec::new();
        let mut index_of = HashMap::new();
        for ch in chars {
            if RESERVED_SYMBOLS.contains(&ch) || ch.is_whitespace() {
                return Err(EnigmaError::ReservedSymbol(ch));
            }
            if index_of.insert(ch, symbols.len()).is_some() {
                return Err(EnigmaError::DuplicateSymbol(ch));
            }
            symbols.push(ch);
        }
        if symbols.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        Ok(Self { symbols, index_of })
    }

    /// Number of symbols.
    #[inline]
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Whether `ch` is a member of this alphabet.
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.index_of.contains_key(&ch)
    }

    /// Symbol at `index`.
    pub fn to_symbol(&self, index: usize) -> Result<char, EnigmaError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Index of `ch`.
    pub fn to_index(&self, ch: char) -> Result<usize, EnigmaError> {
        self.index_of
            .get(&ch)
            .copied()
            .ok_or(EnigmaError::SymbolOutOfRange(ch))
    }

    /// All symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.to_string()).finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
