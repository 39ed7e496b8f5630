// Machine configuration text reader.
//
// Format:
//
//   ABCDEFGHIJKLMNOPQRSTUVWXYZ      alphabet (or a range such as A-Z)
//   5 3                             rotor slots, pawls
//   I MQ (AELTPHQXRU) (BKNW) ...   NAME TYPE CYCLES...
//   B R (AE) (BN) ...
//
// TYPE is `R` (reflector), `N` (fixed) or `M` followed by the notch symbols.
// After the alphabet line, tokens are whitespace separated and line breaks
// carry no meaning, so a rotor's cycles may continue on following lines.
// Everything is upper-cased before parsing.

use std::iter::Peekable;
use std::str::FromStr;
use std::sync::Arc;

use enigma_core::{Alphabet, EnigmaError, Permutation};

use crate::catalog::RotorCatalog;
use crate::machine::{Machine, check_dimensions};
use crate::rotor::RotorSpec;

/// A parsed machine configuration: alphabet, dimensions and rotor catalog.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    num_rotors: usize,
    pawls: usize,
    catalog: Arc<RotorCatalog>,
}

impl MachineConfig {
    /// Parse configuration text.
    pub fn parse(text: &str) -> Result<Self, EnigmaError> {
        let text = text.to_uppercase();
        let mut lines = text.lines();
        let alphabet_line = lines
            .by_ref()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| EnigmaError::Truncated("alphabet not specified".to_string()))?;
        let alphabet = Arc::new(parse_alphabet(alphabet_line)?);

        let rest: Vec<&str> = lines.collect();
        let rest = rest.join("\n");
        let mut tokens = rest.split_whitespace().peekable();

        let num_rotors = parse_count(tokens.next(), "number of rotors")?;
        let pawls = parse_count(tokens.next(), "number of pawls")?;
        check_dimensions(num_rotors, pawls)?;

        let mut catalog = RotorCatalog::new(Arc::clone(&alphabet));
        while let Some(name) = tokens.next() {
            let spec = read_rotor(name, &mut tokens, &alphabet)?;
            catalog.add(spec)?;
        }

        Ok(Self {
            num_rotors,
            pawls,
            catalog: Arc::new(catalog),
        })
    }

    /// A new machine over this configuration's catalog, with no rotors
    /// inserted yet.
    pub fn machine(&self) -> Result<Machine, EnigmaError> {
        Machine::new(Arc::clone(&self.catalog), self.num_rotors, self.pawls)
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.catalog.alphabet()
    }

    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }
}

impl FromStr for MachineConfig {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `X-Y` denotes the range `X..=Y`; anything else lists the symbols.
fn parse_alphabet(line: &str) -> Result<Alphabet, EnigmaError> {
    let chars: Vec<char> = line.chars().collect();
    match chars.as_slice() {
        [first, '-', last] => Alphabet::range(*first, *last),
        _ => Alphabet::new(line),
    }
}

fn parse_count(token: Option<&str>, what: &'static str) -> Result<usize, EnigmaError> {
    let token = token.ok_or_else(|| EnigmaError::Truncated(format!("{what} not specified")))?;
    token.parse().map_err(|_| EnigmaError::InvalidNumber {
        what,
        token: token.to_string(),
    })
}

/// Read one rotor description whose name has already been consumed.
fn read_rotor<'a, I>(
    name: &str,
    tokens: &mut Peekable<I>,
    alphabet: &Arc<Alphabet>,
) -> Result<RotorSpec, EnigmaError>
where
    I: Iterator<Item = &'a str>,
{
    let type_notch = tokens
        .next()
        .ok_or_else(|| EnigmaError::BadRotorDescription(format!("rotor {name} has no type")))?;

    let mut cycles = Vec::new();
    while let Some(tok) = tokens.next_if(|t| t.starts_with('(')) {
        cycles.push(tok);
    }
    let permutation = Permutation::parse(&cycles.join(" "), Arc::clone(alphabet))?;

    let mut type_chars = type_notch.chars();
    let kind = type_chars.next();
    let notches = type_chars.as_str();
    match kind {
        Some('M') => RotorSpec::moving(name, permutation, notches),
        Some('N') if notches.is_empty() => Ok(RotorSpec::fixed(name, permutation)),
        Some('R') if notches.is_empty() => RotorSpec::reflector(name, permutation),
        _ => Err(EnigmaError::BadRotorDescription(format!(
            "rotor {name} has unknown type {type_notch:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_CONFIG;

    #[test]
    fn parse_default_config() {
        let config = MachineConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.num_rotors(), 5);
        assert_eq!(config.num_pawls(), 3);
        assert_eq!(config.alphabet().size(), 26);
        assert_eq!(config.catalog().len(), 12);

        let catalog = config.catalog();
        assert!(catalog.get("B").unwrap().reflects());
        assert!(!catalog.get("BETA").unwrap().rotates());
        assert_eq!(catalog.get("VI").unwrap().notches(), &[12, 25]);
        // Rotor V's cycles are written back to back.
        assert_eq!(
            catalog.get("V").unwrap().permutation().to_string(),
            "(AVOLDRWFIUQ) (BZKSMNHYC) (EGTJPX)"
        );
    }

    #[test]
    fn cycles_continue_across_lines() {
        let config = MachineConfig::parse(DEFAULT_CONFIG).unwrap();
        let b = config.catalog().get("B").unwrap();
        assert!(b.permutation().is_derangement());
        assert_eq!(b.permutation().cycles().len(), 13);
    }

    #[test]
    fn range_alphabet_and_lowercase_input() {
        let text = "a-d\n3 1\nr r (ab) (cd)\nf n (abc)\nm mb (ad)\n";
        let config = MachineConfig::parse(text).unwrap();
        assert_eq!(config.alphabet().to_string(), "ABCD");
        assert!(config.catalog().contains("R"));
        assert_eq!(config.catalog().get("M").unwrap().notches(), &[1]);
    }

    #[test]
    fn rotor_without_cycles_is_identity() {
        let config = MachineConfig::parse("ABCD\n2 1\nR R (AB) (CD)\nM MA\n").unwrap();
        let m = config.catalog().get("M").unwrap();
        assert!(m.permutation().cycles().is_empty());
    }

    #[test]
    fn machine_from_config() {
        let config = MachineConfig::parse(DEFAULT_CONFIG).unwrap();
        let m = config.machine().unwrap();
        assert_eq!(m.num_rotors(), 5);
        assert_eq!(m.num_pawls(), 3);
        assert!(m.rotors().is_empty());
    }

    #[test]
    fn reject_truncated() {
        assert!(matches!(
            MachineConfig::parse(""),
            Err(EnigmaError::Truncated(_))
        ));
        assert!(matches!(
            MachineConfig::parse("ABCD\n"),
            Err(EnigmaError::Truncated(_))
        ));
        assert!(matches!(
            MachineConfig::parse("ABCD\n3"),
            Err(EnigmaError::Truncated(_))
        ));
        assert!(matches!(
            MachineConfig::parse("ABCD\n3 1\nR"),
            Err(EnigmaError::BadRotorDescription(_))
        ));
    }

    #[test]
    fn reject_bad_numbers_and_dimensions() {
        assert!(matches!(
            MachineConfig::parse("ABCD\nfive 3"),
            Err(EnigmaError::InvalidNumber { .. })
        ));
        assert!(matches!(
            MachineConfig::parse("ABCD\n3 3"),
            Err(EnigmaError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn reject_bad_rotors() {
        // Unknown type letter.
        assert!(matches!(
            MachineConfig::parse("ABCD\n2 1\nX Q (AB)"),
            Err(EnigmaError::BadRotorDescription(_))
        ));
        // Reflector with a fixed point.
        assert_eq!(
            MachineConfig::parse("ABCD\n2 1\nR R (AB)").unwrap_err(),
            EnigmaError::NotDerangement("R".to_string())
        );
        // Space inside a cycle.
        assert!(matches!(
            MachineConfig::parse("ABCD\n2 1\nR R (AB C)"),
            Err(EnigmaError::MalformedCycles(_))
        ));
        // Missing ')'.
        assert!(matches!(
            MachineConfig::parse("ABCD\n2 1\nR R (AB (CD)"),
            Err(EnigmaError::MalformedCycles(_))
        ));
        // Duplicate name.
        assert_eq!(
            MachineConfig::parse("ABCD\n2 1\nR R (AB) (CD)\nR R (AC) (BD)").unwrap_err(),
            EnigmaError::DuplicateRotorName("R".to_string())
        );
    }

    #[test]
    fn reject_reserved_alphabet() {
        assert!(matches!(
            MachineConfig::parse("AB*D\n2 1\n"),
            Err(EnigmaError::ReservedSymbol('*'))
        ));
    }
}
