// Error taxonomy shared by every layer of the simulator.
//
// Each variant belongs to one of two kinds: configuration errors (a
// structurally invalid alphabet, permutation, rotor or machine setup) and
// range errors (a symbol or index outside the alphabet). Callers that only
// care about the kind use `EnigmaError::kind()`.

/// Broad classification of an [`EnigmaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or inconsistent configuration.
    Config,
    /// Symbol or index outside the alphabet.
    Range,
}

/// Error type for alphabet, permutation, rotor and machine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnigmaError {
    // -- Alphabet --------------------------------------------------------
    #[error("alphabet may not contain reserved symbol {0:?}")]
    ReservedSymbol(char),
    #[error("alphabet contains {0:?} more than once")]
    DuplicateSymbol(char),
    #[error("alphabet is empty")]
    EmptyAlphabet,
    #[error("empty range of characters: {first:?}-{last:?}")]
    BadRange { first: char, last: char },

    // -- Range -----------------------------------------------------------
    #[error("character {0:?} out of range")]
    SymbolOutOfRange(char),
    #[error("character index {index} out of range (alphabet size {size})")]
    IndexOutOfRange { index: usize, size: usize },

    // -- Permutation -----------------------------------------------------
    #[error("malformed cycles: {0}")]
    MalformedCycles(String),
    #[error("symbol {0:?} appears in more than one cycle position")]
    RepeatedCycleSymbol(char),
    #[error("permutation alphabet does not match the catalog alphabet")]
    AlphabetMismatch,

    // -- Rotors ----------------------------------------------------------
    #[error("reflector {0} permutation must be a derangement")]
    NotDerangement(String),
    #[error("reflector {name} cannot be set to position {setting}")]
    ReflectorSetting { name: String, setting: usize },
    #[error("rotor {0} is defined more than once")]
    DuplicateRotorName(String),

    // -- Machine ---------------------------------------------------------
    #[error("rotor {0} does not exist")]
    UnknownRotor(String),
    #[error("rotor {0} is repeated")]
    DuplicateRotor(String),
    #[error("incorrect number of rotors: expected {expected}, got {actual}")]
    RotorCountMismatch { expected: usize, actual: usize },
    #[error("setting must have {expected} characters, got {actual}")]
    SettingLength { expected: usize, actual: usize },
    #[error("setting {0:?} out of alphabet range")]
    SettingSymbol(char),
    #[error("rotor slot {slot} out of range (machine has {slots} slots)")]
    SlotOutOfRange { slot: usize, slots: usize },
    #[error("no rotors have been inserted")]
    RotorsNotInserted,
    #[error("machine needs more than one rotor slot and fewer pawls than slots (slots {num_rotors}, pawls {pawls})")]
    InvalidDimensions { num_rotors: usize, pawls: usize },
    #[error("first rotor of machine must be a reflector")]
    MissingReflector,
    #[error("can only have one reflector")]
    MultipleReflectors,
    #[error("wrong number of moving rotors: expected {expected}, got {actual}")]
    MovingRotorCount { expected: usize, actual: usize },

    // -- Configuration text ----------------------------------------------
    #[error("configuration file truncated: {0}")]
    Truncated(String),
    #[error("invalid {what}: {token:?}")]
    InvalidNumber { what: &'static str, token: String },
    #[error("bad rotor description: {0}")]
    BadRotorDescription(String),
    #[error("bad settings line: {0}")]
    BadSettings(String),
    #[error("plugboard cycles should be of the form (XY): {0}")]
    BadPlugboard(String),
}

impl EnigmaError {
    /// Classify this error as a configuration or range error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnigmaError::SymbolOutOfRange(_) | EnigmaError::IndexOutOfRange { .. } => {
                ErrorKind::Range
            }
            EnigmaError::SlotOutOfRange { .. } => ErrorKind::Range,
            _ => ErrorKind::Config,
        }
    }

    /// Shorthand for `kind() == ErrorKind::Config`.
    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Shorthand for `kind() == ErrorKind::Range`.
    pub fn is_range(&self) -> bool {
        self.kind() == ErrorKind::Range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_errors_classified() {
        assert!(EnigmaError::SymbolOutOfRange('!').is_range());
        assert!(EnigmaError::IndexOutOfRange { index: 30, size: 26 }.is_range());
        assert!(EnigmaError::SlotOutOfRange { slot: 7, slots: 5 }.is_range());
    }

    #[test]
    fn config_errors_classified() {
        assert!(EnigmaError::UnknownRotor("IX".into()).is_config());
        assert!(EnigmaError::NotDerangement("B".into()).is_config());
        assert!(EnigmaError::SettingLength { expected: 4, actual: 3 }.is_config());
        assert!(EnigmaError::SettingSymbol('!').is_config());
        assert_eq!(EnigmaError::MissingReflector.kind(), ErrorKind::Config);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            EnigmaError::UnknownRotor("IX".into()).to_string(),
            "rotor IX does not exist"
        );
        assert_eq!(
            EnigmaError::SettingLength { expected: 4, actual: 2 }.to_string(),
            "setting must have 4 characters, got 2"
        );
        assert_eq!(
            EnigmaError::SymbolOutOfRange('1').to_string(),
            "character '1' out of range"
        );
    }
}
