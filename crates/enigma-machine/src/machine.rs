// Machine: slot assignment, stepping and the bidirectional signal path.
//
// Slot 0 is the reflector slot; the `pawls` rightmost slots hold the rotors
// that can advance. Each conversion first steps the rotors and then passes
// the signal plugboard -> rotors right to left -> back left to right
// (excluding the reflector) -> inverse plugboard.

use std::sync::Arc;

use enigma_core::{Alphabet, EnigmaError, Permutation};

use crate::catalog::RotorCatalog;
use crate::rotor::Rotor;

/// An Enigma machine with `num_rotors` slots and `pawls` pawls.
#[derive(Debug, Clone)]
pub struct Machine {
    catalog: Arc<RotorCatalog>,
    num_rotors: usize,
    pawls: usize,
    /// Rotor in each slot. Empty until `insert_rotors` succeeds.
    slots: Vec<Rotor>,
    plugboard: Permutation,
}

impl Machine {
    /// A machine over `catalog` with `1 < num_rotors` slots and
    /// `pawls < num_rotors` pawls. The plugboard starts as the identity.
    pub fn new(
        catalog: Arc<RotorCatalog>,
        num_rotors: usize,
        pawls: usize,
    ) -> Result<Self, EnigmaError> {
        check_dimensions(num_rotors, pawls)?;
        let plugboard = Permutation::identity(Arc::clone(catalog.alphabet()));
        Ok(Self {
            catalog,
            num_rotors,
            pawls,
            slots: Vec::new(),
            plugboard,
        })
    }

    /// Number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Number of pawls (and thus rotating rotors).
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.catalog.alphabet()
    }

    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }

    /// Rotors in slot order (slot 0 first). Empty before insertion.
    pub fn rotors(&self) -> &[Rotor] {
        &self.slots
    }

    pub fn rotor(&self, slot: usize) -> Option<&Rotor> {
        self.slots.get(slot)
    }

    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Fill the slots with fresh instances of the catalog rotors `names`
    /// (`names[0]` names the reflector). All rotors start at setting 0.
    ///
    /// The previous assignment is kept if this fails.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EnigmaError> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::RotorCountMismatch {
                expected: self.num_rotors,
                actual: names.len(),
            });
        }

        let mut slots: Vec<Rotor> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if slots.iter().any(|r| r.name() == name) {
                return Err(EnigmaError::DuplicateRotor(name.to_string()));
            }
            let spec = self
                .catalog
                .get(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            slots.push(Rotor::new(Arc::clone(spec)));
        }
        self.slots = slots;
        Ok(())
    }

    /// Set the rotors in slots 1.. from `setting`, one symbol per slot
    /// (the first symbol is the leftmost rotor after the reflector).
    ///
    /// Settings are unchanged if this fails.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        let alphabet = self.alphabet();
        let positions = setting
            .chars()
            .map(|c| alphabet.to_index(c).map_err(|_| EnigmaError::SettingSymbol(c)))
            .collect::<Result<Vec<_>, _>>()?;
        if positions.len() != self.num_rotors - 1 {
            return Err(EnigmaError::SettingLength {
                expected: self.num_rotors - 1,
                actual: positions.len(),
            });
        }

        let mut slots = self.slots.clone();
        for (rotor, posn) in slots[1..].iter_mut().zip(positions) {
            rotor.set(posn)?;
        }
        self.slots = slots;
        Ok(())
    }

    /// Set the rotor in `slot` to the position of symbol `c`.
    pub fn set_rotor(&mut self, slot: usize, c: char) -> Result<(), EnigmaError> {
        let slots = self.slots.len();
        let rotor = self
            .slots
            .get_mut(slot)
            .ok_or(EnigmaError::SlotOutOfRange { slot, slots })?;
        rotor.set_symbol(c)
    }

    /// Current settings of slots 1.., as symbols.
    pub fn settings(&self) -> String {
        self.slots.iter().skip(1).map(Rotor::setting_symbol).collect()
    }

    /// Replace the plugboard.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<(), EnigmaError> {
        if **plugboard.alphabet() != **self.alphabet() {
            return Err(EnigmaError::AlphabetMismatch);
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Advance the machine one step, then convert contact `c` (taken modulo
    /// the alphabet size).
    pub fn convert_index(&mut self, c: usize) -> Result<usize, EnigmaError> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        self.advance_rotors();
        Ok(self.signal(c))
    }

    /// Convert `msg`, advancing once per symbol. Each symbol is upper-cased
    /// first; the output has one symbol per input symbol.
    ///
    /// Fails without stepping if any symbol is outside the alphabet. A symbol
    /// whose upper case is more than one character (`ß`) is kept as is.
    pub fn convert(&mut self, msg: &str) -> Result<String, EnigmaError> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        let alphabet = Arc::clone(self.alphabet());
        let input = msg
            .chars()
            .map(|c| alphabet.to_index(upper_case(c)))
            .collect::<Result<Vec<_>, _>>()?;

        let symbols = alphabet.symbols();
        let mut out = String::with_capacity(input.len());
        for c in input {
            self.advance_rotors();
            out.push(symbols[self.signal(c)]);
        }
        Ok(out)
    }

    /// Step the rotors. Which rotors move is decided entirely from the
    /// notch positions before the step.
    fn advance_rotors(&mut self) {
        let n = self.slots.len();
        if self.pawls == 0 {
            return;
        }
        let first_pawl = n - self.pawls;

        let mut advance = vec![false; n];
        advance[n - 1] = true;
        for r in first_pawl + 1..n {
            if self.slots[r].at_notch() {
                advance[r] = true;
                advance[r - 1] = true;
            }
        }

        for (rotor, step) in self.slots.iter_mut().zip(advance) {
            if step {
                rotor.advance();
            }
        }
    }

    fn signal(&self, c: usize) -> usize {
        let mut result = self.plugboard.permute(c as isize);
        for rotor in self.slots.iter().rev() {
            result = rotor.convert_forward(result);
        }
        for rotor in &self.slots[1..] {
            result = rotor.convert_backward(result);
        }
        self.plugboard.invert(result as isize)
    }
}

fn upper_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Validate machine dimensions: more than one slot, fewer pawls than slots.
pub(crate) fn check_dimensions(num_rotors: usize, pawls: usize) -> Result<(), EnigmaError> {
    if num_rotors < 2 || pawls >= num_rotors {
        return Err(EnigmaError::InvalidDimensions { num_rotors, pawls });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotor::RotorSpec;

    // Small 4-symbol machine: reflector R, fixed F, moving M1 (notch B), M2 (notch C).
    fn small_catalog() -> Arc<RotorCatalog> {
        let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
        let p = |c: &str| Permutation::parse(c, alpha.clone()).unwrap();
        let mut catalog = RotorCatalog::new(alpha.clone());
        catalog.add(RotorSpec::reflector("R", p("(AC) (BD)")).unwrap()).unwrap();
        catalog.add(RotorSpec::fixed("F", p("(ABCD)"))).unwrap();
        catalog.add(RotorSpec::moving("M1", p("(AB)"), "B").unwrap()).unwrap();
        catalog.add(RotorSpec::moving("M2", p("(CD)"), "C").unwrap()).unwrap();
        Arc::new(catalog)
    }

    fn small_machine() -> Machine {
        let mut m = Machine::new(small_catalog(), 4, 2).unwrap();
        m.insert_rotors(&["R", "F", "M1", "M2"]).unwrap();
        m
    }

    #[test]
    fn reject_bad_dimensions() {
        assert!(Machine::new(small_catalog(), 1, 0).is_err());
        assert!(Machine::new(small_catalog(), 3, 3).is_err());
        assert!(Machine::new(small_catalog(), 3, 2).is_ok());
    }

    #[test]
    fn insert_rotors_in_order() {
        let m = small_machine();
        let names: Vec<&str> = m.rotors().iter().map(Rotor::name).collect();
        assert_eq!(names, ["R", "F", "M1", "M2"]);
        assert_eq!(m.settings(), "AAA");
    }

    #[test]
    fn insert_rotors_errors() {
        let mut m = Machine::new(small_catalog(), 4, 2).unwrap();
        assert_eq!(
            m.insert_rotors(&["R", "F", "M1"]),
            Err(EnigmaError::RotorCountMismatch { expected: 4, actual: 3 })
        );
        assert_eq!(
            m.insert_rotors(&["R", "F", "M1", "M9"]),
            Err(EnigmaError::UnknownRotor("M9".to_string()))
        );
        assert_eq!(
            m.insert_rotors(&["R", "M1", "M1", "M2"]),
            Err(EnigmaError::DuplicateRotor("M1".to_string()))
        );
        assert!(m.rotors().is_empty());
    }

    #[test]
    fn set_rotors_and_errors() {
        let mut m = small_machine();
        m.set_rotors("BCD").unwrap();
        assert_eq!(m.settings(), "BCD");
        assert_eq!(m.rotor(3).unwrap().setting(), 3);

        assert_eq!(
            m.set_rotors("AB"),
            Err(EnigmaError::SettingLength { expected: 3, actual: 2 })
        );
        assert_eq!(m.set_rotors("ABZ"), Err(EnigmaError::SettingSymbol('Z')));
        assert_eq!(m.settings(), "BCD");
    }

    #[test]
    fn set_rotors_before_insert() {
        let mut m = Machine::new(small_catalog(), 4, 2).unwrap();
        assert_eq!(m.set_rotors("AAA"), Err(EnigmaError::RotorsNotInserted));
        assert_eq!(m.convert("A"), Err(EnigmaError::RotorsNotInserted));
    }

    #[test]
    fn set_rotor_by_slot() {
        let mut m = small_machine();
        m.set_rotor(2, 'C').unwrap();
        assert_eq!(m.settings(), "ACA");
        assert!(m.set_rotor(0, 'B').unwrap_err().is_config());
        assert_eq!(
            m.set_rotor(4, 'A'),
            Err(EnigmaError::SlotOutOfRange { slot: 4, slots: 4 })
        );
    }

    #[test]
    fn fast_rotor_steps_every_conversion() {
        let mut m = small_machine();
        m.convert_index(0).unwrap();
        assert_eq!(m.settings(), "AAB");
    }

    #[test]
    fn notch_carries_to_left_neighbor() {
        let mut m = small_machine();
        // M2 at its notch C: M2 and M1 both advance.
        m.set_rotors("AAC").unwrap();
        m.convert_index(0).unwrap();
        assert_eq!(m.settings(), "ABD");
    }

    #[test]
    fn leftmost_pawl_does_not_carry_into_fixed_rotor() {
        let mut m = small_machine();
        // M1 at its notch B, M2 not at notch: only M2 advances, and the
        // fixed rotor to M1's left never moves.
        m.set_rotors("ABA").unwrap();
        m.convert_index(0).unwrap();
        assert_eq!(m.settings(), "ABB");
    }

    #[test]
    fn reciprocal_conversion() {
        let mut enc = small_machine();
        let mut dec = small_machine();
        let cipher = enc.convert("ABCDDCBAAB").unwrap();
        assert_eq!(dec.convert(&cipher).unwrap(), "ABCDDCBAAB");
    }

    #[test]
    fn convert_is_atomic_on_bad_symbol() {
        let mut m = small_machine();
        assert_eq!(m.convert("ABX"), Err(EnigmaError::SymbolOutOfRange('X')));
        assert_eq!(m.settings(), "AAA");
    }

    #[test]
    fn convert_upper_cases() {
        let mut a = small_machine();
        let mut b = small_machine();
        assert_eq!(a.convert("abcd").unwrap(), b.convert("ABCD").unwrap());
    }

    #[test]
    fn multi_char_upper_case_is_out_of_range() {
        let mut m = small_machine();
        assert_eq!(m.convert("Aß"), Err(EnigmaError::SymbolOutOfRange('ß')));
        assert_eq!(m.settings(), "AAA");
    }

    #[test]
    fn convert_preserves_length() {
        let mut m = small_machine();
        let out = m.convert("abcdDCBAab").unwrap();
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn plugboard_alphabet_must_match() {
        let mut m = small_machine();
        let other = Permutation::identity(Arc::new(Alphabet::upper()));
        assert_eq!(m.set_plugboard(other), Err(EnigmaError::AlphabetMismatch));
        let plug = Permutation::parse("(AB)", Arc::clone(m.alphabet())).unwrap();
        m.set_plugboard(plug).unwrap();
        assert_eq!(m.plugboard().to_string(), "(AB)");
    }

    #[test]
    fn machines_share_catalog_not_settings() {
        let catalog = small_catalog();
        let mut a = Machine::new(Arc::clone(&catalog), 4, 2).unwrap();
        let mut b = Machine::new(catalog, 4, 2).unwrap();
        a.insert_rotors(&["R", "F", "M1", "M2"]).unwrap();
        b.insert_rotors(&["R", "F", "M1", "M2"]).unwrap();
        a.set_rotors("DDD").unwrap();
        a.convert("AAAA").unwrap();
        assert_eq!(b.settings(), "AAA");
    }
}
