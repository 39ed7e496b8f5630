// Settings line: `* R1 R2 ... Rn SETTING [PLUGBOARD CYCLES...]`.
//
// The line names exactly `num_rotors` catalog rotors (reflector first),
// then gives one setting symbol per non-reflector slot, then any number of
// plugboard cycles in parentheses.

use std::sync::Arc;

use enigma_core::{EnigmaError, Permutation};

use crate::machine::Machine;

/// A parsed settings line, ready to be applied to a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    rotors: Vec<String>,
    setting: String,
    plugboard: Vec<String>,
}

impl Settings {
    /// Parse `line` for a machine with `num_rotors` slots. The line is
    /// upper-cased first.
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self, EnigmaError> {
        let line = line.to_uppercase();
        let mut tokens = line.split_whitespace();

        if tokens.next() != Some("*") {
            return Err(EnigmaError::BadSettings(
                "settings line must start with '*'".to_string(),
            ));
        }

        let rotors: Vec<String> = tokens.by_ref().take(num_rotors).map(str::to_string).collect();
        if let Some(tok) = rotors.iter().find(|t| t.starts_with('(')) {
            return Err(EnigmaError::BadSettings(format!(
                "expected {num_rotors} rotor names before {tok}"
            )));
        }
        let setting = tokens.next().ok_or_else(|| {
            EnigmaError::BadSettings(format!(
                "expected {num_rotors} rotor names followed by a setting"
            ))
        })?;
        if setting.starts_with('(') {
            return Err(EnigmaError::BadSettings(format!(
                "expected a setting, found {setting}"
            )));
        }

        let plugboard = tokens
            .map(|tok| {
                if tok.starts_with('(') && tok.ends_with(')') {
                    Ok(tok.to_string())
                } else {
                    Err(EnigmaError::BadPlugboard(tok.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rotors,
            setting: setting.to_string(),
            plugboard,
        })
    }

    /// Rotor names, reflector first.
    pub fn rotors(&self) -> &[String] {
        &self.rotors
    }

    /// Initial settings for slots 1...
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Plugboard cycles in notation form, e.g. `(HQ) (EX)`.
    pub fn plugboard_cycles(&self) -> String {
        self.plugboard.join(" ")
    }

    /// Insert the named rotors, check the machine structure, set the
    /// rotors and install the plugboard.
    ///
    /// Structure checks: slot 0 holds the only reflector and exactly
    /// `num_pawls` moving rotors are present. The machine is left unchanged
    /// if any step fails.
    pub fn apply(&self, machine: &mut Machine) -> Result<(), EnigmaError> {
        let mut staged = machine.clone();
        staged.insert_rotors(&self.rotors)?;

        let rotors = staged.rotors();
        if !rotors[0].reflects() {
            return Err(EnigmaError::MissingReflector);
        }
        if rotors[1..].iter().any(|r| r.reflects()) {
            return Err(EnigmaError::MultipleReflectors);
        }
        let moving = rotors.iter().filter(|r| r.rotates()).count();
        if moving != staged.num_pawls() {
            return Err(EnigmaError::MovingRotorCount {
                expected: staged.num_pawls(),
                actual: moving,
            });
        }

        staged.set_rotors(&self.setting)?;
        let plugboard =
            Permutation::parse(&self.plugboard_cycles(), Arc::clone(staged.alphabet()))?;
        staged.set_plugboard(plugboard)?;

        *machine = staged;
        Ok(())
    }
}
