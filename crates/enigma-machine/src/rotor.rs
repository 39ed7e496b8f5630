// Rotors: immutable specifications plus per-machine positioned instances.
//
// A `RotorSpec` is catalog data (name, wiring, kind) and is shared between
// machines through `Arc`. A `Rotor` is one machine's copy of a spec together
// with its own rotational setting, so two machines built from the same
// catalog never observe each other's positions.

use std::sync::Arc;

use enigma_core::{Alphabet, EnigmaError, Permutation};

/// The closed set of rotor variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Derangement-only, fixed at setting 0, never advances.
    Reflector,
    /// May be repositioned but never advances and has no notch.
    Fixed,
    /// Advances when commanded; carries at any of `notches` (alphabet indices).
    Moving { notches: Vec<usize> },
}

/// Immutable description of a rotor, as stored in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorSpec {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
}

impl RotorSpec {
    /// A reflector. `permutation` must be a derangement.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Result<Self, EnigmaError> {
        let name = name.into();
        if !permutation.is_derangement() {
            return Err(EnigmaError::NotDerangement(name));
        }
        Ok(Self {
            name,
            permutation,
            kind: RotorKind::Reflector,
        })
    }

    /// A non-moving rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self {
            name: name.into(),
            permutation,
            kind: RotorKind::Fixed,
        }
    }

    /// A moving rotor with notches at the symbols of `notches`.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, EnigmaError> {
        let mut indices = notches
            .chars()
            .map(|c| permutation.alphabet().to_index(c))
            .collect::<Result<Vec<_>, _>>()?;
        indices.sort_unstable();
        indices.dedup();
        Ok(Self {
            name: name.into(),
            permutation,
            kind: RotorKind::Moving { notches: indices },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Whether this rotor can advance.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Whether this rotor is a reflector.
    pub fn reflects(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Notch positions as alphabet indices (empty unless moving).
    pub fn notches(&self) -> &[usize] {
        match &self.kind {
            RotorKind::Moving { notches } => notches,
            _ => &[],
        }
    }
}

/// A rotor placed in a machine slot: a shared spec plus a local setting.
#[derive(Debug, Clone)]
pub struct Rotor {
    spec: Arc<RotorSpec>,
    setting: usize,
}

impl Rotor {
    /// A new instance of `spec` at setting 0.
    pub fn new(spec: Arc<RotorSpec>) -> Self {
        Self { spec, setting: 0 }
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn spec(&self) -> &RotorSpec {
        &self.spec
    }

    /// Size of the rotor's alphabet.
    #[inline]
    pub fn size(&self) -> usize {
        self.spec.permutation.size()
    }

    /// Current rotational setting, in `0..size()`.
    #[inline]
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Current setting as a symbol.
    pub fn setting_symbol(&self) -> char {
        self.spec.alphabet().symbols()[self.setting]
    }

    /// Set the rotor to position `posn` (taken modulo the alphabet size).
    ///
    /// A reflector only accepts position 0.
    pub fn set(&mut self, posn: usize) -> Result<(), EnigmaError> {
        let posn = posn % self.size();
        if self.reflects() && posn != 0 {
            return Err(EnigmaError::ReflectorSetting {
                name: self.name().to_string(),
                setting: posn,
            });
        }
        self.setting = posn;
        Ok(())
    }

    /// Set the rotor to the position of symbol `c`.
    pub fn set_symbol(&mut self, c: char) -> Result<(), EnigmaError> {
        let posn = self.spec.alphabet().to_index(c)?;
        self.set(posn)
    }

    pub fn rotates(&self) -> bool {
        self.spec.rotates()
    }

    pub fn reflects(&self) -> bool {
        self.spec.reflects()
    }

    /// Whether the current setting is one of the notch positions.
    /// Always false for reflectors and fixed rotors.
    pub fn at_notch(&self) -> bool {
        self.spec.notches().contains(&self.setting)
    }

    /// Advance one position. No-op unless the rotor is moving.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.setting = (self.setting + 1) % self.size();
        }
    }

    /// Convert contact `p` entering from the right, accounting for the
    /// setting.
    #[inline]
    pub fn convert_forward(&self, p: usize) -> usize {
        let perm = &self.spec.permutation;
        let s = self.setting as isize;
        perm.wrap(perm.permute(p as isize + s) as isize - s)
    }

    /// Convert contact `e` entering from the left (inverse of
    /// [`convert_forward`](Self::convert_forward)).
    #[inline]
    pub fn convert_backward(&self, e: usize) -> usize {
        let perm = &self.spec.permutation;
        let s = self.setting as isize;
        perm.wrap(perm.invert(e as isize + s) as isize - s)
    }
}
