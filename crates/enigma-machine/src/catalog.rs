// Shared, read-only catalog of rotor specifications.

use std::sync::Arc;

use enigma_core::{Alphabet, EnigmaError};
use hashbrown::HashMap;

use crate::rotor::RotorSpec;

/// All rotors available to machines built over one alphabet.
///
/// Entries are immutable once added. Machines take `Arc` clones of the
/// specs they use and keep their own settings.
#[derive(Debug, Clone)]
pub struct RotorCatalog {
    alphabet: Arc<Alphabet>,
    rotors: Vec<Arc<RotorSpec>>,
    by_name: HashMap<String, usize>,
}

impl RotorCatalog {
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        Self {
            alphabet,
            rotors: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Add `spec`. Fails if another rotor has the same name or the spec's
    /// alphabet differs from the catalog's.
    pub fn add(&mut self, spec: RotorSpec) -> Result<(), EnigmaError> {
        if **spec.alphabet() != *self.alphabet {
            return Err(EnigmaError::AlphabetMismatch);
        }
        if self.by_name.contains_key(spec.name()) {
            return Err(EnigmaError::DuplicateRotorName(spec.name().to_string()));
        }
        self.by_name.insert(spec.name().to_string(), self.rotors.len());
        self.rotors.push(Arc::new(spec));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RotorSpec>> {
        self.by_name.get(name).map(|&i| &self.rotors[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Specs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RotorSpec>> {
        self.rotors.iter()
    }
}
