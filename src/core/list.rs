use crate::core::interaction::Interaction;
use std::fmt;

// ============================================================================
// INTERACTION LIST
// ============================================================================

/// An ordered, owning collection of Interactions: every physically distinct
/// channel the generator must consider for one initial state.
///
/// Duplicate channels may transiently exist while raw per-model claims are
/// being collected; `XSecAlgorithmMap::build_map` is responsible for never
/// retaining them. Order is insertion order and is the deterministic
/// enumeration order downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionList {
    entries: Vec<Interaction>,
}

impl InteractionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every owned Interaction. Idempotent.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, interaction: Interaction) {
        self.entries.push(interaction);
    }

    /// Deep-copies every entry of `other` onto the end of this list,
    /// preserving relative order. Does not de-duplicate.
    pub fn append(&mut self, other: &InteractionList) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// Value-semantics assignment: reset, then append.
    pub fn copy_from(&mut self, other: &InteractionList) {
        self.reset();
        self.append(other);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Interaction> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interaction> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a InteractionList {
    type Item = &'a Interaction;
    type IntoIter = std::slice::Iter<'a, Interaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Interaction> for InteractionList {
    fn from_iter<T: IntoIterator<Item = Interaction>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for InteractionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for interaction in &self.entries {
            writeln!(f, "{}", interaction)?;
        }
        Ok(())
    }
}
