//! Visitor registry: maps (node kind, phase) to handler slots

use rustc_hash::FxHashMap;
use tree::NodeType;

use crate::rule::{Phase, Registration, Selector};

/// Index of a rule visitor in the runner's slot table.
pub(crate) type SlotId = usize;

/// Lookup table built once per run from every visitor's registrations.
///
/// Handlers for one (kind, phase) fire in registration order. Wildcard
/// handlers fire before kind-specific ones; a visitor registered both ways
/// for the same phase still fires once per node.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    by_kind: FxHashMap<(NodeType, Phase), Vec<SlotId>>,
    wildcard_enter: Vec<SlotId>,
    wildcard_exit: Vec<SlotId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, slot: SlotId, registration: Registration) {
        match registration.selector {
            Selector::Any => {
                let list = match registration.phase {
                    Phase::Enter => &mut self.wildcard_enter,
                    Phase::Exit => &mut self.wildcard_exit,
                };
                if !list.contains(&slot) {
                    list.push(slot);
                }
            }
            Selector::Kind(node_type) => {
                let list = self
                    .by_kind
                    .entry((node_type, registration.phase))
                    .or_default();
                if !list.contains(&slot) {
                    list.push(slot);
                }
            }
        }
    }

    /// Slots to invoke for a node of `node_type` in `phase`. Empty for
    /// kinds nobody registered; never an error.
    pub fn lookup(&self, node_type: NodeType, phase: Phase) -> Vec<SlotId> {
        let wildcard = match phase {
            Phase::Enter => &self.wildcard_enter,
            Phase::Exit => &self.wildcard_exit,
        };
        let mut slots = wildcard.clone();
        if let Some(list) = self.by_kind.get(&(node_type, phase)) {
            for &slot in list {
                if !slots.contains(&slot) {
                    slots.push(slot);
                }
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_empty() {
        let registry = Registry::new();
        assert!(registry.lookup(NodeType::Call, Phase::Enter).is_empty());
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = Registry::new();
        registry.register(2, Registration::enter(NodeType::Call));
        registry.register(0, Registration::enter(NodeType::Call));
        registry.register(1, Registration::enter(NodeType::Call));
        assert_eq!(registry.lookup(NodeType::Call, Phase::Enter), vec![2, 0, 1]);
    }

    #[test]
    fn test_phases_are_independent() {
        let mut registry = Registry::new();
        registry.register(0, Registration::enter(NodeType::Directive));
        registry.register(1, Registration::exit(NodeType::Directive));
        assert_eq!(registry.lookup(NodeType::Directive, Phase::Enter), vec![0]);
        assert_eq!(registry.lookup(NodeType::Directive, Phase::Exit), vec![1]);
    }

    #[test]
    fn test_wildcard_fires_first_and_once() {
        let mut registry = Registry::new();
        registry.register(0, Registration::enter(NodeType::Call));
        registry.register(1, Registration::any_enter());
        // Slot 1 also registered for the specific kind: still invoked once.
        registry.register(1, Registration::enter(NodeType::Call));
        assert_eq!(registry.lookup(NodeType::Call, Phase::Enter), vec![1, 0]);
        assert_eq!(registry.lookup(NodeType::Member, Phase::Enter), vec![1]);
    }
}
