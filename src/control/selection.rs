//! Selection model and controlled-value synchronization
//!
//! The owner's value is authoritative. Local picks are held in a pending
//! override slot until the owner supplies a value again, at which point the
//! slot is dropped and the supplied value wins, whatever it is.

use crate::model::{SelectOption, SelectionMode, SelectionValue};
use serde::Serialize;

/// Result of picking an option in the given mode
///
/// Single mode replaces the selection. Multi mode toggles membership by id:
/// a present option is removed keeping the order of the rest, an absent
/// one is appended.
#[must_use]
pub fn pick(mode: SelectionMode, current: &SelectionValue, option: SelectOption) -> SelectionValue {
    match mode {
        SelectionMode::Single => SelectionValue::One(option),
        SelectionMode::Multi => {
            let mut items = current.options().to_vec();
            if let Some(pos) = items.iter().position(|o| o.id == option.id) {
                items.remove(pos);
            } else {
                items.push(option);
            }
            SelectionValue::Many(items)
        }
    }
}

/// What happened when the owner supplied a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No local override was pending and the value did not change
    Unchanged,
    /// No local override was pending; the value changed
    Updated,
    /// The supplied value matches the pending local override
    Confirmed,
    /// A pending local override differed and was thrown away
    Reverted,
}

/// Owner value plus optional optimistic local override
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ControlledSelection {
    external: SelectionValue,
    pending: Option<SelectionValue>,
}

impl ControlledSelection {
    /// Start from the owner's initial value
    #[must_use]
    pub const fn new(initial: SelectionValue) -> Self {
        Self {
            external: initial,
            pending: None,
        }
    }

    /// The selection currently in effect
    #[must_use]
    pub fn current(&self) -> &SelectionValue {
        self.pending.as_ref().unwrap_or(&self.external)
    }

    /// The last value supplied by the owner
    #[must_use]
    pub const fn external(&self) -> &SelectionValue {
        &self.external
    }

    /// Whether a local pick is waiting for the owner
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a local pick ahead of the owner
    pub fn set_local(&mut self, value: SelectionValue) {
        self.pending = Some(value);
    }

    /// Take the owner's value; it always overrides local state
    pub fn sync(&mut self, value: SelectionValue) -> SyncOutcome {
        let outcome = match self.pending.take() {
            Some(pending) if pending == value => SyncOutcome::Confirmed,
            Some(_) => SyncOutcome::Reverted,
            None if self.external == value => SyncOutcome::Unchanged,
            None => SyncOutcome::Updated,
        };
        self.external = value;
        outcome
    }
}
