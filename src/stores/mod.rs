use std::sync::{Arc, RwLock};

use crate::identity::{AuthSession, UserAttributes};

/// Single-slot holder for the latest value fetched from the identity service.
///
/// Clones share the slot. Only the navigation guard writes; everything else
/// reads and must cope with an empty slot before the first navigation.
#[derive(Debug)]
pub struct StateStore<T> {
    slot: Arc<RwLock<Option<T>>>,
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

impl<T> Default for StateStore<T> {
    fn default() -> Self {
        Self { slot: Arc::new(RwLock::new(None)) }
    }
}

impl<T: Clone> StateStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<T> {
        match self.slot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the held value; no history is kept
    pub fn set(&self, value: Option<T>) {
        match self.slot.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    pub fn is_set(&self) -> bool {
        match self.slot.read() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}

pub type SessionStore = StateStore<AuthSession>;
pub type AttributesStore = StateStore<UserAttributes>;
