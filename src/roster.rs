//! The roster store.
//!
//! [`RosterStore`] owns the ordered entry list (most recent first), applies
//! user intents to it, mirrors every change into persistence, and notifies
//! subscribers afterwards.
//!
//! Saving is held back until [`RosterStore::hydrate`] has run once, so the
//! starter roster never overwrites a persisted roster that has not been
//! read yet.

use chrono::Utc;

use crate::models::{starter_entries, CreateEntryInput, Entry};
use crate::persistence::{decode_roster, KeyValueStore, PersistenceError, RosterPersistence};

/// Highest score a boost can reach.
pub const DEVOTION_CEILING: i64 = 100;
/// Points added per boost.
pub const BOOST_STEP: i64 = 5;

/// What changed in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// The whole roster was replaced by a loaded one.
    Loaded { count: usize },
    Created { id: String },
    Boosted { id: String, devotion: i64 },
}

/// Handle returned by [`RosterStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&RosterEvent, &[Entry])>;

/// How startup hydration went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// A persisted roster replaced the in-memory one.
    Restored { count: usize },
    /// Nothing was persisted yet; the in-memory roster stays.
    Empty,
    /// The persisted roster was unreadable and was ignored.
    Discarded,
    /// Hydration (or an explicit load) already happened; nothing was read.
    AlreadyHydrated,
}

pub struct RosterStore<S> {
    entries: Vec<Entry>,
    persistence: Option<RosterPersistence<S>>,
    hydrated: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Store seeded with the starter roster, persisting through `persistence`.
    pub fn new(persistence: RosterPersistence<S>) -> Self {
        Self::with_entries(starter_entries(), Some(persistence))
    }

    /// Store that never persists.
    pub fn detached(entries: Vec<Entry>) -> Self {
        Self::with_entries(entries, None)
    }

    pub fn with_entries(entries: Vec<Entry>, persistence: Option<RosterPersistence<S>>) -> Self {
        Self {
            entries,
            persistence,
            hydrated: false,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn persistence(&self) -> Option<&RosterPersistence<S>> {
        self.persistence.as_ref()
    }

    /// Register an observer called after every successful mutation.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&RosterEvent, &[Entry]) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Startup load from persistence. Runs once; later calls are no-ops.
    ///
    /// An unreadable persisted roster is logged and ignored. Either way,
    /// saving is enabled afterwards.
    pub fn hydrate(&mut self) -> HydrateOutcome {
        if self.hydrated {
            return HydrateOutcome::AlreadyHydrated;
        }

        let loaded = match &self.persistence {
            Some(persistence) => persistence.load(),
            None => Ok(None),
        };
        self.hydrated = true;

        match loaded {
            Ok(Some(entries)) => {
                let count = entries.len();
                tracing::info!("Restored {} roster entries", count);
                self.replace(entries);
                HydrateOutcome::Restored { count }
            }
            Ok(None) => {
                tracing::info!("No saved roster found, keeping starter entries");
                HydrateOutcome::Empty
            }
            Err(e) => {
                tracing::warn!("Failed to load saved roster: {}", e);
                HydrateOutcome::Discarded
            }
        }
    }

    /// Replace the roster with one decoded from `bytes`.
    ///
    /// On error the current roster is left untouched.
    pub fn load(&mut self, bytes: &[u8]) -> Result<usize, PersistenceError> {
        let entries = decode_roster(bytes).inspect_err(|e| {
            tracing::warn!("Ignoring malformed roster: {}", e);
        })?;
        let count = entries.len();
        self.hydrated = true;
        self.replace(entries);
        Ok(count)
    }

    /// Add a new entry at the front of the roster.
    ///
    /// Returns `None`, changing nothing, when the name is blank.
    pub fn create(&mut self, input: CreateEntryInput) -> Option<Entry> {
        let Some(entry) = input.into_entry(Utc::now()) else {
            tracing::debug!("Ignoring entry with a blank name");
            return None;
        };

        self.entries.insert(0, entry.clone());
        tracing::info!(id = %entry.id, "Added {} with devotion {}", entry.name, entry.devotion);
        self.commit(RosterEvent::Created {
            id: entry.id.clone(),
        });
        Some(entry)
    }

    /// Add [`BOOST_STEP`] to an entry's devotion, capped at [`DEVOTION_CEILING`].
    ///
    /// Unknown ids are ignored and return `None`.
    pub fn boost(&mut self, id: &str) -> Option<&Entry> {
        let index = self.entries.iter().position(|e| e.id == id)?;

        let entry = &mut self.entries[index];
        entry.devotion = entry.devotion.saturating_add(BOOST_STEP).min(DEVOTION_CEILING);
        let devotion = entry.devotion;
        tracing::debug!(id, devotion, "Boosted entry");

        self.commit(RosterEvent::Boosted {
            id: id.to_string(),
            devotion,
        });
        self.entries.get(index)
    }

    fn replace(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.commit(RosterEvent::Loaded {
            count: self.entries.len(),
        });
    }

    fn commit(&mut self, event: RosterEvent) {
        self.save();
        for (_, observer) in &mut self.observers {
            observer(&event, &self.entries);
        }
    }

    fn save(&self) {
        if !self.hydrated {
            return;
        }
        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save(&self.entries) {
                tracing::warn!("Failed to save roster: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::persistence::{encode_roster, MemoryStore};

    fn detached() -> RosterStore<MemoryStore> {
        RosterStore::detached(starter_entries())
    }

    #[test]
    fn test_create_prepends() {
        let mut store = detached();
        let entry = store.create(CreateEntryInput::named("Rin")).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.entries()[0].id, entry.id);
    }

    #[test]
    fn test_boost_caps_at_ceiling() {
        let mut store = detached();
        for _ in 0..5 {
            store.boost("entry-nova");
        }
        assert_eq!(store.get("entry-nova").unwrap().devotion, 100);
    }

    #[test]
    fn test_boost_lowers_scores_above_ceiling() {
        let mut store = detached();
        let entry = store
            .create(CreateEntryInput {
                devotion: Some("140".to_string()),
                ..CreateEntryInput::named("Overflow")
            })
            .unwrap();

        assert_eq!(store.boost(&entry.id).unwrap().devotion, 100);
    }

    #[test]
    fn test_boost_at_i64_max_does_not_overflow() {
        let mut store = detached();
        let entry = store
            .create(CreateEntryInput {
                devotion: Some(i64::MAX.to_string()),
                ..CreateEntryInput::named("Infinite")
            })
            .unwrap();

        assert_eq!(entry.devotion, i64::MAX);
        assert_eq!(store.boost(&entry.id).unwrap().devotion, 100);
    }

    #[test]
    fn test_hydrate_after_load_reads_nothing() {
        let mut store = detached();
        let bytes = encode_roster(&starter_entries()[..1]).unwrap();
        store.load(&bytes).unwrap();

        assert_eq!(store.hydrate(), HydrateOutcome::AlreadyHydrated);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_boost_unknown_id_is_noop() {
        let mut store = detached();
        let before = store.entries().to_vec();
        assert!(store.boost("entry-nobody").is_none());
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn test_observers_see_every_mutation() {
        let mut store = detached();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |event, entries| {
            sink.borrow_mut().push((event.clone(), entries.len()));
        });

        let entry = store.create(CreateEntryInput::named("Rin")).unwrap();
        store.boost(&entry.id);
        store.create(CreateEntryInput::named(""));
        store.boost("missing");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (RosterEvent::Created { id: entry.id.clone() }, 4));
        assert_eq!(
            seen[1],
            (
                RosterEvent::Boosted {
                    id: entry.id,
                    devotion: 55
                },
                4
            )
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = detached();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_, _| *counter.borrow_mut() += 1);

        store.boost("entry-sage");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.boost("entry-sage");

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_load_malformed_keeps_roster() {
        let mut store = detached();
        let before = store.entries().to_vec();

        assert!(store.load(b"[{\"id\": 1}]").is_err());
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn test_load_replaces_roster() {
        let mut store = detached();
        let replacement = vec![starter_entries().remove(1)];
        let bytes = encode_roster(&replacement).unwrap();

        assert_eq!(store.load(&bytes).unwrap(), 1);
        assert_eq!(store.entries(), replacement.as_slice());
    }
}
