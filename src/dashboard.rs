//! Composition root: the roster store plus the mission rotator.
//!
//! The rendering side pulls a [`DashboardView`] after each intent and sends
//! intents back through [`Dashboard::create`], [`Dashboard::boost`] and
//! [`Dashboard::reroll`].

use serde::Serialize;

use crate::mission::{MissionRotator, AFFIRMATIONS};
use crate::models::{CreateEntryInput, Entry};
use crate::persistence::{KeyValueStore, RosterPersistence};
use crate::roster::{HydrateOutcome, RosterStore};
use crate::stats::{self, RosterStats, DEFAULT_TOP_N};
use crate::status::DevotionStatus;

/// An entry paired with its status, as shown in ranked cards.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry<'a> {
    #[serde(flatten)]
    pub entry: &'a Entry,
    pub status: DevotionStatus,
}

impl<'a> RankedEntry<'a> {
    fn new(entry: &'a Entry) -> Self {
        Self {
            entry,
            status: entry.status(),
        }
    }
}

/// Everything one render cycle needs.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub stats: RosterStats,
    pub mission: &'static str,
    pub entries: &'a [Entry],
    pub top: Vec<RankedEntry<'a>>,
    pub crown: Option<&'a Entry>,
    pub affirmations: &'static [&'static str],
}

pub struct Dashboard<S> {
    roster: RosterStore<S>,
    mission: MissionRotator,
    top_n: usize,
}

impl<S: KeyValueStore> Dashboard<S> {
    pub fn new(roster: RosterStore<S>, mission: MissionRotator) -> Self {
        Self {
            roster,
            mission,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Dashboard over the starter roster, persisting through `store`.
    pub fn open(store: S, mission: MissionRotator) -> Self {
        Self::new(RosterStore::new(RosterPersistence::new(store)), mission)
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn roster(&self) -> &RosterStore<S> {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut RosterStore<S> {
        &mut self.roster
    }

    pub fn mission(&self) -> &'static str {
        self.mission.current()
    }

    pub fn hydrate(&mut self) -> HydrateOutcome {
        self.roster.hydrate()
    }

    /// Add an entry; a successful add also rolls a new mission.
    pub fn create(&mut self, input: CreateEntryInput) -> Option<Entry> {
        let entry = self.roster.create(input)?;
        self.mission.reroll();
        Some(entry)
    }

    pub fn boost(&mut self, id: &str) -> Option<&Entry> {
        self.roster.boost(id)
    }

    pub fn reroll(&mut self) -> &'static str {
        self.mission.reroll()
    }

    pub fn view(&self) -> DashboardView<'_> {
        let entries = self.roster.entries();
        DashboardView {
            stats: RosterStats::from_entries(entries),
            mission: self.mission.current(),
            entries,
            top: stats::top_n(entries, self.top_n)
                .into_iter()
                .map(RankedEntry::new)
                .collect(),
            crown: stats::maximum(entries),
            affirmations: &AFFIRMATIONS,
        }
    }
}
