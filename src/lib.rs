//! Devotion dashboard core.
//!
//! - `models`: roster entries and form input
//! - `status`: score to status-tier classification
//! - `mission`: mission prompts and the no-repeat rotator
//! - `roster`: the entry store, its subscriptions and startup hydration
//! - `stats`: sum, average, top-N and current leader
//! - `persistence` / `db`: roster codec over a key-value byte store
//! - `dashboard` / `render`: the view handed to the text front end

pub mod config;
pub mod dashboard;
pub mod db;
pub mod mission;
pub mod models;
pub mod persistence;
pub mod render;
pub mod roster;
pub mod stats;
pub mod status;

pub use dashboard::{Dashboard, DashboardView};
pub use mission::MissionRotator;
pub use models::{CreateEntryInput, Entry};
pub use roster::RosterStore;
pub use status::{classify, DevotionStatus};
