//! Domain models for the devotion dashboard.
//!
//! - [`Entry`]: one person on the roster, with a devotion score and the
//!   vibe, reason, and ritual that go with it.
//! - [`CreateEntryInput`]: raw form input; blank fields fall back to the
//!   `DEFAULT_*` constants, a blank name rejects the submission.
//!
//! Status buckets are derived on demand (see [`crate::status`]) and never
//! stored on the entry.

mod entry;

pub use entry::*;
