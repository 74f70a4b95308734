//! Domain models for the gift registry.
//!
//! # Core Concepts
//!
//! - [`Gift`]: An item on the registry. Seeded externally and only ever
//!   mutated in place by reserving or cancelling.
//! - [`Person`]: A reservation record joining a guest name to a reserved gift.
//!   Created on reserve, deleted on cancel.
//!
//! Both are persisted as whole-file JSON snapshots, so the serde shape of these
//! types *is* the on-disk format. Keys follow the camelCase Portuguese names the
//! presentation layer already consumes.

mod gift;
mod person;
mod reservation;

pub use gift::*;
pub use person::*;
pub use reservation::*;
