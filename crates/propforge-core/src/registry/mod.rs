//! Name-indexed lookup services.
//!
//! - `BuilderRegistry` -- DashMap-backed map of builder name -> shared builder
//! - `ValidatorRegistry` -- resolves a property validator by builder name and key
//!
//! Both can be created explicitly and passed to whatever needs them, or
//! reached through `get_default()`, which initializes a single process-wide
//! instance exactly once. Lookups never fail: absence is `None`.

pub mod builders;
pub mod validators;
