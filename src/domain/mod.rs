//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types
//! - `wire.rs` — Raw serde structs matching upstream responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `state.rs` — State containers (price history only)

pub mod coin;
pub mod price_history;
