//! Structured records parsed from rc output
//!
//! Everything in here is a pure function of rc's stdout; nothing talks to the
//! editor or spawns processes.

pub mod class_hierarchy;
pub mod completion;
pub mod diagnostics;
pub mod location;
