//! Low-level text utilities

pub mod word_navigation;
