//! Bridge between an editor and the RTags indexing daemon
//!
//! Every operation shells out to `rc`, RTags' command-line client, and turns its
//! output into editor primitives: quickfix lists, jumps, completion menus and
//! gutter signs. The editor itself is reached through [`host::EditorHost`].

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod model;
pub mod primitives;
pub mod services;

pub use app::RtagsPlugin;
pub use error::{MalformedOutput, Result, RtagsError};
