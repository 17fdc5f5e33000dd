//! docview: an interactive terminal viewer for documentation pages.
//!
//! A page (Markdown, parsed with tree-sitter) is split into sections that can be searched,
//! folded and navigated from a sidebar. Code blocks get copy buttons, consecutive code blocks in
//! different languages become tab groups, and `<details>` runs become accordions. The reader's
//! light/dark choice is remembered between sessions.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod formats;
pub mod input;
pub mod keymap;
pub mod nav;
pub mod page;
pub mod prefs;
pub mod print;
pub mod search;
pub mod section;
pub mod theme;
pub mod translate;
pub mod ui;
pub mod viewport;
pub mod widgets;

pub use error::{Error, Result};
