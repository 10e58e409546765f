//! Typed loading layer for GitHub issue exports.
//!
//! Two pieces carry the real contracts: [`config`] resolves parameters across
//! environment, discovered config file, and defaults with a reversible typed
//! encoding; [`model`] turns loosely-structured issue records into strict
//! entities. [`loader`] wires the two together behind
//! [`loader::DataLoader::load_issues`]. Analysis of the typed output lives
//! with callers.

pub mod cli;
pub mod codec;
pub mod config;
pub mod ext;
pub mod loader;
pub mod model;
pub mod util;
