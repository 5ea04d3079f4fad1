// src/lib.rs

//! Debsweep
//!
//! Interactive removal and upgrade tool for dpkg-based systems.
//!
//! The flow is strictly sequential: query the dpkg database for installed
//! packages, show a numbered menu, read a selection, confirm, then hand
//! the actual work to `apt-get` under sudo. All dependency resolution and
//! conflict handling belongs to apt; this crate is the interaction layer.

pub mod apt;
pub mod dpkg;
mod error;
pub mod prompt;

pub use error::{Error, Result};
