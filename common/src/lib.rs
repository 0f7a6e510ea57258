#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate contains everything which might be needed across the different crates of the workspace.

mod error;

pub use error::{SegError, SegResult};

pub mod logging;
pub mod util;
