#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate contains the interval indexing engine and the interval problems built on it.

pub mod segment_tree;

pub mod scheduling;
