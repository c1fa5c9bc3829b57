//! Core library components.
//!
//! The indexing pipeline and the pieces it is built from: recipient
//! resolution, store enumeration, index derivation, armor and the
//! target tree writers.

pub mod armor;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod index;
pub mod pipeline;
pub mod publish;
pub mod recipient;
pub mod walk;
