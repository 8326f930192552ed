//! Safety Forms - signature capture and draft synchronisation for
//! construction-safety paperwork.
//!
//! The crate provides the stateful signature capture surface used by the
//! form wizards, and the persistence layer behind them: drafts and master
//! data mirrored in a local cache and synchronised with a remote document
//! store, plus photo compression for attachments.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
