//! Domain core for the lantern greeting-card service.
//!
//! Everything in this crate is I/O-free: the card record model and its
//! validation rules, the session state machine driving the reveal
//! sequence, theme descriptors, presentation visibility rules, and the
//! shareable-link builder. Persistence and blob storage live in the
//! `lantern-db` and `lantern-cloud` crates.

pub mod card;
pub mod error;
pub mod link;
pub mod presentation;
pub mod session;
pub mod theme;
pub mod types;
