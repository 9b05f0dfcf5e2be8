//! Disaster-relief coordination core: geolocated need requests from
//! affected persons, donator en-route tracking, QR-scan redemption with an
//! immutable donation ledger, and best-effort real-time fan-out of
//! location and status events.
//!
//! Authentication, HTTP routing, and file storage are external
//! collaborators; this crate exposes typed services over the relational
//! store plus the [`broadcast::ChannelRegistry`] event surface.

pub mod broadcast;
pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod model;
pub mod service;
pub mod util;
