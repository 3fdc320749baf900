//! Lost-and-found domain types, reference catalog, and record synthesis.
//!
//! This crate has no I/O. Persistence lives in `lostfound-db`; the
//! interactive seeding driver lives in `lostfound-seeder`.

pub mod catalog;
pub mod error;
pub mod record;
pub mod synthesizer;
pub mod types;
