//! Interactive seeding of synthetic lost-item records.
//!
//! - [`config`] resolves where records go.
//! - [`console`] is the operator line I/O seam.
//! - [`seeding`] runs the batch-size / seed / repeat session.

pub mod config;
pub mod console;
pub mod seeding;
