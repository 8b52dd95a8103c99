// Athlete maintenance fixes
//
// One-off data corrections against the boathouse ETL database. Each fix opens
// its own connection, applies a single targeted change and reports what it did.

pub mod config;
pub mod maintenance;

pub use config::*;
