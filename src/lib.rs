//! Operations toolkit for the Adrata CRM database.
//!
//! One binary with subcommands replacing the pile of one-off scripts that
//! used to do data migrations, deduplication, CSV/JSON import-export,
//! vendor enrichment, buyer-group classification and invitation sending.
//! Everything is workspace-scoped and runs single-threaded, start to
//! finish, against the shared SQLite database.

pub mod cli;
pub mod db;
pub mod domain;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;
pub mod vendors;
