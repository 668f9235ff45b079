// Postgres storage layer with sqlx
//
// This crate provides the catalog's persistence:
// - Database: pool handle with per-table CRUD and graph reads
// - reconcile: transactional tracking-plan write path (find-or-create by
//   (name, type) identity, edit-in-place by explicit join-row id)

pub mod error;
pub mod models;
pub mod reconcile;
pub mod repositories;

pub use error::{Result, StoreError};
pub use models::*;
pub use repositories::Database;
