//! # quarry-db
//!
//! Statement assembly and the execution seam over [`quarry_sql`].
//!
//! A [`Statement`] accumulates per-statement state and renders
//! SELECT/INSERT/UPDATE/DELETE/REPLACE text; execution goes through an
//! injected [`Connector`], and read results hydrate through [`Entity`] into
//! a [`Collection`] (or any container built from a `Vec`).
//!
//! ```rust
//! use quarry_db::Statement;
//! use quarry_sql::Cond;
//!
//! let sql = Statement::table("users")
//!     .update(vec![("name", "ada")])
//!     .filter(&[Cond::eq("id", 5)])
//!     .to_sql();
//! assert_eq!(
//!     sql.as_deref(),
//!     Some("UPDATE `users` SET `name` = 'ada' WHERE (`id` = 5)")
//! );
//! ```
//!
//! The assembler is synchronous and never blocks: cancellation, timeouts,
//! transactions and pooling are the connector's concern.

pub mod connector;
pub mod entity;
pub mod error;
pub mod row;
pub mod statement;

pub use connector::Connector;
pub use entity::{Collection, Entity};
pub use error::{Error, Result};
pub use row::Row;
pub use statement::{Action, Priority, Statement};
