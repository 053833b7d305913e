//! # quarry-sql
//!
//! A MySQL-family statement and condition compiler.
//!
//! This crate turns host values into safe, deterministic SQL text:
//! - identifier sanitization with wildcard degradation
//! - total value-to-literal escaping (unknown shapes become `DEFAULT`)
//! - a recursive boolean-condition compiler (AND inside OR)
//! - a fluent per-column condition builder
//! - a CREATE TABLE compiler driven by table blueprints
//!
//! ## Conditions
//!
//! ```rust
//! use quarry_sql::{compile, Column, Cond};
//!
//! let sql = compile(&[
//!     Cond::group(vec![Cond::eq("status", "open"), Cond::eq("user_id", 7)]),
//!     Column::new("age").between(18, 65).into(),
//! ]);
//! assert_eq!(
//!     sql,
//!     "(`status` = 'open' AND `user_id` = 7) OR ((`age` BETWEEN 18 AND 65))"
//! );
//! ```
//!
//! ## Schema
//!
//! ```rust
//! use quarry_sql::Schema;
//!
//! let ddl = Schema::create("tags", |t| {
//!     t.id();
//!     t.varchar("label", 32).not_null().unique();
//! });
//! assert!(ddl.starts_with("CREATE TABLE `tags`"));
//! ```
//!
//! Compilation never fails: malformed identifiers degrade to `*`, unknown
//! value shapes degrade to `DEFAULT`, and empty condition groups are
//! dropped instead of rendering `()`.

pub mod column;
pub mod cond;
pub mod ident;
pub mod schema;
pub mod value;

pub use column::{Column, Connective};
pub use cond::{compile, Cond};
pub use ident::{identifier, identifier_all, identifier_list};
pub use schema::{Blueprint, ForeignKey, RefAction, Schema, SchemaColumn};
pub use value::{literal, quote, Value};
