//! The connector contract.
//!
//! Execution is delegated: the assembler renders one atomic SQL string and
//! hands it to an injected [`Connector`]. Transactions, retries, pooling
//! and timeouts all live behind this trait, never in the compiler.

use crate::error::Result;
use crate::row::Row;

/// A database driver seam.
pub trait Connector {
    /// Executes a write statement and returns the affected-row count.
    ///
    /// # Errors
    ///
    /// Propagates the driver's failure untranslated as
    /// [`crate::Error::Connector`].
    fn execute(&self, sql: &str) -> Result<u64>;

    /// Runs a read statement and returns the matching rows in order.
    ///
    /// # Errors
    ///
    /// Propagates the driver's failure untranslated as
    /// [`crate::Error::Connector`].
    fn query(&self, sql: &str) -> Result<Vec<Row>>;

    /// Quotes a string literal. The default is the workspace-wide
    /// MySQL-family quoting; drivers with their own escaping override this.
    fn quote(&self, raw: &str) -> String {
        quarry_sql::quote(raw)
    }
}
