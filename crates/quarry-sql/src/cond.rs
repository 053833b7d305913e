//! Recursive boolean-condition compiler.
//!
//! A condition tree is compiled into a WHERE/HAVING fragment. Each element
//! of the top-level slice is one OR-branch; inside a branch, sub-conditions
//! join with `AND`. Branches that compile to nothing are dropped, and an
//! all-empty input compiles to the empty string so callers can omit the
//! keyword entirely.

use crate::column::Column;
use crate::ident;
use crate::value::{literal, Value};

/// One node of a condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    /// `key = value` equality; a [`Value::Column`] value renders as a
    /// column-to-column comparison.
    Eq(String, Value),
    /// `key IN (v, v, ...)` membership with each element escaped on its own.
    InSet(String, Vec<Value>),
    /// A nested AND-group of sub-conditions.
    Group(Vec<Cond>),
    /// A boolean literal, rendered `1`/`0`.
    Bool(bool),
    /// Implicit primary-key equality, `` `id` = n ``.
    Id(i64),
    /// An already-compiled column expression.
    Expr(String),
    /// A raw SQL fragment, appended verbatim.
    Raw(String),
}

impl Cond {
    /// Builds a `key = value` condition.
    #[must_use]
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(key.into(), value.into())
    }

    /// Builds a `key IN (...)` condition.
    #[must_use]
    pub fn in_set<V: Into<Value>>(key: impl Into<String>, values: Vec<V>) -> Self {
        Self::InSet(key.into(), values.into_iter().map(Into::into).collect())
    }

    /// Builds a nested AND-group.
    #[must_use]
    pub fn group(subconditions: Vec<Cond>) -> Self {
        Self::Group(subconditions)
    }

    /// Builds a raw SQL fragment condition.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }
}

impl From<Column> for Cond {
    fn from(column: Column) -> Self {
        Self::Expr(column.to_sql())
    }
}

impl From<bool> for Cond {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Compiles OR-branches into one boolean SQL expression.
///
/// # Example
///
/// ```rust
/// use quarry_sql::{compile, Cond};
///
/// let sql = compile(&[
///     Cond::group(vec![Cond::eq("a", 1), Cond::eq("b", 2)]),
///     Cond::eq("c", 3),
/// ]);
/// assert_eq!(sql, "(`a` = 1 AND `b` = 2) OR (`c` = 3)");
/// assert_eq!(compile(&[]), "");
/// ```
#[must_use]
pub fn compile(branches: &[Cond]) -> String {
    let mut rendered: Vec<String> = Vec::new();
    for branch in branches {
        let parts = branch_parts(branch);
        if parts.is_empty() {
            continue;
        }
        rendered.push(format!("({})", parts.join(" AND ")));
    }
    rendered.join(" OR ")
}

/// Flattens one OR-branch into its AND-joined sub-condition strings.
fn branch_parts(branch: &Cond) -> Vec<String> {
    match branch {
        Cond::Group(entries) => entries.iter().filter_map(entry_sql).collect(),
        other => entry_sql(other).into_iter().collect(),
    }
}

/// Renders one sub-condition, or nothing when it compiles empty.
fn entry_sql(entry: &Cond) -> Option<String> {
    match entry {
        Cond::Group(_) => {
            // A nested group compiles through the top level so it keeps its
            // own parentheses and appends as a single sub-condition.
            let inner = compile(std::slice::from_ref(entry));
            (!inner.is_empty()).then_some(inner)
        }
        Cond::Bool(b) => Some(String::from(if *b { "1" } else { "0" })),
        Cond::Id(n) => Some(format!("`id` = {n}")),
        Cond::Expr(sql) | Cond::Raw(sql) => (!sql.is_empty()).then(|| sql.clone()),
        Cond::InSet(key, values) => {
            if values.is_empty() {
                return None;
            }
            let escaped: Vec<String> = values.iter().map(literal).collect();
            Some(format!(
                "{} IN ({})",
                ident::identifier(key),
                escaped.join(", ")
            ))
        }
        Cond::Eq(key, value) => Some(format!(
            "{} = {}",
            ident::identifier(key),
            literal(value)
        )),
    }
}
