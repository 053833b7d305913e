//! Fluent per-column condition builder.
//!
//! A [`Column`] accumulates compiled clauses for one identifier and renders
//! them as a single parenthesized sub-condition, so a compound test like
//! "null or in range" can sit inside a larger OR-branch as one unit.

use std::cmp::Ordering;
use std::fmt;

use crate::ident;
use crate::value::{literal, Value};

/// Connective used to join one column's accumulated clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connective {
    /// Join clauses with `AND` (default).
    #[default]
    And,
    /// Join clauses with `OR`.
    Or,
}

impl Connective {
    const fn as_str(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// A stateful builder for one column's boolean expression.
///
/// Created per use, mutated by chained comparison calls, finalized by
/// [`Column::to_sql`] (or `Display`), then discarded.
///
/// # Example
///
/// ```rust
/// use quarry_sql::Column;
///
/// let sql = Column::new("x").in_list(vec![1, 2]).is_null().to_sql();
/// assert_eq!(sql, "(`x` IN (1, 2) AND `x` IS NULL)");
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    funcs: Vec<String>,
    connective: Connective,
    clauses: Vec<String>,
}

impl Column {
    /// Creates a builder for the given (possibly qualified) identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            funcs: Vec::new(),
            connective: Connective::default(),
            clauses: Vec::new(),
        }
    }

    /// Sets the connective joining this column's clauses.
    #[must_use]
    pub fn join_with(mut self, connective: Connective) -> Self {
        self.connective = connective;
        self
    }

    /// Wraps the identifier in a unary SQL function. Functions apply in
    /// registration order, innermost first.
    #[must_use]
    pub fn func(mut self, name: impl Into<String>) -> Self {
        self.funcs.push(name.into());
        self
    }

    /// Case-folds the identifier with `LOWER`.
    #[must_use]
    pub fn lower(self) -> Self {
        self.func("LOWER")
    }

    /// Case-folds the identifier with `UPPER`.
    #[must_use]
    pub fn upper(self) -> Self {
        self.func("UPPER")
    }

    fn wrapped_ident(&self) -> String {
        let mut sql = ident::identifier(&self.name);
        for func in &self.funcs {
            sql = format!("{func}({sql})");
        }
        sql
    }

    /// Appends one `<ident> <op> <literal>` clause.
    #[must_use]
    pub fn add(mut self, op: &str, value: impl Into<Value>) -> Self {
        let clause = format!("{} {op} {}", self.wrapped_ident(), literal(&value.into()));
        self.clauses.push(clause);
        self
    }

    /// Appends one `<ident> <op> <literal> <op2> <literal2>` clause.
    #[must_use]
    pub fn add_pair(
        mut self,
        op: &str,
        value: impl Into<Value>,
        op2: &str,
        value2: impl Into<Value>,
    ) -> Self {
        let clause = format!(
            "{} {op} {} {op2} {}",
            self.wrapped_ident(),
            literal(&value.into()),
            literal(&value2.into())
        );
        self.clauses.push(clause);
        self
    }

    /// `= value`
    #[must_use]
    pub fn equals(self, value: impl Into<Value>) -> Self {
        self.add("=", value)
    }

    /// `<> value`
    #[must_use]
    pub fn unequal(self, value: impl Into<Value>) -> Self {
        self.add("<>", value)
    }

    /// Legacy alias of [`Column::unequal`] that has always rendered the
    /// `IS BETWEEN` operator.
    // TODO: switch to `<>` once callers relying on the current output are
    // migrated to `unequal`.
    #[must_use]
    pub fn not_equals(self, value: impl Into<Value>) -> Self {
        self.add("IS BETWEEN", value)
    }

    /// `> value`
    #[must_use]
    pub fn greater_than(self, value: impl Into<Value>) -> Self {
        self.add(">", value)
    }

    /// `>= value`
    #[must_use]
    pub fn greater_than_or_equals(self, value: impl Into<Value>) -> Self {
        self.add(">=", value)
    }

    /// `< value`
    #[must_use]
    pub fn less_than(self, value: impl Into<Value>) -> Self {
        self.add("<", value)
    }

    /// `<= value`
    #[must_use]
    pub fn less_than_or_equals(self, value: impl Into<Value>) -> Self {
        self.add("<=", value)
    }

    /// `IS value` — usable with NULL and, per SQL semantics, with non-null
    /// values as well.
    #[must_use]
    pub fn is(self, value: impl Into<Value>) -> Self {
        self.add("IS", value)
    }

    /// `IS NOT value`
    #[must_use]
    pub fn is_not(self, value: impl Into<Value>) -> Self {
        self.add("IS NOT", value)
    }

    /// `IS NULL`
    #[must_use]
    pub fn is_null(self) -> Self {
        self.is(Value::Null)
    }

    /// `IS NOT NULL`
    #[must_use]
    pub fn is_not_null(self) -> Self {
        self.is_not(Value::Null)
    }

    /// `= 1`
    #[must_use]
    pub fn is_true(self) -> Self {
        self.add("=", Value::Int(1))
    }

    /// `= 0`
    #[must_use]
    pub fn is_false(self) -> Self {
        self.add("=", Value::Int(0))
    }

    /// `= 0`
    #[must_use]
    pub fn is_zero(self) -> Self {
        self.add("=", Value::Int(0))
    }

    /// `IN (v, v, ...)` with each element escaped independently.
    #[must_use]
    pub fn in_list<V: Into<Value>>(self, values: Vec<V>) -> Self {
        self.membership("IN", values)
    }

    /// `NOT IN (v, v, ...)`
    #[must_use]
    pub fn not_in_list<V: Into<Value>>(self, values: Vec<V>) -> Self {
        self.membership("NOT IN", values)
    }

    fn membership<V: Into<Value>>(mut self, op: &str, values: Vec<V>) -> Self {
        let escaped: Vec<String> = values
            .into_iter()
            .map(|v| literal(&v.into()))
            .collect();
        let clause = format!("{} {op} ({})", self.wrapped_ident(), escaped.join(", "));
        self.clauses.push(clause);
        self
    }

    /// `LIKE pattern`
    #[must_use]
    pub fn like(self, pattern: impl Into<Value>) -> Self {
        self.add("LIKE", pattern)
    }

    /// `NOT LIKE pattern`
    #[must_use]
    pub fn not_like(self, pattern: impl Into<Value>) -> Self {
        self.add("NOT LIKE", pattern)
    }

    /// `BETWEEN lo AND hi` — bounds are reordered so the smaller value is
    /// emitted first, regardless of call order.
    #[must_use]
    pub fn between(self, a: impl Into<Value>, b: impl Into<Value>) -> Self {
        let (lo, hi) = ordered(a.into(), b.into());
        self.add_pair("BETWEEN", lo, "AND", hi)
    }

    /// `IS BETWEEN lo AND hi`
    #[must_use]
    pub fn is_between(self, a: impl Into<Value>, b: impl Into<Value>) -> Self {
        let (lo, hi) = ordered(a.into(), b.into());
        self.add_pair("IS BETWEEN", lo, "AND", hi)
    }

    /// `IS NOT BETWEEN lo AND hi`
    #[must_use]
    pub fn is_not_between(self, a: impl Into<Value>, b: impl Into<Value>) -> Self {
        let (lo, hi) = ordered(a.into(), b.into());
        self.add_pair("IS NOT BETWEEN", lo, "AND", hi)
    }

    /// Joins the accumulated clauses with the connective inside one
    /// parenthesis pair. A builder with no clauses renders empty and is
    /// dropped by the condition compiler.
    #[must_use]
    pub fn to_sql(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        format!("({})", self.clauses.join(self.connective.as_str()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Orders two bound values so the smaller renders first. Numeric pairs
/// compare numerically; anything else compares by rendered literal.
fn ordered(a: Value, b: Value) -> (Value, Value) {
    let swap = match (numeric(&a), numeric(&b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y) == Some(Ordering::Greater),
        _ => literal(&a) > literal(&b),
    };
    if swap {
        (b, a)
    } else {
        (a, b)
    }
}

#[allow(clippy::cast_precision_loss)]
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals() {
        assert_eq!(Column::new("x").equals(5).to_sql(), "(`x` = 5)");
    }

    #[test]
    fn test_unequal() {
        assert_eq!(Column::new("x").unequal(5).to_sql(), "(`x` <> 5)");
    }

    #[test]
    fn test_not_equals_keeps_legacy_operator() {
        assert_eq!(Column::new("x").not_equals(5).to_sql(), "(`x` IS BETWEEN 5)");
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(Column::new("x").greater_than(1).to_sql(), "(`x` > 1)");
        assert_eq!(
            Column::new("x").greater_than_or_equals(1).to_sql(),
            "(`x` >= 1)"
        );
        assert_eq!(Column::new("x").less_than(1).to_sql(), "(`x` < 1)");
        assert_eq!(
            Column::new("x").less_than_or_equals(1).to_sql(),
            "(`x` <= 1)"
        );
    }

    #[test]
    fn test_null_checks() {
        assert_eq!(Column::new("x").is_null().to_sql(), "(`x` IS NULL)");
        assert_eq!(
            Column::new("x").is_not_null().to_sql(),
            "(`x` IS NOT NULL)"
        );
    }

    #[test]
    fn test_is_accepts_non_null_values() {
        assert_eq!(Column::new("x").is(1).to_sql(), "(`x` IS 1)");
        assert_eq!(Column::new("x").is_not("a").to_sql(), "(`x` IS NOT 'a')");
    }

    #[test]
    fn test_boolean_shorthands() {
        assert_eq!(Column::new("x").is_true().to_sql(), "(`x` = 1)");
        assert_eq!(Column::new("x").is_false().to_sql(), "(`x` = 0)");
        assert_eq!(Column::new("x").is_zero().to_sql(), "(`x` = 0)");
    }

    #[test]
    fn test_in_list() {
        assert_eq!(
            Column::new("x").in_list(vec![1, 2]).to_sql(),
            "(`x` IN (1, 2))"
        );
        assert_eq!(
            Column::new("x").not_in_list(vec!["a", "b"]).to_sql(),
            "(`x` NOT IN ('a', 'b'))"
        );
    }

    #[test]
    fn test_like() {
        assert_eq!(
            Column::new("x").like("%abc%").to_sql(),
            "(`x` LIKE '%abc%')"
        );
        assert_eq!(
            Column::new("x").not_like("a_c").to_sql(),
            "(`x` NOT LIKE 'a_c')"
        );
    }

    #[test]
    fn test_between_reorders_bounds() {
        assert_eq!(
            Column::new("x").between(5, 1).to_sql(),
            "(`x` BETWEEN 1 AND 5)"
        );
        assert_eq!(
            Column::new("x").between(1, 5).to_sql(),
            "(`x` BETWEEN 1 AND 5)"
        );
    }

    #[test]
    fn test_between_reorders_text_bounds() {
        assert_eq!(
            Column::new("x").between("b", "a").to_sql(),
            "(`x` BETWEEN 'a' AND 'b')"
        );
    }

    #[test]
    fn test_is_not_between() {
        assert_eq!(
            Column::new("x").is_not_between(9.5, 2).to_sql(),
            "(`x` IS NOT BETWEEN 2 AND 9.5)"
        );
    }

    #[test]
    fn test_compound_clauses_default_and() {
        assert_eq!(
            Column::new("x").in_list(vec![1, 2]).is_null().to_sql(),
            "(`x` IN (1, 2) AND `x` IS NULL)"
        );
    }

    #[test]
    fn test_or_connective() {
        assert_eq!(
            Column::new("x")
                .join_with(Connective::Or)
                .is_null()
                .between(1, 5)
                .to_sql(),
            "(`x` IS NULL OR `x` BETWEEN 1 AND 5)"
        );
    }

    #[test]
    fn test_wrapper_functions_nest_in_order() {
        assert_eq!(
            Column::new("x").lower().func("TRIM").equals("a").to_sql(),
            "(TRIM(LOWER(`x`)) = 'a')"
        );
    }

    #[test]
    fn test_qualified_identifier() {
        assert_eq!(
            Column::new("users.age").greater_than(18).to_sql(),
            "(`users`.`age` > 18)"
        );
    }

    #[test]
    fn test_empty_builder_renders_empty() {
        assert_eq!(Column::new("x").to_sql(), "");
        assert_eq!(Column::new("x").to_string(), "");
    }
}
