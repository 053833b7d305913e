//! Multi-action statement assembler.
//!
//! A [`Statement`] owns the state of one logical statement — table, action,
//! projection, write data, compiled WHERE text, joins, ordering, grouping,
//! limit — and renders SELECT/INSERT/UPDATE/DELETE/REPLACE text from it.
//! Rendering is a pure function of the current fields; execution hands the
//! rendered text to an injected [`Connector`].

use quarry_sql::{compile, identifier, identifier_all, literal, Cond, Value};
use tracing::debug;

use crate::connector::Connector;
use crate::entity::{Collection, Entity};
use crate::error::Result;
use crate::row::Row;

/// The statement kind an assembler is currently configured to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// No action chosen yet; `to_sql` renders nothing.
    #[default]
    Unset,
    /// `SELECT ... FROM ...`
    Select,
    /// `INSERT INTO ... VALUES ...`
    Insert,
    /// `UPDATE ... SET ...`
    Update,
    /// `DELETE FROM ...`
    Delete,
    /// `REPLACE INTO ... SET ...`
    Replace,
}

/// Statement priority modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// `HIGH_PRIORITY`
    High,
    /// `LOW_PRIORITY`
    Low,
    /// `DELAYED`
    Delayed,
}

impl Priority {
    const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH_PRIORITY",
            Self::Low => "LOW_PRIORITY",
            Self::Delayed => "DELAYED",
        }
    }
}

/// Builder and renderer for one logical statement.
///
/// Exactly one action is active at a time; calling a different action
/// method overwrites the action while preserving table, conditions, joins
/// and the rest of the accumulated state.
///
/// # Example
///
/// ```rust
/// use quarry_db::Statement;
/// use quarry_sql::Cond;
///
/// let sql = Statement::table("users")
///     .select(&["id", "name"])
///     .filter(&[Cond::eq("active", true)])
///     .order_by_desc("id")
///     .limit(10)
///     .to_sql();
/// assert_eq!(
///     sql.as_deref(),
///     Some("SELECT `id`, `name` FROM `users` WHERE (`active` = 1) \
///           ORDER BY `id` DESC LIMIT 10")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Statement {
    table: String,
    action: Action,
    columns: Vec<String>,
    data: Vec<(String, Value)>,
    where_sql: String,
    joins: Vec<String>,
    group_by: Vec<String>,
    having_sql: String,
    order_by: Vec<String>,
    limit: Option<u64>,
    priority: Option<Priority>,
    ignore: bool,
}

impl Statement {
    /// Starts a statement against the given table.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Configures a SELECT with the given projection. An empty slice
    /// selects `*`.
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.action = Action::Select;
        self.columns = identifier_all(columns);
        self
    }

    /// Adds one aliased projection column.
    #[must_use]
    pub fn select_as(mut self, column: &str, alias: &str) -> Self {
        self.action = Action::Select;
        let aliased = format!("{} AS {}", identifier(column), identifier(alias));
        if !self.columns.contains(&aliased) {
            self.columns.push(aliased);
        }
        self
    }

    /// Configures an INSERT with the given column/value data.
    #[must_use]
    pub fn insert<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.action = Action::Insert;
        self.set_data(data);
        self
    }

    /// Configures an UPDATE with the given column/value data.
    #[must_use]
    pub fn update<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.action = Action::Update;
        self.set_data(data);
        self
    }

    /// Configures a REPLACE with the given column/value data.
    #[must_use]
    pub fn replace<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.action = Action::Replace;
        self.set_data(data);
        self
    }

    /// Configures a DELETE.
    #[must_use]
    pub fn delete(mut self) -> Self {
        self.action = Action::Delete;
        self
    }

    /// Compiles the given condition branches into the WHERE text.
    #[must_use]
    pub fn filter(mut self, conditions: &[Cond]) -> Self {
        self.where_sql = compile(conditions);
        self
    }

    /// Compiles the given condition branches into the HAVING text.
    #[must_use]
    pub fn having(mut self, conditions: &[Cond]) -> Self {
        self.having_sql = compile(conditions);
        self
    }

    /// Adds an inner join.
    #[must_use]
    pub fn join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("JOIN {} ON {on}", identifier(table)));
        self
    }

    /// Adds a left join.
    #[must_use]
    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins
            .push(format!("LEFT JOIN {} ON {on}", identifier(table)));
        self
    }

    /// Adds a right join.
    // TODO: emit RIGHT JOIN once downstream consumers of the current
    // output are audited; this has always rendered the generic keyword.
    #[must_use]
    pub fn right_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("JOIN {} ON {on}", identifier(table)));
        self
    }

    /// Appends ascending ordering on a column.
    #[must_use]
    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push(format!("{} ASC", identifier(column)));
        self
    }

    /// Appends descending ordering on a column.
    #[must_use]
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order_by.push(format!("{} DESC", identifier(column)));
        self
    }

    /// Appends grouping columns.
    #[must_use]
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        for column in identifier_all(columns) {
            if !self.group_by.contains(&column) {
                self.group_by.push(column);
            }
        }
        self
    }

    /// Caps the number of rows.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the priority modifier.
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the IGNORE flag for inserts.
    #[must_use]
    pub const fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    fn set_data<K, V>(&mut self, data: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in data {
            let key = key.into();
            let value = value.into();
            if let Some(slot) = self.data.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            } else {
                self.data.push((key, value));
            }
        }
    }

    fn priority_prefix(&self) -> String {
        self.priority
            .map_or_else(String::new, |p| format!("{} ", p.as_str()))
    }

    /// Renders the statement for the current action, or `None` when no
    /// action has been chosen.
    #[must_use]
    pub fn to_sql(&self) -> Option<String> {
        match self.action {
            Action::Unset => None,
            Action::Select => Some(self.select_sql()),
            Action::Insert => Some(self.render_insert()),
            Action::Update => Some(self.render_update()),
            Action::Delete => Some(self.render_delete()),
            Action::Replace => Some(self.render_replace()),
        }
    }

    /// Renders the SELECT form of this statement regardless of the current
    /// action. Read operations always go through here.
    #[must_use]
    pub fn select_sql(&self) -> String {
        let projection = if self.columns.is_empty() {
            String::from("*")
        } else {
            self.columns.join(", ")
        };
        self.render_select(&projection)
    }

    /// Renders the `COUNT(*)` form of this statement.
    #[must_use]
    pub fn count_sql(&self) -> String {
        self.render_select("COUNT(*)")
    }

    fn render_select(&self, projection: &str) -> String {
        let mut sql = String::from("SELECT ");
        sql.push_str(&self.priority_prefix());
        sql.push_str(projection);
        sql.push_str(" FROM ");
        sql.push_str(&identifier(&self.table));
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
        if !self.where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_sql);
        }
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        if !self.having_sql.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&self.having_sql);
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        sql
    }

    fn render_insert(&self) -> String {
        let mut sql = String::from("INSERT ");
        if self.ignore {
            sql.push_str("IGNORE ");
        }
        sql.push_str("INTO ");
        sql.push_str(&self.priority_prefix());
        sql.push_str(&identifier(&self.table));
        let keys: Vec<String> = self.data.iter().map(|(k, _)| identifier(k)).collect();
        let values: Vec<String> = self.data.iter().map(|(_, v)| literal(v)).collect();
        sql.push_str(" (");
        sql.push_str(&keys.join(", "));
        sql.push_str(") VALUES (");
        sql.push_str(&values.join(", "));
        sql.push(')');
        sql
    }

    fn set_pairs(&self) -> String {
        let pairs: Vec<String> = self
            .data
            .iter()
            .map(|(k, v)| format!("{} = {}", identifier(k), literal(v)))
            .collect();
        pairs.join(", ")
    }

    fn render_update(&self) -> String {
        let mut sql = String::from("UPDATE ");
        sql.push_str(&self.priority_prefix());
        sql.push_str(&identifier(&self.table));
        sql.push_str(" SET ");
        sql.push_str(&self.set_pairs());
        if !self.where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_sql);
        }
        sql
    }

    fn render_replace(&self) -> String {
        let mut sql = String::from("REPLACE ");
        sql.push_str(&self.priority_prefix());
        sql.push_str("INTO ");
        sql.push_str(&identifier(&self.table));
        sql.push_str(" SET ");
        sql.push_str(&self.set_pairs());
        sql
    }

    fn render_delete(&self) -> String {
        let mut sql = String::from("DELETE ");
        sql.push_str(&self.priority_prefix());
        sql.push_str("FROM ");
        sql.push_str(&identifier(&self.table));
        if !self.where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_sql);
        }
        sql
    }

    /// Executes the current write action through the connector and returns
    /// the affected-row count, or `Ok(None)` when no write action is set.
    ///
    /// # Errors
    ///
    /// Propagates the connector's failure.
    pub fn exec<C: Connector + ?Sized>(&self, conn: &C) -> Result<Option<u64>> {
        let sql = match self.action {
            Action::Insert => self.render_insert(),
            Action::Update => self.render_update(),
            Action::Delete => self.render_delete(),
            Action::Replace => self.render_replace(),
            Action::Unset | Action::Select => return Ok(None),
        };
        debug!(sql = %sql, "executing statement");
        conn.execute(&sql).map(Some)
    }

    /// Runs the SELECT form and returns the first row.
    ///
    /// # Errors
    ///
    /// Propagates the connector's failure.
    pub fn fetch<C: Connector + ?Sized>(&self, conn: &C) -> Result<Option<Row>> {
        Ok(self.run_query(conn)?.into_iter().next())
    }

    /// Runs the SELECT form and returns all rows.
    ///
    /// # Errors
    ///
    /// Propagates the connector's failure.
    pub fn fetch_all<C: Connector + ?Sized>(&self, conn: &C) -> Result<Vec<Row>> {
        self.run_query(conn)
    }

    /// Runs the SELECT form and returns the first column of the first row.
    ///
    /// # Errors
    ///
    /// Propagates the connector's failure.
    pub fn fetch_column<C: Connector + ?Sized>(&self, conn: &C) -> Result<Option<Value>> {
        Ok(self.fetch(conn)?.and_then(Row::into_first))
    }

    /// Runs the `COUNT(*)` form and returns the count.
    ///
    /// # Errors
    ///
    /// Propagates the connector's failure.
    #[allow(clippy::cast_possible_truncation)]
    pub fn count<C: Connector + ?Sized>(&self, conn: &C) -> Result<i64> {
        let sql = self.count_sql();
        debug!(sql = %sql, "running query");
        let first = conn
            .query(&sql)?
            .into_iter()
            .next()
            .and_then(Row::into_first);
        Ok(match first {
            Some(Value::Int(n)) => n,
            Some(Value::Float(f)) => f as i64,
            Some(Value::Text(s)) => s.parse().unwrap_or(0),
            _ => 0,
        })
    }

    /// Runs the SELECT form and hydrates every row into `E`, wrapped in the
    /// default [`Collection`].
    ///
    /// # Errors
    ///
    /// Propagates the connector's failure, or the first hydration failure.
    pub fn get<E: Entity, C: Connector + ?Sized>(&self, conn: &C) -> Result<Collection<E>> {
        self.collect(conn)
    }

    /// Runs the SELECT form and hydrates every row into `E`, collected
    /// into any container constructible from `Vec<E>`.
    ///
    /// # Errors
    ///
    /// Propagates the connector's failure, or the first hydration failure.
    pub fn collect<E, T, C>(&self, conn: &C) -> Result<T>
    where
        E: Entity,
        T: From<Vec<E>>,
        C: Connector + ?Sized,
    {
        let rows = self.run_query(conn)?;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(E::from_row(row)?);
        }
        Ok(T::from(items))
    }

    fn run_query<C: Connector + ?Sized>(&self, conn: &C) -> Result<Vec<Row>> {
        let sql = self.select_sql();
        debug!(sql = %sql, "running query");
        conn.query(&sql)
    }
}
