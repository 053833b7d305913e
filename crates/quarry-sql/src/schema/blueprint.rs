//! Table blueprints.
//!
//! A [`Blueprint`] is the in-memory description of a table: its typed
//! columns, keys, foreign keys and options, built up by the closure passed
//! to [`crate::Schema::create`] and rendered once into a CREATE TABLE
//! statement.

use crate::ident;
use crate::value::quote;

use super::column::SchemaColumn;

/// Referential action for foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefAction {
    /// `NO ACTION`
    NoAction,
    /// `RESTRICT`
    Restrict,
    /// `CASCADE`
    Cascade,
    /// `SET NULL`
    SetNull,
    /// `SET DEFAULT`
    SetDefault,
}

impl RefAction {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A named foreign-key constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub(crate) name: String,
    pub(crate) columns: Vec<String>,
    pub(crate) ref_table: String,
    pub(crate) ref_columns: Vec<String>,
    pub(crate) on_delete: Option<RefAction>,
    pub(crate) on_update: Option<RefAction>,
}

impl ForeignKey {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            ref_table: String::new(),
            ref_columns: Vec::new(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the constrained columns.
    pub fn columns(&mut self, columns: &[&str]) -> &mut Self {
        self.columns = columns.iter().map(|&c| String::from(c)).collect();
        self
    }

    /// Sets the referenced table and columns.
    pub fn references(&mut self, table: &str, columns: &[&str]) -> &mut Self {
        self.ref_table = String::from(table);
        self.ref_columns = columns.iter().map(|&c| String::from(c)).collect();
        self
    }

    /// Sets the `ON DELETE` action.
    pub fn on_delete(&mut self, action: RefAction) -> &mut Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the `ON UPDATE` action.
    pub fn on_update(&mut self, action: RefAction) -> &mut Self {
        self.on_update = Some(action);
        self
    }

    fn render(&self) -> String {
        let columns: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let ref_columns: Vec<&str> = self.ref_columns.iter().map(String::as_str).collect();
        let mut sql = format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            ident::identifier(&self.name),
            ident::identifier_all(&columns).join(", "),
            ident::identifier(&self.ref_table),
            ident::identifier_all(&ref_columns).join(", ")
        );
        if let Some(action) = self.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = self.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        sql
    }
}

/// An in-memory table description prior to DDL rendering.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    table: String,
    columns: Vec<SchemaColumn>,
    primary: Vec<String>,
    uniques: Vec<(String, Vec<String>)>,
    indexes: Vec<(String, Vec<String>)>,
    foreign_keys: Vec<ForeignKey>,
    engine: Option<String>,
    collation: Option<String>,
    checksum: Option<bool>,
    auto_increment: Option<u64>,
    options: Vec<(String, String)>,
    comment: Option<String>,
}

impl Blueprint {
    /// Creates an empty blueprint for the given table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Registers a column with an explicit type token. Re-adding a name
    /// overwrites the earlier definition in place.
    pub fn column(&mut self, name: &str, type_token: &str, length: Option<u64>) -> &mut SchemaColumn {
        let fresh = SchemaColumn::new(name, type_token, length);
        let pos = self.columns.iter().position(|c| c.name == name);
        match pos {
            Some(pos) => {
                self.columns[pos] = fresh;
                &mut self.columns[pos]
            }
            None => {
                self.columns.push(fresh);
                let last = self.columns.len() - 1;
                &mut self.columns[last]
            }
        }
    }

    /// `id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT, registered as the
    /// primary key.
    pub fn id(&mut self) -> &mut SchemaColumn {
        self.column("id", "BIGINT", None)
            .unsigned()
            .not_null()
            .auto_increment()
            .primary()
    }

    /// An `INT` column.
    pub fn int(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "INT", None)
    }

    /// A `TINYINT` column.
    pub fn tinyint(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "TINYINT", None)
    }

    /// A boolean column, stored as `TINYINT(1)`.
    pub fn bool(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "TINYINT", Some(1))
    }

    /// A `VARCHAR` column with an explicit length.
    pub fn varchar(&mut self, name: &str, length: u64) -> &mut SchemaColumn {
        self.column(name, "VARCHAR", Some(length))
    }

    /// A text column sized by the requested capacity: `VARCHAR(255)` up to
    /// 255, then `TEXT`, `MEDIUMTEXT` and `LONGTEXT` at the usual MySQL
    /// thresholds.
    pub fn string(&mut self, name: &str, length: u64) -> &mut SchemaColumn {
        match length {
            0..=255 => self.column(name, "VARCHAR", Some(255)),
            256..=65_535 => self.column(name, "TEXT", None),
            65_536..=16_777_215 => self.column(name, "MEDIUMTEXT", None),
            _ => self.column(name, "LONGTEXT", None),
        }
    }

    /// A `FLOAT` column.
    pub fn float(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "FLOAT", None)
    }

    /// A `DOUBLE` column.
    pub fn double(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "DOUBLE", None)
    }

    /// A `DECIMAL` column.
    pub fn decimal(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "DECIMAL", None)
    }

    /// A `TEXT` column.
    pub fn text(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "TEXT", None)
    }

    /// A `MEDIUMTEXT` column.
    pub fn mediumtext(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "MEDIUMTEXT", None)
    }

    /// A `LONGTEXT` column.
    pub fn longtext(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "LONGTEXT", None)
    }

    /// A `TIMESTAMP` column; combine with
    /// [`SchemaColumn::use_current`] / [`SchemaColumn::on_update_current`].
    pub fn timestamp(&mut self, name: &str) -> &mut SchemaColumn {
        self.column(name, "TIMESTAMP", None)
    }

    /// Declares a composite primary key.
    pub fn primary(&mut self, columns: &[&str]) -> &mut Self {
        self.primary = columns.iter().map(|&c| String::from(c)).collect();
        self
    }

    /// Declares a named unique index.
    pub fn unique(&mut self, name: &str, columns: &[&str]) -> &mut Self {
        self.uniques.push((
            String::from(name),
            columns.iter().map(|&c| String::from(c)).collect(),
        ));
        self
    }

    /// Declares a named index.
    pub fn index(&mut self, name: &str, columns: &[&str]) -> &mut Self {
        self.indexes.push((
            String::from(name),
            columns.iter().map(|&c| String::from(c)).collect(),
        ));
        self
    }

    /// Declares a named foreign-key constraint.
    pub fn foreign(&mut self, name: &str) -> &mut ForeignKey {
        self.foreign_keys.push(ForeignKey::new(name));
        let last = self.foreign_keys.len() - 1;
        &mut self.foreign_keys[last]
    }

    /// Sets the storage engine (`ENGINE=`).
    pub fn engine(&mut self, engine: impl Into<String>) -> &mut Self {
        self.engine = Some(engine.into());
        self
    }

    /// Sets the table collation (`COLLATE=`).
    pub fn collation(&mut self, collation: impl Into<String>) -> &mut Self {
        self.collation = Some(collation.into());
        self
    }

    /// Enables or disables live checksums (`CHECKSUM=`).
    pub fn checksum(&mut self, enabled: bool) -> &mut Self {
        self.checksum = Some(enabled);
        self
    }

    /// Sets the auto-increment start value.
    pub fn auto_increment(&mut self, start: u64) -> &mut Self {
        self.auto_increment = Some(start);
        self
    }

    /// Adds a free-form `KEY=value` table option.
    pub fn option(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.push((key.into(), value.into()));
        self
    }

    /// Sets the table comment (`COMMENT=`).
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.comment = Some(text.into());
        self
    }

    /// Collects the effective primary key: columns flagged `primary()` in
    /// declaration order, then the explicit composite list.
    fn primary_key(&self) -> Vec<String> {
        let mut key: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.primary)
            .map(|c| c.name.clone())
            .collect();
        for name in &self.primary {
            if !key.contains(name) {
                key.push(name.clone());
            }
        }
        key
    }

    /// Collects unique indexes: column-level flags (named after the column)
    /// first, then the explicit named ones.
    fn unique_keys(&self) -> Vec<(String, Vec<String>)> {
        let mut keys: Vec<(String, Vec<String>)> = self
            .columns
            .iter()
            .filter(|c| c.unique)
            .map(|c| (c.name.clone(), vec![c.name.clone()]))
            .collect();
        keys.extend(self.uniques.iter().cloned());
        keys
    }

    fn key_columns(columns: &[String]) -> String {
        let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        ident::identifier_all(&refs).join(", ")
    }

    /// Renders the CREATE TABLE statement.
    #[must_use]
    pub fn render(&self) -> String {
        let mut defs: Vec<String> = self.columns.iter().map(SchemaColumn::render).collect();

        let primary_key = self.primary_key();
        if !primary_key.is_empty() {
            defs.push(format!("PRIMARY KEY ({})", Self::key_columns(&primary_key)));
        }
        for (name, columns) in self.unique_keys() {
            defs.push(format!(
                "UNIQUE KEY {} ({})",
                ident::identifier(&name),
                Self::key_columns(&columns)
            ));
        }
        for (name, columns) in &self.indexes {
            defs.push(format!(
                "INDEX {} ({})",
                ident::identifier(name),
                Self::key_columns(columns)
            ));
        }
        for foreign_key in &self.foreign_keys {
            defs.push(foreign_key.render());
        }

        let mut sql = format!(
            "CREATE TABLE {} ({})",
            ident::identifier(&self.table),
            defs.join(", ")
        );

        let mut options: Vec<String> = Vec::new();
        if let Some(comment) = &self.comment {
            options.push(format!("COMMENT={}", quote(comment)));
        }
        if let Some(collation) = &self.collation {
            options.push(format!("COLLATE={collation}"));
        }
        if let Some(engine) = &self.engine {
            options.push(format!("ENGINE={engine}"));
        }
        if let Some(checksum) = self.checksum {
            options.push(format!("CHECKSUM={}", u8::from(checksum)));
        }
        if let Some(start) = self.auto_increment {
            options.push(format!("AUTO_INCREMENT={start}"));
        }
        for (key, value) in &self.options {
            options.push(format!("{key}={value}"));
        }
        if !options.is_empty() {
            sql.push(' ');
            sql.push_str(&options.join(" "));
        }
        sql.push(';');
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_table() {
        let mut table = Blueprint::new("logs");
        table.text("line").not_null();
        assert_eq!(
            table.render(),
            "CREATE TABLE `logs` (`line` TEXT NOT NULL);"
        );
    }

    #[test]
    fn test_id_registers_primary_key() {
        let mut table = Blueprint::new("users");
        table.id();
        assert_eq!(
            table.render(),
            "CREATE TABLE `users` (`id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT, \
             PRIMARY KEY (`id`));"
        );
    }

    #[test]
    fn test_column_unique_flag_becomes_named_key() {
        let mut table = Blueprint::new("users");
        table.varchar("username", 255).not_null().unique();
        assert_eq!(
            table.render(),
            "CREATE TABLE `users` (`username` VARCHAR(255) NOT NULL, \
             UNIQUE KEY `username` (`username`));"
        );
    }

    #[test]
    fn test_readding_column_overwrites_in_place() {
        let mut table = Blueprint::new("t");
        table.int("a");
        table.int("b");
        table.varchar("a", 32).not_null();
        assert_eq!(
            table.render(),
            "CREATE TABLE `t` (`a` VARCHAR(32) NOT NULL, `b` INT NULL);"
        );
    }

    #[test]
    fn test_string_size_thresholds() {
        let mut table = Blueprint::new("t");
        table.string("a", 100);
        table.string("b", 300);
        table.string("c", 70_000);
        table.string("d", 20_000_000);
        assert_eq!(
            table.render(),
            "CREATE TABLE `t` (`a` VARCHAR(255) NULL, `b` TEXT NULL, \
             `c` MEDIUMTEXT NULL, `d` LONGTEXT NULL);"
        );
    }

    #[test]
    fn test_bool_is_tinyint_1() {
        let mut table = Blueprint::new("t");
        table.bool("active").not_null().default(true);
        assert_eq!(
            table.render(),
            "CREATE TABLE `t` (`active` TINYINT(1) NOT NULL DEFAULT 1);"
        );
    }

    #[test]
    fn test_index_clause_order() {
        let mut table = Blueprint::new("t");
        table.int("a").not_null();
        table.int("b").not_null();
        table.primary(&["a", "b"]);
        table.unique("uq_ab", &["a", "b"]);
        table.index("idx_b", &["b"]);
        assert_eq!(
            table.render(),
            "CREATE TABLE `t` (`a` INT NOT NULL, `b` INT NOT NULL, \
             PRIMARY KEY (`a`, `b`), UNIQUE KEY `uq_ab` (`a`, `b`), \
             INDEX `idx_b` (`b`));"
        );
    }

    #[test]
    fn test_foreign_key_clause() {
        let mut table = Blueprint::new("posts");
        table.id();
        table.int("user_id").unsigned().not_null();
        table
            .foreign("fk_posts_user")
            .columns(&["user_id"])
            .references("users", &["id"])
            .on_delete(RefAction::Cascade)
            .on_update(RefAction::Restrict);
        let sql = table.render();
        assert!(sql.contains(
            "CONSTRAINT `fk_posts_user` FOREIGN KEY (`user_id`) \
             REFERENCES `users` (`id`) ON DELETE CASCADE ON UPDATE RESTRICT"
        ));
    }

    #[test]
    fn test_table_options_order() {
        let mut table = Blueprint::new("t");
        table.int("a");
        table
            .comment("audit trail")
            .collation("utf8mb4_unicode_ci")
            .engine("InnoDB")
            .checksum(true)
            .auto_increment(1000)
            .option("ROW_FORMAT", "DYNAMIC");
        assert_eq!(
            table.render(),
            "CREATE TABLE `t` (`a` INT NULL) COMMENT='audit trail' \
             COLLATE=utf8mb4_unicode_ci ENGINE=InnoDB CHECKSUM=1 \
             AUTO_INCREMENT=1000 ROW_FORMAT=DYNAMIC;"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut table = Blueprint::new("t");
        table.id();
        table.varchar("name", 64).not_null().unique();
        table.engine("InnoDB");
        assert_eq!(table.render(), table.render());
    }
}
