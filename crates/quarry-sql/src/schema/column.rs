//! Column definitions for table blueprints.

use crate::ident;
use crate::value::{literal, quote, Value};

/// One typed column inside a [`crate::Blueprint`].
///
/// Built through the blueprint's type methods and refined with the fluent
/// `&mut self` methods here. Primary/unique markers set on a column are
/// collected by the owning blueprint when the table renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaColumn {
    pub(crate) name: String,
    pub(crate) type_token: String,
    pub(crate) length: Option<u64>,
    pub(crate) unsigned: bool,
    pub(crate) zerofill: bool,
    pub(crate) nullable: bool,
    pub(crate) auto_increment: bool,
    /// `None` means "no default declared", which is distinct from an
    /// explicit `Some(Value::Null)` (`DEFAULT NULL`).
    pub(crate) default: Option<Value>,
    pub(crate) default_current: bool,
    pub(crate) on_update_current: bool,
    pub(crate) comment: Option<String>,
    pub(crate) collation: Option<String>,
    pub(crate) primary: bool,
    pub(crate) unique: bool,
}

impl SchemaColumn {
    pub(crate) fn new(name: impl Into<String>, type_token: &str, length: Option<u64>) -> Self {
        Self {
            name: name.into(),
            type_token: String::from(type_token),
            length,
            unsigned: false,
            zerofill: false,
            nullable: true,
            auto_increment: false,
            default: None,
            default_current: false,
            on_update_current: false,
            comment: None,
            collation: None,
            primary: false,
            unique: false,
        }
    }

    /// Sets an explicit display length / size for the type.
    pub fn length(&mut self, length: u64) -> &mut Self {
        self.length = Some(length);
        self
    }

    /// Marks the column `UNSIGNED`.
    pub fn unsigned(&mut self) -> &mut Self {
        self.unsigned = true;
        self
    }

    /// Marks the column `ZEROFILL`.
    pub fn zerofill(&mut self) -> &mut Self {
        self.zerofill = true;
        self
    }

    /// Marks the column `NOT NULL`.
    pub fn not_null(&mut self) -> &mut Self {
        self.nullable = false;
        self
    }

    /// Marks the column nullable (the default).
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Marks the column `AUTO_INCREMENT`.
    pub fn auto_increment(&mut self) -> &mut Self {
        self.auto_increment = true;
        self
    }

    /// Declares a `DEFAULT` value.
    pub fn default(&mut self, value: impl Into<Value>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Declares `DEFAULT NULL` explicitly.
    pub fn default_null(&mut self) -> &mut Self {
        self.default = Some(Value::Null);
        self
    }

    /// Declares `DEFAULT CURRENT_TIMESTAMP`.
    pub fn use_current(&mut self) -> &mut Self {
        self.default_current = true;
        self
    }

    /// Declares `ON UPDATE CURRENT_TIMESTAMP`.
    pub fn on_update_current(&mut self) -> &mut Self {
        self.on_update_current = true;
        self
    }

    /// Attaches a `COMMENT`.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.comment = Some(text.into());
        self
    }

    /// Sets a `COLLATE` clause on the column.
    pub fn collation(&mut self, collation: impl Into<String>) -> &mut Self {
        self.collation = Some(collation.into());
        self
    }

    /// Registers this column in the table's primary key.
    pub fn primary(&mut self) -> &mut Self {
        self.primary = true;
        self
    }

    /// Registers a single-column unique index named after the column.
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    /// Renders the column definition clause.
    pub(crate) fn render(&self) -> String {
        let mut parts = vec![ident::identifier(&self.name)];
        parts.push(self.length.map_or_else(
            || self.type_token.clone(),
            |len| format!("{}({len})", self.type_token),
        ));
        if self.unsigned {
            parts.push(String::from("UNSIGNED"));
        }
        if self.zerofill {
            parts.push(String::from("ZEROFILL"));
        }
        parts.push(String::from(if self.nullable { "NULL" } else { "NOT NULL" }));
        if self.default_current {
            parts.push(String::from("DEFAULT CURRENT_TIMESTAMP"));
        } else if let Some(default) = &self.default {
            parts.push(format!("DEFAULT {}", literal(default)));
        }
        if self.on_update_current {
            parts.push(String::from("ON UPDATE CURRENT_TIMESTAMP"));
        }
        if self.auto_increment {
            parts.push(String::from("AUTO_INCREMENT"));
        }
        if let Some(collation) = &self.collation {
            parts.push(format!("COLLATE {collation}"));
        }
        if let Some(comment) = &self.comment {
            parts.push(format!("COMMENT {}", quote(comment)));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_column() {
        let column = SchemaColumn::new("age", "INT", None);
        assert_eq!(column.render(), "`age` INT NULL");
    }

    #[test]
    fn test_full_clause_order() {
        let mut column = SchemaColumn::new("score", "INT", Some(4));
        column
            .unsigned()
            .zerofill()
            .not_null()
            .default(0)
            .comment("running total");
        assert_eq!(
            column.render(),
            "`score` INT(4) UNSIGNED ZEROFILL NOT NULL DEFAULT 0 COMMENT 'running total'"
        );
    }

    #[test]
    fn test_default_null_is_distinct_from_unset() {
        let mut with_default = SchemaColumn::new("a", "INT", None);
        with_default.default_null();
        assert_eq!(with_default.render(), "`a` INT NULL DEFAULT NULL");

        let unset = SchemaColumn::new("a", "INT", None);
        assert_eq!(unset.render(), "`a` INT NULL");
    }

    #[test]
    fn test_string_default_is_quoted() {
        let mut column = SchemaColumn::new("status", "VARCHAR", Some(16));
        column.not_null().default("open");
        assert_eq!(
            column.render(),
            "`status` VARCHAR(16) NOT NULL DEFAULT 'open'"
        );
    }

    #[test]
    fn test_timestamp_flags() {
        let mut column = SchemaColumn::new("updated_at", "TIMESTAMP", None);
        column.not_null().use_current().on_update_current();
        assert_eq!(
            column.render(),
            "`updated_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_collation() {
        let mut column = SchemaColumn::new("name", "VARCHAR", Some(64));
        column.collation("utf8mb4_unicode_ci");
        assert_eq!(
            column.render(),
            "`name` VARCHAR(64) NULL COLLATE utf8mb4_unicode_ci"
        );
    }
}
