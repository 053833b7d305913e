//! CREATE TABLE compilation from table blueprints.
//!
//! The entry point is [`Schema::create`]: it hands a fresh [`Blueprint`] to
//! the caller's closure, then renders the finished description into DDL
//! text.

mod blueprint;
mod column;

pub use blueprint::{Blueprint, ForeignKey, RefAction};
pub use column::SchemaColumn;

/// Namespace for schema-level operations.
#[derive(Debug, Clone, Copy)]
pub struct Schema;

impl Schema {
    /// Builds a table blueprint and renders its CREATE TABLE statement.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quarry_sql::Schema;
    ///
    /// let sql = Schema::create("users", |t| {
    ///     t.id();
    ///     t.varchar("username", 255).not_null().unique();
    ///     t.engine("InnoDB");
    /// });
    /// assert_eq!(
    ///     sql,
    ///     "CREATE TABLE `users` (`id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT, \
    ///      `username` VARCHAR(255) NOT NULL, PRIMARY KEY (`id`), \
    ///      UNIQUE KEY `username` (`username`)) ENGINE=InnoDB;"
    /// );
    /// ```
    pub fn create(table: &str, build: impl FnOnce(&mut Blueprint)) -> String {
        let mut blueprint = Blueprint::new(table);
        build(&mut blueprint);
        blueprint.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_renders_blueprint() {
        let sql = Schema::create("sessions", |t| {
            t.id();
            t.varchar("token", 64).not_null().unique();
            t.timestamp("created_at").not_null().use_current();
        });
        assert_eq!(
            sql,
            "CREATE TABLE `sessions` (`id` BIGINT UNSIGNED NOT NULL AUTO_INCREMENT, \
             `token` VARCHAR(64) NOT NULL, \
             `created_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP, \
             PRIMARY KEY (`id`), UNIQUE KEY `token` (`token`));"
        );
    }

    #[test]
    fn test_oversized_string_degrades_to_text() {
        let sql = Schema::create("articles", |t| {
            t.string("body", 300).not_null();
        });
        assert_eq!(sql, "CREATE TABLE `articles` (`body` TEXT NOT NULL);");
    }
}
