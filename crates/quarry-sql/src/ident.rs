//! Identifier sanitization.
//!
//! Normalizes column and table name expressions into backtick-quoted SQL
//! identifiers. Input may be a single name, a `,`/`;`/`|`-delimited list, or
//! a slice of such expressions. Unusable tokens degrade to the `*` wildcard
//! instead of failing, so the output is always usable in a projection or a
//! GROUP BY list.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;|]+").expect("valid regex"));
static ILLEGAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_.*()]+").expect("valid regex"));
static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_{2,}").expect("valid regex"));
static STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*{2,}").expect("valid regex"));
static PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\(\)){2,}").expect("valid regex"));

/// Sanitizes a name expression and joins the result with `", "`.
///
/// # Example
///
/// ```rust
/// use quarry_sql::identifier;
///
/// assert_eq!(identifier("a,b"), "`a`, `b`");
/// assert_eq!(identifier("users.name"), "`users`.`name`");
/// assert_eq!(identifier(""), "*");
/// ```
#[must_use]
pub fn identifier(expr: &str) -> String {
    identifier_list(expr).join(", ")
}

/// Sanitizes a name expression into a list of quoted identifiers.
///
/// The expression is split on `,`, `;` and `|` (runs of separators count as
/// one), each token is sanitized independently, and duplicates are removed
/// while preserving first-seen order. An expression that yields nothing
/// falls back to `["*"]`.
#[must_use]
pub fn identifier_list(expr: &str) -> Vec<String> {
    identifier_all(&[expr])
}

/// Sanitizes a slice of name expressions into one flat identifier list.
///
/// Each element may itself be a delimited list; the results are flattened
/// and deduplicated exactly as in [`identifier_list`].
#[must_use]
pub fn identifier_all(parts: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in parts {
        for token in SEPARATORS.split(part) {
            let ident = sanitize_token(token);
            if !out.contains(&ident) {
                out.push(ident);
            }
        }
    }
    if out.is_empty() {
        out.push(String::from("*"));
    }
    out
}

/// Sanitizes one token into a quoted identifier, `*`, or a bare number.
fn sanitize_token(token: &str) -> String {
    let token = token.trim();
    if token.is_empty()
        || token == "*"
        || token.eq_ignore_ascii_case("true")
        || token.eq_ignore_ascii_case("null")
    {
        return String::from("*");
    }
    // Numbers pass through unquoted: SQL permits numeric expressions in
    // projection and ordering positions.
    if is_numeric(token) {
        return String::from(token);
    }
    let cleaned = ILLEGAL.replace_all(token, "");
    let cleaned = UNDERSCORES.replace_all(&cleaned, "_");
    let cleaned = STARS.replace_all(&cleaned, "*");
    let cleaned = PARENS.replace_all(&cleaned, "()");
    let cleaned = cleaned.trim_end_matches('.');
    if cleaned.is_empty() || cleaned == "*" {
        return String::from("*");
    }
    // A dotted name becomes a chain of quoted segments: `schema`.`table`.
    format!("`{}`", cleaned.replace('.', "`.`"))
}

fn is_numeric(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        && token.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_identifier() {
        assert_eq!(identifier("name"), "`name`");
    }

    #[test]
    fn test_delimited_list() {
        assert_eq!(identifier("a,b"), "`a`, `b`");
        assert_eq!(identifier("a;b|c"), "`a`, `b`, `c`");
    }

    #[test]
    fn test_slice_matches_delimited_string() {
        assert_eq!(identifier_all(&["a", "b"]), identifier_list("a,b"));
    }

    #[test]
    fn test_repeated_separators_collapse() {
        assert_eq!(identifier("a,,;b"), "`a`, `b`");
    }

    #[test]
    fn test_empty_and_wildcard_inputs() {
        assert_eq!(identifier(""), "*");
        assert_eq!(identifier("*"), "*");
        assert_eq!(identifier("true"), "*");
        assert_eq!(identifier("null"), "*");
    }

    #[test]
    fn test_numeric_passthrough() {
        assert_eq!(identifier("1"), "1");
        assert_eq!(identifier("3.5"), "3.5");
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(identifier("users.name"), "`users`.`name`");
        assert_eq!(identifier("db.users.name"), "`db`.`users`.`name`");
    }

    #[test]
    fn test_illegal_characters_stripped() {
        assert_eq!(identifier("na me"), "`name`");
        assert_eq!(identifier("`quoted`"), "`quoted`");
        assert_eq!(identifier("drop table; x"), "`droptable`, `x`");
    }

    #[test]
    fn test_repeats_collapse() {
        assert_eq!(identifier("a__b"), "`a_b`");
        assert_eq!(identifier("a**"), "`a*`");
    }

    #[test]
    fn test_trailing_dot_trimmed() {
        assert_eq!(identifier("users."), "`users`");
    }

    #[test]
    fn test_function_call_shape_kept() {
        assert_eq!(identifier("count(*)"), "`count(*)`");
    }

    #[test]
    fn test_dedup_preserves_order() {
        assert_eq!(identifier("b,a,b"), "`b`, `a`");
    }

    #[test]
    fn test_garbage_only_falls_back_to_wildcard() {
        assert_eq!(identifier("!!!"), "*");
        assert_eq!(identifier_list("!!!, ???"), vec!["*"]);
    }
}
