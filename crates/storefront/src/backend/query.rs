//! Table query builder.

use std::fmt::Display;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A read (or the filter part of a write) against one table.
///
/// Only equality filters are supported; they are ANDed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<usize>,
}

impl Query {
    /// Start a query on `table`, selecting every column.
    #[must_use]
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Restrict the returned columns, e.g. `"id,name"`.
    #[must_use]
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    /// Keep rows where `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Display) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    #[must_use]
    pub const fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Equality filters as `(column, value)` pairs, in the order added.
    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Query-string parameters in the hosted REST syntax.
    ///
    /// `eq` filters become `col=eq.value`, ordering becomes
    /// `order=col.asc`, and the column list becomes `select=...`.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        if let Some(columns) = &self.columns {
            params.push(("select".to_string(), columns.clone()));
        }
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some((column, direction)) = &self.order {
            params.push(("order".to_string(), format!("{column}.{}", direction.as_str())));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Filter parameters only, for writes.
    #[must_use]
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{value}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_params_in_rest_syntax() {
        let query = Query::from("products")
            .select("id,name")
            .eq("store_id", "s1")
            .eq("is_new", true)
            .order("created_at", Direction::Desc)
            .limit(8);

        assert_eq!(query.table(), "products");
        assert_eq!(
            query.to_params(),
            [
                pair("select", "id,name"),
                pair("store_id", "eq.s1"),
                pair("is_new", "eq.true"),
                pair("order", "created_at.desc"),
                pair("limit", "8"),
            ]
        );
        assert_eq!(
            query.filter_params(),
            [pair("store_id", "eq.s1"), pair("is_new", "eq.true")]
        );
    }

    #[test]
    fn test_bare_query_has_no_params() {
        assert!(Query::from("stores").to_params().is_empty());
    }
}
