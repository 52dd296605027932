// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgREST query-string builder.
//!
//! Encodes the subset of the PostgREST filter grammar the console needs:
//! column selection (with embedded resources), equality and membership
//! filters, ordering and a row limit.

/// Filters, ordering and limits for one table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<u32>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return. Whitespace and newlines are stripped so embedded
    /// selects can be written across several lines.
    pub fn select(mut self, columns: &str) -> Self {
        let compact: String = columns.split_whitespace().collect();
        self.select = Some(compact);
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// `column IN (values...)`
    pub fn is_in<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let quoted: Vec<String> = values
            .into_iter()
            .map(|v| format!("\"{}\"", v.as_ref().replace('\\', "\\\\").replace('"', "\\\"")))
            .collect();
        self.filters
            .push((column.to_string(), format!("in.({})", quoted.join(","))));
        self
    }

    /// Append an ordering term. Later calls break ties of earlier ones.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{}.{}", column, direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs, in a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// True when the query filters rows. Updates and deletes refuse to run
    /// without a filter.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }
}
