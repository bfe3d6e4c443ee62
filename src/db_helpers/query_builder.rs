use std::str::FromStr;

use crate::errors::{RequestError, INVALID_SORT_QUERY};

/// Columns an article listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortBy {
    fn column(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "articles.created_at",
            SortBy::Votes => "articles.votes",
            SortBy::CommentCount => "comment_count",
        }
    }
}

impl FromStr for SortBy {
    type Err = RequestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created_at" => Ok(SortBy::CreatedAt),
            "votes" => Ok(SortBy::Votes),
            "comment_count" => Ok(SortBy::CommentCount),
            _ => Err(RequestError::BadRequest(INVALID_SORT_QUERY.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = RequestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(RequestError::BadRequest(INVALID_SORT_QUERY.to_owned())),
        }
    }
}

enum Clause {
    Filter(&'static str),
    GroupBy(&'static str),
    OrderBy(SortBy, Order),
}

/// Appends clauses to a fixed `SELECT`. Identifiers only ever come from
/// `&'static str` or the sort enums; values are always bound as `$n`.
pub(crate) struct QueryBuilder {
    base: &'static str,
    clauses: Vec<Clause>,
    params: Vec<String>,
}

impl QueryBuilder {
    pub(crate) fn new(base: &'static str) -> Self {
        Self {
            base,
            clauses: vec![],
            params: vec![],
        }
    }

    pub(crate) fn add_filter(mut self, column: &'static str, param: Option<String>) -> Self {
        if let Some(value) = param {
            self.clauses.push(Clause::Filter(column));
            self.params.push(value);
        }
        self
    }

    pub(crate) fn group_by(mut self, column: &'static str) -> Self {
        self.clauses.push(Clause::GroupBy(column));
        self
    }

    pub(crate) fn order_by(mut self, sort_by: SortBy, order: Order) -> Self {
        self.clauses.push(Clause::OrderBy(sort_by, order));
        self
    }

    pub(crate) fn build(self) -> (String, Vec<String>) {
        let mut filters = vec![];
        let mut group_by = None;
        let mut order_by = None;
        for clause in &self.clauses {
            match clause {
                Clause::Filter(column) => {
                    filters.push(format!("{} = ${}", column, filters.len() + 1));
                }
                Clause::GroupBy(column) => group_by = Some(*column),
                Clause::OrderBy(sort_by, order) => order_by = Some((*sort_by, *order)),
            }
        }

        let mut query = self.base.trim_end().to_owned();
        if !filters.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&filters.join(" AND "));
        }
        if let Some(column) = group_by {
            query.push_str(" GROUP BY ");
            query.push_str(column);
        }
        if let Some((sort_by, order)) = order_by {
            query.push_str(" ORDER BY ");
            query.push_str(sort_by.column());
            query.push(' ');
            query.push_str(order.keyword());
        }
        (query, self.params)
    }
}
