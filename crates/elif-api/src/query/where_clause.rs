//! Query Builder WHERE clause operations
//!
//! Every method writes one encoded predicate under the field name; a second
//! predicate on the same field replaces the first.

use std::fmt::Display;

use serde_json::Value;
use tracing::trace;

use crate::error::ModelResult;

use super::builder::QueryBuilder;
use super::encoding;
use super::types::*;

impl<M> QueryBuilder<M> {
    /// Add WHERE condition with equality
    pub fn where_eq(self, field: &str, value: impl Display) -> Self {
        self.where_op(field, PredicateOperator::Equal, value)
    }

    /// Add WHERE condition with an explicit operator
    ///
    /// The limit and page keys are reserved for `limit`/`for_page`/`paginate`;
    /// predicates on them are ignored.
    pub fn where_op(mut self, field: &str, operator: PredicateOperator, value: impl Display) -> Self {
        if self.config.is_reserved(field) {
            trace!(field, "Ignoring predicate on reserved pagination key");
            return self;
        }
        self.state.set(field, encoding::comparison(operator, value));
        self
    }

    /// Add WHERE condition with an operator symbol such as `"<="` or `"like"`
    pub fn where_condition(self, field: &str, operator: &str, value: impl Display) -> ModelResult<Self> {
        if self.config.is_reserved(field) {
            trace!(field, "Ignoring predicate on reserved pagination key");
            return Ok(self);
        }
        let operator = operator.parse::<PredicateOperator>()?;
        Ok(self.where_op(field, operator, value))
    }

    pub fn where_ne(self, field: &str, value: impl Display) -> Self {
        self.where_op(field, PredicateOperator::NotEqual, value)
    }

    pub fn where_lt(self, field: &str, value: impl Display) -> Self {
        self.where_op(field, PredicateOperator::LessThan, value)
    }

    pub fn where_lte(self, field: &str, value: impl Display) -> Self {
        self.where_op(field, PredicateOperator::LessThanOrEqual, value)
    }

    pub fn where_gt(self, field: &str, value: impl Display) -> Self {
        self.where_op(field, PredicateOperator::GreaterThan, value)
    }

    pub fn where_gte(self, field: &str, value: impl Display) -> Self {
        self.where_op(field, PredicateOperator::GreaterThanOrEqual, value)
    }

    pub fn where_like(self, field: &str, pattern: &str) -> Self {
        self.where_op(field, PredicateOperator::Like, pattern)
    }

    /// Merge raw parameters as they are, without operator encoding
    pub fn where_all<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.state.merge(parameters);
        self
    }

    /// Compare two columns for equality
    pub fn where_column(self, first: &str, second: &str) -> Self {
        self.add_column(first, PredicateOperator::Equal, second, Boolean::And)
    }

    pub fn where_column_op(self, first: &str, operator: PredicateOperator, second: &str) -> Self {
        self.add_column(first, operator, second, Boolean::And)
    }

    pub fn add_column(mut self, first: &str, operator: PredicateOperator, second: &str, _boolean: Boolean) -> Self {
        self.state.set(first, encoding::column(operator, second));
        self
    }

    pub fn where_between<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.add_between(column, values, Boolean::And, false)
    }

    pub fn where_not_between<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.add_between(column, values, Boolean::And, true)
    }

    pub fn add_between<I>(mut self, column: &str, values: I, _boolean: Boolean, not: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.state.set(column, encoding::between(values, not));
        self
    }

    pub fn where_in<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.add_in(column, values, Boolean::And, false)
    }

    pub fn where_not_in<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.add_in(column, values, Boolean::And, true)
    }

    pub fn add_in<I>(mut self, column: &str, values: I, _boolean: Boolean, not: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.state.set(column, encoding::membership(values, not));
        self
    }

    pub fn where_null(self, column: &str) -> Self {
        self.add_null(column, Boolean::And, false)
    }

    pub fn where_not_null(self, column: &str) -> Self {
        self.add_null(column, Boolean::And, true)
    }

    pub fn add_null(mut self, column: &str, _boolean: Boolean, not: bool) -> Self {
        self.state.set(column, encoding::null_check(not));
        self
    }

    pub fn where_date(self, column: &str, value: impl Display) -> Self {
        self.add_date_part(DatePart::Date, column, PredicateOperator::Equal, value, Boolean::And)
    }

    pub fn where_date_op(self, column: &str, operator: PredicateOperator, value: impl Display) -> Self {
        self.add_date_part(DatePart::Date, column, operator, value, Boolean::And)
    }

    pub fn where_day(self, column: &str, value: impl Display) -> Self {
        self.add_date_part(DatePart::Day, column, PredicateOperator::Equal, value, Boolean::And)
    }

    pub fn where_day_op(self, column: &str, operator: PredicateOperator, value: impl Display) -> Self {
        self.add_date_part(DatePart::Day, column, operator, value, Boolean::And)
    }

    pub fn where_month(self, column: &str, value: impl Display) -> Self {
        self.add_date_part(DatePart::Month, column, PredicateOperator::Equal, value, Boolean::And)
    }

    pub fn where_month_op(self, column: &str, operator: PredicateOperator, value: impl Display) -> Self {
        self.add_date_part(DatePart::Month, column, operator, value, Boolean::And)
    }

    pub fn where_time(self, column: &str, value: impl Display) -> Self {
        self.add_date_part(DatePart::Time, column, PredicateOperator::Equal, value, Boolean::And)
    }

    pub fn where_time_op(self, column: &str, operator: PredicateOperator, value: impl Display) -> Self {
        self.add_date_part(DatePart::Time, column, operator, value, Boolean::And)
    }

    pub fn where_year(self, column: &str, value: impl Display) -> Self {
        self.add_date_part(DatePart::Year, column, PredicateOperator::Equal, value, Boolean::And)
    }

    pub fn where_year_op(self, column: &str, operator: PredicateOperator, value: impl Display) -> Self {
        self.add_date_part(DatePart::Year, column, operator, value, Boolean::And)
    }

    /// Compare one component of a date/time column
    pub fn add_date_part(
        mut self,
        part: DatePart,
        column: &str,
        operator: PredicateOperator,
        value: impl Display,
        _boolean: Boolean,
    ) -> Self {
        self.state.set(column, encoding::date_part(part, operator, value));
        self
    }

    /// Include soft-deleted records
    pub fn with_trashed(mut self) -> Self {
        self.state.set(self.config.trashed_key.clone(), "with");
        self
    }

    /// Only soft-deleted records
    pub fn only_trashed(mut self) -> Self {
        self.state.set(self.config.trashed_key.clone(), "only");
        self
    }
}
