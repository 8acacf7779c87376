//! Query Builder execution for Model types
//!
//! Each terminal operation issues exactly one call to the API client. Bulk
//! fetches treat a not-found answer as an empty collection; single-record
//! fetches propagate it, and the `find*` wrappers turn it into `None`.

use serde_json::Value;
use tracing::debug;

use crate::client::{ApiError, ApiRequest};
use crate::error::{ModelError, ModelResult};
use crate::hydration::RawCollection;
use crate::model::ApiModel;

use super::builder::QueryBuilder;
use super::pagination::PaginationEnvelope;

/// Lookup key for [`QueryBuilder::find_key_or_fail`]
#[derive(Debug, Clone, PartialEq)]
pub enum FindKey {
    /// Several identifiers, fetched in one bulk call
    Ids(Vec<Value>),
    /// One identifier, fetched from the single-record endpoint
    Id(Value),
    /// A field/value pair
    ///
    /// Only becomes a filtered bulk lookup (first match) when the query already
    /// holds direct parameters and `value` is set; otherwise `field` itself is
    /// used as the identifier of a single-record fetch.
    Field { field: String, value: Option<Value> },
}

impl FindKey {
    pub fn field(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FindKey::Field {
            field: field.into(),
            value: Some(value.into()),
        }
    }
}

impl From<i64> for FindKey {
    fn from(id: i64) -> Self {
        FindKey::Id(id.into())
    }
}

impl From<i32> for FindKey {
    fn from(id: i32) -> Self {
        FindKey::Id(id.into())
    }
}

impl From<u64> for FindKey {
    fn from(id: u64) -> Self {
        FindKey::Id(id.into())
    }
}

impl From<&str> for FindKey {
    fn from(id: &str) -> Self {
        FindKey::Id(id.into())
    }
}

impl From<String> for FindKey {
    fn from(id: String) -> Self {
        FindKey::Id(id.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for FindKey {
    fn from(ids: Vec<T>) -> Self {
        FindKey::Ids(ids.into_iter().map(Into::into).collect())
    }
}

/// Outcome of a key lookup, one variant per lookup mode
#[derive(Debug, Clone, PartialEq)]
pub enum Found<M> {
    /// Records matching a list of identifiers
    Many(Vec<M>),
    /// First record of a filtered bulk lookup
    First(Option<M>),
    /// The record returned by the single-record endpoint
    One(M),
}

impl<M> Found<M> {
    pub fn into_vec(self) -> Vec<M> {
        match self {
            Found::Many(models) => models,
            Found::First(model) => model.into_iter().collect(),
            Found::One(model) => vec![model],
        }
    }
}

impl<M: ApiModel> QueryBuilder<M> {
    /// Execute the bulk fetch and return the raw records
    ///
    /// A not-found answer yields an empty collection.
    pub async fn raw(&self) -> ModelResult<RawCollection> {
        let request = ApiRequest::collection(&M::entities(), self.state.effective_query());
        let operation = request.operation.clone();
        debug!(operation = %operation, parameters = request.query.len(), "Executing bulk fetch");

        match self.api.call(request).await {
            Ok(payload) => RawCollection::from_payload(payload, &self.config),
            Err(ApiError::EntityNotFound { .. }) => {
                debug!(operation = %operation, "Bulk fetch found nothing, returning empty collection");
                Ok(RawCollection::empty())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Hydrate raw records as persisted models
    ///
    /// Returns `None` rather than an empty list when there are no records.
    pub fn instantiate_models(records: Vec<Value>) -> ModelResult<Option<Vec<M>>> {
        if records.is_empty() {
            return Ok(None);
        }

        records
            .into_iter()
            .map(|record| M::new_instance(record, true))
            .collect::<ModelResult<Vec<_>>>()
            .map(Some)
    }

    /// Execute query and return models
    pub async fn get(self) -> ModelResult<Vec<M>> {
        let raw = self.raw().await?;
        Ok(Self::instantiate_models(raw.records)?.unwrap_or_default())
    }

    /// Execute query and return first model
    pub async fn first(self) -> ModelResult<Option<M>> {
        Ok(self.get().await?.into_iter().next())
    }

    /// Fetch every record, up to the configured maximum
    pub async fn all(self) -> ModelResult<Vec<M>> {
        let max_results = self.config.max_results;
        self.take(max_results).get().await
    }

    /// Fetch one page of results
    ///
    /// `per_page` of `None` sends a null limit and leaves the page size to the
    /// remote resource.
    pub async fn paginate(mut self, per_page: Option<u64>, page: u64) -> ModelResult<PaginationEnvelope<M>> {
        self.state
            .set(self.config.limit_key.clone(), per_page.map_or(Value::Null, Value::from));
        self.state.set(self.config.page_key.clone(), page);

        let raw = self.raw().await?;
        let total = raw.meta_u64(&self.config.total_key);
        let per_page = raw.meta_u64(&self.config.per_page_key).or(per_page);
        let current_page = raw.meta_u64(&self.config.current_page_key).or(Some(page));

        Ok(PaginationEnvelope {
            data: Self::instantiate_models(raw.records)?,
            total,
            per_page,
            current_page,
        })
    }

    /// Fetch one record by identifier from the single-record endpoint
    pub async fn find_or_fail(self, id: impl Into<Value>) -> ModelResult<M> {
        self.fetch_one(id.into()).await
    }

    /// Like `find_or_fail`, with not-found turned into `None`
    pub async fn find(self, id: impl Into<Value>) -> ModelResult<Option<M>> {
        not_found_as_none(self.find_or_fail(id).await)
    }

    /// Fetch the records whose primary key is in `ids`, in one bulk call
    pub async fn find_many<I>(self, ids: I) -> ModelResult<Vec<M>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.fetch_by_ids(ids.into_iter().map(Into::into).collect()).await
    }

    /// Filtered bulk lookup returning only the first match
    pub async fn first_where(self, field: &str, value: impl Into<Value>) -> ModelResult<Option<M>> {
        self.first_matching(field.to_string(), value.into()).await
    }

    /// Look a record up by key
    ///
    /// - [`FindKey::Ids`]: bulk fetch on the primary key, [`Found::Many`]
    /// - [`FindKey::Field`] with a value, on a query that already holds direct
    ///   parameters: bulk fetch filtered on the pair, [`Found::First`]
    /// - anything else: single-record fetch, [`Found::One`]; not-found propagates
    pub async fn find_key_or_fail(self, key: impl Into<FindKey>) -> ModelResult<Found<M>> {
        match key.into() {
            FindKey::Ids(ids) => Ok(Found::Many(self.fetch_by_ids(ids).await?)),
            FindKey::Field {
                field,
                value: Some(value),
            } if self.state.has_parameters() => Ok(Found::First(self.first_matching(field, value).await?)),
            FindKey::Field { field, .. } => Ok(Found::One(self.fetch_one(Value::String(field)).await?)),
            FindKey::Id(id) => Ok(Found::One(self.fetch_one(id).await?)),
        }
    }

    /// Like `find_key_or_fail`, with not-found turned into `None`
    ///
    /// A filtered bulk lookup that matches nothing is not a not-found error,
    /// so "no match" can also come back as `Some(Found::First(None))`.
    pub async fn find_key(self, key: impl Into<FindKey>) -> ModelResult<Option<Found<M>>> {
        not_found_as_none(self.find_key_or_fail(key).await)
    }

    async fn fetch_one(self, identifier: Value) -> ModelResult<M> {
        let request = ApiRequest::single(M::entity(), identifier, self.state.effective_query());
        debug!(
            operation = %request.operation,
            parameters = request.query.len(),
            "Executing single-record fetch"
        );

        let attributes = self.api.call(request).await?;
        M::new_instance(attributes, true)
    }

    async fn fetch_by_ids(mut self, ids: Vec<Value>) -> ModelResult<Vec<M>> {
        self.state.set(M::primary_key_name(), Value::Array(ids));
        self.get().await
    }

    async fn first_matching(mut self, field: String, value: Value) -> ModelResult<Option<M>> {
        self.state.set(field, value);
        self.first().await
    }
}

fn not_found_as_none<T>(result: ModelResult<T>) -> ModelResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ModelError::NotFound(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
