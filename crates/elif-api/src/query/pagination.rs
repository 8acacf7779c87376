//! Query Builder pagination operations

use serde::Serialize;

use super::builder::QueryBuilder;

impl<M> QueryBuilder<M> {
    /// Set the limit control parameter
    pub fn limit(mut self, count: u64) -> Self {
        self.state.set(self.config.limit_key.clone(), count);
        self
    }

    /// Alias for `limit`
    pub fn take(self, count: u64) -> Self {
        self.limit(count)
    }

    /// Set the page and limit control parameters
    ///
    /// Use [`crate::config::DEFAULT_PER_PAGE`] for the conventional page size.
    pub fn for_page(mut self, page: u64, per_page: u64) -> Self {
        self.state.set(self.config.page_key.clone(), page);
        self.take(per_page)
    }
}

/// One page of hydrated results with its pagination metadata
///
/// `total`, `per_page` and `current_page` come from the remote payload when
/// it embeds them, otherwise from the values passed to `paginate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationEnvelope<M> {
    /// `None` when the remote resource returned no records
    pub data: Option<Vec<M>>,
    pub total: Option<u64>,
    pub per_page: Option<u64>,
    pub current_page: Option<u64>,
}

impl<M> PaginationEnvelope<M> {
    pub fn items(&self) -> &[M] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Number of the last page, when both total and page size are known
    pub fn last_page(&self) -> Option<u64> {
        match (self.total, self.per_page) {
            (Some(total), Some(per_page)) if per_page > 0 => Some(total.div_ceil(per_page).max(1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_helpers() {
        let envelope = PaginationEnvelope {
            data: Some(vec![1, 2, 3]),
            total: Some(31),
            per_page: Some(10),
            current_page: Some(1),
        };
        assert_eq!(envelope.items(), &[1, 2, 3]);
        assert_eq!(envelope.last_page(), Some(4));

        let empty: PaginationEnvelope<i32> = PaginationEnvelope {
            data: None,
            total: None,
            per_page: Some(10),
            current_page: Some(2),
        };
        assert!(empty.is_empty());
        assert_eq!(empty.last_page(), None);
    }

    #[test]
    fn test_envelope_serializes_like_the_wire() {
        let envelope = PaginationEnvelope {
            data: Some(vec!["a"]),
            total: None,
            per_page: Some(10),
            current_page: Some(2),
        };

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({"data": ["a"], "total": null, "per_page": 10, "current_page": 2})
        );
    }
}
