use std::sync::Arc;

use crate::message::{HttpRequest, HttpResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPair {
    pub id: i64,
    pub request: Arc<HttpRequest>,
    pub response: Arc<HttpResponse>,
}

/// Storage contract for fetching captured pairs. A valid id is expected to
/// match exactly one pair.
pub trait PairLookup {
    fn find_by_id(&self, id: i64) -> Result<Vec<StoredPair>, String>;
}
