use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{FarmerQuery, QueryCreate, QueryStatus};
use crate::query_actor::{QueryAction, QueryError};

/// Client for farmer queries.
#[derive(Clone)]
pub struct QueryClient {
    inner: ResourceClient<FarmerQuery>,
}

impl_basic_client!(QueryClient, FarmerQuery, QueryError, query);

impl QueryClient {
    #[instrument(skip(self))]
    pub async fn submit_query(&self, params: QueryCreate) -> Result<String, QueryError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(query_id = %id, "Query submitted");
        Ok(id)
    }

    /// A farmer's own queries, newest first.
    #[instrument(skip(self))]
    pub async fn list_farmer_queries(&self, farmer_id: String) -> Result<Vec<FarmerQuery>, QueryError> {
        debug!("Sending request");
        let mut queries = self
            .inner
            .list(move |q: &FarmerQuery| q.farmer_id == farmer_id)
            .await?;
        queries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(queries)
    }

    /// Unanswered queries, oldest first, for the officers' inbox.
    #[instrument(skip(self))]
    pub async fn list_open_queries(&self) -> Result<Vec<FarmerQuery>, QueryError> {
        debug!("Sending request");
        let mut queries = self
            .inner
            .list(|q: &FarmerQuery| q.status == QueryStatus::Open)
            .await?;
        queries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(queries)
    }

    #[instrument(skip(self))]
    pub async fn respond_to_query(
        &self,
        id: String,
        officer_id: String,
        response: String,
    ) -> Result<FarmerQuery, QueryError> {
        debug!("Sending request");
        let query = self
            .inner
            .perform_action(id, QueryAction::Respond { officer_id, response })
            .await?;
        info!(query_id = %query.id, "Query answered");
        Ok(query)
    }
}
