//! Metric cluster operations: fetch, create, update, delete and search.

use circonus_core::cid::{validate_cid, ResourceKind};
use circonus_core::metric_cluster::{ClusterExtras, MetricCluster};
use circonus_core::search::{build_search_query, search_path, SearchFilter};

use crate::client::Api;
use crate::error::ApiResult;
use crate::transport::Transport;

const KIND: ResourceKind = ResourceKind::MetricCluster;

impl<T: Transport> Api<T> {
    /// Retrieve one metric cluster by CID, optionally with matching metrics
    /// or matching check UUIDs included.
    pub async fn fetch_metric_cluster(
        &self,
        cid: Option<&str>,
        extras: ClusterExtras,
    ) -> ApiResult<MetricCluster> {
        let cid = validate_cid(KIND, cid)?;
        tracing::debug!(cid, ?extras, "Fetching metric cluster");
        self.get_json(&extras.apply(cid)).await
    }

    pub async fn fetch_metric_clusters(&self) -> ApiResult<Vec<MetricCluster>> {
        let clusters: Vec<MetricCluster> = self.get_json(KIND.base_path()).await?;
        tracing::debug!(count = clusters.len(), "Fetched metric clusters");
        Ok(clusters)
    }

    /// Create a metric cluster. Any CID already set is not sent.
    pub async fn create_metric_cluster(&self, cluster: &MetricCluster) -> ApiResult<MetricCluster> {
        let created: MetricCluster = self
            .post_json(KIND.base_path(), &cluster.write_payload(false))
            .await?;
        tracing::info!(cid = created.cid().unwrap_or("none"), "Created metric cluster");
        Ok(created)
    }

    pub async fn update_metric_cluster(&self, cluster: &MetricCluster) -> ApiResult<MetricCluster> {
        let cid = validate_cid(KIND, cluster.cid())?;
        let updated = self.put_json(cid, &cluster.write_payload(true)).await?;
        tracing::info!(cid, "Updated metric cluster");
        Ok(updated)
    }

    pub async fn delete_metric_cluster(&self, cluster: &MetricCluster) -> ApiResult<bool> {
        self.delete_metric_cluster_by_cid(cluster.cid()).await
    }

    pub async fn delete_metric_cluster_by_cid(&self, cid: Option<&str>) -> ApiResult<bool> {
        let cid = validate_cid(KIND, cid)?;
        let deleted = self.delete_path(cid).await?;
        tracing::info!(cid, "Deleted metric cluster");
        Ok(deleted)
    }

    /// Search metric clusters; falls back to
    /// [`fetch_metric_clusters`](Self::fetch_metric_clusters) when there is
    /// nothing to search for.
    pub async fn search_metric_clusters(
        &self,
        query: Option<&str>,
        filter: Option<&SearchFilter>,
    ) -> ApiResult<Vec<MetricCluster>> {
        let Some(qs) = build_search_query(query, filter) else {
            return self.fetch_metric_clusters().await;
        };

        let clusters: Vec<MetricCluster> =
            self.get_json(&search_path(KIND.base_path(), &qs)).await?;
        tracing::debug!(query = %qs, count = clusters.len(), "Searched metric clusters");
        Ok(clusters)
    }
}
