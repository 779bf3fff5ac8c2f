//! Dashboard operations: fetch, create, update, delete and search.
//!
//! See <https://login.circonus.com/resources/api/calls/dashboard>.

use circonus_core::cid::{validate_cid, ResourceKind};
use circonus_core::dashboard::Dashboard;
use circonus_core::search::{build_search_query, search_path, SearchFilter};

use crate::client::Api;
use crate::error::ApiResult;
use crate::transport::Transport;

const KIND: ResourceKind = ResourceKind::Dashboard;

impl<T: Transport> Api<T> {
    /// Retrieve one dashboard by CID.
    ///
    /// Fails without a request if `cid` is absent, empty, or not of the form
    /// `/dashboard/<digits>`.
    pub async fn fetch_dashboard(&self, cid: Option<&str>) -> ApiResult<Dashboard> {
        let cid = validate_cid(KIND, cid)?;
        tracing::debug!(cid, "Fetching dashboard");
        self.get_json(cid).await
    }

    /// Retrieve every dashboard visible to the token.
    pub async fn fetch_dashboards(&self) -> ApiResult<Vec<Dashboard>> {
        let dashboards: Vec<Dashboard> = self.get_json(KIND.base_path()).await?;
        tracing::debug!(count = dashboards.len(), "Fetched dashboards");
        Ok(dashboards)
    }

    /// Create a dashboard and return it as stored, with its new CID.
    ///
    /// Any CID already on `dashboard` is not sent; the service assigns one.
    pub async fn create_dashboard(&self, dashboard: &Dashboard) -> ApiResult<Dashboard> {
        let created: Dashboard = self
            .post_json(KIND.base_path(), &dashboard.write_payload(false))
            .await?;
        tracing::info!(cid = created.cid().unwrap_or("none"), "Created dashboard");
        Ok(created)
    }

    /// Replace a dashboard with `dashboard` (full-object PUT to its CID).
    pub async fn update_dashboard(&self, dashboard: &Dashboard) -> ApiResult<Dashboard> {
        let cid = validate_cid(KIND, dashboard.cid())?;
        let updated = self.put_json(cid, &dashboard.write_payload(true)).await?;
        tracing::info!(cid, "Updated dashboard");
        Ok(updated)
    }

    /// Delete the dashboard identified by `dashboard.cid`.
    pub async fn delete_dashboard(&self, dashboard: &Dashboard) -> ApiResult<bool> {
        self.delete_dashboard_by_cid(dashboard.cid()).await
    }

    /// Delete a dashboard by CID. Returns `true` once the request succeeds.
    pub async fn delete_dashboard_by_cid(&self, cid: Option<&str>) -> ApiResult<bool> {
        let cid = validate_cid(KIND, cid)?;
        let deleted = self.delete_path(cid).await?;
        tracing::info!(cid, "Deleted dashboard");
        Ok(deleted)
    }

    /// Search dashboards by free-text query and/or filter.
    ///
    /// With neither a query nor any filter value this is
    /// [`fetch_dashboards`](Self::fetch_dashboards).
    pub async fn search_dashboards(
        &self,
        query: Option<&str>,
        filter: Option<&SearchFilter>,
    ) -> ApiResult<Vec<Dashboard>> {
        let Some(qs) = build_search_query(query, filter) else {
            return self.fetch_dashboards().await;
        };

        let path = search_path(KIND.base_path(), &qs);
        let dashboards: Vec<Dashboard> = self.get_json(&path).await?;
        tracing::debug!(query = %qs, count = dashboards.len(), "Searched dashboards");
        Ok(dashboards)
    }
}
