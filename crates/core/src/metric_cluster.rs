//! Metric cluster data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// A named, tagged group of metric queries used for aggregate computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricCluster {
    #[serde(rename = "_cid", skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Metric names matched by the queries. Only present when requested with
    /// [`ClusterExtras::Metrics`].
    #[serde(rename = "_matching_metrics", skip_serializing_if = "Option::is_none")]
    pub matching_metrics: Option<Vec<String>>,
    /// Check UUID to matched metric names. Only present when requested with
    /// [`ClusterExtras::Uuids`].
    #[serde(rename = "_matching_uuid_metrics", skip_serializing_if = "Option::is_none")]
    pub matching_uuid_metrics: Option<BTreeMap<String, Vec<String>>>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub queries: Vec<MetricQuery>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl MetricCluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn cid(&self) -> Option<&str> {
        self.cid.as_deref()
    }

    /// Borrowed view of the writable fields for create/update requests.
    ///
    /// The `_matching_*` fields are never sent. The CID is only included
    /// when `include_cid` is set.
    pub fn write_payload(&self, include_cid: bool) -> MetricClusterPayload<'_> {
        MetricClusterPayload {
            cid: if include_cid { self.cid.as_deref() } else { None },
            description: &self.description,
            name: &self.name,
            queries: &self.queries,
            tags: &self.tags,
        }
    }
}

/// Wire body for metric cluster create/update requests.
#[derive(Debug, Serialize)]
pub struct MetricClusterPayload<'a> {
    #[serde(rename = "_cid", skip_serializing_if = "Option::is_none")]
    pub cid: Option<&'a str>,
    pub description: &'a str,
    pub name: &'a str,
    pub queries: &'a [MetricQuery],
    pub tags: &'a [String],
}

/// One metric selection pattern and how matches are aggregated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricQuery {
    /// Metric name pattern, e.g. `*Req*`.
    pub query: String,
    /// Aggregation, e.g. `average` or `sum`.
    #[serde(rename = "type")]
    pub query_type: String,
}

impl MetricQuery {
    pub fn new(query: impl Into<String>, query_type: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            query_type: query_type.into(),
        }
    }
}

/// Optional extra data to request when fetching a single cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClusterExtras {
    #[default]
    None,
    /// Include `_matching_metrics`.
    Metrics,
    /// Include `_matching_uuid_metrics`.
    Uuids,
}

impl ClusterExtras {
    /// Value of the `extra` query parameter, if any.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Metrics => Some("_matching_metrics"),
            Self::Uuids => Some("_matching_uuid_metrics"),
        }
    }

    /// Parse the short names accepted on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" | "none" => Some(Self::None),
            "metrics" => Some(Self::Metrics),
            "uuids" => Some(Self::Uuids),
            _ => None,
        }
    }

    /// Append the `extra` parameter to a CID path.
    pub fn apply(self, cid: &str) -> String {
        match self.query_value() {
            Some(extra) => {
                let qs = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("extra", extra)
                    .finish();
                format!("{cid}?{qs}")
            }
            None => cid.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> MetricCluster {
        MetricCluster {
            cid: Some("/metric_cluster/1234".into()),
            name: "test".into(),
            queries: vec![MetricQuery::new("*Req*", "average")],
            ..MetricCluster::default()
        }
    }

    #[test]
    fn serializes_expected_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "_cid": "/metric_cluster/1234",
                "description": "",
                "name": "test",
                "queries": [{ "query": "*Req*", "type": "average" }],
                "tags": [],
            })
        );
    }

    #[test]
    fn round_trip_with_extras() {
        let mut cluster = sample();
        cluster.tags = vec!["dc:sfo1".into()];
        cluster.matching_metrics = Some(vec!["cpu`idle".into()]);
        cluster.matching_uuid_metrics = Some(BTreeMap::from([(
            "44444444-4444-4444-4444-444444444444".to_string(),
            vec!["cpu`idle".to_string()],
        )]));

        let encoded = serde_json::to_vec(&cluster).unwrap();
        let decoded: MetricCluster = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, cluster);
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let cluster: MetricCluster = serde_json::from_str(
            r#"{"_cid": "/metric_cluster/1", "name": "n", "tags": null, "queries": null, "description": null}"#,
        )
        .unwrap();
        assert_eq!(cluster.cid(), Some("/metric_cluster/1"));
        assert!(cluster.tags.is_empty());
        assert!(cluster.queries.is_empty());
        assert_eq!(cluster.description, "");
    }

    #[test]
    fn write_payload_omits_read_only_fields() {
        let mut cluster = sample();
        cluster.matching_metrics = Some(vec!["m".into()]);

        let create = serde_json::to_value(cluster.write_payload(false)).unwrap();
        assert!(create.get("_cid").is_none());
        assert!(create.get("_matching_metrics").is_none());

        let update = serde_json::to_value(cluster.write_payload(true)).unwrap();
        assert_eq!(update["_cid"], "/metric_cluster/1234");
        assert!(update.get("_matching_metrics").is_none());
    }

    #[test]
    fn extras_paths() {
        let cid = "/metric_cluster/1234";
        assert_eq!(ClusterExtras::None.apply(cid), cid);
        assert_eq!(
            ClusterExtras::Metrics.apply(cid),
            "/metric_cluster/1234?extra=_matching_metrics"
        );
        assert_eq!(
            ClusterExtras::Uuids.apply(cid),
            "/metric_cluster/1234?extra=_matching_uuid_metrics"
        );
    }

    #[test]
    fn extras_parse() {
        assert_eq!(ClusterExtras::parse("metrics"), Some(ClusterExtras::Metrics));
        assert_eq!(ClusterExtras::parse("uuids"), Some(ClusterExtras::Uuids));
        assert_eq!(ClusterExtras::parse(""), Some(ClusterExtras::None));
        assert_eq!(ClusterExtras::parse("bogus"), None);
    }
}
