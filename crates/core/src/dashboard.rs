//! Dashboard and widget data model.
//!
//! Field names follow the remote JSON schema. Optional fields are `Option<T>`
//! and are only emitted when set; the fields the service always expects are
//! plain values and are always emitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// A dashboard: a grid of widgets plus display options.
///
/// Fields prefixed with `_` on the wire are assigned by the service. They are
/// decoded from responses but never included in write payloads (see
/// [`Dashboard::write_payload`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    #[serde(rename = "_cid", skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(rename = "_active", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Creation time, unix seconds.
    #[serde(rename = "_created", skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
    #[serde(rename = "_created_by", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "_dashboard_uuid", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Last modification time, unix seconds.
    #[serde(rename = "_last_modified", skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub account_default: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub grid_layout: GridLayout,
    #[serde(deserialize_with = "null_as_default")]
    pub options: DashboardOptions,
    #[serde(deserialize_with = "null_as_default")]
    pub shared: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub widgets: Vec<Widget>,
}

impl Dashboard {
    /// New, unsaved dashboard with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// The CID as a borrowed string, if one has been assigned.
    pub fn cid(&self) -> Option<&str> {
        self.cid.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(unix_seconds)
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified.and_then(unix_seconds)
    }

    /// Borrowed view of the writable fields, used as the body of create and
    /// update requests.
    ///
    /// Server-assigned read-only fields are always left out. The CID is only
    /// included when `include_cid` is set (updates), never on create.
    pub fn write_payload(&self, include_cid: bool) -> DashboardPayload<'_> {
        DashboardPayload {
            cid: if include_cid { self.cid.as_deref() } else { None },
            account_default: self.account_default,
            grid_layout: &self.grid_layout,
            options: &self.options,
            shared: self.shared,
            title: &self.title,
            widgets: &self.widgets,
        }
    }
}

/// Wire body for dashboard create/update requests.
#[derive(Debug, Serialize)]
pub struct DashboardPayload<'a> {
    #[serde(rename = "_cid", skip_serializing_if = "Option::is_none")]
    pub cid: Option<&'a str>,
    pub account_default: bool,
    pub grid_layout: &'a GridLayout,
    pub options: &'a DashboardOptions,
    pub shared: bool,
    pub title: &'a str,
    pub widgets: &'a [Widget],
}

fn unix_seconds(secs: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)
}

/// Grid dimensions in abstract layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub height: u32,
    pub width: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_configs: Option<Vec<AccessConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen_hide_title: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_grid: Option<bool>,
    /// Linked widget pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkages: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_text: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_size: Option<u32>,
}

/// Shared-access (public link) settings for a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_dash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen_hide_title: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_text: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_size: Option<u32>,
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A positioned box on the dashboard grid.
///
/// `widget_type` selects which subset of [`WidgetSettings`] is meaningful:
/// `alerts`, `chart`, `cluster`, `forecast`, `gauge`, `graph`, `html`,
/// `list`, `status` or `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Widget {
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Grid cell of the top-left corner, e.g. `"a0"`.
    #[serde(deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub settings: WidgetSettings,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub widget_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub widget_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
}

/// The `period` setting, which is numeric for some widget types and a string
/// for others.
///
/// Gauges and text widgets carry a number of seconds; graph widgets carry a
/// string such as `"2000"` or `"auto"`. The variant decoded is the variant
/// written back, so a round trip keeps the wire type. Variant order matters:
/// a number decodes into the first numeric variant that can hold it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetPeriod {
    Seconds(u64),
    Signed(i64),
    Fractional(f64),
    Text(String),
}

impl From<u64> for WidgetPeriod {
    fn from(secs: u64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<&str> for WidgetPeriod {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for WidgetPeriod {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Free-form widget settings. Trailing comments list the widget types that
/// use each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>, // alerts, clusters, gauges, graphs, lists, status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_status_settings: Option<AgentStatusSettings>, // status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>, // clusters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoformat: Option<bool>, // text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_format: Option<String>, // text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>, // charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_uuid: Option<String>, // gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<u64>, // clusters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>, // clusters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_groups: Option<Vec<u64>>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>, // status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datapoints: Option<Vec<ChartDatapoint>>, // charts, text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_window: Option<String>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<ChartDefinition>, // charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependents: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_autoformat: Option<bool>, // gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>, // forecasts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>, // gauges
    #[serde(rename = "graph_id", default, skip_serializing_if = "Option::is_none")]
    pub graph_uuid: Option<String>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_xaxis: Option<bool>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_yaxis: Option<bool>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_status_settings: Option<HostStatusSettings>, // status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_inline: Option<bool>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_loc: Option<String>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_size: Option<String>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_wrap: Option<bool>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>, // clusters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>, // lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>, // html
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_display_name: Option<String>, // gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>, // gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_hours: Option<Vec<u32>>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_set_id: Option<String>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<WidgetPeriod>, // gauges, text (seconds); graphs (text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_high: Option<i64>, // gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_low: Option<i64>, // gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime: Option<bool>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_limit: Option<String>, // forecasts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_usage: Option<String>, // forecasts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>, // alerts, lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_flags: Option<bool>, // graphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>, // clusters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_set: Option<Vec<String>>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>, // clusters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>, // forecasts, gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<String>, // alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>, // alerts, charts, forecasts, gauges, html
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_format: Option<String>, // text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>, // forecasts
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub settings_type: Option<String>, // gauges, lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_default: Option<bool>, // text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>, // gauges, text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<String>>, // alerts
}

/// A metric or metric-cluster reference plotted by chart and text widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDatapoint {
    #[serde(rename = "_cluster_title", default, skip_serializing_if = "Option::is_none")]
    pub cluster_title: Option<String>,
    #[serde(rename = "_label", default, skip_serializing_if = "Option::is_none")]
    pub cluster_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(rename = "_metric_type", default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    #[serde(rename = "_check_id", default, skip_serializing_if = "Option::is_none")]
    pub check_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_autoformat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<ChartLegend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
    #[serde(rename = "pop_onhover", default, skip_serializing_if = "Option::is_none")]
    pub pop_on_hover: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wedge_labels: Option<WedgeLabels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wedge_values: Option<WedgeValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLegend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub legend_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WedgeLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_chart: Option<bool>,
    #[serde(rename = "tooltips", default, skip_serializing_if = "Option::is_none")]
    pub tool_tips: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WedgeValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
}

/// Color bands for forecast and gauge widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>, // forecasts, gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>, // forecasts, gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<bool>, // gauges
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatusSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_agent_types: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_contact: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_feeds: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_setup: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_skew: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_updates: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStatusSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter_set: Option<Vec<String>>,
}
