use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceView {
    pub platform: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceView {
    pub browser: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub date: String,
    pub count: u64,
}

/// Aggregated view counters for one published page.
#[derive(Debug, Clone, FromRow)]
pub struct ShareAnalyticsRow {
    pub view_devices: Json<Vec<DeviceView>>,
    pub view_sources: Json<Vec<SourceView>>,
    pub page_views: Json<Vec<PageView>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAnalytics {
    pub view_devices: Vec<DeviceView>,
    pub view_sources: Vec<SourceView>,
    pub page_views: Vec<PageView>,
}

impl From<ShareAnalyticsRow> for ShareAnalytics {
    fn from(row: ShareAnalyticsRow) -> Self {
        ShareAnalytics {
            view_devices: row.view_devices.0,
            view_sources: row.view_sources.0,
            page_views: row.page_views.0,
        }
    }
}
