use serde::{Deserialize, Serialize};

/// Visitor analytics for a deployed portfolio site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalytics {
    pub total_views: u32,
    pub unique_visitors: u32,
    pub avg_time_on_site: u32, // seconds
    pub bounce_rate: f64,      // percent
    pub top_pages: Vec<PageViews>,
    pub views_over_time: Vec<DailyViews>,
    pub referrers: Vec<ReferrerCount>,
    pub devices: Vec<DeviceCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageViews {
    pub path: String,
    pub views: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: String,
    pub views: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferrerCount {
    pub source: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCount {
    #[serde(rename = "type")]
    pub device_type: String,
    pub count: u32,
}
