use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One candidate email template in a named A/B test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmailVariant {
    pub id: Uuid,
    pub test_name: String,
    pub label: String,
    pub subject: String,
    pub traffic_weight: i32,
    pub auto_selection_paused: bool,
    pub sends: i64,
    pub opens: i64,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

/// Read-view of how a variant performs, derived from its counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPerformance {
    pub variant_id: Uuid,
    pub label: String,
    pub traffic_weight: i32,
    pub sends: i64,
    pub open_rate: f64,
    pub click_rate: f64,
}

impl From<&EmailVariant> for VariantPerformance {
    fn from(v: &EmailVariant) -> Self {
        let rate = |n: i64| {
            if v.sends > 0 {
                n as f64 / v.sends as f64 * 100.0
            } else {
                0.0
            }
        };

        Self {
            variant_id: v.id,
            label: v.label.clone(),
            traffic_weight: v.traffic_weight,
            sends: v.sends,
            open_rate: rate(v.opens),
            click_rate: rate(v.clicks),
        }
    }
}

/// Summary row for the A/B test overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestSummary {
    pub test_name: String,
    pub variant_count: i64,
    pub auto_selection_paused: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VariantSort {
    CreatedAt,
    Label,
    TrafficWeight,
    Sends,
}

impl VariantSort {
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Label => "label",
            Self::TrafficWeight => "traffic_weight",
            Self::Sends => "sends",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariantQuery {
    pub test_name: Option<String>,
    pub auto_selection_paused: Option<bool>,
    //------------------------------------
    /// `(column, ascending)` pairs applied in order; empty means oldest first.
    pub sort_by: Vec<(VariantSort, bool)>,
}

impl VariantQuery {
    pub fn for_test(test_name: &str) -> Self {
        Self {
            test_name: Some(test_name.to_string()),
            ..Self::default()
        }
    }
}
