use serde::Deserialize;

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct FeedQuery {
    /// Pages the visitor already has on screen.
    pub pages: Option<usize>,
}

/// Prefix of the per-variant inputs on the weights form (`weight_<uuid>`).
pub const WEIGHT_FIELD_PREFIX: &str = "weight_";
