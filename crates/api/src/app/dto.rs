use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use stockwatch_inventory::{Dataset, DashboardView};

// -------------------------
// Request DTOs
// -------------------------

/// Requested table sizes. Absent or blank values fall back to the defaults;
/// out-of-range values are clamped by the view.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub n_under: Option<usize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub n_over: Option<usize>,
}

impl DashboardQuery {
    /// Dashboard URL that reproduces these counts.
    pub fn page_location(&self) -> String {
        let params: Vec<String> = [("n_under", self.n_under), ("n_over", self.n_over)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect();
        if params.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", params.join("&"))
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a non-negative integer, got '{s}'"))),
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub session_id: String,
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub view: DashboardView,
}

impl DashboardResponse {
    pub fn new(session_id: impl ToString, dataset: &Dataset, view: DashboardView) -> Self {
        Self {
            session_id: session_id.to_string(),
            generation: dataset.generation(),
            generated_at: dataset.generated_at(),
            view,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub session_id: String,
    pub generation: u64,
    pub total_skus: usize,
}
