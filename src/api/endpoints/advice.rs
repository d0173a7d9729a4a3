//! Health tips and nearby-specialist search links.

use axum::extract::{Path, Query};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::advice::{doctor_links, tips_for, Condition, DistanceRange, DoctorLinks};
use crate::api::error::ApiError;

#[derive(Serialize)]
pub struct ConditionEntry {
    pub key: Condition,
    pub label: &'static str,
    pub specialist: &'static str,
}

#[derive(Serialize)]
pub struct TipSection {
    pub heading: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Serialize)]
pub struct TipsResponse {
    pub condition: Condition,
    pub label: &'static str,
    pub sections: Vec<TipSection>,
}

#[derive(Deserialize)]
pub struct DoctorQuery {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub distance: DistanceRange,
}

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub specialist: &'static str,
    /// `None` until both city and state are given.
    pub links: Option<DoctorLinks>,
}

/// `GET /api/advice`: the conditions with advice tables.
pub async fn conditions() -> Json<Vec<ConditionEntry>> {
    Json(
        Condition::ALL
            .into_iter()
            .map(|c| ConditionEntry {
                key: c,
                label: c.display_name(),
                specialist: c.specialist(),
            })
            .collect(),
    )
}

/// `GET /api/advice/:condition`
pub async fn tips(Path(name): Path<String>) -> Result<Json<TipsResponse>, ApiError> {
    let condition: Condition = name
        .parse()
        .map_err(|_| ApiError::NotFound(format!("No health tips for '{name}'")))?;
    let tips = tips_for(condition.as_str())
        .ok_or_else(|| ApiError::NotFound(format!("No health tips for '{name}'")))?;

    Ok(Json(TipsResponse {
        condition,
        label: condition.display_name(),
        sections: tips
            .sections()
            .into_iter()
            .map(|(heading, items)| TipSection { heading, items })
            .collect(),
    }))
}

/// `GET /api/doctors/:condition?city=&state=&distance=`
///
/// Unknown conditions fall back to a general doctor search.
pub async fn doctors(
    Path(condition): Path<String>,
    Query(query): Query<DoctorQuery>,
) -> Json<DoctorsResponse> {
    let specialist = crate::advice::specialist_for(&condition);
    let links = doctor_links(&condition, &query.city, &query.state, query.distance);
    Json(DoctorsResponse { specialist, links })
}
