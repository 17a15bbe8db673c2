//! Mentor directory.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::MentorListing;
use crate::errors::AppResult;
use crate::services::MentorFilter;

/// Directory filters, both case-insensitive substring matches
#[derive(Debug, Deserialize, IntoParams)]
pub struct MentorQuery {
    /// Matched against name and bio
    pub search: Option<String>,
    /// Matched against expertise tags
    pub expertise: Option<String>,
}

impl From<MentorQuery> for MentorFilter {
    fn from(query: MentorQuery) -> Self {
        // Blank parameters mean "no filter"
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        MentorFilter {
            search: clean(query.search),
            expertise: clean(query.expertise),
        }
    }
}

pub fn mentor_routes() -> Router<AppState> {
    Router::new().route("/", get(list_mentors))
}

/// List approved mentors
#[utoipa::path(
    get,
    path = "/mentors",
    tag = "Mentors",
    security(("bearer_auth" = [])),
    params(MentorQuery),
    responses(
        (status = 200, description = "Approved mentors", body = Vec<MentorListing>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_mentors(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<MentorQuery>,
) -> AppResult<Json<Vec<MentorListing>>> {
    let mentors = state
        .mentor_service
        .list(current_user.id, query.into())
        .await?;

    Ok(Json(mentors))
}
