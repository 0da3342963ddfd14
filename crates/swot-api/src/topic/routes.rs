use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use swot_db::models::Topic;
use uuid::Uuid;

use super::model::{
    CreateTopicRequest, CreateTopicResponse, ImportRequest, RenameTopicRequest, SearchQuery,
};
use crate::{
    ApiState,
    auth::CurrentUser,
    error::ApiError,
    hierarchy::{HierarchyError, HierarchyNode, ImportSummary, search_hierarchy_by_name},
    validation::validate_payload,
};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(get_hierarchy).post(create_topic))
        .route("/topics/search", get(search_topics))
        .route("/topics/import", post(import_topics))
        .route(
            "/topics/{id}",
            get(get_topic).patch(rename_topic).delete(delete_topic),
        )
}

/// Every root topic of the caller with quizzes and subtopics attached
async fn get_hierarchy(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<HierarchyNode>>, ApiError> {
    let hierarchy = state.hierarchy.get_quizzes_and_topics(&user).await?;
    Ok(Json(hierarchy))
}

async fn create_topic(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<CreateTopicResponse>), ApiError> {
    validate_payload(&payload)?;

    let (topic, user) = state.hierarchy.create_topic(payload.into(), &user).await?;
    Ok((StatusCode::CREATED, Json(CreateTopicResponse { topic, user })))
}

/// Topics of the caller's hierarchy named exactly `name`, in tree order
async fn search_topics(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<HierarchyNode>>, ApiError> {
    validate_payload(&query)?;

    let hierarchy = state.hierarchy.get_quizzes_and_topics(&user).await?;
    let matches = search_hierarchy_by_name(&hierarchy, &query.name)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matches))
}

async fn import_topics(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ImportRequest>,
) -> Result<(StatusCode, Json<ImportSummary>), ApiError> {
    if payload.topics.is_empty() {
        return Err(ApiError::Validation(
            "topics: At least one topic is required".to_string(),
        ));
    }

    let parent = match payload.parent {
        Some(id) => Some(
            state
                .hierarchy
                .find_topic(id)
                .await?
                .ok_or(HierarchyError::ParentNotFound(id))?,
        ),
        None => None,
    };

    let summary = state
        .hierarchy
        .import_topic_tree(user, payload.topics, parent.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// One owned topic with its full subtree
async fn get_topic(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HierarchyNode>, ApiError> {
    let topic = state.hierarchy.owned_topic(id, &user).await?;
    let node = state.hierarchy.get_quizzes_and_subtopics(topic).await?;
    Ok(Json(node))
}

async fn rename_topic(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RenameTopicRequest>,
) -> Result<Json<Topic>, ApiError> {
    validate_payload(&payload)?;

    let topic = state.hierarchy.rename_topic(id, &payload.name, &user).await?;
    Ok(Json(topic))
}

/// Delete an owned topic with everything under it
async fn delete_topic(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Topic>, ApiError> {
    let topic = state.hierarchy.owned_topic(id, &user).await?;
    let deleted = state.hierarchy.delete_topic(&topic).await?;
    Ok(Json(deleted))
}
