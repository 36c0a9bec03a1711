use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;

use retention_core::domain::conversation::ConversationTurn;
use retention_core::domain::customer::{CustomerId, CustomerProfile};
use retention_core::domain::dialogue::{DialogueResponse, ScriptedReply};
use retention_core::engine::DialogueEngine;
use retention_core::errors::{ApplicationError, InterfaceError};
use retention_core::insights::{analyze_profile, ProfileAnalysis};
use retention_core::replies::{escalation_reply, offer_reply, summarize_conversation};
use retention_store::{
    ConversationMetrics, ConversationRepository, CustomerLookup, RepositoryError, TicketSequence,
};

use crate::health;

pub const DEFAULT_USER_ID: &str = "user_001";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn DialogueEngine>,
    pub customers: Arc<dyn CustomerLookup>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub metrics: Arc<ConversationMetrics>,
    pub tickets: Arc<TicketSequence>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub error: String,
}

type ApiFailure = (StatusCode, Json<ApiError>);

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

fn default_offer_type() -> String {
    "offer".to_string()
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(rename = "userId", default = "default_user_id")]
    user_id: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct OfferResponseRequest {
    #[serde(rename = "userId", default = "default_user_id")]
    user_id: String,
    #[serde(rename = "offerType", default = "default_offer_type")]
    offer_type: String,
    #[serde(default)]
    accepted: bool,
}

#[derive(Debug, Deserialize)]
struct EscalateRequest {
    #[serde(rename = "userId", default = "default_user_id")]
    user_id: String,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/offer-response", post(offer_response))
        .route("/api/escalate", post(escalate))
        .route("/api/health", get(health::health))
        .route("/api/metrics", get(health::metrics))
        .route("/api/customer/{user_id}", get(customer))
        .route("/api/customer/{user_id}/analysis", get(customer_analysis))
        .route("/api/conversations/{user_id}", get(conversations))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(cors)
        .with_state(state)
}

async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DialogueResponse>, ApiFailure> {
    let correlation_id = Uuid::new_v4().to_string();
    let request: ChatRequest = parse_body(&body, &correlation_id)?;
    let customer_id = CustomerId(request.user_id);

    let profile = resolve_profile(&state, &customer_id, &correlation_id).await?;
    let classified = state.engine.handle(&profile, &request.message);
    let reply = classified.response;

    state.metrics.record_chat(&reply);
    state
        .conversations
        .append(&customer_id, ConversationTurn::record(request.message, &reply))
        .await
        .map_err(|error| persistence_failure(error, &correlation_id))?;

    info!(
        event_name = "server.chat.responded",
        correlation_id = %correlation_id,
        customer_id = %customer_id,
        intent = classified.intent.as_str(),
        action = reply.action.as_str(),
        latency_ms = reply.latency_ms,
        "chat message answered"
    );

    Ok(Json(reply))
}

async fn offer_response(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScriptedReply>, ApiFailure> {
    let correlation_id = Uuid::new_v4().to_string();
    let request: OfferResponseRequest = parse_body(&body, &correlation_id)?;

    state.metrics.record_offer_response(request.accepted);

    info!(
        event_name = "server.offer.answered",
        correlation_id = %correlation_id,
        customer_id = %request.user_id,
        offer_type = %request.offer_type,
        accepted = request.accepted,
        "offer response recorded"
    );

    Ok(Json(offer_reply(&request.offer_type, request.accepted)))
}

async fn escalate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScriptedReply>, ApiFailure> {
    let correlation_id = Uuid::new_v4().to_string();
    let request: EscalateRequest = parse_body(&body, &correlation_id)?;
    let customer_id = CustomerId(request.user_id);

    let turns = state
        .conversations
        .list_for_customer(&customer_id)
        .await
        .map_err(|error| persistence_failure(error, &correlation_id))?;
    let ticket_number = state.tickets.next_ticket();
    state.metrics.record_escalation();

    info!(
        event_name = "server.escalation.ticket_created",
        correlation_id = %correlation_id,
        customer_id = %customer_id,
        ticket_number = %ticket_number,
        turns = turns.len(),
        "conversation escalated to human support"
    );

    Ok(Json(escalation_reply(&ticket_number, summarize_conversation(&turns))))
}

async fn customer(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CustomerProfile>, ApiFailure> {
    let correlation_id = Uuid::new_v4().to_string();
    let profile = resolve_profile(&state, &CustomerId(user_id), &correlation_id).await?;
    Ok(Json(profile))
}

async fn customer_analysis(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileAnalysis>, ApiFailure> {
    let correlation_id = Uuid::new_v4().to_string();
    let profile = resolve_profile(&state, &CustomerId(user_id), &correlation_id).await?;
    Ok(Json(analyze_profile(&profile)))
}

async fn conversations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ConversationTurn>>, ApiFailure> {
    let correlation_id = Uuid::new_v4().to_string();
    let turns = state
        .conversations
        .list_for_customer(&CustomerId(user_id))
        .await
        .map_err(|error| persistence_failure(error, &correlation_id))?;
    Ok(Json(turns))
}

async fn not_found() -> ApiFailure {
    (StatusCode::NOT_FOUND, Json(ApiError { error: "Not found".to_string() }))
}

async fn resolve_profile(
    state: &AppState,
    customer_id: &CustomerId,
    correlation_id: &str,
) -> Result<CustomerProfile, ApiFailure> {
    state
        .customers
        .resolve(customer_id)
        .await
        .map_err(|error| persistence_failure(error, correlation_id))
}

fn parse_body<T: DeserializeOwned>(body: &[u8], correlation_id: &str) -> Result<T, ApiFailure> {
    serde_json::from_slice(body).map_err(|error| {
        failure(ApplicationError::MalformedRequest(error.to_string()).into_interface(correlation_id))
    })
}

fn persistence_failure(error: RepositoryError, correlation_id: &str) -> ApiFailure {
    failure(ApplicationError::Persistence(error.to_string()).into_interface(correlation_id))
}

fn failure(error: InterfaceError) -> ApiFailure {
    let status = match error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error!(
        event_name = "server.request.failed",
        correlation_id = %error.correlation_id(),
        status = status.as_u16(),
        error = %error,
        "request failed"
    );

    (status, Json(ApiError { error: error.message().to_string() }))
}
