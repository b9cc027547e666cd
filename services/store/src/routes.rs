//! Store service routes

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::TypedHeader;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{AppJson, JwtToken},
    models::{
        AccountExistsResponse, AuthRequest, EmailRequest, Item, MessageResponse, Purchase,
        RegistrationRequest, TokenResponse, VerifyResponse,
    },
    state::AppState,
};

/// Create the router for the store service
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/items", get(get_items).post(add_item))
        .route("/purchase", post(make_purchase))
        .route("/auth", post(authenticate))
        .route("/verify", post(verify_token))
        .route("/check-account", post(check_account))
        .route("/register", post(register))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Service banner
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse::new(
        "Auth API. Please use POST /auth & POST /verify for authentication",
    ))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "store-service"
    }))
}

/// List catalog items
pub async fn get_items(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let items = state.catalog.list_items().await?;
    Ok(Json(items))
}

/// Add a catalog item
pub async fn add_item(
    State(state): State<AppState>,
    AppJson(item): AppJson<Item>,
) -> ApiResult<impl IntoResponse> {
    state.catalog.add_item(item).await?;
    Ok(Json(MessageResponse::new("Item added successfully")))
}

/// Record a purchase
pub async fn make_purchase(
    State(state): State<AppState>,
    AppJson(purchase): AppJson<Purchase>,
) -> ApiResult<impl IntoResponse> {
    state.catalog.record_purchase(purchase).await?;
    Ok(Json(MessageResponse::new("Purchase recorded successfully")))
}

/// Sign in with email and password
pub async fn authenticate(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AuthRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Authentication attempt");

    let token = state.credentials.authenticate(&payload).await?;
    Ok(Json(TokenResponse {
        message: "success".to_string(),
        token,
    }))
}

/// Verify the token sent in the `jwt-token` header
pub async fn verify_token(
    State(state): State<AppState>,
    token: Option<TypedHeader<JwtToken>>,
) -> ApiResult<impl IntoResponse> {
    let TypedHeader(JwtToken(token)) = token.ok_or(ApiError::TokenMissing)?;

    state.credentials.verify_token(&token)?;
    Ok(Json(VerifyResponse {
        status: "logged in".to_string(),
        message: "success".to_string(),
    }))
}

/// Tell whether an account exists for an email
pub async fn check_account(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EmailRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_exists = state.credentials.check_account_exists(&payload.email).await?;
    Ok(Json(AccountExistsResponse { user_exists }))
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegistrationRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("Registration attempt");

    let token = state.credentials.register(payload).await?;
    Ok(Json(TokenResponse {
        message: "User registered successfully".to_string(),
        token,
    }))
}
