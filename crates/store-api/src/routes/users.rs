//! 사용자 계정 endpoint.
//!
//! `/user` 그룹은 공개, `/protect/user` 그룹은 인증이 필요합니다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use store_core::{NewUser, User, UserUpdate};
use validator::Validate;

use super::{data, validate_request, DataResponse};
use crate::auth::{require_auth, Authenticated, IssuedToken, TokenVerifier};
use crate::services::ServiceError;
use crate::state::AppState;

/// 사용자 생성 요청.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자여야 합니다"))]
    pub name: String,
    #[validate(email(message = "유효한 이메일 주소가 아닙니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호가 비어 있습니다"))]
    pub password: String,
    #[validate(length(min = 1, max = 32, message = "역할은 1-32자여야 합니다"))]
    pub role: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// 사용자 수정 요청 (전체 필드 교체).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자여야 합니다"))]
    pub name: String,
    #[validate(email(message = "유효한 이메일 주소가 아닙니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호가 비어 있습니다"))]
    pub password: String,
    #[validate(length(min = 1, max = 32, message = "역할은 1-32자여야 합니다"))]
    pub role: String,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "이메일이 비어 있습니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호가 비어 있습니다"))]
    pub password: String,
}

/// GET /user
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<User>>>, ServiceError> {
    let users = state.accounts.list_users().await?;
    Ok(data(users))
}

/// POST /user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<DataResponse<User>>), ServiceError> {
    validate_request(&request)?;
    let user = state.accounts.create_user(request.into()).await?;
    Ok((StatusCode::CREATED, data(user)))
}

/// GET /user/id/{id}
pub async fn get_user_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DataResponse<User>>, ServiceError> {
    Ok(data(state.accounts.get_user_by_id(id).await?))
}

/// GET /user/email/{email}
pub async fn get_user_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<DataResponse<User>>, ServiceError> {
    Ok(data(state.accounts.get_user_by_email(&email).await?))
}

/// GET /user/username/{username}
pub async fn get_user_by_username(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<DataResponse<User>>, ServiceError> {
    Ok(data(state.accounts.get_user_by_username(&username).await?))
}

/// PUT /user/{id}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<DataResponse<User>>, ServiceError> {
    validate_request(&request)?;
    let user = state.accounts.update_user(id, request.into()).await?;
    Ok(data(user))
}

/// DELETE /user/{id}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    state.accounts.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /user/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<IssuedToken>, ServiceError> {
    validate_request(&request)?;
    let token = state
        .accounts
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(token))
}

/// GET /protect/user/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Authenticated(principal): Authenticated,
) -> Result<Json<DataResponse<User>>, ServiceError> {
    Ok(data(state.accounts.get_user_by_id(principal.user_id).await?))
}

/// 공개 사용자 라우터.
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/id/{id}", get(get_user_by_id))
        .route("/email/{email}", get(get_user_by_email))
        .route("/username/{username}", get(get_user_by_username))
        .route("/login", post(login))
        .route("/{id}", put(update_user).delete(delete_user))
}

/// 인증이 필요한 사용자 라우터.
pub fn protected_users_router(verifier: Arc<TokenVerifier>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(verifier, require_auth))
}
