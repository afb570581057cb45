use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::engine::{catalog_view, ensure_min_selection, Recommender, Session};
use crate::error::AppError;
use crate::models::{
    CatalogResponse, HealthResponse, Interest, RecommendRequest, SelectionSet, SessionResponse, ToggleInterestRequest,
};
use crate::services::SessionStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub sessions: SessionStore,
}

/// Configure all flow routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/catalog", web::get().to(get_catalog))
        .route("/recommend", web::post().to(recommend))
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/start", web::post().to(start))
        .route("/sessions/{id}/interests", web::post().to(toggle_interest))
        .route("/sessions/{id}/submit", web::post().to(submit))
        .route("/sessions/{id}/restart", web::post().to(restart));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        model: state.recommender.model().summary(),
        active_sessions: state.sessions.len(),
    })
}

/// Interest catalog with nothing selected
///
/// GET /api/v1/catalog
async fn get_catalog() -> HttpResponse {
    HttpResponse::Ok().json(CatalogResponse {
        categories: catalog_view(&SelectionSet::new()),
    })
}

/// Session-less recommendation
///
/// POST /api/v1/recommend
///
/// Request body:
/// ```json
/// { "interests": ["coding", "mathematics"] }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return Err(errors.into());
    }

    let selected: SelectionSet = req.interests.iter().copied().collect();
    ensure_min_selection(&selected)?;

    let recommendation = state.recommender.recommend(&selected)?;
    Ok(HttpResponse::Ok().json(recommendation))
}

/// Start a new session on the Welcome page
///
/// POST /api/v1/sessions
async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (session_id, handle) = state.sessions.create().await;
    let view = handle.lock().await.render(&state.recommender)?;

    tracing::info!("Session {} started", session_id);

    Ok(HttpResponse::Created().json(SessionResponse { session_id, view }))
}

/// Render the current page of a session
///
/// GET /api/v1/sessions/{id}
async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    apply(&state, path.into_inner(), |_| Ok(())).await
}

/// DELETE /api/v1/sessions/{id}
async fn delete_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.sessions.remove(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/v1/sessions/{id}/start
async fn start(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    apply(&state, path.into_inner(), Session::start).await
}

/// Check or uncheck an interest
///
/// POST /api/v1/sessions/{id}/interests
///
/// Request body:
/// ```json
/// { "interest": "coding", "selected": true }
/// ```
async fn toggle_interest(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<ToggleInterestRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate()?;
    let interest: Interest = req.interest.parse()?;
    let selected = req.selected;
    apply(&state, path.into_inner(), |session| session.toggle(interest, selected)).await
}

/// Show recommendations once at least two interests are checked
///
/// POST /api/v1/sessions/{id}/submit
async fn submit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    apply(&state, path.into_inner(), Session::submit).await
}

/// POST /api/v1/sessions/{id}/restart
async fn restart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    apply(&state, path.into_inner(), Session::restart).await
}

/// Run `action` on the session under its lock, then render the resulting page
async fn apply<F>(state: &AppState, session_id: Uuid, action: F) -> Result<HttpResponse, AppError>
where
    F: FnOnce(&mut Session) -> Result<(), AppError>,
{
    let handle = state.sessions.get(session_id).await?;
    let mut session = handle.lock().await;

    if let Err(e) = action(&mut *session) {
        tracing::info!("Session {} on {} page: {}", session_id, session.page(), e);
        return Err(e);
    }

    let view = session.render(&state.recommender)?;
    Ok(HttpResponse::Ok().json(SessionResponse { session_id, view }))
}
