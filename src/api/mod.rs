use axum::Json;
use axum::extract::Path;
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use tracing::{error, warn};

use crate::error::AppError;
use crate::models::{Course, EnrolledCourse};
use crate::state::AppState;
use crate::views::{
    CourseDetailState, CourseDetailView, CourseListState, CourseListView, DashboardState,
    DashboardView, DraftField,
};

#[derive(Deserialize)]
struct SearchRequest {
    term: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DraftEdit {
    Field { field: String, value: String },
    SyllabusTopic { index: usize, topic: String },
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(show_courses))
        .route("/courses/search", put(search_courses))
        .route(
            "/courses/form",
            post(open_form).patch(edit_form).delete(close_form),
        )
        .route("/courses/form/submit", post(submit_form))
        .route("/courses/{id}", get(show_course))
        .route("/courses/{id}/like", post(toggle_like))
        .route("/courses/{id}/syllabus/{index}", post(toggle_syllabus))
        .route("/dashboard", get(show_dashboard))
        .route("/dashboard/search", put(search_dashboard))
        .route("/dashboard/{id}/complete", post(toggle_complete))
        .with_state(state)
}

fn not_mounted(view: &str) -> AppError {
    AppError::Conflict(format!("The {} view is not mounted", view))
}

fn unmounted_meanwhile(view: &str) -> AppError {
    AppError::Conflict(format!("The {} view was left before the response arrived", view))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn show_courses(State(state): State<AppState>) -> Result<Json<CourseListView>, AppError> {
    let generation = {
        let mut session = state.session.lock().await;
        session.mount_list(CourseListState::new(state.service.ids()))
    };

    let result = state.service.load::<Course>().await;

    let mut session = state.session.lock().await;
    let list = session
        .list
        .live_mut(generation)
        .ok_or_else(|| unmounted_meanwhile("course list"))?;
    list.apply_loaded(result);
    Ok(Json(list.render()))
}

async fn search_courses(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<CourseListView>, AppError> {
    let mut session = state.session.lock().await;
    let (_, list) = session.list.current_mut().ok_or_else(|| not_mounted("course list"))?;
    list.set_search_term(req.term);
    Ok(Json(list.render()))
}

async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseListView>, AppError> {
    let (generation, request) = {
        let mut session = state.session.lock().await;
        let (generation, list) = session.list.current_mut().ok_or_else(|| not_mounted("course list"))?;
        (generation, list.begin_like(&id)?)
    };

    // Runs detached so the like settles even if the client goes away.
    let task = tokio::spawn(async move {
        let result = state.service.send_like(&request).await;

        let mut session = state.session.lock().await;
        let list = session
            .list
            .live_mut(generation)
            .ok_or_else(|| unmounted_meanwhile("course list"))?;
        if let Err(e) = list.finish_like(request, result) {
            warn!("Like on {} not applied: {}", id, e);
        }
        Ok::<_, AppError>(list.render())
    });

    let view = task.await.map_err(|e| {
        error!("Like task failed: {}", e);
        AppError::InternalServerError
    })??;
    Ok(Json(view))
}

async fn open_form(State(state): State<AppState>) -> Result<Json<CourseListView>, AppError> {
    let mut session = state.session.lock().await;
    let (_, list) = session.list.current_mut().ok_or_else(|| not_mounted("course list"))?;
    list.open_form(state.service.ids());
    Ok(Json(list.render()))
}

async fn edit_form(
    State(state): State<AppState>,
    Json(edit): Json<DraftEdit>,
) -> Result<Json<CourseListView>, AppError> {
    let mut session = state.session.lock().await;
    let (_, list) = session.list.current_mut().ok_or_else(|| not_mounted("course list"))?;
    match edit {
        DraftEdit::Field { field, value } => list.edit_draft(field.parse::<DraftField>()?, value)?,
        DraftEdit::SyllabusTopic { index, topic } => list.edit_syllabus_topic(index, topic)?,
    }
    Ok(Json(list.render()))
}

async fn close_form(State(state): State<AppState>) -> Result<Json<CourseListView>, AppError> {
    let mut session = state.session.lock().await;
    let (_, list) = session.list.current_mut().ok_or_else(|| not_mounted("course list"))?;
    list.close_form();
    Ok(Json(list.render()))
}

async fn submit_form(State(state): State<AppState>) -> Result<Json<CourseListView>, AppError> {
    let (generation, record) = {
        let mut session = state.session.lock().await;
        let (generation, list) = session.list.current_mut().ok_or_else(|| not_mounted("course list"))?;
        (generation, list.begin_create(state.service.ids())?)
    };

    let task = tokio::spawn(async move {
        let result = state.service.send_create(&record).await;

        let mut session = state.session.lock().await;
        let list = session
            .list
            .live_mut(generation)
            .ok_or_else(|| unmounted_meanwhile("course list"))?;
        if let Err(e) = list.finish_create(record, result, state.service.ids()) {
            warn!("New course not added: {}", e);
        }
        Ok::<_, AppError>(list.render())
    });

    let view = task.await.map_err(|e| {
        error!("Create task failed: {}", e);
        AppError::InternalServerError
    })??;
    Ok(Json(view))
}

async fn show_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseDetailView>, AppError> {
    let generation = {
        let mut session = state.session.lock().await;
        session.mount_detail(CourseDetailState::new(&id))
    };

    let result = state.service.load::<Course>().await;

    let mut session = state.session.lock().await;
    let detail = session
        .detail
        .live_mut(generation)
        .ok_or_else(|| unmounted_meanwhile("course detail"))?;
    detail.apply_loaded(result);
    Ok(Json(detail.render()))
}

async fn toggle_syllabus(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<CourseDetailView>, AppError> {
    let mut session = state.session.lock().await;
    let (_, detail) = session
        .detail
        .current_mut()
        .filter(|(_, detail)| detail.course_id() == id)
        .ok_or_else(|| not_mounted("course detail"))?;
    if !detail.toggle_expand(index) {
        return Err(AppError::NotFound(format!("Course {} has no syllabus entry {}", id, index)));
    }
    Ok(Json(detail.render()))
}

async fn show_dashboard(State(state): State<AppState>) -> Result<Json<DashboardView>, AppError> {
    let generation = {
        let mut session = state.session.lock().await;
        session.mount_dashboard(DashboardState::new())
    };

    let result = state.service.load::<EnrolledCourse>().await;

    let mut session = state.session.lock().await;
    let dashboard = session
        .dashboard
        .live_mut(generation)
        .ok_or_else(|| unmounted_meanwhile("dashboard"))?;
    dashboard.apply_loaded(result);
    Ok(Json(dashboard.render()))
}

async fn search_dashboard(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let mut session = state.session.lock().await;
    let (_, dashboard) = session.dashboard.current_mut().ok_or_else(|| not_mounted("dashboard"))?;
    dashboard.set_search_term(req.term);
    Ok(Json(dashboard.render()))
}

async fn toggle_complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardView>, AppError> {
    let mut session = state.session.lock().await;
    let (_, dashboard) = session.dashboard.current_mut().ok_or_else(|| not_mounted("dashboard"))?;
    dashboard.toggle_completed(&id)?;
    Ok(Json(dashboard.render()))
}
