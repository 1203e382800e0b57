use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use lingua_catalog::{Course, CourseFilter, Tutor, TutorFilter};
use lingua_order::{schedule, validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::{AppPath, AppQuery};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/courses", get(list_courses))
        .route("/v1/courses/{id}", get(get_course))
        .route("/v1/courses/{id}/schedule", get(get_schedule))
        .route("/v1/tutors", get(list_tutors))
        .route("/v1/tutors/{id}", get(get_tutor))
}

async fn list_courses(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<CourseFilter>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.catalog.list_courses().await?;
    Ok(Json(courses.into_iter().filter(|c| filter.matches(c)).collect()))
}

async fn get_course(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Course>, AppError> {
    state
        .catalog
        .get_course(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Course not found: {}", id)))
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub date_start: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseSchedule {
    pub course_id: u64,
    pub duration_hours: u32,
    /// Upcoming start dates, earliest first
    pub start_dates: Vec<NaiveDate>,
    pub date_start: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_times: Vec<String>,
}

/// Bookable start dates and times, plus the end date when a start date is given
async fn get_schedule(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppQuery(query): AppQuery<ScheduleQuery>,
) -> Result<Json<CourseSchedule>, AppError> {
    let course = state
        .catalog
        .get_course(id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Course not found: {}", id)))?;

    let date_start = query
        .date_start
        .as_deref()
        .map(validation::parse_date)
        .transpose()?;

    Ok(Json(CourseSchedule {
        course_id: course.id,
        duration_hours: course.duration_hours(),
        start_dates: schedule::course_start_dates(&course.start_dates, state.clock.today()),
        date_start,
        end_date: date_start.and_then(|d| schedule::course_end_date(d, course.total_length)),
        start_times: schedule::available_start_times(),
    }))
}

async fn list_tutors(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<TutorFilter>,
) -> Result<Json<Vec<Tutor>>, AppError> {
    let tutors = state.catalog.list_tutors().await?;
    Ok(Json(tutors.into_iter().filter(|t| filter.matches(t)).collect()))
}

async fn get_tutor(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Tutor>, AppError> {
    state
        .catalog
        .get_tutor(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Tutor not found: {}", id)))
}
