use crate::api::{ApiError, AppState};
use crate::db::{self, NewBuilderProfile, NewProject, NewUser};
use crate::fallback::{self, DataSource};
use crate::models::project::{BuilderCard, ProjectStatus, ProjectSummary};
use crate::models::user::{UserCard, UserRole};
use crate::ranking::{self, RankedProject};
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Feed page size.
const PAGE_LIMIT: usize = 20;

pub(crate) const MISSING_FIELDS_ERROR: &str =
    "Missing required fields: fullName, projectName, tagline, problemStatement, solution";

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub projects: Vec<RankedProject>,
    pub source: DataSource,
}

pub async fn list_projects(State(state): State<AppState>) -> Json<ProjectListResponse> {
    let (projects, source) = fallback::fetch_projects(&state.db_path, PAGE_LIMIT);
    // Capture one reference timestamp so every item in this pass sees the
    // same recency boundary.
    let now = Utc::now();
    let projects = ranking::rank_projects(projects, now);
    Json(ProjectListResponse {
        success: true,
        projects,
        source,
    })
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub project_name: Option<String>,
    pub tagline: Option<String>,
    pub problem_statement: Option<String>,
    pub solution: Option<String>,
    pub target_market: Option<String>,
    pub wallet_address: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProjectResponse {
    pub success: bool,
    pub project: ProjectSummary,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<CreateProjectResponse>, ApiError> {
    let required = [
        request.full_name.as_deref(),
        request.project_name.as_deref(),
        request.tagline.as_deref(),
        request.problem_statement.as_deref(),
        request.solution.as_deref(),
    ];
    if required
        .iter()
        .any(|field| field.map_or(true, |value| value.trim().is_empty()))
    {
        return Err(ApiError::Validation(MISSING_FIELDS_ERROR.to_string()));
    }

    // Generated identity is a convenience for frictionless testing, not a
    // security mechanism.
    let wallet_address = request
        .wallet_address
        .clone()
        .unwrap_or_else(generated_wallet);
    let username = request.username.clone().unwrap_or_else(|| {
        generated_username(request.full_name.as_deref().unwrap_or_default())
    });

    match persist_project(&state, &request, &wallet_address, &username) {
        Ok(project) => Ok(Json(CreateProjectResponse {
            success: true,
            project,
            message: "Project created successfully!".to_string(),
            source: None,
        })),
        Err(err) => {
            warn!("database unavailable, returning synthetic project: {err}");
            Ok(Json(CreateProjectResponse {
                success: true,
                project: synthetic_project(&request, &username),
                message: "Project created successfully! (using mock data)".to_string(),
                source: Some(DataSource::Mock),
            }))
        }
    }
}

/// Create or reuse the user (keyed by wallet), then the builder profile,
/// then the project.
fn persist_project(
    state: &AppState,
    request: &CreateProjectRequest,
    wallet_address: &str,
    username: &str,
) -> rusqlite::Result<ProjectSummary> {
    let conn = db::connect(&state.db_path)?;

    let user = match db::get_user_by_wallet(&conn, wallet_address)? {
        Some(user) => user,
        None => db::create_user(
            &conn,
            NewUser {
                wallet_address: wallet_address.to_string(),
                username: Some(username.to_string()),
                avatar_url: None,
                role: UserRole::Builder,
            },
        )?,
    };

    let profile = match db::get_builder_profile_by_user(&conn, &user.id)? {
        Some(profile) => profile,
        None => db::create_builder_profile(
            &conn,
            NewBuilderProfile {
                user_id: user.id.clone(),
                full_name: request.full_name.clone().unwrap_or_default(),
                bio: request.bio.clone(),
                twitter: None,
                location: request.location.clone(),
                skills: request.skills.clone().unwrap_or_default(),
            },
        )?,
    };

    db::create_project(
        &conn,
        NewProject {
            builder_id: profile.id,
            name: request.project_name.clone().unwrap_or_default(),
            tagline: request.tagline.clone().unwrap_or_default(),
            problem: request.problem_statement.clone().unwrap_or_default(),
            solution: request.solution.clone().unwrap_or_default(),
            target_market: request.target_market.clone(),
            timeline_weeks: None,
        },
    )
}

/// In-memory stand-in returned when persistence is unavailable.
fn synthetic_project(request: &CreateProjectRequest, username: &str) -> ProjectSummary {
    let now = Utc::now();
    let stamp = now.timestamp_millis();

    ProjectSummary {
        id: format!("test-project-{stamp}"),
        name: request.project_name.clone().unwrap_or_default(),
        tagline: request.tagline.clone().unwrap_or_default(),
        problem: request.problem_statement.clone().unwrap_or_default(),
        solution: request.solution.clone().unwrap_or_default(),
        target_market: request.target_market.clone(),
        timeline_weeks: 8,
        status: ProjectStatus::Active,
        created_at: now,
        builder: BuilderCard {
            id: format!("test-builder-{stamp}"),
            full_name: request.full_name.clone().unwrap_or_default(),
            bio: request.bio.clone(),
            location: request.location.clone(),
            skills: request.skills.clone().unwrap_or_default(),
            user: UserCard {
                id: format!("test-user-{stamp}"),
                username: Some(username.to_string()),
                avatar_url: None,
                role: UserRole::Builder,
            },
        },
        counts: Default::default(),
    }
}

fn generated_wallet() -> String {
    format!("0x{}", Uuid::new_v4().simple())
}

fn generated_username(full_name: &str) -> String {
    let slug = full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{slug}_{}", &suffix[..6])
}
