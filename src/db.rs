use crate::models::builder::{BuilderProfile, BuilderProjectSummary, BuilderSummary};
use crate::models::project::{BuilderCard, EngagementCounts, ProjectStatus, ProjectSummary};
use crate::models::update::WeeklyUpdate;
use crate::models::user::{User, UserCard, UserRole};
use crate::ranking;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::Path;
use uuid::Uuid;

const DB_SCHEMA_VERSION: i64 = 2;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version < 2 {
        apply_migration_2(conn)?;
        version = 2;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        // Future schema; do not fail reads/writes for forward-compatible changes.
        conn.pragma_update(None, "user_version", version)?;
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            wallet_address TEXT NOT NULL UNIQUE,
            username TEXT,
            avatar_url TEXT,
            role TEXT NOT NULL DEFAULT 'COMMUNITY' CHECK(role IN ('COMMUNITY', 'BUILDER')),
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS builder_profiles (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL UNIQUE REFERENCES users(id),
            full_name TEXT NOT NULL,
            bio TEXT,
            twitter TEXT,
            location TEXT,
            skills TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            builder_id TEXT NOT NULL REFERENCES builder_profiles(id),
            name TEXT NOT NULL,
            tagline TEXT NOT NULL,
            problem TEXT NOT NULL,
            solution TEXT NOT NULL,
            target_market TEXT,
            timeline_weeks INTEGER NOT NULL DEFAULT 8,
            status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK(status IN ('ACTIVE', 'PAUSED', 'COMPLETED')),
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS weekly_updates (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id),
            week_number INTEGER NOT NULL,
            content TEXT NOT NULL,
            achievements TEXT NOT NULL DEFAULT '[]',
            challenges TEXT NOT NULL DEFAULT '[]',
            next_week_goals TEXT NOT NULL DEFAULT '[]',
            media_urls TEXT NOT NULL DEFAULT '[]',
            metrics TEXT,
            created_at INTEGER NOT NULL,
            UNIQUE(project_id, week_number)
        );

        CREATE TABLE IF NOT EXISTS follows (
            user_id TEXT NOT NULL REFERENCES users(id),
            project_id TEXT NOT NULL REFERENCES projects(id),
            created_at INTEGER NOT NULL,
            PRIMARY KEY (user_id, project_id)
        );

        CREATE TABLE IF NOT EXISTS reactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            project_id TEXT NOT NULL REFERENCES projects(id),
            update_id TEXT REFERENCES weekly_updates(id),
            kind TEXT NOT NULL DEFAULT 'FIRE',
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            project_id TEXT NOT NULL REFERENCES projects(id),
            update_id TEXT REFERENCES weekly_updates(id),
            body TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        ",
    )
}

fn apply_migration_2(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_projects_builder ON projects(builder_id);
        CREATE INDEX IF NOT EXISTS idx_projects_status_created ON projects(status, created_at);
        CREATE INDEX IF NOT EXISTS idx_updates_project ON weekly_updates(project_id);
        CREATE INDEX IF NOT EXISTS idx_follows_project ON follows(project_id);
        CREATE INDEX IF NOT EXISTS idx_reactions_project ON reactions(project_id);
        CREATE INDEX IF NOT EXISTS idx_comments_project ON comments(project_id);
        ",
    )
}

/// Open (and if needed create) the database at `path`, running pending
/// migrations. Each request opens its own connection.
pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub wallet_address: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct NewBuilderProfile {
    pub user_id: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub twitter: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub builder_id: String,
    pub name: String,
    pub tagline: String,
    pub problem: String,
    pub solution: String,
    pub target_market: Option<String>,
    pub timeline_weeks: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct NewWeeklyUpdate {
    pub project_id: String,
    pub week_number: u32,
    pub content: String,
    pub achievements: Vec<String>,
    pub challenges: Vec<String>,
    pub next_week_goals: Vec<String>,
    pub media_urls: Vec<String>,
    pub metrics: Option<serde_json::Value>,
}

pub fn create_user(conn: &Connection, data: NewUser) -> Result<User> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();

    conn.execute(
        "INSERT INTO users (id, wallet_address, username, avatar_url, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id,
            data.wallet_address,
            data.username.as_deref(),
            data.avatar_url.as_deref(),
            data.role.as_str(),
            now,
        ],
    )?;

    Ok(User {
        id,
        wallet_address: data.wallet_address,
        username: data.username,
        avatar_url: data.avatar_url,
        role: data.role,
        created_at: ts_to_datetime(now),
    })
}

pub fn get_user_by_wallet(conn: &Connection, wallet_address: &str) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, wallet_address, username, avatar_url, role, created_at
         FROM users WHERE wallet_address = ?1",
        params![wallet_address],
        user_from_row,
    )
    .optional()
}

pub fn get_user(conn: &Connection, id: &str) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, wallet_address, username, avatar_url, role, created_at
         FROM users WHERE id = ?1",
        params![id],
        user_from_row,
    )
    .optional()
}

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        wallet_address: row.get(1)?,
        username: row.get(2)?,
        avatar_url: row.get(3)?,
        role: UserRole::parse(&row.get::<_, String>(4)?).unwrap_or_default(),
        created_at: ts_to_datetime(row.get(5)?),
    })
}

pub fn create_builder_profile(conn: &Connection, data: NewBuilderProfile) -> Result<BuilderProfile> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();
    let skills_json = serde_json::to_string(&data.skills).unwrap_or_else(|_| "[]".to_string());

    conn.execute(
        "INSERT INTO builder_profiles (id, user_id, full_name, bio, twitter, location, skills, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            data.user_id,
            data.full_name,
            data.bio.as_deref(),
            data.twitter.as_deref(),
            data.location.as_deref(),
            skills_json,
            now,
        ],
    )?;

    Ok(BuilderProfile {
        id,
        user_id: data.user_id,
        full_name: data.full_name,
        bio: data.bio,
        twitter: data.twitter,
        location: data.location,
        skills: data.skills,
        created_at: ts_to_datetime(now),
    })
}

pub fn get_builder_profile_by_user(conn: &Connection, user_id: &str) -> Result<Option<BuilderProfile>> {
    conn.query_row(
        "SELECT id, user_id, full_name, bio, twitter, location, skills, created_at
         FROM builder_profiles WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok(BuilderProfile {
                id: row.get(0)?,
                user_id: row.get(1)?,
                full_name: row.get(2)?,
                bio: row.get(3)?,
                twitter: row.get(4)?,
                location: row.get(5)?,
                skills: json_list(&row.get::<_, String>(6)?),
                created_at: ts_to_datetime(row.get(7)?),
            })
        },
    )
    .optional()
}

pub fn create_project(conn: &Connection, data: NewProject) -> Result<ProjectSummary> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();

    conn.execute(
        "INSERT INTO projects (id, builder_id, name, tagline, problem, solution, target_market, timeline_weeks, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            id,
            data.builder_id,
            data.name,
            data.tagline,
            data.problem,
            data.solution,
            data.target_market.as_deref(),
            data.timeline_weeks.unwrap_or(8),
            now,
        ],
    )?;

    // Re-read through the summary query so the caller gets the builder card
    // and zeroed counters in one shape.
    get_project(conn, &id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

const PROJECT_SUMMARY_SQL: &str = "
    SELECT p.id, p.name, p.tagline, p.problem, p.solution, p.target_market,
           p.timeline_weeks, p.status, p.created_at,
           b.id, b.full_name, b.bio, b.location, b.skills,
           u.id, u.username, u.avatar_url, u.role,
           (SELECT COUNT(*) FROM follows f WHERE f.project_id = p.id),
           (SELECT COUNT(*) FROM reactions r WHERE r.project_id = p.id),
           (SELECT COUNT(*) FROM weekly_updates w WHERE w.project_id = p.id),
           (SELECT COUNT(*) FROM comments c WHERE c.project_id = p.id)
    FROM projects p
    JOIN builder_profiles b ON b.id = p.builder_id
    JOIN users u ON u.id = b.user_id
";

fn project_summary_from_row(row: &rusqlite::Row<'_>) -> Result<ProjectSummary> {
    Ok(ProjectSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        tagline: row.get(2)?,
        problem: row.get(3)?,
        solution: row.get(4)?,
        target_market: row.get(5)?,
        timeline_weeks: row.get::<_, i64>(6)? as u32,
        status: ProjectStatus::parse(&row.get::<_, String>(7)?).unwrap_or_default(),
        created_at: ts_to_datetime(row.get(8)?),
        builder: BuilderCard {
            id: row.get(9)?,
            full_name: row.get(10)?,
            bio: row.get(11)?,
            location: row.get(12)?,
            skills: json_list(&row.get::<_, String>(13)?),
            user: UserCard {
                id: row.get(14)?,
                username: row.get(15)?,
                avatar_url: row.get(16)?,
                role: UserRole::parse(&row.get::<_, String>(17)?).unwrap_or_default(),
            },
        },
        counts: EngagementCounts {
            follows: row.get::<_, i64>(18)? as u64,
            reactions: row.get::<_, i64>(19)? as u64,
            updates: row.get::<_, i64>(20)? as u64,
            comments: row.get::<_, i64>(21)? as u64,
        },
    })
}

pub fn get_project(conn: &Connection, id: &str) -> Result<Option<ProjectSummary>> {
    let sql = format!("{PROJECT_SUMMARY_SQL} WHERE p.id = ?1");
    conn.query_row(&sql, params![id], project_summary_from_row)
        .optional()
}

pub fn get_all_active_projects(conn: &Connection, limit: usize) -> Result<Vec<ProjectSummary>> {
    let sql = format!(
        "{PROJECT_SUMMARY_SQL} WHERE p.status = 'ACTIVE' ORDER BY p.created_at DESC LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![limit as i64], project_summary_from_row)?;
    rows.collect()
}

pub fn get_projects_by_builder(conn: &Connection, builder_id: &str) -> Result<Vec<BuilderProjectSummary>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, p.status,
                (SELECT COUNT(*) FROM follows f WHERE f.project_id = p.id),
                (SELECT COUNT(*) FROM reactions r WHERE r.project_id = p.id),
                (SELECT COUNT(*) FROM weekly_updates w WHERE w.project_id = p.id),
                (SELECT COUNT(*) FROM comments c WHERE c.project_id = p.id)
         FROM projects p
         WHERE p.builder_id = ?1
         ORDER BY p.created_at DESC",
    )?;
    let rows = stmt.query_map(params![builder_id], |row| {
        Ok(BuilderProjectSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            status: ProjectStatus::parse(&row.get::<_, String>(2)?).unwrap_or_default(),
            counts: EngagementCounts {
                follows: row.get::<_, i64>(3)? as u64,
                reactions: row.get::<_, i64>(4)? as u64,
                updates: row.get::<_, i64>(5)? as u64,
                comments: row.get::<_, i64>(6)? as u64,
            },
        })
    })?;
    rows.collect()
}

pub fn update_project_status(conn: &Connection, id: &str, status: ProjectStatus) -> Result<()> {
    conn.execute(
        "UPDATE projects SET status = ?2 WHERE id = ?1",
        params![id, status.as_str()],
    )?;
    Ok(())
}

/// Builder snapshot with aggregates recomputed from the currently owned
/// projects. Absent profiles yield `None`.
pub fn get_builder_summary(conn: &Connection, builder_id: &str) -> Result<Option<BuilderSummary>> {
    let head = conn
        .query_row(
            "SELECT b.id, b.full_name, b.bio, b.location, b.skills,
                    u.id, u.username, u.avatar_url, u.role
             FROM builder_profiles b
             JOIN users u ON u.id = b.user_id
             WHERE b.id = ?1",
            params![builder_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    json_list(&row.get::<_, String>(4)?),
                    UserCard {
                        id: row.get(5)?,
                        username: row.get(6)?,
                        avatar_url: row.get(7)?,
                        role: UserRole::parse(&row.get::<_, String>(8)?).unwrap_or_default(),
                    },
                ))
            },
        )
        .optional()?;

    let Some((id, full_name, bio, location, skills, user)) = head else {
        return Ok(None);
    };

    let projects = get_projects_by_builder(conn, &id)?;
    let stats = ranking::builder_stats(&projects);

    Ok(Some(BuilderSummary {
        id,
        full_name,
        bio,
        location,
        skills,
        user,
        projects,
        stats,
    }))
}

pub fn get_all_builders(conn: &Connection, limit: usize) -> Result<Vec<BuilderSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM builder_profiles ORDER BY created_at DESC LIMIT ?1",
    )?;
    let ids = stmt
        .query_map(params![limit as i64], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>>>()?;

    // Profiles that vanish between the two queries are dropped here, before
    // any score is computed.
    let mut builders = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(summary) = get_builder_summary(conn, &id)? {
            builders.push(summary);
        }
    }
    Ok(builders)
}

pub fn create_weekly_update(conn: &Connection, data: NewWeeklyUpdate) -> Result<WeeklyUpdate> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();
    let metrics_json = data
        .metrics
        .as_ref()
        .map(|m| serde_json::to_string(m).unwrap_or_else(|_| "{}".to_string()));

    conn.execute(
        "INSERT INTO weekly_updates (id, project_id, week_number, content, achievements, challenges, next_week_goals, media_urls, metrics, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            data.project_id,
            data.week_number,
            data.content,
            serde_json::to_string(&data.achievements).unwrap_or_else(|_| "[]".to_string()),
            serde_json::to_string(&data.challenges).unwrap_or_else(|_| "[]".to_string()),
            serde_json::to_string(&data.next_week_goals).unwrap_or_else(|_| "[]".to_string()),
            serde_json::to_string(&data.media_urls).unwrap_or_else(|_| "[]".to_string()),
            metrics_json,
            now,
        ],
    )?;

    Ok(WeeklyUpdate {
        id,
        project_id: data.project_id,
        week_number: data.week_number,
        content: data.content,
        achievements: data.achievements,
        challenges: data.challenges,
        next_week_goals: data.next_week_goals,
        media_urls: data.media_urls,
        metrics: data.metrics,
        created_at: ts_to_datetime(now),
    })
}

fn weekly_update_from_row(row: &rusqlite::Row<'_>) -> Result<WeeklyUpdate> {
    Ok(WeeklyUpdate {
        id: row.get(0)?,
        project_id: row.get(1)?,
        week_number: row.get::<_, i64>(2)? as u32,
        content: row.get(3)?,
        achievements: json_list(&row.get::<_, String>(4)?),
        challenges: json_list(&row.get::<_, String>(5)?),
        next_week_goals: json_list(&row.get::<_, String>(6)?),
        media_urls: json_list(&row.get::<_, String>(7)?),
        metrics: row
            .get::<_, Option<String>>(8)?
            .and_then(|raw| serde_json::from_str(&raw).ok()),
        created_at: ts_to_datetime(row.get(9)?),
    })
}

pub fn get_project_updates(conn: &Connection, project_id: &str) -> Result<Vec<WeeklyUpdate>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, week_number, content, achievements, challenges, next_week_goals, media_urls, metrics, created_at
         FROM weekly_updates
         WHERE project_id = ?1
         ORDER BY week_number DESC",
    )?;
    let rows = stmt.query_map(params![project_id], weekly_update_from_row)?;
    rows.collect()
}

pub fn get_latest_updates(conn: &Connection, limit: usize) -> Result<Vec<WeeklyUpdate>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, week_number, content, achievements, challenges, next_week_goals, media_urls, metrics, created_at
         FROM weekly_updates
         ORDER BY created_at DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], weekly_update_from_row)?;
    rows.collect()
}

pub fn follow_project(conn: &Connection, user_id: &str, project_id: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO follows (user_id, project_id, created_at) VALUES (?1, ?2, ?3)",
        params![user_id, project_id, Utc::now().timestamp()],
    )?;
    Ok(())
}

pub fn unfollow_project(conn: &Connection, user_id: &str, project_id: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM follows WHERE user_id = ?1 AND project_id = ?2",
        params![user_id, project_id],
    )?;
    Ok(())
}

pub fn is_following_project(conn: &Connection, user_id: &str, project_id: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = ?1 AND project_id = ?2)",
        params![user_id, project_id],
        |row| row.get(0),
    )
}

fn ts_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

fn json_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");
        conn
    }

    fn make_builder(conn: &Connection, wallet: &str, name: &str) -> BuilderProfile {
        let user = create_user(
            conn,
            NewUser {
                wallet_address: wallet.to_string(),
                username: Some(format!("{name}_user")),
                avatar_url: None,
                role: UserRole::Builder,
            },
        )
        .expect("create user");

        create_builder_profile(
            conn,
            NewBuilderProfile {
                user_id: user.id,
                full_name: name.to_string(),
                bio: None,
                twitter: None,
                location: Some("Mexico City, Mexico".to_string()),
                skills: vec!["Rust".to_string()],
            },
        )
        .expect("create profile")
    }

    #[test]
    fn schema_initializes_with_expected_version() {
        let conn = test_conn();
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("schema version");
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn user_round_trips_by_wallet() {
        let conn = test_conn();
        let created = create_user(
            &conn,
            NewUser {
                wallet_address: "0xabc".to_string(),
                username: Some("maria_builder".to_string()),
                avatar_url: None,
                role: UserRole::Builder,
            },
        )
        .expect("create user");

        let loaded = get_user_by_wallet(&conn, "0xabc")
            .expect("lookup")
            .expect("user exists");
        assert_eq!(loaded.id, created.id);
        assert_eq!(loaded.role, UserRole::Builder);
        assert!(get_user_by_wallet(&conn, "0xdef").expect("lookup").is_none());

        let by_id = get_user(&conn, &created.id).expect("lookup").expect("user exists");
        assert_eq!(by_id.wallet_address, "0xabc");
    }

    #[test]
    fn duplicate_wallet_is_a_constraint_violation() {
        let conn = test_conn();
        let new = |wallet: &str| NewUser {
            wallet_address: wallet.to_string(),
            ..NewUser::default()
        };
        create_user(&conn, new("0xabc")).expect("first insert");
        assert!(create_user(&conn, new("0xabc")).is_err());
    }

    #[test]
    fn project_summary_carries_builder_card_and_zero_counts() {
        let conn = test_conn();
        let profile = make_builder(&conn, "0x1", "María García");

        let project = create_project(
            &conn,
            NewProject {
                builder_id: profile.id.clone(),
                name: "EcoTrack".to_string(),
                tagline: "Track your carbon footprint".to_string(),
                problem: "p".to_string(),
                solution: "s".to_string(),
                target_market: None,
                timeline_weeks: None,
            },
        )
        .expect("create project");

        assert_eq!(project.builder.full_name, "María García");
        assert_eq!(project.timeline_weeks, 8);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.counts, EngagementCounts::default());
    }

    #[test]
    fn counters_reflect_related_rows_at_query_time() {
        let conn = test_conn();
        let profile = make_builder(&conn, "0x1", "María García");
        let fan = create_user(
            &conn,
            NewUser {
                wallet_address: "0x2".to_string(),
                ..NewUser::default()
            },
        )
        .expect("create fan");

        let project = create_project(
            &conn,
            NewProject {
                builder_id: profile.id.clone(),
                name: "EcoTrack".to_string(),
                tagline: "t".to_string(),
                problem: "p".to_string(),
                solution: "s".to_string(),
                target_market: None,
                timeline_weeks: Some(10),
            },
        )
        .expect("create project");

        follow_project(&conn, &fan.id, &project.id).expect("follow");
        follow_project(&conn, &fan.id, &project.id).expect("follow is idempotent");
        create_weekly_update(
            &conn,
            NewWeeklyUpdate {
                project_id: project.id.clone(),
                week_number: 1,
                content: "week one".to_string(),
                achievements: vec!["shipped".to_string()],
                challenges: vec![],
                next_week_goals: vec![],
                media_urls: vec![],
                metrics: None,
            },
        )
        .expect("create update");

        let loaded = get_project(&conn, &project.id)
            .expect("get project")
            .expect("project exists");
        assert_eq!(loaded.counts.follows, 1);
        assert_eq!(loaded.counts.updates, 1);
        assert_eq!(loaded.counts.reactions, 0);

        unfollow_project(&conn, &fan.id, &project.id).expect("unfollow");
        let loaded = get_project(&conn, &project.id)
            .expect("get project")
            .expect("project exists");
        assert_eq!(loaded.counts.follows, 0);
        assert!(!is_following_project(&conn, &fan.id, &project.id).expect("is following"));
    }

    #[test]
    fn active_listing_excludes_paused_projects_and_sorts_newest_first() {
        let conn = test_conn();
        let profile = make_builder(&conn, "0x1", "María García");

        let mut ids = Vec::new();
        for name in ["first", "second", "third"] {
            let p = create_project(
                &conn,
                NewProject {
                    builder_id: profile.id.clone(),
                    name: name.to_string(),
                    tagline: "t".to_string(),
                    problem: "p".to_string(),
                    solution: "s".to_string(),
                    target_market: None,
                    timeline_weeks: None,
                },
            )
            .expect("create project");
            ids.push(p.id.clone());
            // Spread creation timestamps so the newest-first order is
            // deterministic regardless of clock resolution.
            conn.execute(
                "UPDATE projects SET created_at = created_at + ?2 WHERE id = ?1",
                params![p.id, ids.len() as i64],
            )
            .expect("bump created_at");
        }
        update_project_status(&conn, &ids[1], ProjectStatus::Paused).expect("pause");

        let listed = get_all_active_projects(&conn, 20).expect("list");
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first"]);
    }

    #[test]
    fn builder_summary_recomputes_aggregates_from_owned_projects() {
        let conn = test_conn();
        let profile = make_builder(&conn, "0x1", "María García");
        let fan = create_user(
            &conn,
            NewUser {
                wallet_address: "0x2".to_string(),
                ..NewUser::default()
            },
        )
        .expect("create fan");

        for (name, weeks) in [("a", 2u32), ("b", 1u32)] {
            let p = create_project(
                &conn,
                NewProject {
                    builder_id: profile.id.clone(),
                    name: name.to_string(),
                    tagline: "t".to_string(),
                    problem: "p".to_string(),
                    solution: "s".to_string(),
                    target_market: None,
                    timeline_weeks: None,
                },
            )
            .expect("create project");
            follow_project(&conn, &fan.id, &p.id).expect("follow");
            for week in 1..=weeks {
                create_weekly_update(
                    &conn,
                    NewWeeklyUpdate {
                        project_id: p.id.clone(),
                        week_number: week,
                        content: "progress".to_string(),
                        achievements: vec![],
                        challenges: vec![],
                        next_week_goals: vec![],
                        media_urls: vec![],
                        metrics: None,
                    },
                )
                .expect("create update");
            }
        }

        let summary = get_builder_summary(&conn, &profile.id)
            .expect("summary")
            .expect("profile exists");
        assert_eq!(summary.projects.len(), 2);
        assert_eq!(summary.stats.total_followers, 2);
        assert_eq!(summary.stats.total_updates, 3);
        // min(95, 60 + 3 * 5)
        assert_eq!(summary.stats.consistency_score, 75);

        assert!(get_builder_summary(&conn, "missing").expect("lookup").is_none());
    }

    #[test]
    fn weekly_update_week_number_is_unique_per_project() {
        let conn = test_conn();
        let profile = make_builder(&conn, "0x1", "María García");
        let project = create_project(
            &conn,
            NewProject {
                builder_id: profile.id,
                name: "EcoTrack".to_string(),
                tagline: "t".to_string(),
                problem: "p".to_string(),
                solution: "s".to_string(),
                target_market: None,
                timeline_weeks: None,
            },
        )
        .expect("create project");

        let update = |week| NewWeeklyUpdate {
            project_id: project.id.clone(),
            week_number: week,
            content: "progress".to_string(),
            achievements: vec![],
            challenges: vec![],
            next_week_goals: vec![],
            media_urls: vec![],
            metrics: Some(serde_json::json!({"userInterviews": 25})),
        };

        let first = create_weekly_update(&conn, update(1)).expect("first week");
        assert!(create_weekly_update(&conn, update(1)).is_err());
        create_weekly_update(&conn, update(2)).expect("second week");

        let updates = get_project_updates(&conn, &project.id).expect("list updates");
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].week_number, 2);
        assert_eq!(updates[1].metrics, first.metrics);

        let latest = get_latest_updates(&conn, 1).expect("latest updates");
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].project_id, project.id);
    }
}
