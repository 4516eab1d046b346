//! Idempotent demo fixtures for local development.
//!
//! Mirrors the data a fresh deployment ships with: one community user, one
//! builder with a profile, a sample project, its first weekly update, and a
//! follow. Fixed identifiers make re-seeding a no-op.

use chrono::Utc;
use log::info;
use rusqlite::{params, Connection, Result};

const COMMUNITY_USER_ID: &str = "seed-user-carlos";
const BUILDER_USER_ID: &str = "seed-user-maria";
const BUILDER_PROFILE_ID: &str = "seed-builder-maria";
const PROJECT_ID: &str = "sample-project-id";
const UPDATE_ID: &str = "seed-update-week-1";

pub fn seed_sample_data(conn: &Connection) -> Result<()> {
    let now = Utc::now().timestamp();

    conn.execute(
        "INSERT OR IGNORE INTO users (id, wallet_address, username, avatar_url, role, created_at)
         VALUES (?1, ?2, ?3, ?4, 'COMMUNITY', ?5)",
        params![
            COMMUNITY_USER_ID,
            "0x1234567890123456789012345678901234567890",
            "carlos_supporter",
            "https://api.dicebear.com/7.x/avataaars/svg?seed=carlos",
            now,
        ],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO users (id, wallet_address, username, avatar_url, role, created_at)
         VALUES (?1, ?2, ?3, ?4, 'BUILDER', ?5)",
        params![
            BUILDER_USER_ID,
            "0x0987654321098765432109876543210987654321",
            "maria_builder",
            "https://api.dicebear.com/7.x/avataaars/svg?seed=maria",
            now,
        ],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO builder_profiles (id, user_id, full_name, bio, twitter, location, skills, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            BUILDER_PROFILE_ID,
            BUILDER_USER_ID,
            "María García",
            "Full-stack developer passionate about solving real-world problems with technology. Building the future of Latin American startups.",
            "@maria_builds",
            "Mexico City, Mexico",
            r#"["React","Node.js","TypeScript","Product Management","UI/UX"]"#,
            now,
        ],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO projects (id, builder_id, name, tagline, problem, solution, target_market, timeline_weeks, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 10, 'ACTIVE', ?8)",
        params![
            PROJECT_ID,
            BUILDER_PROFILE_ID,
            "EcoTrack",
            "Track your carbon footprint and earn rewards for sustainable choices",
            "Climate change is accelerating, but individuals lack easy ways to track and reduce their carbon footprint in daily life.",
            "A mobile app that automatically tracks carbon footprint through spending patterns and rewards sustainable choices with tokens.",
            "Environmentally conscious millennials and Gen Z users in Latin America",
            now,
        ],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO weekly_updates (id, project_id, week_number, content, achievements, challenges, next_week_goals, media_urls, metrics, created_at)
         VALUES (?1, ?2, 1, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            UPDATE_ID,
            PROJECT_ID,
            "Completed initial market research and started building the MVP. Had great conversations with potential users!",
            r#"["Completed 25 user interviews","Defined core user personas","Started MVP development","Set up development environment"]"#,
            r#"["Finding developers for React Native","Validating carbon tracking algorithms","Securing partnerships with local businesses"]"#,
            r#"["Complete MVP wireframes","Start building authentication system","Reach out to 10 potential business partners","Set up analytics tracking"]"#,
            r#"["https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=800"]"#,
            r#"{"userInterviews":25,"mvpProgress":15,"partnerships":0}"#,
            now,
        ],
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO follows (user_id, project_id, created_at) VALUES (?1, ?2, ?3)",
        params![COMMUNITY_USER_ID, PROJECT_ID, now],
    )?;

    info!("sample data present: users carlos_supporter + maria_builder, project EcoTrack");
    Ok(())
}
