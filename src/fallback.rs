//! Degrade-gracefully wrappers around the data access layer.
//!
//! Every fetch reports where its data came from; storage failures are
//! absorbed into a warning and the fixed sample set so the feed endpoints
//! never fail outright. One shot, no retries.

use crate::db;
use crate::models::builder::{BuilderProjectSummary, BuilderStats, BuilderSummary};
use crate::models::project::{BuilderCard, EngagementCounts, ProjectStatus, ProjectSummary};
use crate::models::user::{UserCard, UserRole};
use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which store produced a response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Database,
    Mock,
}

pub fn fetch_projects(db_path: &Path, limit: usize) -> (Vec<ProjectSummary>, DataSource) {
    match load_projects(db_path, limit) {
        Ok(projects) => (projects, DataSource::Database),
        Err(err) => {
            warn!("database unavailable, serving sample projects: {err}");
            (SAMPLE_PROJECTS.clone(), DataSource::Mock)
        }
    }
}

pub fn fetch_builders(db_path: &Path, limit: usize) -> (Vec<BuilderSummary>, DataSource) {
    match load_builders(db_path, limit) {
        Ok(builders) => (builders, DataSource::Database),
        Err(err) => {
            warn!("database unavailable, serving sample builders: {err}");
            (SAMPLE_BUILDERS.clone(), DataSource::Mock)
        }
    }
}

fn load_projects(db_path: &Path, limit: usize) -> rusqlite::Result<Vec<ProjectSummary>> {
    let conn = db::connect(db_path)?;
    db::get_all_active_projects(&conn, limit)
}

fn load_builders(db_path: &Path, limit: usize) -> rusqlite::Result<Vec<BuilderSummary>> {
    let conn = db::connect(db_path)?;
    db::get_all_builders(&conn, limit)
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

struct SampleBuilder {
    user_id: &'static str,
    username: &'static str,
    full_name: &'static str,
    bio: &'static str,
    location: &'static str,
    skills: &'static [&'static str],
}

impl SampleBuilder {
    fn card(&self, avatar_seed: &str) -> BuilderCard {
        BuilderCard {
            id: self.user_id.to_string(),
            full_name: self.full_name.to_string(),
            bio: None,
            location: Some(self.location.to_string()),
            skills: self.skills.iter().map(|s| s.to_string()).collect(),
            user: UserCard {
                id: self.user_id.to_string(),
                username: Some(self.username.to_string()),
                avatar_url: Some(avatar(avatar_seed)),
                role: UserRole::Builder,
            },
        }
    }
}

const MARIA: SampleBuilder = SampleBuilder {
    user_id: "user-1",
    username: "maria_builder",
    full_name: "María García",
    bio: "Full-stack developer passionate about solving real-world problems with technology. Building the future of Latin American startups.",
    location: "Mexico City, Mexico",
    skills: &["React", "Node.js", "TypeScript", "Product Management", "UI/UX"],
};

const CARLOS: SampleBuilder = SampleBuilder {
    user_id: "user-2",
    username: "carlos_entrepreneur",
    full_name: "Carlos Rodríguez",
    bio: "Serial entrepreneur focused on hyperlocal solutions. Helping small businesses thrive in the digital age.",
    location: "Buenos Aires, Argentina",
    skills: &["Business Development", "Marketing", "Community Building", "E-commerce"],
};

const ANA: SampleBuilder = SampleBuilder {
    user_id: "user-3",
    username: "ana_developer",
    full_name: "Ana Fernández",
    bio: "Blockchain developer and educator. Making decentralized technology accessible for everyone.",
    location: "Bogotá, Colombia",
    skills: &["Blockchain", "Solidity", "React", "EdTech", "Smart Contracts"],
};

const DIEGO: SampleBuilder = SampleBuilder {
    user_id: "user-4",
    username: "diego_health",
    full_name: "Diego Morales",
    bio: "AI researcher passionate about healthcare accessibility. Using technology to bridge the healthcare gap.",
    location: "Lima, Peru",
    skills: &["AI/ML", "Healthcare", "Python", "NLP", "Mobile Development"],
};

#[allow(clippy::too_many_arguments)]
fn sample_project(
    id: &str,
    name: &str,
    tagline: &str,
    problem: &str,
    solution: &str,
    target_market: &str,
    timeline_weeks: u32,
    owner: &SampleBuilder,
    avatar_seed: &str,
    counts: EngagementCounts,
    created_at: DateTime<Utc>,
) -> ProjectSummary {
    ProjectSummary {
        id: id.to_string(),
        name: name.to_string(),
        tagline: tagline.to_string(),
        problem: problem.to_string(),
        solution: solution.to_string(),
        target_market: Some(target_market.to_string()),
        timeline_weeks,
        status: ProjectStatus::Active,
        created_at,
        builder: owner.card(avatar_seed),
        counts,
    }
}

/// Fixed development dataset served when storage is unreachable.
pub static SAMPLE_PROJECTS: Lazy<Vec<ProjectSummary>> = Lazy::new(|| {
    vec![
        sample_project(
            "sample-project-id",
            "EcoTrack",
            "Track your carbon footprint and earn rewards for sustainable choices",
            "Climate change is accelerating, but individuals lack easy ways to track and reduce their carbon footprint in daily life.",
            "A mobile app that automatically tracks carbon footprint through spending patterns and rewards sustainable choices with tokens.",
            "Environmentally conscious millennials and Gen Z users in Latin America",
            10,
            &MARIA,
            "maria",
            EngagementCounts {
                follows: 23,
                reactions: 45,
                updates: 3,
                comments: 12,
            },
            date(2024, 1, 1),
        ),
        sample_project(
            "project-2",
            "LocalConnect",
            "Connecting local businesses with their communities through social commerce",
            "Small local businesses struggle to compete with large e-commerce platforms and lack digital presence.",
            "A hyperlocal marketplace that connects neighbors with local businesses through social recommendations and community features.",
            "Local businesses and community-focused consumers in Latin American cities",
            12,
            &CARLOS,
            "carlos",
            EngagementCounts {
                follows: 31,
                reactions: 67,
                updates: 5,
                comments: 18,
            },
            date(2024, 1, 15),
        ),
        sample_project(
            "project-3",
            "EduChain",
            "Blockchain-verified educational certificates for remote learning",
            "Remote education lacks credible certification and verification systems that employers trust.",
            "A blockchain-based platform that issues tamper-proof educational certificates and creates a decentralized learning network.",
            "Remote learners, educational institutions, and employers seeking verified skills",
            16,
            &ANA,
            "ana",
            EngagementCounts {
                follows: 18,
                reactions: 29,
                updates: 2,
                comments: 8,
            },
            date(2024, 2, 1),
        ),
        sample_project(
            "project-4",
            "HealthBot",
            "AI-powered healthcare assistant for underserved communities",
            "Rural and underserved communities lack access to basic healthcare information and preliminary diagnosis.",
            "An AI chatbot that provides health information, symptom checking, and connects users with nearby healthcare resources.",
            "Underserved communities, rural populations, and healthcare-conscious individuals",
            14,
            &DIEGO,
            "diego",
            EngagementCounts {
                follows: 27,
                reactions: 41,
                updates: 4,
                comments: 15,
            },
            date(2024, 1, 20),
        ),
    ]
});

fn sample_builder(
    owner: &SampleBuilder,
    avatar_seed: &str,
    project: BuilderProjectSummary,
    stats: BuilderStats,
) -> BuilderSummary {
    BuilderSummary {
        id: owner.user_id.to_string(),
        full_name: owner.full_name.to_string(),
        bio: Some(owner.bio.to_string()),
        location: Some(owner.location.to_string()),
        skills: owner.skills.iter().map(|s| s.to_string()).collect(),
        user: UserCard {
            id: owner.user_id.to_string(),
            username: Some(owner.username.to_string()),
            avatar_url: Some(avatar(avatar_seed)),
            role: UserRole::Builder,
        },
        projects: vec![project],
        stats,
    }
}

fn sample_builder_project(id: &str, name: &str, follows: u64, reactions: u64, updates: u64) -> BuilderProjectSummary {
    BuilderProjectSummary {
        id: id.to_string(),
        name: name.to_string(),
        status: ProjectStatus::Active,
        counts: EngagementCounts {
            follows,
            reactions,
            updates,
            comments: 0,
        },
    }
}

/// Fixed development dataset served when storage is unreachable.
///
/// The aggregate stats here are fixtures, intentionally larger than the
/// embedded project lists imply.
pub static SAMPLE_BUILDERS: Lazy<Vec<BuilderSummary>> = Lazy::new(|| {
    vec![
        sample_builder(
            &MARIA,
            "maria",
            sample_builder_project("sample-project-id", "EcoTrack", 23, 45, 3),
            BuilderStats {
                total_followers: 156,
                total_updates: 12,
                consistency_score: 95,
                community_rating: 4.8,
            },
        ),
        sample_builder(
            &CARLOS,
            "carlos",
            sample_builder_project("project-2", "LocalConnect", 31, 67, 5),
            BuilderStats {
                total_followers: 203,
                total_updates: 15,
                consistency_score: 88,
                community_rating: 4.6,
            },
        ),
        sample_builder(
            &ANA,
            "ana",
            sample_builder_project("project-3", "EduChain", 18, 29, 2),
            BuilderStats {
                total_followers: 134,
                total_updates: 8,
                consistency_score: 75,
                community_rating: 4.9,
            },
        ),
        sample_builder(
            &DIEGO,
            "diego",
            sample_builder_project("project-4", "HealthBot", 27, 41, 4),
            BuilderStats {
                total_followers: 189,
                total_updates: 11,
                consistency_score: 92,
                community_rating: 4.7,
            },
        ),
    ]
});
