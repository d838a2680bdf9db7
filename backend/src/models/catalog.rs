//! Courses, mentors and forum posts.
//!
//! These are the views that ship with built-in sample content, shown when the
//! server has nothing to offer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SyllabusModule {
    pub id: String,
    pub title: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub instructor_avatar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub syllabus: Vec<SyllabusModule>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub military_branch: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub avatar: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForumPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub replies: u32,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

pub fn sample_courses() -> Vec<Course> {
    vec![Course {
        id: "1".into(),
        title: "Project Management Professional (PMP) Prep".into(),
        provider: "VetPath Academy".into(),
        category: "Project Management".into(),
        duration: "40 hours".into(),
        progress: 45,
        image: "https://picsum.photos/seed/pmp/800/400".into(),
        difficulty: "Advanced".into(),
        instructor: "Maj. Robert Sterling".into(),
        instructor_avatar: "https://picsum.photos/seed/instructor1/100/100".into(),
        description: "Bridges tactical operations and corporate project management frameworks."
            .into(),
        rating: 4.9,
        reviews: 128,
        syllabus: vec![
            module("m1", "Intro to Agile vs. Waterfall", "2h"),
            module("m2", "The PMBOK Guide for Veterans", "5h"),
            module("m3", "Stakeholder Management & Communications", "4h"),
        ],
        extra: Map::new(),
    }]
}

pub fn sample_mentors() -> Vec<Mentor> {
    vec![Mentor {
        id: "m1".into(),
        name: "Sarah Johnson".into(),
        role: "Senior Project Manager".into(),
        company: "Amazon".into(),
        military_branch: "U.S. Army".into(),
        specialties: vec!["Operations".into(), "Agile".into(), "Resume Review".into()],
        avatar: "https://picsum.photos/seed/sarah/100/100".into(),
        extra: Map::new(),
    }]
}

pub fn sample_forum_posts() -> Vec<ForumPost> {
    vec![ForumPost {
        id: "p1".into(),
        author: "John Doe (Army Vet)".into(),
        title: "Tips for translating leadership skills to corporate?".into(),
        content: "How did you describe commanding a platoon on a tech resume?".into(),
        date: "2 hours ago".into(),
        likes: 24,
        replies: 12,
        extra: Map::new(),
    }]
}

fn module(id: &str, title: &str, duration: &str) -> SyllabusModule {
    SyllabusModule {
        id: id.into(),
        title: title.into(),
        duration: duration.into(),
    }
}
