//! Named document collections and their REST slugs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// A named grouping of same-shaped records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Courses,
    Certifications,
    Mentors,
    Programs,
    Attendance,
    Resources,
    ForumPosts,
    Skills,
    Resumes,
    Interviews,
    Settings,
    Mentorship,
    Bookings,
}

impl Collection {
    pub const ALL: [Collection; 14] = [
        Collection::Users,
        Collection::Courses,
        Collection::Certifications,
        Collection::Mentors,
        Collection::Programs,
        Collection::Attendance,
        Collection::Resources,
        Collection::ForumPosts,
        Collection::Skills,
        Collection::Resumes,
        Collection::Interviews,
        Collection::Settings,
        Collection::Mentorship,
        Collection::Bookings,
    ];

    /// Storage name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Courses => "courses",
            Collection::Certifications => "certifications",
            Collection::Mentors => "mentors",
            Collection::Programs => "programs",
            Collection::Attendance => "attendance",
            Collection::Resources => "resources",
            Collection::ForumPosts => "forum_posts",
            Collection::Skills => "skills",
            Collection::Resumes => "resumes",
            Collection::Interviews => "interviews",
            Collection::Settings => "settings",
            Collection::Mentorship => "mentorship",
            Collection::Bookings => "bookings",
        }
    }

    /// URL path segment under `/api`.
    pub fn slug(&self) -> &'static str {
        match self {
            Collection::ForumPosts => "forum-posts",
            other => other.as_str(),
        }
    }

    /// Resolve a URL slug or storage name.
    pub fn from_slug(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == value || c.as_str() == value)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| format!("unknown collection '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forum_posts_slug_differs_from_storage_name() {
        assert_eq!(Collection::ForumPosts.slug(), "forum-posts");
        assert_eq!(Collection::ForumPosts.as_str(), "forum_posts");
        assert_eq!(Collection::from_slug("forum-posts"), Some(Collection::ForumPosts));
        assert_eq!(Collection::from_slug("forum_posts"), Some(Collection::ForumPosts));
    }

    #[test]
    fn test_unknown_slug() {
        assert!("bunks".parse::<Collection>().is_err());
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = Collection::ALL.iter().map(|c| c.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), Collection::ALL.len());
    }
}
