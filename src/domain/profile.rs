//! Role-specific profiles attached to a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserSummary;

/// Normalized set of free-form tags (expertise, languages, goals, interests).
///
/// Stored as a single comma-joined column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
#[schema(value_type = Vec<String>)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().replace(',', " ");
            let tag = tag.trim();
            if tag.is_empty() || normalized.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                continue;
            }
            normalized.push(tag.to_string());
        }
        Self(normalized)
    }

    /// Parse the stored column.
    pub fn from_stored(stored: &str) -> Self {
        Self::new(stored.split(','))
    }

    /// Render for storage.
    pub fn to_stored(&self) -> String {
        self.0.join(",")
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring match against any tag.
    pub fn any_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.0.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<Tags> for Vec<String> {
    fn from(tags: Tags) -> Self {
        tags.0
    }
}

/// Mentor profile. Hidden from mentees until approved.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub expertise: Tags,
    pub languages: Tags,
    pub availability: String,
    pub experience: String,
    pub education: String,
    pub location: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a mentor fills in at registration.
#[derive(Debug, Clone, Default)]
pub struct MentorProfileInput {
    pub bio: String,
    pub expertise: Tags,
    pub languages: Tags,
    pub availability: String,
    pub experience: String,
    pub education: String,
    pub location: String,
}

/// Mentee profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenteeProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub goals: Tags,
    pub interests: Tags,
    pub location: String,
    pub education: String,
    pub created_at: DateTime<Utc>,
}

/// Fields a mentee fills in at registration.
#[derive(Debug, Clone, Default)]
pub struct MenteeProfileInput {
    pub bio: String,
    pub goals: Tags,
    pub interests: Tags,
    pub location: String,
    pub education: String,
}

/// Profile data collected at registration, one variant per account type.
#[derive(Debug, Clone)]
pub enum ProfileInput {
    Mentor(MentorProfileInput),
    Mentee(MenteeProfileInput),
}

/// Approved mentor as listed in the directory.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorListing {
    #[serde(flatten)]
    pub profile: MentorProfile,
    pub user: UserSummary,
}

impl MentorListing {
    /// Case-insensitive substring filters used by the mentee dashboard.
    ///
    /// `search` looks at first name, last name and bio; `expertise` looks at
    /// the expertise tags. Blank filters match everything.
    pub fn matches(&self, search: Option<&str>, expertise: Option<&str>) -> bool {
        let search_ok = match search.map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                [&self.user.first_name, &self.user.last_name, &self.profile.bio]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
        };
        let expertise_ok = match expertise.map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(term) => self.profile.expertise.any_contains(term),
        };
        search_ok && expertise_ok
    }
}

/// Slice of a mentor profile shown alongside a mentee's sent requests.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfileSummary {
    pub bio: String,
    pub expertise: Tags,
    pub location: String,
}

impl From<&MentorProfile> for MentorProfileSummary {
    fn from(profile: &MentorProfile) -> Self {
        Self {
            bio: profile.bio.clone(),
            expertise: profile.expertise.clone(),
            location: profile.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(first: &str, bio: &str, expertise: &[&str]) -> MentorListing {
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        MentorListing {
            profile: MentorProfile {
                id: Uuid::new_v4(),
                user_id,
                bio: bio.to_string(),
                expertise: Tags::new(expertise.iter()),
                languages: Tags::default(),
                availability: String::new(),
                experience: String::new(),
                education: String::new(),
                location: "Kigali".to_string(),
                is_approved: true,
                created_at: now,
                updated_at: now,
            },
            user: UserSummary {
                id: user_id,
                first_name: first.to_string(),
                last_name: "Mugisha".to_string(),
                email: "m@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_tags_normalization() {
        let tags = Tags::new(["  Finance ", "", "finance", "Data, AI", "Software"]);
        assert_eq!(tags.as_slice(), ["Finance", "Data  AI", "Software"]);
    }

    #[test]
    fn test_tags_storage_round_trip() {
        let tags = Tags::new(["Finance", "Software"]);
        assert_eq!(tags.to_stored(), "Finance,Software");
        assert_eq!(Tags::from_stored("Finance,Software"), tags);
        assert!(Tags::from_stored("").is_empty());
    }

    #[test]
    fn test_tags_serialize_as_array() {
        let json = serde_json::to_value(Tags::new(["Finance"])).unwrap();
        assert_eq!(json, serde_json::json!(["Finance"]));
        let parsed: Tags = serde_json::from_value(serde_json::json!([" a ", "a"])).unwrap();
        assert_eq!(parsed.as_slice(), ["a"]);
    }

    #[test]
    fn test_listing_filters() {
        let mentor = listing("Jean", "Banker in Toronto", &["Finance", "Investing"]);

        assert!(mentor.matches(None, None));
        assert!(mentor.matches(Some("  "), Some("")));
        assert!(mentor.matches(Some("jEaN"), None));
        assert!(mentor.matches(Some("mugi"), None));
        assert!(mentor.matches(Some("toronto"), None));
        assert!(mentor.matches(None, Some("invest")));
        assert!(mentor.matches(Some("banker"), Some("fin")));
        assert!(!mentor.matches(Some("nairobi"), None));
        assert!(!mentor.matches(None, Some("medicine")));
    }

    #[test]
    fn test_listing_flattens_profile() {
        let json = serde_json::to_value(listing("Jean", "bio", &["Finance"])).unwrap();
        assert_eq!(json["isApproved"], true);
        assert_eq!(json["expertise"], serde_json::json!(["Finance"]));
        assert_eq!(json["user"]["firstName"], "Jean");
    }
}
