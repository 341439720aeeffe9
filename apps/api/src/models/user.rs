use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account. Candidate and recruiter share the account shell; the
/// role-specific fields exist only inside the matching `Role` variant, so a
/// recruiter can never carry a roadmap reference and a candidate can never
/// carry recruiter fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub role: Role,
}

/// Role discriminant. Serialized with a `kind` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Role {
    Candidate(CandidateRole),
    Recruiter(RecruiterRole),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateRole {
    /// Ordered by the candidate; priority 1 is the primary target.
    #[serde(default)]
    pub target_companies: Vec<TargetCompany>,
    /// Reference to the current roadmap document. Replaced wholesale on
    /// regeneration, never edited in place.
    #[serde(default)]
    pub roadmap_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruiterRole {
    pub company: String,
}

/// A (company, position, priority) tuple the candidate is aiming for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetCompany {
    pub company: String,
    pub position: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    1
}

impl User {
    /// Returns the candidate role data, or `None` for recruiters.
    pub fn candidate(&self) -> Option<&CandidateRole> {
        match &self.role {
            Role::Candidate(c) => Some(c),
            Role::Recruiter(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candidate() -> User {
        User {
            id: Uuid::new_v4(),
            email: "dev@example.com".to_string(),
            name: "Dev".to_string(),
            created_at: Utc::now(),
            role: Role::Candidate(CandidateRole {
                target_companies: vec![TargetCompany {
                    company: "Acme".to_string(),
                    position: "Backend Engineer".to_string(),
                    priority: 1,
                }],
                roadmap_id: None,
            }),
        }
    }

    #[test]
    fn test_candidate_serializes_with_kind_tag() {
        let user = make_candidate();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["kind"], "candidate");
        assert_eq!(json["target_companies"][0]["company"], "Acme");
    }

    #[test]
    fn test_recruiter_has_no_candidate_fields() {
        let user = User {
            id: Uuid::new_v4(),
            email: "hr@acme.com".to_string(),
            name: "HR".to_string(),
            created_at: Utc::now(),
            role: Role::Recruiter(RecruiterRole {
                company: "Acme".to_string(),
            }),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["kind"], "recruiter");
        assert!(json.get("target_companies").is_none());
        assert!(user.candidate().is_none());
    }

    #[test]
    fn test_unknown_kind_fails_deserialization() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "email": "x@example.com",
            "name": "X",
            "created_at": Utc::now(),
            "kind": "admin"
        });
        assert!(serde_json::from_value::<User>(json).is_err());
    }

    #[test]
    fn test_target_company_priority_defaults_to_one() {
        let json = serde_json::json!({"company": "Acme", "position": "SWE"});
        let target: TargetCompany = serde_json::from_value(json).unwrap();
        assert_eq!(target.priority, 1);
    }
}
