//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain category a user signed up for.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceArea {
    AiValidation,
    Mortgage,
    Medical,
    Banking,
    Automotive,
    Employment,
    Retirement,
    Utilities,
    Education,
    Legal,
    Business,
    #[default]
    Comprehensive,
}

impl ServiceArea {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AiValidation => "ai-validation",
            Self::Mortgage => "mortgage",
            Self::Medical => "medical",
            Self::Banking => "banking",
            Self::Automotive => "automotive",
            Self::Employment => "employment",
            Self::Retirement => "retirement",
            Self::Utilities => "utilities",
            Self::Education => "education",
            Self::Legal => "legal",
            Self::Business => "business",
            Self::Comprehensive => "comprehensive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ai-validation" => Some(Self::AiValidation),
            "mortgage" => Some(Self::Mortgage),
            "medical" => Some(Self::Medical),
            "banking" => Some(Self::Banking),
            "automotive" => Some(Self::Automotive),
            "employment" => Some(Self::Employment),
            "retirement" => Some(Self::Retirement),
            "utilities" => Some(Self::Utilities),
            "education" => Some(Self::Education),
            "legal" => Some(Self::Legal),
            "business" => Some(Self::Business),
            "comprehensive" => Some(Self::Comprehensive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Partner,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Partner => "partner",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "partner" => Some(Self::Partner),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Pending,
    Suspended,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// Qualitative achievement tags awarded to users.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Badge {
    #[serde(rename = "Consumer Advocate")]
    ConsumerAdvocate,
    #[serde(rename = "Financial Watchdog")]
    FinancialWatchdog,
    #[serde(rename = "Transparency Champion")]
    TransparencyChampion,
    #[serde(rename = "Rights Defender")]
    RightsDefender,
}

impl Badge {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConsumerAdvocate => "Consumer Advocate",
            Self::FinancialWatchdog => "Financial Watchdog",
            Self::TransparencyChampion => "Transparency Champion",
            Self::RightsDefender => "Rights Defender",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Consumer Advocate" => Some(Self::ConsumerAdvocate),
            "Financial Watchdog" => Some(Self::FinancialWatchdog),
            "Transparency Champion" => Some(Self::TransparencyChampion),
            "Rights Defender" => Some(Self::RightsDefender),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercase; globally unique.
    pub email: String,
    pub phone: String,
    /// Argon2id PHC-format hash. Never serialized in responses.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub area: ServiceArea,
    pub role: UserRole,
    pub status: UserStatus,
    pub badges: Vec<Badge>,
    /// Running sum of recovery amounts across completed audits.
    pub total_recovery: f64,
    /// Running count of completed audits.
    pub audits_completed: u32,
    pub last_login: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Raw password (hashed with Argon2id before storage).
    pub password: String,
    pub area: Option<ServiceArea>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub area: Option<ServiceArea>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub badges: Option<Vec<Badge>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice Auditor".into(),
            email: "alice@example.com".into(),
            phone: "555-123-4567".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            area: ServiceArea::default(),
            role: UserRole::default(),
            status: UserStatus::default(),
            badges: vec![Badge::ConsumerAdvocate],
            total_recovery: 0.0,
            audits_completed: 0,
            last_login: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = sample_user();
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        // The rest of the identity survives.
        assert_eq!(value["email"], "alice@example.com");
    }

    #[test]
    fn user_deserializes_without_secret() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert!(back.password_hash.is_empty());
        assert_eq!(back.email, user.email);
    }

    #[test]
    fn wire_strings_round_trip() {
        for area in [
            ServiceArea::AiValidation,
            ServiceArea::Retirement,
            ServiceArea::Comprehensive,
        ] {
            assert_eq!(ServiceArea::parse(area.as_str()), Some(area));
        }
        for role in [UserRole::User, UserRole::Partner, UserRole::Admin] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        for status in [
            UserStatus::Active,
            UserStatus::Pending,
            UserStatus::Suspended,
        ] {
            assert_eq!(UserStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(
            Badge::parse("Financial Watchdog"),
            Some(Badge::FinancialWatchdog)
        );
        assert_eq!(Badge::parse("nope"), None);
    }

    #[test]
    fn serde_matches_as_str() {
        let json = serde_json::to_value(ServiceArea::AiValidation).unwrap();
        assert_eq!(json, "ai-validation");
        let json = serde_json::to_value(Badge::RightsDefender).unwrap();
        assert_eq!(json, "Rights Defender");
        let json = serde_json::to_value(UserRole::Admin).unwrap();
        assert_eq!(json, "admin");
    }

    #[test]
    fn defaults_match_registration_contract() {
        assert_eq!(ServiceArea::default(), ServiceArea::Comprehensive);
        assert_eq!(UserRole::default(), UserRole::User);
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }
}
