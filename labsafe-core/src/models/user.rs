use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roles used to tailor assistant answers
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Specialist,
    Manager,
    Hr,
    Employee,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Specialist => "specialist",
            Self::Manager => "manager",
            Self::Hr => "hr",
            Self::Employee => "employee",
            Self::Admin => "admin",
        }
    }

    /// Human readable label shown next to the user name
    pub fn label(&self) -> &str {
        match self {
            Self::Specialist => "Специалист по ОТ",
            Self::Manager => "Руководитель",
            Self::Hr => "HR-специалист",
            Self::Employee => "Сотрудник",
            Self::Admin => "Администратор",
        }
    }

    pub fn all() -> [UserRole; 5] {
        [
            Self::Specialist,
            Self::Manager,
            Self::Hr,
            Self::Employee,
            Self::Admin,
        ]
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown user role {s}"))
    }
}

/// Signed-in user as exposed to the rest of the application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

/// User record as persisted under the `users` key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
}

impl StoredUser {
    /// Drop the credentials
    pub fn to_user(&self) -> User {
        self.user.clone()
    }
}
