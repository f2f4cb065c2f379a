//! Member model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Variant-specific part of a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberKind {
    Student { roll_number: String },
    Librarian,
}

/// Member role without payload, used when creating members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Student,
    Librarian,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Student => "student",
            MemberRole::Librarian => "librarian",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(MemberRole::Student),
            "librarian" => Ok(MemberRole::Librarian),
            _ => Err(format!("Invalid member role: {}", s)),
        }
    }
}

/// Library member (student or librarian)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(flatten)]
    pub kind: MemberKind,
}

impl Member {
    pub fn role(&self) -> MemberRole {
        match self.kind {
            MemberKind::Student { .. } => MemberRole::Student,
            MemberKind::Librarian => MemberRole::Librarian,
        }
    }

    pub fn roll_number(&self) -> Option<&str> {
        match &self.kind {
            MemberKind::Student { roll_number } => Some(roll_number.as_str()),
            MemberKind::Librarian => None,
        }
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            MemberKind::Student { roll_number } => {
                let roll = if roll_number.is_empty() { "-" } else { roll_number };
                write!(f, "[{}] {} (Student) R:{}", self.id, self.name, roll)
            }
            MemberKind::Librarian => write!(f, "[{}] {} (Librarian)", self.id, self.name),
        }
    }
}

/// Create member request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMember {
    pub role: MemberRole,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Required for students, ignored for librarians
    pub roll_number: Option<String>,
}

impl NewMember {
    pub(crate) fn trimmed(self) -> Self {
        Self {
            role: self.role,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            roll_number: self.roll_number.map(|r| r.trim().to_string()),
        }
    }
}

/// Partial member update; `None` keeps the current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub roll_number: Option<String>,
}

impl MemberEdit {
    pub(crate) fn apply_to(self, member: &mut Member) {
        if let Some(name) = self.name {
            member.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            member.email = email.trim().to_string();
        }
        if let Some(phone) = self.phone {
            member.phone = phone.trim().to_string();
        }
        if let (Some(roll), MemberKind::Student { roll_number }) = (self.roll_number, &mut member.kind) {
            *roll_number = roll.trim().to_string();
        }
    }
}
