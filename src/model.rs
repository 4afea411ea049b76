use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre de l'équipe, inscrit au roulement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Position dans l'ordre de rotation (clé éparse, trous autorisés).
    pub sequence: u32,
    #[serde(default)]
    pub is_admin: bool,
}

fn default_active() -> bool {
    true
}

impl Member {
    pub fn new<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            id: MemberId::random(),
            name: name.into(),
            email: email.into(),
            phone: None,
            active: true,
            sequence: 0,
            is_admin: false,
        }
    }
}

/// Absence ponctuelle d'un membre (journée entière).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    pub member: MemberId,
    pub date: NaiveDate,
}

/// État d'une ligne du registre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Completed => "completed",
        }
    }
}

/// Identifiant fort pour Assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(String);

impl AssignmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Affectation d'une journée ; au plus une ligne par date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned: Option<MemberId>,
    /// Position de la roue après cette date ; un swap n'y touche jamais.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<MemberId>,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub is_swapped: bool,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// Ligne de corvée en attente pour `date`.
    pub fn duty(date: NaiveDate, member: MemberId, anchor: Option<MemberId>) -> Self {
        Self {
            id: AssignmentId::random(),
            date,
            assigned: Some(member),
            anchor,
            status: AssignmentStatus::Pending,
            is_holiday: false,
            is_swapped: false,
            created_at: Utc::now(),
        }
    }

    /// Ligne fériée : personne d'affecté, non actionnable.
    pub fn holiday(date: NaiveDate) -> Self {
        Self {
            id: AssignmentId::random(),
            date,
            assigned: None,
            anchor: None,
            status: AssignmentStatus::Pending,
            is_holiday: true,
            is_swapped: false,
            created_at: Utc::now(),
        }
    }
}

/// Roulement complet (état persisté)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Rota {
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub absences: Vec<Absence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignments: Vec<Assignment>,
}

impl Rota {
    pub fn find_member<'a>(&'a self, id: &MemberId) -> Option<&'a Member> {
        self.members.iter().find(|m| &m.id == id)
    }
    pub fn find_member_mut(&mut self, id: &MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| &m.id == id)
    }
    pub fn find_member_by_email<'a>(&'a self, email: &str) -> Option<&'a Member> {
        self.members
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
    }
    pub fn find_assignment<'a>(&'a self, id: &AssignmentId) -> Option<&'a Assignment> {
        self.assignments.iter().find(|a| &a.id == id)
    }
    pub fn find_assignment_mut(&mut self, id: &AssignmentId) -> Option<&mut Assignment> {
        self.assignments.iter_mut().find(|a| &a.id == id)
    }
}
