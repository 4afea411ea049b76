#![forbid(unsafe_code)]
//! Roulement — bibliothèque de rotation de corvée quotidienne (sans BD).
//!
//! - Stockage fichier (JSON), imports/exports CSV.
//! - Attribution round-robin jour par jour ; fériés et absences exclus.
//! - Échanges ponctuels (swap) qui ne décalent jamais la rotation.
//! - Dates calendaires uniquement ; "aujourd'hui" reste à la charge de l'appelant.

pub mod calendar;
pub mod io;
pub mod ledger;
pub mod model;
pub mod notification;
pub mod roster;
pub mod rotation;
pub mod storage;

pub use ledger::MemberStats;
pub use model::{Absence, Assignment, AssignmentId, AssignmentStatus, Member, MemberId, Rota};
pub use notification::{prepare_reminder, Reminder, ReminderRenderer, TextReminder};
pub use rotation::{Planner, RotationError, WindowReport};
pub use storage::{JsonStorage, Storage};
