mod engine;
mod mutate;
mod types;
mod window;

pub use types::{RotationError, WindowReport};

use crate::ledger::{self, MemberStats};
use crate::model::{Assignment, AssignmentId, Member, MemberId, Rota};
use crate::{calendar, roster};
use chrono::NaiveDate;

/// Planner : encapsule un Rota et sérialise toutes ses mutations.
#[derive(Debug, Default)]
pub struct Planner {
    rota: Rota,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            rota: Rota::default(),
        }
    }

    pub fn rota(&self) -> &Rota {
        &self.rota
    }
    pub fn rota_mut(&mut self) -> &mut Rota {
        &mut self.rota
    }

    pub fn add_member(&mut self, member: Member) -> Result<MemberId, RotationError> {
        roster::add_member(&mut self.rota, member)
    }

    pub fn remove_member(&mut self, id: &MemberId) -> Result<(), RotationError> {
        roster::remove_member(&mut self.rota, id)
    }

    pub fn set_active(&mut self, id: &MemberId, active: bool) -> Result<(), RotationError> {
        roster::set_active(&mut self.rota, id, active)
    }

    pub fn reorder(&mut self, ordered: &[MemberId]) -> Result<(), RotationError> {
        roster::reorder(&mut self.rota, ordered)
    }

    pub fn active_roster(&self) -> Vec<Member> {
        roster::active_roster(&self.rota)
    }

    pub fn add_holiday(&mut self, date: NaiveDate) -> Result<(), RotationError> {
        calendar::add_holiday(&mut self.rota, date)
    }

    pub fn remove_holiday(&mut self, date: NaiveDate) -> Result<(), RotationError> {
        calendar::remove_holiday(&mut self.rota, date)
    }

    pub fn mark_absent(
        &mut self,
        member: &MemberId,
        date: NaiveDate,
    ) -> Result<bool, RotationError> {
        calendar::mark_absent(&mut self.rota, member, date)
    }

    pub fn clear_absence(
        &mut self,
        member: &MemberId,
        date: NaiveDate,
    ) -> Result<bool, RotationError> {
        calendar::clear_absence(&mut self.rota, member, date)
    }

    pub fn assignment_on(&self, date: NaiveDate) -> Option<&Assignment> {
        ledger::assignment_on(&self.rota, date)
    }

    pub fn assignments_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Assignment> {
        ledger::assignments_between(&self.rota, start, end)
    }

    pub fn member_stats(&self, start: NaiveDate, end: NaiveDate) -> Vec<MemberStats> {
        ledger::member_stats(&self.rota, start, end)
    }

    /// Matérialise `[from, from + days)` ; s'arrête à la première date sans titulaire.
    pub fn materialize_window(
        &mut self,
        from: NaiveDate,
        days: u32,
    ) -> Result<WindowReport, RotationError> {
        window::materialize_window(self, from, days)
    }

    /// Supprime les lignes de date >= `from` ; la régénération attendra la
    /// prochaine passe de matérialisation.
    pub fn reset_rotation(&mut self, from: NaiveDate) -> usize {
        window::reset_rotation(self, from)
    }

    pub fn complete(&mut self, assignment: &AssignmentId) -> Result<bool, RotationError> {
        mutate::complete(self, assignment)
    }

    pub fn swap(&mut self, assignment: &AssignmentId, with: &MemberId) -> Result<(), RotationError> {
        mutate::swap(self, assignment, with)
    }
}
