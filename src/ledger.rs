//! Registre des affectations : lectures par date, insertion, purge, cumuls.

use crate::model::{Assignment, AssignmentStatus, Member, MemberId, Rota};
use crate::rotation::RotationError;
use chrono::NaiveDate;

pub fn assignment_on(rota: &Rota, date: NaiveDate) -> Option<&Assignment> {
    rota.assignments.iter().find(|a| a.date == date)
}

/// Lignes dans `[start, end]` inclus, par date croissante.
pub fn assignments_between<'a>(
    rota: &'a Rota,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a Assignment> {
    let mut rows: Vec<&Assignment> = rota
        .assignments
        .iter()
        .filter(|a| a.date >= start && a.date <= end)
        .collect();
    rows.sort_by_key(|a| a.date);
    rows
}

/// Dernière corvée (ligne non fériée) strictement avant `date`.
pub fn last_duty_before(rota: &Rota, date: NaiveDate) -> Option<&Assignment> {
    rota.assignments
        .iter()
        .filter(|a| a.date < date && !a.is_holiday)
        .max_by_key(|a| a.date)
}

/// Insère une ligne en préservant l'unicité par date ; la liste reste triée.
pub fn insert(rota: &mut Rota, assignment: Assignment) -> Result<(), RotationError> {
    if assignment_on(rota, assignment.date).is_some() {
        return Err(RotationError::Conflict(
            "an assignment already exists for that date",
        ));
    }
    rota.assignments.push(assignment);
    rota.assignments.sort_by_key(|a| a.date);
    Ok(())
}

/// Supprime toutes les lignes de date >= `from` ; renvoie le nombre supprimé.
pub fn delete_future_from(rota: &mut Rota, from: NaiveDate) -> usize {
    let before = rota.assignments.len();
    rota.assignments.retain(|a| a.date < from);
    before - rota.assignments.len()
}

/// Cumul par membre sur `[start, end]`.
#[derive(Debug, Clone)]
pub struct MemberStats {
    pub member: MemberId,
    pub name: String,
    /// Corvées portées par ce membre (les lignes échangées comptent pour le titulaire final).
    pub total: usize,
    pub completed: usize,
    pub last_date: Option<NaiveDate>,
}

/// Un cumul par membre (actif ou non), dans l'ordre de rotation.
pub fn member_stats(rota: &Rota, start: NaiveDate, end: NaiveDate) -> Vec<MemberStats> {
    let mut members: Vec<&Member> = rota.members.iter().collect();
    members.sort_by_key(|m| m.sequence);
    members
        .into_iter()
        .map(|m| {
            let rows: Vec<&Assignment> = rota
                .assignments
                .iter()
                .filter(|a| {
                    a.date >= start && a.date <= end && a.assigned.as_ref() == Some(&m.id)
                })
                .collect();
            MemberStats {
                member: m.id.clone(),
                name: m.name.clone(),
                total: rows.len(),
                completed: rows
                    .iter()
                    .filter(|a| a.status == AssignmentStatus::Completed)
                    .count(),
                last_date: rows.iter().map(|a| a.date).max(),
            }
        })
        .collect()
}
