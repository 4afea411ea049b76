//! Politique calendaire : jours fériés et absences.
//!
//! Les fériés sont des dates absolues (pas de récurrence annuelle) ; les
//! absences sont à la journée, par membre. Le moteur ne fait que lire.

use crate::model::{Absence, MemberId, Rota};
use crate::rotation::RotationError;
use chrono::NaiveDate;

/// Vrai si la date n'est pas un jour férié.
pub fn is_working_day(rota: &Rota, date: NaiveDate) -> bool {
    !rota.holidays.contains(&date)
}

/// Vrai si le membre n'a pas d'absence posée ce jour-là.
pub fn is_available(rota: &Rota, member: &MemberId, date: NaiveDate) -> bool {
    !rota
        .absences
        .iter()
        .any(|a| &a.member == member && a.date == date)
}

/// Déclare un jour férié ; la liste reste triée.
pub fn add_holiday(rota: &mut Rota, date: NaiveDate) -> Result<(), RotationError> {
    if rota.holidays.contains(&date) {
        return Err(RotationError::Conflict(
            "holiday already recorded for that date",
        ));
    }
    rota.holidays.push(date);
    rota.holidays.sort();
    Ok(())
}

/// Retire un jour férié.
pub fn remove_holiday(rota: &mut Rota, date: NaiveDate) -> Result<(), RotationError> {
    let before = rota.holidays.len();
    rota.holidays.retain(|d| *d != date);
    if rota.holidays.len() == before {
        return Err(RotationError::Validation(format!("no holiday on {date}")));
    }
    Ok(())
}

/// Pose une absence. `Ok(false)` si elle était déjà posée.
pub fn mark_absent(
    rota: &mut Rota,
    member: &MemberId,
    date: NaiveDate,
) -> Result<bool, RotationError> {
    if rota.find_member(member).is_none() {
        return Err(RotationError::Validation(format!(
            "unknown member: {}",
            member.as_str()
        )));
    }
    if !is_available(rota, member, date) {
        return Ok(false);
    }
    rota.absences.push(Absence {
        member: member.clone(),
        date,
    });
    Ok(true)
}

/// Lève une absence. `Ok(false)` si rien n'était posé ce jour-là.
pub fn clear_absence(
    rota: &mut Rota,
    member: &MemberId,
    date: NaiveDate,
) -> Result<bool, RotationError> {
    if rota.find_member(member).is_none() {
        return Err(RotationError::Validation(format!(
            "unknown member: {}",
            member.as_str()
        )));
    }
    let before = rota.absences.len();
    rota.absences
        .retain(|a| !(&a.member == member && a.date == date));
    Ok(rota.absences.len() != before)
}
