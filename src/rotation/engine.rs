use super::types::RotationError;
use crate::model::{Assignment, Member, MemberId, Rota};
use crate::{calendar, ledger};
use chrono::NaiveDate;

/// Calcule la ligne d'une date, sans la persister.
///
/// `roster` est l'instantané actif trié de la passe en cours ; l'historique
/// et le calendrier sont lus dans `rota`.
pub(super) fn compute_for(
    rota: &Rota,
    roster: &[Member],
    date: NaiveDate,
) -> Result<Assignment, RotationError> {
    if roster.is_empty() {
        return Err(RotationError::NoEligibleMember(date));
    }
    if !calendar::is_working_day(rota, date) {
        return Ok(Assignment::holiday(date));
    }

    let prev_anchor = last_anchor(rota, date);
    // `sequence` est relu au présent : un réordonnancement déplace le curseur.
    let last_seq = prev_anchor
        .and_then(|id| rota.find_member(id))
        .map(|m| m.sequence);

    let start = match last_seq {
        Some(seq) => roster.iter().position(|m| m.sequence > seq).unwrap_or(0),
        None => 0,
    };

    let due = &roster[start];
    for step in 0..roster.len() {
        let candidate = &roster[(start + step) % roster.len()];
        if !calendar::is_available(rota, &candidate.id, date) {
            continue;
        }
        // La roue n'avance que si le membre dont c'est le tour sert vraiment.
        let anchor = if candidate.id == due.id {
            Some(candidate.id.clone())
        } else {
            prev_anchor.cloned()
        };
        return Ok(Assignment::duty(date, candidate.id.clone(), anchor));
    }
    Err(RotationError::NoEligibleMember(date))
}

/// Ancre de la dernière ligne non fériée avant `date`, s'il y en a une.
fn last_anchor(rota: &Rota, date: NaiveDate) -> Option<&MemberId> {
    ledger::last_duty_before(rota, date)?.anchor.as_ref()
}
