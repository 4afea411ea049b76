//! Gestion de l'effectif : inscription, retrait, activation, ordre de rotation.

use crate::model::{Member, MemberId, Rota};
use crate::rotation::RotationError;

/// Membres actifs, ordonnés par `sequence` croissante (tri stable).
pub fn active_roster(rota: &Rota) -> Vec<Member> {
    let mut roster: Vec<Member> = rota.members.iter().filter(|m| m.active).cloned().collect();
    roster.sort_by_key(|m| m.sequence);
    roster
}

/// Inscrit un membre en queue de rotation et renvoie son identifiant.
pub fn add_member(rota: &mut Rota, mut member: Member) -> Result<MemberId, RotationError> {
    member.name = member.name.trim().to_string();
    member.email = member.email.trim().to_string();
    if member.name.is_empty() {
        return Err(RotationError::Validation("member name is required".into()));
    }
    if member.email.is_empty() || !member.email.contains('@') {
        return Err(RotationError::Validation(format!(
            "invalid email: {:?}",
            member.email
        )));
    }
    if rota.find_member_by_email(&member.email).is_some() {
        return Err(RotationError::Validation(format!(
            "duplicate email: {}",
            member.email
        )));
    }
    member.sequence = rota.members.iter().map(|m| m.sequence + 1).max().unwrap_or(0);
    let id = member.id.clone();
    rota.members.push(member);
    Ok(id)
}

/// Active ou désactive un membre, sans toucher à l'historique.
/// Une réactivation repart en queue de rotation avec une `sequence` neuve,
/// l'ancienne ayant pu être redistribuée aux actifs par `reorder`.
pub fn set_active(rota: &mut Rota, id: &MemberId, active: bool) -> Result<(), RotationError> {
    let tail = rota.members.iter().map(|m| m.sequence + 1).max().unwrap_or(0);
    let Some(member) = rota.find_member_mut(id) else {
        return Err(RotationError::Validation(format!(
            "unknown member: {}",
            id.as_str()
        )));
    };
    if active && !member.active {
        member.sequence = tail;
    }
    member.active = active;
    Ok(())
}

/// Supprime un membre sans aucun historique d'affectation ; sinon Conflict.
pub fn remove_member(rota: &mut Rota, id: &MemberId) -> Result<(), RotationError> {
    if rota.find_member(id).is_none() {
        return Err(RotationError::Validation(format!(
            "unknown member: {}",
            id.as_str()
        )));
    }
    let referenced = rota
        .assignments
        .iter()
        .any(|a| a.assigned.as_ref() == Some(id) || a.anchor.as_ref() == Some(id));
    if referenced {
        return Err(RotationError::Conflict(
            "member has assignment history, deactivate instead",
        ));
    }
    rota.members.retain(|m| &m.id != id);
    rota.absences.retain(|a| &a.member != id);
    Ok(())
}

/// Réécrit l'ordre de rotation : `sequence = index` pour chaque membre listé.
/// La liste doit couvrir exactement les membres actifs ; validation d'abord,
/// écriture ensuite.
pub fn reorder(rota: &mut Rota, ordered: &[MemberId]) -> Result<(), RotationError> {
    let active_count = rota.members.iter().filter(|m| m.active).count();
    if ordered.len() != active_count {
        return Err(RotationError::Validation(format!(
            "order must list all {active_count} active members, got {}",
            ordered.len()
        )));
    }
    for (idx, id) in ordered.iter().enumerate() {
        if ordered[..idx].contains(id) {
            return Err(RotationError::Validation(format!(
                "duplicate member in order: {}",
                id.as_str()
            )));
        }
        match rota.find_member(id) {
            None => {
                return Err(RotationError::Validation(format!(
                    "unknown member: {}",
                    id.as_str()
                )))
            }
            Some(m) if !m.active => {
                return Err(RotationError::Validation(format!(
                    "inactive member in order: {}",
                    id.as_str()
                )))
            }
            Some(_) => {}
        }
    }
    for (idx, id) in ordered.iter().enumerate() {
        if let Some(member) = rota.find_member_mut(id) {
            member.sequence = idx as u32;
        }
    }
    Ok(())
}
