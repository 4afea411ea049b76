use super::types::RotationError;
use super::Planner;
use crate::model::{AssignmentId, AssignmentStatus, MemberId};

pub(super) fn swap(
    planner: &mut Planner,
    assignment: &AssignmentId,
    with: &MemberId,
) -> Result<(), RotationError> {
    let target_active = planner
        .rota
        .find_member(with)
        .map(|m| m.active)
        .ok_or_else(|| {
            RotationError::Validation(format!("unknown member: {}", with.as_str()))
        })?;
    if !target_active {
        return Err(RotationError::Conflict("swap target is inactive"));
    }

    let Some(row) = planner.rota.find_assignment_mut(assignment) else {
        return Err(RotationError::Validation(format!(
            "unknown assignment: {}",
            assignment.as_str()
        )));
    };
    if row.is_holiday {
        return Err(RotationError::Conflict("cannot swap a holiday date"));
    }
    if row.status == AssignmentStatus::Completed {
        return Err(RotationError::Conflict("assignment already completed"));
    }
    if row.assigned.as_ref() == Some(with) {
        return Err(RotationError::Validation(format!(
            "member already assigned on {}",
            row.date
        )));
    }

    // L'ancre reste en place : un swap est une exception ponctuelle.
    row.assigned = Some(with.clone());
    row.is_swapped = true;
    Ok(())
}

pub(super) fn complete(
    planner: &mut Planner,
    assignment: &AssignmentId,
) -> Result<bool, RotationError> {
    let Some(row) = planner.rota.find_assignment_mut(assignment) else {
        return Err(RotationError::Validation(format!(
            "unknown assignment: {}",
            assignment.as_str()
        )));
    };
    if row.is_holiday {
        return Err(RotationError::Conflict(
            "a holiday entry cannot be completed",
        ));
    }
    match row.status {
        AssignmentStatus::Completed => Ok(false),
        AssignmentStatus::Pending => {
            row.status = AssignmentStatus::Completed;
            Ok(true)
        }
    }
}
