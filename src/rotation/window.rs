use super::engine;
use super::types::{RotationError, WindowReport};
use super::Planner;
use crate::{ledger, roster};
use anyhow::Context;
use chrono::NaiveDate;

pub(super) fn materialize_window(
    planner: &mut Planner,
    from: NaiveDate,
    days: u32,
) -> Result<WindowReport, RotationError> {
    // Instantané unique de l'effectif actif pour toute la passe.
    let snapshot = roster::active_roster(&planner.rota);
    let mut report = WindowReport::default();
    let mut date = from;

    for _ in 0..days {
        if ledger::assignment_on(&planner.rota, date).is_some() {
            report.skipped_existing += 1;
        } else {
            match engine::compute_for(&planner.rota, &snapshot, date) {
                Ok(row) => {
                    if row.is_holiday {
                        report.holidays += 1;
                    } else {
                        report.created += 1;
                    }
                    ledger::insert(&mut planner.rota, row)?;
                }
                // Chaque date dépend des précédentes : on s'arrête net.
                Err(RotationError::NoEligibleMember(d)) => {
                    report.halted_at = Some(d);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        date = date.succ_opt().context("date overflow")?;
    }

    #[cfg(feature = "logging")]
    match report.halted_at {
        Some(d) => tracing::warn!(
            created = report.created,
            halted_at = %d,
            "materialization halted, nobody eligible"
        ),
        None => tracing::info!(
            created = report.created,
            holidays = report.holidays,
            skipped = report.skipped_existing,
            "window materialized"
        ),
    }

    Ok(report)
}

pub(super) fn reset_rotation(planner: &mut Planner, from: NaiveDate) -> usize {
    let deleted = ledger::delete_future_from(&mut planner.rota, from);
    #[cfg(feature = "logging")]
    tracing::info!(deleted, from = %from, "rotation reset, regeneration is lazy");
    deleted
}
