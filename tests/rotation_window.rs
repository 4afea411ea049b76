#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::{Member, MemberId, Planner, RotationError};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn seed_team() -> (Planner, Vec<MemberId>) {
    let mut p = Planner::new();
    let ids = vec![
        p.add_member(Member::new("Alice", "alice@example.org")).unwrap(),
        p.add_member(Member::new("Bob", "bob@example.org")).unwrap(),
        p.add_member(Member::new("Carol", "carol@example.org")).unwrap(),
    ];
    (p, ids)
}

// (date, nom, férié) pour comparer des registres entiers sans dépendre des ids
fn snapshot(p: &Planner) -> Vec<(NaiveDate, Option<String>, bool)> {
    p.assignments_between(NaiveDate::MIN, NaiveDate::MAX)
        .into_iter()
        .map(|a| {
            let name = a
                .assigned
                .as_ref()
                .and_then(|id| p.rota().find_member(id))
                .map(|m| m.name.clone());
            (a.date, name, a.is_holiday)
        })
        .collect()
}

#[test]
fn double_materialization_is_idempotent() {
    let (mut p, _) = seed_team();
    let first = p.materialize_window(d(2025, 6, 2), 7).unwrap();
    assert_eq!(first.created, 7);

    let before = snapshot(&p);
    let second = p.materialize_window(d(2025, 6, 2), 7).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped_existing, 7);
    assert_eq!(snapshot(&p), before);
}

#[test]
fn overlapping_windows_share_the_same_lineage() {
    let (mut p, _) = seed_team();
    let (mut q, _) = seed_team();

    // une passe de 10 jours d'un côté, deux passes qui se chevauchent de l'autre
    p.materialize_window(d(2025, 6, 2), 10).unwrap();
    q.materialize_window(d(2025, 6, 2), 6).unwrap();
    q.materialize_window(d(2025, 6, 5), 7).unwrap();

    assert_eq!(snapshot(&p), snapshot(&q));
}

#[test]
fn reset_then_rematerialize_reproduces_history() {
    let (mut p, _) = seed_team();
    p.add_holiday(d(2025, 6, 9)).unwrap();
    p.materialize_window(d(2025, 6, 2), 10).unwrap();
    let before = snapshot(&p);

    let deleted = p.reset_rotation(d(2025, 6, 6));
    assert_eq!(deleted, 6);
    assert_eq!(p.assignments_between(NaiveDate::MIN, NaiveDate::MAX).len(), 4);

    p.materialize_window(d(2025, 6, 6), 6).unwrap();
    assert_eq!(snapshot(&p), before);
}

#[test]
fn reset_leaves_prior_history_untouched() {
    let (mut p, _) = seed_team();
    p.materialize_window(d(2025, 6, 2), 5).unwrap();
    let mon = p.assignment_on(d(2025, 6, 2)).unwrap().id.clone();
    p.complete(&mon).unwrap();

    let deleted = p.reset_rotation(d(2025, 6, 4));
    assert_eq!(deleted, 3);
    assert!(p.assignment_on(d(2025, 6, 2)).is_some());
    assert!(p.assignment_on(d(2025, 6, 3)).is_some());
    assert!(p.assignment_on(d(2025, 6, 4)).is_none());
}

#[test]
fn empty_roster_halts_immediately() {
    let mut p = Planner::new();
    let report = p.materialize_window(d(2025, 6, 2), 5).unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.halted_at, Some(d(2025, 6, 2)));
    assert!(p.assignment_on(d(2025, 6, 2)).is_none());
}

#[test]
fn empty_roster_halts_even_on_a_holiday_date() {
    let mut p = Planner::new();
    // l'effectif vide prime sur le férié
    p.add_holiday(d(2025, 6, 2)).unwrap();
    let report = p.materialize_window(d(2025, 6, 2), 5).unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.holidays, 0);
    assert_eq!(report.halted_at, Some(d(2025, 6, 2)));
    assert!(p.assignment_on(d(2025, 6, 2)).is_none());
}

#[test]
fn fully_absent_day_halts_then_resumes_after_fix() {
    let (mut p, ids) = seed_team();
    for id in &ids {
        p.mark_absent(id, d(2025, 6, 4)).unwrap();
    }

    let report = p.materialize_window(d(2025, 6, 2), 5).unwrap();
    assert_eq!(report.created, 2);
    assert_eq!(report.halted_at, Some(d(2025, 6, 4)));
    assert!(p.assignment_on(d(2025, 6, 4)).is_none());

    // une fois l'absence levée, la passe suivante reprend au point bloqué
    p.clear_absence(&ids[2], d(2025, 6, 4)).unwrap();
    let retry = p.materialize_window(d(2025, 6, 2), 5).unwrap();
    assert_eq!(retry.skipped_existing, 2);
    assert_eq!(retry.created, 3);
    assert!(retry.halted_at.is_none());

    let names: Vec<String> = p
        .assignments_between(d(2025, 6, 4), d(2025, 6, 6))
        .iter()
        .map(|a| {
            let id = a.assigned.as_ref().unwrap();
            p.rota().find_member(id).unwrap().name.clone()
        })
        .collect();
    assert_eq!(names, ["Carol", "Alice", "Bob"]);
}

#[test]
fn zero_day_window_is_a_no_op() {
    let (mut p, _) = seed_team();
    let report = p.materialize_window(d(2025, 6, 2), 0).unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.holidays, 0);
    assert_eq!(report.skipped_existing, 0);
    assert!(report.halted_at.is_none());
}

#[test]
fn error_taxonomy_distinguishes_retryable() {
    assert!(RotationError::NoEligibleMember(d(2025, 6, 2)).is_retryable());
    assert!(!RotationError::Conflict("refused").is_retryable());
    assert!(!RotationError::Validation("bad input".to_string()).is_retryable());
}
