#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::{io, JsonStorage, Member, MemberId, Planner, Storage};
use std::fs;

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

#[test]
fn json_storage_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roulement.json");

    let (mut p, ids) = seed_team();
    p.add_holiday(d(2025, 6, 4)).unwrap();
    p.mark_absent(&ids[0], d(2025, 6, 5)).unwrap();
    p.materialize_window(d(2025, 6, 2), 5).unwrap();

    let storage = JsonStorage::open(&path).unwrap();
    storage.save(p.rota()).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.members.len(), 3);
    assert_eq!(loaded.holidays, [d(2025, 6, 4)]);
    assert_eq!(loaded.absences.len(), 1);
    assert_eq!(loaded.assignments.len(), 5);
    let wed = loaded
        .assignments
        .iter()
        .find(|a| a.date == d(2025, 6, 4))
        .unwrap();
    assert!(wed.is_holiday);
    assert!(wed.assigned.is_none());
}

#[test]
fn saved_file_keeps_rotation_resumable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roulement.json");
    let storage = JsonStorage::open(&path).unwrap();

    let (mut p, _) = seed_team();
    p.materialize_window(d(2025, 6, 2), 2).unwrap();
    storage.save(p.rota()).unwrap();

    // un nouveau process reprend le fichier et continue la même lignée
    let mut q = Planner::new();
    *q.rota_mut() = storage.load().unwrap();
    q.materialize_window(d(2025, 6, 4), 1).unwrap();
    let row = q.assignment_on(d(2025, 6, 4)).unwrap();
    let member = q.rota().find_member(row.assigned.as_ref().unwrap()).unwrap();
    assert_eq!(member.name, "Carol");
}

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    assert!(storage.load().is_err());
}

#[test]
fn members_csv_import_preserves_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("membres.csv");
    fs::write(
        &path,
        "name,email,phone,admin\nAlice,alice@example.org,0601020304,oui\nBob,bob@example.org,,\nCarol,carol@example.org,,non\n",
    )
    .unwrap();

    let members = io::import_members_csv(&path).unwrap();
    assert_eq!(members.len(), 3);
    assert!(members[0].is_admin);
    assert_eq!(members[0].phone.as_deref(), Some("0601020304"));
    assert!(members[1].phone.is_none());
    assert!(!members[2].is_admin);

    let mut p = Planner::new();
    for m in members {
        p.add_member(m).unwrap();
    }
    let names: Vec<String> = p.active_roster().iter().map(|m| m.name.clone()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);
}

#[test]
fn bad_admin_flag_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("membres.csv");
    fs::write(
        &path,
        "name,email,phone,admin\nAlice,alice@example.org,,peut-etre\n",
    )
    .unwrap();
    assert!(io::import_members_csv(&path).is_err());
}

#[test]
fn holidays_csv_import() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feries.csv");
    fs::write(&path, "date\n2025-06-04\n2025-12-25\n").unwrap();

    let dates = io::import_holidays_csv(&path).unwrap();
    assert_eq!(dates, [d(2025, 6, 4), d(2025, 12, 25)]);

    fs::write(&path, "date\npas-une-date\n").unwrap();
    assert!(io::import_holidays_csv(&path).is_err());
}

#[test]
fn assignments_export_includes_holiday_and_swap_flags() {
    let dir = tempfile::tempdir().unwrap();
    let (mut p, ids) = seed_team();
    p.add_holiday(d(2025, 6, 4)).unwrap();
    p.materialize_window(d(2025, 6, 2), 3).unwrap();
    let tue = p.assignment_on(d(2025, 6, 3)).unwrap().id.clone();
    p.swap(&tue, &ids[2]).unwrap();

    let out = dir.path().join("corvees.csv");
    io::export_assignments_csv(&out, p.rota()).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("date,name,email,status,holiday,swapped"));
    assert!(text.contains("2025-06-02,Alice,alice@example.org,pending,0,0"));
    assert!(text.contains("2025-06-03,Carol,carol@example.org,pending,0,1"));
    assert!(text.contains("2025-06-04,,,pending,1,0"));
}

#[test]
fn members_export_includes_sequence_column() {
    let dir = tempfile::tempdir().unwrap();
    let (p, _) = seed_team();

    let out = dir.path().join("effectif.csv");
    io::export_members_csv(&out, p.rota()).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("sequence,name,email,phone,active,admin"));
    assert!(text.contains("0,Alice,alice@example.org,,1,0"));
    assert!(text.contains("2,Carol,carol@example.org,,1,0"));
}

#[test]
fn rota_json_export_is_readable_back() {
    let dir = tempfile::tempdir().unwrap();
    let (mut p, _) = seed_team();
    p.materialize_window(d(2025, 6, 2), 2).unwrap();

    let out = dir.path().join("export.json");
    io::export_rota_json(&out, p.rota()).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    let parsed: roulement::Rota = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.members.len(), 3);
    assert_eq!(parsed.assignments.len(), 2);
}
