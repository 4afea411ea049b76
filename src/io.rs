use crate::ledger;
use crate::model::{Member, Rota};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de membres depuis CSV: header `name,email[,phone][,admin]`
pub fn import_members_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Member>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let email = rec.get(1).context("missing email")?.trim();
        if name.is_empty() || email.is_empty() {
            bail!("invalid member row (empty)");
        }
        let mut member = Member::new(name, email);
        if let Some(phone) = rec.get(2) {
            let phone = phone.trim();
            if !phone.is_empty() {
                member.phone = Some(phone.to_string());
            }
        }
        if let Some(flag) = rec.get(3) {
            let flag = flag.trim();
            if !flag.is_empty() {
                member.is_admin = parse_bool(flag)
                    .with_context(|| format!("invalid admin value for {email}"))?;
            }
        }
        out.push(member);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Import de jours fériés depuis CSV: header `date` (YYYY-MM-DD)
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<NaiveDate>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let raw = rec.get(0).context("missing date")?.trim();
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {raw}"))?;
        out.push(date);
    }
    Ok(out)
}

/// Export JSON du roulement (jolie mise en forme)
pub fn export_rota_json<P: AsRef<Path>>(path: P, rota: &Rota) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(rota)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des affectations: header `date,name,email,status,holiday,swapped`
pub fn export_assignments_csv<P: AsRef<Path>>(path: P, rota: &Rota) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "name", "email", "status", "holiday", "swapped"])?;
    for a in ledger::assignments_between(rota, NaiveDate::MIN, NaiveDate::MAX) {
        let member = a.assigned.as_ref().and_then(|id| rota.find_member(id));
        let date = a.date.to_string();
        w.write_record([
            date.as_str(),
            member.map(|m| m.name.as_str()).unwrap_or(""),
            member.map(|m| m.email.as_str()).unwrap_or(""),
            a.status.as_str(),
            if a.is_holiday { "1" } else { "0" },
            if a.is_swapped { "1" } else { "0" },
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV de l'effectif: header `sequence,name,email,phone,active,admin`
pub fn export_members_csv<P: AsRef<Path>>(path: P, rota: &Rota) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["sequence", "name", "email", "phone", "active", "admin"])?;
    let mut members: Vec<&Member> = rota.members.iter().collect();
    members.sort_by_key(|m| m.sequence);
    let mut seq = itoa::Buffer::new();
    for m in members {
        w.write_record([
            seq.format(m.sequence),
            m.name.as_str(),
            m.email.as_str(),
            m.phone.as_deref().unwrap_or(""),
            if m.active { "1" } else { "0" },
            if m.is_admin { "1" } else { "0" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
