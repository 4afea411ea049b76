#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use roulement::{
    io,
    model::{Assignment, Member, MemberId},
    notification::{prepare_reminder, TextReminder},
    rotation::Planner,
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de roulement de corvée (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roulement
    #[arg(long, global = true, default_value = "roulement.json")]
    rota: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inscrire un membre en queue de rotation
    AddMember {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        admin: bool,
    },

    /// Lister l'effectif avec compteurs de corvées
    ListMembers,

    /// Réintégrer un membre dans la rotation
    Activate {
        #[arg(long)]
        email: String,
    },

    /// Sortir un membre de la rotation (l'historique reste)
    Deactivate {
        #[arg(long)]
        email: String,
    },

    /// Supprimer un membre sans historique d'affectation
    RemoveMember {
        #[arg(long)]
        email: String,
    },

    /// Réordonner la rotation
    Reorder {
        /// liste "email1,email2,..." couvrant tous les membres actifs
        #[arg(long)]
        order: String,
    },

    /// Importer des membres depuis un CSV
    ImportMembers {
        #[arg(long)]
        csv: String,
    },

    /// Importer des jours fériés depuis un CSV
    ImportHolidays {
        #[arg(long)]
        csv: String,
    },

    /// Déclarer un jour férié
    AddHoliday {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },

    /// Retirer un jour férié
    RemoveHoliday {
        #[arg(long)]
        date: String,
    },

    /// Poser une absence
    MarkAbsent {
        #[arg(long)]
        email: String,
        /// YYYY-MM-DD (défaut: aujourd'hui)
        #[arg(long)]
        date: Option<String>,
    },

    /// Lever une absence
    ClearAbsence {
        #[arg(long)]
        email: String,
        /// YYYY-MM-DD (défaut: aujourd'hui)
        #[arg(long)]
        date: Option<String>,
    },

    /// Qui prend le journal ce jour-là ?
    Today {
        /// YYYY-MM-DD (défaut: aujourd'hui)
        #[arg(long)]
        date: Option<String>,
    },

    /// Matérialiser puis afficher la fenêtre à venir
    Upcoming {
        /// YYYY-MM-DD (défaut: aujourd'hui)
        #[arg(long)]
        from: Option<String>,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Matérialiser une fenêtre d'affectations
    Materialize {
        /// YYYY-MM-DD (défaut: aujourd'hui)
        #[arg(long)]
        from: Option<String>,
        #[arg(long, default_value_t = 14)]
        days: u32,
    },

    /// Marquer la corvée d'une date comme faite
    Complete {
        /// YYYY-MM-DD (défaut: aujourd'hui)
        #[arg(long)]
        date: Option<String>,
    },

    /// Confier la corvée d'une date à un autre membre (exception ponctuelle)
    Swap {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// email du remplaçant
        #[arg(long)]
        with: String,
    },

    /// Historique d'une période, avec cumul par membre
    History {
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD
        #[arg(long)]
        end: String,
    },

    /// Supprimer les affectations à partir d'une date (régénération différée)
    Reset {
        /// YYYY-MM-DD (défaut: aujourd'hui)
        #[arg(long)]
        from: Option<String>,
    },

    /// Exporter l'état (JSON et/ou CSV)
    Export {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        members_csv: Option<String>,
    },

    /// Générer un rappel texte pour la prochaine corvée d'un membre
    Notify {
        #[arg(long)]
        email: String,
        #[arg(long, default_value_t = 1)]
        days_before: i64,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.rota)?;
    let mut planner = match storage.load() {
        Ok(r) => {
            let mut p = Planner::new();
            *p.rota_mut() = r;
            p
        }
        Err(_) => Planner::new(),
    };

    let code = match cli.cmd {
        Commands::AddMember {
            name,
            email,
            phone,
            admin,
        } => {
            let mut member = Member::new(name, email);
            member.phone = phone;
            member.is_admin = admin;
            let id = planner.add_member(member)?;
            storage.save(planner.rota())?;
            println!("membre inscrit ({})", id.as_str());
            0
        }
        Commands::ListMembers => {
            let stats = planner.member_stats(NaiveDate::MIN, NaiveDate::MAX);
            for st in stats {
                let Some(m) = planner.rota().find_member(&st.member) else {
                    continue;
                };
                let last = st
                    .last_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} | {} <{}> | {}{} | {} corvées ({} faites) | dernière: {}",
                    m.sequence,
                    m.name,
                    m.email,
                    if m.active { "actif" } else { "inactif" },
                    if m.is_admin { " (admin)" } else { "" },
                    st.total,
                    st.completed,
                    last
                );
            }
            0
        }
        Commands::Activate { email } => {
            let id = member_id_by_email(&planner, &email)?;
            planner.set_active(&id, true)?;
            storage.save(planner.rota())?;
            println!("{email} réintègre la rotation (en queue)");
            0
        }
        Commands::Deactivate { email } => {
            let id = member_id_by_email(&planner, &email)?;
            planner.set_active(&id, false)?;
            storage.save(planner.rota())?;
            println!("{email} sort de la rotation (historique conservé)");
            0
        }
        Commands::RemoveMember { email } => {
            let id = member_id_by_email(&planner, &email)?;
            planner.remove_member(&id)?;
            storage.save(planner.rota())?;
            println!("membre {email} supprimé");
            0
        }
        Commands::Reorder { order } => {
            let mut ids = Vec::new();
            for email in order.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
                ids.push(member_id_by_email(&planner, email)?);
            }
            planner.reorder(&ids)?;
            storage.save(planner.rota())?;
            println!("rotation réordonnée ({} membres)", ids.len());
            0
        }
        Commands::ImportMembers { csv } => {
            let members = io::import_members_csv(csv)?;
            let count = members.len();
            for m in members {
                planner.add_member(m)?;
            }
            storage.save(planner.rota())?;
            println!("{count} membres importés");
            0
        }
        Commands::ImportHolidays { csv } => {
            let dates = io::import_holidays_csv(csv)?;
            let mut added = 0;
            for d in dates {
                // ré-import toléré : les dates déjà connues sont ignorées
                if planner.rota().holidays.contains(&d) {
                    continue;
                }
                planner.add_holiday(d)?;
                added += 1;
            }
            storage.save(planner.rota())?;
            println!("{added} jours fériés importés");
            0
        }
        Commands::AddHoliday { date } => {
            let date: NaiveDate = date.trim().parse()?;
            planner.add_holiday(date)?;
            storage.save(planner.rota())?;
            if planner.assignment_on(date).is_some() {
                println!("férié déclaré ; le {date} était déjà affecté (reset + materialize pour reprendre)");
            } else {
                println!("férié déclaré le {date}");
            }
            0
        }
        Commands::RemoveHoliday { date } => {
            let date: NaiveDate = date.trim().parse()?;
            planner.remove_holiday(date)?;
            storage.save(planner.rota())?;
            println!("férié retiré le {date}");
            0
        }
        Commands::MarkAbsent { email, date } => {
            let date = parse_date_arg(date)?;
            let id = member_id_by_email(&planner, &email)?;
            let added = planner.mark_absent(&id, date)?;
            storage.save(planner.rota())?;
            if !added {
                println!("absence déjà posée");
            } else if planner.assignment_on(date).is_some() {
                println!("absence posée ; le {date} était déjà affecté (swap, ou reset + materialize)");
            } else {
                println!("absence posée le {date}");
            }
            0
        }
        Commands::ClearAbsence { email, date } => {
            let date = parse_date_arg(date)?;
            let id = member_id_by_email(&planner, &email)?;
            let removed = planner.clear_absence(&id, date)?;
            storage.save(planner.rota())?;
            if removed {
                println!("absence levée le {date}");
            } else {
                println!("aucune absence posée ce jour-là");
            }
            0
        }
        Commands::Today { date } => {
            let date = parse_date_arg(date)?;
            match planner.assignment_on(date) {
                Some(a) => {
                    print_row(&planner, a);
                    0
                }
                None => {
                    println!("{date} | aucune affectation (lancer `materialize`)");
                    0
                }
            }
        }
        Commands::Upcoming { from, days } => {
            let from = parse_date_arg(from)?;
            let report = planner.materialize_window(from, days)?;
            storage.save(planner.rota())?;
            let mut shown = 0u32;
            let mut date = from;
            while shown < days {
                match planner.assignment_on(date) {
                    Some(a) => print_row(&planner, a),
                    None => break,
                }
                shown += 1;
                match date.succ_opt() {
                    Some(next) => date = next,
                    None => break,
                }
            }
            match report.halted_at {
                Some(d) => {
                    eprintln!("bloqué au {d}: personne d'éligible");
                    // Code 2 = WARNING/INCOMPLETE
                    2
                }
                None => 0,
            }
        }
        Commands::Materialize { from, days } => {
            let from = parse_date_arg(from)?;
            let report = planner.materialize_window(from, days)?;
            storage.save(planner.rota())?;
            println!(
                "{} corvées créées, {} fériés, {} dates déjà tenues",
                report.created, report.holidays, report.skipped_existing
            );
            match report.halted_at {
                Some(d) => {
                    eprintln!("bloqué au {d}: personne d'éligible (absences ? effectif vide ?)");
                    // Code 2 = WARNING/INCOMPLETE
                    2
                }
                None => 0,
            }
        }
        Commands::Complete { date } => {
            let date = parse_date_arg(date)?;
            let id = planner
                .assignment_on(date)
                .map(|a| a.id.clone())
                .ok_or_else(|| anyhow::anyhow!("no assignment on {date}"))?;
            let changed = planner.complete(&id)?;
            storage.save(planner.rota())?;
            if changed {
                println!("{date} | corvée marquée faite");
            } else {
                println!("{date} | déjà faite");
            }
            0
        }
        Commands::Swap { date, with } => {
            let date: NaiveDate = date.trim().parse()?;
            let with_id = member_id_by_email(&planner, &with)?;
            let id = planner
                .assignment_on(date)
                .map(|a| a.id.clone())
                .ok_or_else(|| anyhow::anyhow!("no assignment on {date}"))?;
            planner.swap(&id, &with_id)?;
            storage.save(planner.rota())?;
            println!("{date} | corvée confiée à {with}");
            0
        }
        Commands::History { start, end } => {
            let start: NaiveDate = start.trim().parse()?;
            let end: NaiveDate = end.trim().parse()?;
            for a in planner.assignments_between(start, end) {
                print_row(&planner, a);
            }
            for st in planner.member_stats(start, end) {
                let last = st
                    .last_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "cumul | {} | {} corvées ({} faites) | dernière: {}",
                    st.name, st.total, st.completed, last
                );
            }
            0
        }
        Commands::Reset { from } => {
            let from = parse_date_arg(from)?;
            let deleted = planner.reset_rotation(from);
            storage.save(planner.rota())?;
            println!("{deleted} affectations supprimées à partir du {from}");
            0
        }
        Commands::Export {
            out_json,
            out_csv,
            members_csv,
        } => {
            if let Some(path) = out_json {
                io::export_rota_json(path, planner.rota())?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, planner.rota())?;
            }
            if let Some(path) = members_csv {
                io::export_members_csv(path, planner.rota())?;
            }
            0
        }
        Commands::Notify {
            email,
            days_before,
            out,
        } => {
            let renderer = TextReminder;
            let reminder =
                prepare_reminder(planner.rota(), &email, days_before, Utc::now(), &renderer)?;
            std::fs::write(&out, reminder.content)?;
            println!(
                "rappel généré pour {} (corvée du {}), à envoyer le {}",
                reminder.member_email,
                reminder.date,
                reminder.notice_at.to_rfc3339()
            );
            0
        }
    };

    std::process::exit(code);
}

fn parse_date_arg(raw: Option<String>) -> Result<NaiveDate> {
    match raw {
        Some(s) => Ok(s.trim().parse()?),
        None => Ok(Utc::now().date_naive()),
    }
}

fn member_id_by_email(planner: &Planner, email: &str) -> Result<MemberId> {
    planner
        .rota()
        .find_member_by_email(email)
        .map(|m| m.id.clone())
        .ok_or_else(|| anyhow::anyhow!("unknown member: {}", email))
}

// impression compacte, une ligne par date
fn print_row(planner: &Planner, a: &Assignment) {
    if a.is_holiday {
        println!("{} | férié", a.date);
        return;
    }
    let name = a
        .assigned
        .as_ref()
        .and_then(|id| planner.rota().find_member(id))
        .map(|m| m.name.as_str())
        .unwrap_or("-");
    println!(
        "{} | {} | {}{}",
        a.date,
        name,
        a.status.as_str(),
        if a.is_swapped { " (échange)" } else { "" }
    );
}
