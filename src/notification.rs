use crate::model::{Assignment, AssignmentStatus, Member, Rota};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Représente un rappel généré pour un membre.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub member_email: String,
    pub date: NaiveDate,
    pub notice_at: DateTime<Utc>,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
pub trait ReminderRenderer {
    fn render(&self, member: &Member, assignment: &Assignment, notice_at: DateTime<Utc>) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(&self, member: &Member, assignment: &Assignment, notice_at: DateTime<Utc>) -> String {
        format!(
            "Bonjour {name},\n\nC'est ton tour de corvée du journal le {date}.\nCe message est généré le {notice}.\n\nEn cas d'empêchement, demande un échange avant la date.\n",
            name = member.name,
            date = assignment.date,
            notice = notice_at.to_rfc3339()
        )
    }
}

/// Prépare un rappel pour la prochaine corvée d'un membre.
pub fn prepare_reminder(
    rota: &Rota,
    email: &str,
    days_before: i64,
    now: DateTime<Utc>,
    renderer: &dyn ReminderRenderer,
) -> Result<Reminder> {
    if days_before < 0 {
        bail!("days_before must be positive");
    }

    let member = rota
        .find_member_by_email(email)
        .with_context(|| format!("unknown member email: {email}"))?;

    let today = now.date_naive();
    let mut upcoming: Vec<&Assignment> = rota
        .assignments
        .iter()
        .filter(|a| {
            a.assigned.as_ref() == Some(&member.id)
                && a.date >= today
                && a.status == AssignmentStatus::Pending
        })
        .collect();

    if upcoming.is_empty() {
        bail!("no upcoming duty found for {email}");
    }

    upcoming.sort_by_key(|a| a.date);
    let duty = upcoming[0];

    let notice_at = duty.date.and_time(NaiveTime::MIN).and_utc() - Duration::days(days_before);

    let content = renderer.render(member, duty, notice_at);
    Ok(Reminder {
        member_email: member.email.clone(),
        date: duty.date,
        notice_at,
        content,
    })
}
