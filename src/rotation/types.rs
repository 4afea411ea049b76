use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotationError {
    /// Requête malformée : champ manquant, email en double, identifiant inconnu.
    #[error("validation: {0}")]
    Validation(String),
    /// Mutation refusée en l'état : date déjà tenue, ligne close, membre historisé.
    #[error("conflict: {0}")]
    Conflict(&'static str),
    /// Personne d'éligible ce jour-là (effectif vide ou tout le monde absent).
    #[error("no eligible member for {0}")]
    NoEligibleMember(NaiveDate),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RotationError {
    /// Vrai si retenter plus tard peut suffire, sans corriger la requête.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RotationError::NoEligibleMember(_))
    }
}

/// Bilan d'une passe de matérialisation.
#[derive(Debug, Clone, Default)]
pub struct WindowReport {
    /// Lignes de corvée créées.
    pub created: usize,
    /// Lignes fériées créées.
    pub holidays: usize,
    /// Dates déjà tenues, laissées telles quelles.
    pub skipped_existing: usize,
    /// Première date restée sans titulaire ; la passe s'est arrêtée là.
    pub halted_at: Option<NaiveDate>,
}
