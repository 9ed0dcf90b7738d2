use regex::Regex;
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::Team;
use crate::database::repositories::TeamRepository;
use crate::error::AppError;
use crate::services::avatar::AvatarExternalizer;

/// Upper bound on suffix retries before giving up on a base subdomain.
pub const MAX_SUBDOMAIN_ATTEMPTS: usize = 300;

const SUBDOMAIN_MIN_LENGTH: usize = 4;
const SUBDOMAIN_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubdomainIssue {
    Charset,
    TooShort,
    TooLong,
    Reserved,
}

impl SubdomainIssue {
    /// A numeric suffix lengthens the candidate and changes the word, so it
    /// can repair a too-short or reserved base but never a bad charset or an
    /// overlong one.
    fn fixable_by_suffix(&self) -> bool {
        matches!(self, SubdomainIssue::TooShort | SubdomainIssue::Reserved)
    }

    fn message(&self, candidate: &str) -> String {
        match self {
            SubdomainIssue::Charset => format!(
                "subdomain {:?} may only contain lowercase letters, numbers and dashes",
                candidate
            ),
            SubdomainIssue::TooShort => format!(
                "subdomain {:?} must be at least {} characters",
                candidate, SUBDOMAIN_MIN_LENGTH
            ),
            SubdomainIssue::TooLong => format!(
                "subdomain {:?} must be at most {} characters",
                candidate, SUBDOMAIN_MAX_LENGTH
            ),
            SubdomainIssue::Reserved => format!("subdomain {:?} is reserved", candidate),
        }
    }
}

fn validate_subdomain(candidate: &str, config: &Config) -> Option<SubdomainIssue> {
    let charset = Regex::new(r"^[a-z0-9-]+$").unwrap();
    if !charset.is_match(candidate) {
        return Some(SubdomainIssue::Charset);
    }
    if candidate.len() < SUBDOMAIN_MIN_LENGTH {
        return Some(SubdomainIssue::TooShort);
    }
    if candidate.len() > SUBDOMAIN_MAX_LENGTH {
        return Some(SubdomainIssue::TooLong);
    }
    if config.is_reserved_subdomain(candidate) {
        return Some(SubdomainIssue::Reserved);
    }

    None
}

pub struct TeamService {
    teams: TeamRepository,
    externalizer: AvatarExternalizer,
    config: Config,
}

impl TeamService {
    pub fn new(teams: TeamRepository, externalizer: AvatarExternalizer, config: Config) -> Self {
        Self {
            teams,
            externalizer,
            config,
        }
    }

    /// Allocates a unique subdomain for the team.
    ///
    /// A team that already has one keeps it (`desired` is ignored). Otherwise
    /// `desired` is claimed directly, and when another team holds it the
    /// candidate gets an increasing numeric suffix (`acme`, `acme1`, `acme2`,
    /// ...) until the unique constraint accepts one. The loop is bounded;
    /// past [`MAX_SUBDOMAIN_ATTEMPTS`] it fails with
    /// [`AppError::ProvisioningExhausted`]. A base no suffix can repair is
    /// rejected up front instead of retried.
    pub async fn provision_subdomain(
        &self,
        team_id: Uuid,
        desired: &str,
    ) -> Result<String, AppError> {
        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;

        // Idempotent: re-provisioning keeps the existing subdomain
        if let Some(existing) = team.subdomain {
            return Ok(existing);
        }

        let mut attempts = 0usize;
        loop {
            attempts += 1;
            if attempts > MAX_SUBDOMAIN_ATTEMPTS {
                return Err(AppError::ProvisioningExhausted {
                    base: desired.to_string(),
                    attempts: attempts - 1,
                });
            }

            let candidate = if attempts == 1 {
                desired.to_string()
            } else {
                format!("{}{}", desired, attempts - 1)
            };

            if let Some(issue) = validate_subdomain(&candidate, &self.config) {
                if issue.fixable_by_suffix() {
                    continue;
                }
                return Err(AppError::Validation(issue.message(&candidate)));
            }

            match self.teams.set_subdomain(team_id, &candidate).await {
                Ok(Some(_)) => {
                    log::info!("Provisioned subdomain {} for team {}", candidate, team_id);
                    return Ok(candidate);
                }
                Ok(None) => {
                    return Err(AppError::NotFound(format!("Team {} not found", team_id)));
                }
                Err(err) => {
                    let err = AppError::from(err);
                    if err.is_unique_violation() {
                        // Name taken, try the next suffix
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Persists the team through the pre-persist pipeline: the avatar
    /// externalizer always runs first, then the row is updated. `team` is
    /// refreshed from the stored row.
    pub async fn save(&self, team: &mut Team) -> Result<(), AppError> {
        self.externalizer.process(team).await;

        let saved = self
            .teams
            .update_team(team)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team.id)))?;

        *team = saved;
        Ok(())
    }

    pub async fn soft_delete(&self, team_id: Uuid) -> Result<(), AppError> {
        self.teams
            .soft_delete(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))
    }
}
