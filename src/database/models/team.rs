use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::avatars;
use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    /// Unique token routing the team under the product's base domain.
    /// Never cleared or reassigned once set.
    pub subdomain: Option<String>,
    /// Fully owned external domain; takes precedence over the subdomain.
    pub domain: Option<String>,
    pub avatar_url: Option<String>,
    pub sharing: bool,
    pub guest_signin: bool,
    pub document_embeds: bool,
    pub created_at: DateTime<Utc>, // TIMESTAMPTZ
    pub updated_at: DateTime<Utc>, // TIMESTAMPTZ
    pub deleted_at: Option<DateTime<Utc>>, // soft-delete tombstone
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamInput {
    pub name: String,
    pub domain: Option<String>,
    pub avatar_url: Option<String>,
}

impl Team {
    /// Public URL the team is reachable at. Recomputed on every call, never
    /// stored.
    pub fn url(&self, config: &Config) -> String {
        if let Some(domain) = &self.domain {
            return format!("https://{}", domain);
        }

        let base = config.base_url.trim_end_matches('/').to_string();
        let subdomain = match (&self.subdomain, config.subdomains_enabled) {
            (Some(subdomain), true) => subdomain,
            _ => return base,
        };

        let Ok(mut parsed) = Url::parse(&config.base_url) else {
            return base;
        };
        let Some(host) = parsed.host_str() else {
            return base;
        };

        let host = format!("{}.{}", subdomain, strip_subdomain(host));
        if parsed.set_host(Some(&host)).is_err() {
            return base;
        }

        parsed.as_str().trim_end_matches('/').to_string()
    }

    /// Avatar if one is set, otherwise a deterministic generated fallback.
    pub fn logo_url(&self) -> String {
        self.avatar_url
            .clone()
            .unwrap_or_else(|| avatars::generate_avatar_url(self.id, &self.name))
    }
}

/// Drops the leading label of a host that already carries a subdomain, so
/// `app.example.com` becomes `example.com`. Bare domains pass through.
///
/// The check is a label count, not a public-suffix lookup: a bare host under
/// a multi-label suffix (`example.co.uk`) would lose its `example` label, so
/// `BASE_URL` on such suffixes must include an app label (`app.example.co.uk`).
fn strip_subdomain(host: &str) -> &str {
    if host.split('.').count() > 2 {
        host.split_once('.').map(|(_, rest)| rest).unwrap_or(host)
    } else {
        host
    }
}
