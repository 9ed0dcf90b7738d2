use sha2::{Digest, Sha256};
use uuid::Uuid;

const AVATAR_HOST: &str = "https://avatars.teamspace.app";

/// Deterministic fallback avatar for a team that has not uploaded one.
///
/// The same `(id, name)` pair always produces the same URL, so the value can
/// be recomputed on every read instead of being stored.
pub fn generate_avatar_url(id: Uuid, name: &str) -> String {
    let hash = hex::encode(Sha256::digest(format!("{}-{}", id, name)));
    let initial = name
        .chars()
        .next()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('T');

    format!("{}/avatar/{}/{}.png", AVATAR_HOST, &hash[..16], initial)
}
