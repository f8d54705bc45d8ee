//! Invite entity - a shareable, usage-bounded token granting guild membership

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Highest number of uses an invite may be created with
pub const MAX_INVITE_USES: i32 = 1000;

/// Alphabet for human-shareable invite codes
const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated invite codes
const CODE_LENGTH: usize = 8;

/// Generate a random human-shareable invite code
pub fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Invite entity, keyed by its code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub code: String,
    pub guild_id: Snowflake,
    pub inviter_id: Snowflake,
    pub uses: i32,
    pub max_uses: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Create a new Invite
    ///
    /// Fails with a validation error unless `0 < max_uses <= 1000`.
    pub fn new(
        code: String,
        guild_id: Snowflake,
        inviter_id: Snowflake,
        max_uses: i32,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if max_uses <= 0 {
            return Err(DomainError::Validation("max uses too low".to_string()));
        }
        if max_uses > MAX_INVITE_USES {
            return Err(DomainError::Validation("max uses too high".to_string()));
        }

        Ok(Self {
            code,
            guild_id,
            inviter_id,
            uses: 0,
            max_uses,
            expires_at,
            created_at: Utc::now(),
        })
    }

    /// Check if the invite has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() > at)
    }

    /// Check if the invite has been used up
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.uses >= self.max_uses
    }

    /// Check if the invite can still be redeemed
    pub fn is_usable(&self) -> bool {
        !self.is_expired() && !self.is_exhausted()
    }
}
