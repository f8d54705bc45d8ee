//! Permission bitmask for guild access control
//!
//! Each bit grants one capability. A member's effective bitmask is the
//! bitwise OR of the bitmasks of every role they hold.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Guild permission flags
    ///
    /// Stored as a 64-bit integer, serialized as a string in JSON for
    /// JavaScript integer safety.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// View channels and read message history
        const VIEW_CHANNELS   = 1 << 0;
        /// Send messages in text channels
        const SEND_MESSAGES   = 1 << 1;
        /// Delete or pin other users' messages
        const MANAGE_MESSAGES = 1 << 2;
        /// Create, edit, and delete channels
        const MANAGE_CHANNELS = 1 << 3;
        /// Create, edit, delete, and assign roles
        const MANAGE_ROLES    = 1 << 4;
        /// Edit guild settings
        const MANAGE_GUILD    = 1 << 5;
        /// Remove members from the guild
        const KICK_MEMBERS    = 1 << 6;
        /// Ban members from the guild
        const BAN_MEMBERS     = 1 << 7;
        /// Bypass all permission checks
        const ADMINISTRATOR   = 1 << 8;
        /// Create guild invites
        const CREATE_INVITE   = 1 << 9;

        /// Default permissions granted to every member
        const DEFAULT = Self::VIEW_CHANNELS.bits()
            | Self::SEND_MESSAGES.bits()
            | Self::CREATE_INVITE.bits();
    }
}

/// Flag/name pairs, used for diagnostics and denial messages
const NAMES: &[(Permissions, &str)] = &[
    (Permissions::VIEW_CHANNELS, "VIEW_CHANNELS"),
    (Permissions::SEND_MESSAGES, "SEND_MESSAGES"),
    (Permissions::MANAGE_MESSAGES, "MANAGE_MESSAGES"),
    (Permissions::MANAGE_CHANNELS, "MANAGE_CHANNELS"),
    (Permissions::MANAGE_ROLES, "MANAGE_ROLES"),
    (Permissions::MANAGE_GUILD, "MANAGE_GUILD"),
    (Permissions::KICK_MEMBERS, "KICK_MEMBERS"),
    (Permissions::BAN_MEMBERS, "BAN_MEMBERS"),
    (Permissions::ADMINISTRATOR, "ADMINISTRATOR"),
    (Permissions::CREATE_INVITE, "CREATE_INVITE"),
];

impl Permissions {
    /// Check whether a required permission is granted
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }

    /// OR together the bitmasks of multiple roles
    pub fn combine<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Permissions>,
    {
        roles
            .into_iter()
            .fold(Permissions::empty(), |acc, p| acc | p)
    }

    /// Names of all individual permissions that are set
    pub fn list(&self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Raw bits as i64, for storage
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.bits() as i64
    }

    /// From raw i64 bits; unknown bits are dropped
    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Permissions::from_bits_truncate(bits as u64)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer permission bitmask")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_truncate(value as u64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_truncate(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(Permissions::from_bits_truncate)
                    .map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl From<u64> for Permissions {
    fn from(bits: u64) -> Self {
        Permissions::from_bits_truncate(bits)
    }
}

impl From<Permissions> for u64 {
    fn from(perms: Permissions) -> Self {
        perms.bits()
    }
}
