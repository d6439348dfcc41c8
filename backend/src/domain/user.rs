//! User data model.
//!
//! The identifier is opaque to the domain: it is produced by the persistence
//! adapter when a record is first stored and never minted or changed here.

use std::fmt;
use std::str::FromStr;

/// Validation errors returned by [`UserId::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    /// No identifier was supplied.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier is not 24 hexadecimal characters.
    #[error("user id must be 24 hexadecimal characters")]
    InvalidFormat,
}

/// Store-assigned user identifier.
///
/// Twelve opaque bytes, rendered as 24 lowercase hexadecimal characters.
///
/// # Examples
/// ```
/// use user_directory::domain::UserId;
///
/// let id = UserId::parse("65F1C0DE00000000000000AB").unwrap();
/// assert_eq!(id.to_string(), "65f1c0de00000000000000ab");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId([u8; UserId::LENGTH]);

impl UserId {
    /// Identifier width in bytes.
    pub const LENGTH: usize = 12;

    /// Wrap raw identifier bytes produced by a persistence adapter.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Parse the hexadecimal form accepted on the wire.
    ///
    /// # Errors
    /// [`UserIdError::Empty`] for an empty string, otherwise
    /// [`UserIdError::InvalidFormat`] when the input is not exactly 24 hex
    /// characters.
    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        if raw.is_empty() {
            return Err(UserIdError::Empty);
        }
        if raw.len() != Self::LENGTH * 2 {
            return Err(UserIdError::InvalidFormat);
        }
        let mut bytes = [0_u8; Self::LENGTH];
        hex::decode_to_slice(raw, &mut bytes).map_err(|_| UserIdError::InvalidFormat)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A user that has not been persisted yet.
///
/// `name` and `email` are carried verbatim; neither is checked for format or
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

impl NewUser {
    /// Build a pending user record.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `id` was assigned by the store on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Attach a store-assigned identifier to a pending record.
    #[must_use]
    pub fn new(id: UserId, user: NewUser) -> Self {
        let NewUser { name, email } = user;
        Self { id, name, email }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
