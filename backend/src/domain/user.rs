//! User identity and account value types.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by the constructors in this module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was zero or negative.
    #[error("user id must be positive")]
    NonPositiveId,
    /// Username was empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username fell outside the allowed length.
    #[error("username must be between {min} and {max} characters")]
    UsernameLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// Username contained a character outside the allowed set.
    #[error("username may only contain letters, digits, dots, dashes, or underscores")]
    UsernameInvalidCharacters,
    /// Email failed the shape check.
    #[error("email address is not well-formed")]
    InvalidEmail,
}

/// Stable user identifier: a positive database integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub const fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// The raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum allowed username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed username length.
pub const USERNAME_MAX: usize = 32;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

// Length is enforced separately; this constrains the character set.
#[expect(clippy::expect_used, reason = "the pattern is a valid literal")]
fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid username pattern"))
}

/// Unique account name chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if value.len() < USERNAME_MIN || value.len() > USERNAME_MAX {
            return Err(UserValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        if !username_regex().is_match(&value) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered email address.
///
/// The check is deliberately shallow: one `@` with non-empty sides and no
/// whitespace. Deliverability is not this system's problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.len() > 254 || value.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(value)),
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account role controlling which surface a user may drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-only visibility over own packages.
    Client,
    /// Package administration and tracking transitions.
    Admin,
}

impl Role {
    /// Stable storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }

    /// Parse the storage representation, defaulting unknown values to
    /// [`Role::Client`] with a warning rather than failing the read.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "client" => Self::Client,
            "admin" => Self::Admin,
            other => {
                tracing::warn!(value = other, "unrecognised role value, defaulting to client");
                Self::Client
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity returned by a successful login.
///
/// The username is echoed back as stored; read paths never re-validate
/// shape, so rows predating the current rules still log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// The account's identifier.
    pub user_id: UserId,
    /// The account's username, echoed back for display.
    pub username: String,
    /// The account's role.
    pub role: Role,
}

/// Stored credential record used by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// The account's identifier.
    pub id: UserId,
    /// Argon2id digest in PHC string format.
    pub password_hash: String,
    /// The account's role.
    pub role: Role,
}

/// Directory entry: the admin-facing user listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// The account's identifier.
    pub id: UserId,
    /// The account's username as stored.
    pub username: String,
}

/// New account record handed to the user repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Chosen unique username.
    pub username: Username,
    /// Argon2id digest of the chosen password.
    pub password_hash: String,
    /// Registered email address.
    pub email: Email,
    /// Assigned role; registration always assigns [`Role::Client`].
    pub role: Role,
}
