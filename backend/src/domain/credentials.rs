//! Login and registration request objects.

use super::user::{Email, Username, UserValidationError};

/// Validation errors for credential-bearing requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// The username was empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Registration-only: the username or email failed the shape check.
    #[error(transparent)]
    Shape(#[from] UserValidationError),
}

/// Validated username/password pair for `login`.
///
/// Login validates presence only; shape checks would leak which usernames
/// exist by rejecting some before the credential check runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Validate and construct [`LoginCredentials`].
    pub fn try_from_parts(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CredentialValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(CredentialValidationError::EmptyUsername);
        }
        let password = password.into();
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self { username, password })
    }

    /// The submitted username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// The submitted password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: String,
    email: Email,
}

impl Registration {
    /// Validate and construct a [`Registration`].
    pub fn try_from_parts(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, CredentialValidationError> {
        let username = Username::new(username)?;
        let password = password.into();
        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        let email = Email::new(email)?;
        Ok(Self {
            username,
            password,
            email,
        })
    }

    /// The chosen username.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// The chosen password, still in plaintext; hash before storing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// The registered email address.
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ada", "secret", true)]
    #[case("  ", "secret", false)]
    #[case("ada", "", false)]
    fn login_credentials_require_both_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] ok: bool,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password).is_ok(),
            ok
        );
    }

    #[rstest]
    #[case("ada", "secret", "ada@example.com", true)]
    #[case("a", "secret", "ada@example.com", false)]
    #[case("ada", "", "ada@example.com", false)]
    #[case("ada", "secret", "nope", false)]
    fn registration_validates_all_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] email: &str,
        #[case] ok: bool,
    ) {
        assert_eq!(
            Registration::try_from_parts(username, password, email).is_ok(),
            ok
        );
    }
}
