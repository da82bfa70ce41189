//! Credential-backed implementation of the `AuthService` port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::credentials::{LoginCredentials, Registration};
use crate::domain::error::DomainError;
use crate::domain::ports::{AuthService, CredentialHasher, UserInsertError, UserRepository};
use crate::domain::user::{AuthenticatedUser, NewUser, Role};

use super::map_persistence_error;

/// `AuthService` backed by the user repository and a credential hasher.
#[derive(Clone)]
pub struct PasswordAuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl PasswordAuthService {
    /// Create the service from its ports.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl AuthService for PasswordAuthService {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, DomainError> {
        let record = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_persistence_error)?;

        // Unknown username and wrong password take the same path so the
        // response cannot be used to probe which accounts exist.
        let Some(record) = record else {
            return Err(DomainError::unauthorized("invalid credentials"));
        };
        if !self
            .hasher
            .verify(&record.password_hash, credentials.password())
        {
            return Err(DomainError::unauthorized("invalid credentials"));
        }

        Ok(AuthenticatedUser {
            user_id: record.id,
            username: credentials.username().to_owned(),
            role: record.role,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), DomainError> {
        let password_hash = self.hasher.hash(registration.password()).map_err(|err| {
            tracing::error!(detail = %err, "password hashing failed");
            DomainError::internal("registration failed")
        })?;

        let user = NewUser {
            username: registration.username().clone(),
            password_hash,
            email: registration.email().clone(),
            role: Role::Client,
        };

        match self.users.insert(&user).await {
            Ok(_) => Ok(()),
            Err(UserInsertError::Duplicate) => Err(DomainError::conflict(
                "username or email already in use",
            )),
            Err(UserInsertError::Backend(err)) => Err(map_persistence_error(err)),
        }
    }
}
