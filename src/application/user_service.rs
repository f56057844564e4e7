use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::{UserRecord, UserRepository};
use crate::domain::user::{NewUser, User};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Registers a user. Usernames and emails must be unique; new users are
    /// never admins.
    pub fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        new_user.check_required()?;

        if self.repo.find_by_username(&new_user.username)?.is_some() {
            return Err(DomainError::Conflict(
                "This username is already in use".to_string(),
            ));
        }
        if self.repo.find_by_email(&new_user.email)?.is_some() {
            return Err(DomainError::Conflict(
                "This email address is already in use".to_string(),
            ));
        }

        new_user.check_format()?;

        let password_hash = hash_password(&new_user.password)
            .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))?;

        let user = self.repo.insert(&UserRecord {
            username: new_user.username,
            password_hash,
            email: new_user.email,
            national_id: new_user.national_id,
            address: new_user.address,
            is_admin: false,
        })?;
        log::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list()
    }

    /// Checks a username/password pair against the stored argon2 hash.
    /// Unknown users and wrong passwords get the same error.
    pub fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let rejected = || DomainError::Unauthorized("Invalid username or password".to_string());

        let user = self.repo.find_by_username(username)?.ok_or_else(rejected)?;
        if !verify_password(password, &user.password_hash)? {
            log::warn!("Failed login for user {}", user.username);
            return Err(rejected());
        }

        log::info!("User {} logged in", user.username);
        Ok(user)
    }
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::SaltString;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored: &str) -> Result<bool, DomainError> {
    use argon2::password_hash::PasswordHash;
    use argon2::{Argon2, PasswordVerifier};
    let parsed = PasswordHash::new(stored)
        .map_err(|e| DomainError::Internal(format!("stored password hash is unreadable: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
