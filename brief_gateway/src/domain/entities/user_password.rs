use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use common::helper::error_chain_fmt;
use secrecy::{ExposeSecret, Secret};

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// PHC format hashed password
///
/// The salt and the hash function parameters are stored with each hash,
/// so the hash function can evolve while old hashes stay verifiable.
#[derive(Debug, Clone)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    /// Checks the length of a clear password before it gets hashed
    pub fn check_candidate(password: &Secret<String>) -> Result<(), UserPasswordError> {
        let length = password.expose_secret().chars().count();

        if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
            return Err(UserPasswordError::InvalidLength(format!(
                "a password must have between {} and {} characters",
                PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH
            )));
        }

        Ok(())
    }

    /// Computes a PHC-format password
    ///
    /// CPU-intensive task: it is a good idea to run it in another thread
    #[tracing::instrument(name = "Computing password in PHC format", skip(password))]
    pub fn compute_password_hash(
        password: Secret<String>,
    ) -> Result<UserPassword, UserPasswordError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let params = Params::new(15000, 2, 1, None)?;

        let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.expose_secret().as_bytes(), &salt)?
            .to_string();

        Ok(UserPassword(Secret::new(password_hash)))
    }

    /// Parses a stored PHC-format hashed password
    #[tracing::instrument(name = "Parsing password hash", skip(password_hash_str))]
    pub fn parse(password_hash_str: Secret<String>) -> Result<UserPassword, UserPasswordError> {
        let expected_password_hash = PasswordHash::new(password_hash_str.expose_secret())?;
        Ok(UserPassword(Secret::new(
            expected_password_hash.serialize().to_string(),
        )))
    }

    /// Verifies a clear password against this hash
    ///
    /// CPU-intensive task: it is a good idea to run it in another thread
    #[tracing::instrument(name = "Verifying password hash", skip(self, password_candidate))]
    pub fn verify(&self, password_candidate: Secret<String>) -> Result<(), UserPasswordError> {
        let expected_password_hash = PasswordHash::new(self.0.expose_secret())?;

        Argon2::default()
            .verify_password(
                password_candidate.expose_secret().as_bytes(),
                &expected_password_hash,
            )
            .map_err(|e| {
                UserPasswordError::InvalidCredentials(format!("Invalid password: {:?}", e))
            })
    }
}

impl AsRef<str> for UserPassword {
    fn as_ref(&self) -> &str {
        self.0.expose_secret()
    }
}

#[derive(thiserror::Error)]
pub enum UserPasswordError {
    #[error(transparent)]
    HashError(#[from] argon2::password_hash::Error),
    #[error(transparent)]
    ParamsError(#[from] argon2::Error),
    #[error("Invalid password: {0}")]
    InvalidLength(String),
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl std::fmt::Debug for UserPasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
