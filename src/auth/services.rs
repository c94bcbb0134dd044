use std::sync::Arc;

use tracing::{debug, error, info};

use crate::auth::{
    password::{hash_password, verify_password},
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::error::AppError;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    /// Stores the user with the plaintext password replaced by its hash.
    pub async fn create_user(
        &self,
        username: Option<String>,
        email: String,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;
        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    /// `None` for an unknown email, a wrong password or an unreadable hash.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!(%email, "login unknown email");
            return Ok(None);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                debug!(user_id = user.id, "login invalid password");
                Ok(None)
            }
            Err(e) => {
                error!(error = %e, user_id = user.id, "stored password hash is unreadable");
                Ok(None)
            }
        }
    }
}
