//! User registry with a built-in administrator.

use tracing::info;

use crate::db::{Context, Repository};
use crate::domain::user::{ADMINISTRATOR_ID, ADMINISTRATOR_USERNAME};
use crate::domain::{NewUser, User, UserId};
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Clone)]
pub struct UserService {
    repository: Repository,
}

impl UserService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user under a fresh id.
    pub fn add(&self, new_user: NewUser) -> Result<User, DomainError> {
        if new_user.username == ADMINISTRATOR_USERNAME {
            return Err(DomainError::validation(format!(
                "username '{ADMINISTRATOR_USERNAME}' is reserved"
            )));
        }
        self.repository.with_context(|ctx| {
            if ctx.find_user_by_username(&new_user.username)?.is_some() {
                return Err(DomainError::conflict(
                    ConflictKind::UsernameTaken,
                    format!("username '{}' already in use", new_user.username),
                ));
            }
            let user = User::new(
                UserId::new_random(),
                new_user.username.clone(),
                new_user.authorities.iter().copied(),
            );
            ctx.save_user(&user)?;
            info!(user_id = %user.id, username = %user.username, "user added");
            Ok(user)
        })
    }

    pub fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.with_context(|ctx| self.get_user_in(ctx, id))
    }

    pub(crate) fn get_user_in(
        &self,
        context: &Context,
        id: &UserId,
    ) -> Result<Option<User>, DomainError> {
        if *id == ADMINISTRATOR_ID {
            return Ok(Some(User::administrator().clone()));
        }
        context.find_user(id)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        if username == ADMINISTRATOR_USERNAME {
            return Ok(Some(User::administrator().clone()));
        }
        self.repository
            .with_context(|ctx| ctx.find_user_by_username(username))
    }

    /// The administrator followed by every stored user.
    pub fn get_users(&self) -> Result<Vec<User>, DomainError> {
        let stored = self.repository.with_context(|ctx| ctx.find_all_users())?;
        let mut users = Vec::with_capacity(stored.len() + 1);
        users.push(User::administrator().clone());
        users.extend(
            stored
                .into_iter()
                .filter(|u| u.username != ADMINISTRATOR_USERNAME && u.id != ADMINISTRATOR_ID),
        );
        Ok(users)
    }
}
