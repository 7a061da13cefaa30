//! User list and user detail actions.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use super::{fail, ActionError, Confirmation, Notice, Outcome, USERS_PATH};
use crate::client::ApiClient;
use crate::session::SessionStore;
use crate::transport::Transport;
use crate::types::{NewUser, Role, User, UserUpdate};
use crate::validation::{self, ValidationError};

pub const LOAD_USERS_FAILED: &str = "Failed to load users.";
pub const LOAD_USER_FAILED: &str = "Failed to load user data.";
pub const SAVE_FAILED: &str = "Failed to save user.";
pub const CREATED: &str = "User created successfully!";
pub const UPDATED: &str = "User updated successfully!";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";
pub const DELETED: &str = "User deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete user.";
pub const ASSIGN_ROLE_FAILED: &str = "Failed to assign role.";

/// Route segment that opens the detail page in create mode.
pub const NEW_USER_SEGMENT: &str = "new";

#[must_use]
pub fn assign_role_prompt(role: Role) -> String {
    format!("Are you sure you want to assign {role} to this user?")
}

#[must_use]
pub fn role_assigned_message(role: Role) -> String {
    format!("Role '{role}' assigned successfully!")
}

/// One row of the user list.
#[must_use]
pub fn user_row(user: &User) -> String {
    format!("{} ({}) - {}", user.name, user.email, user.role.as_deref().unwrap_or("-"))
}

/// Editable copy of a user, separate from the last-fetched record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub responsability: String,
    pub password: String,
    pub confirm_password: String,
}

impl UserDraft {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            responsability: user.responsability.clone().unwrap_or_default(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    /// Create-form checks. The password match is checked before anything else.
    pub fn validate_new(&self) -> Result<NewUser, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !validation::all_filled(&[&self.name, &self.email, &self.password, &self.responsability]) {
            return Err(ValidationError::MissingRequiredFields);
        }
        validation::check_phone(&self.phone)?;
        Ok(NewUser {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            responsability: self.responsability.trim().to_owned(),
            password: self.password.clone(),
        })
    }

    /// Edit-form checks. A blank password leaves the stored one untouched.
    pub fn validate_update(&self) -> Result<UserUpdate, ValidationError> {
        if !self.password.is_empty() && self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !validation::all_filled(&[&self.name, &self.email]) {
            return Err(ValidationError::MissingRequiredFields);
        }
        validation::check_phone(&self.phone)?;
        let optional = |v: &str| Some(v.trim().to_owned()).filter(|v| !v.is_empty());
        Ok(UserUpdate {
            name: Some(self.name.trim().to_owned()),
            email: Some(self.email.trim().to_owned()),
            phone: optional(&self.phone),
            responsability: optional(&self.responsability),
            password: Some(self.password.clone()).filter(|p| !p.is_empty()),
        })
    }
}

pub async fn load_users<T: Transport, S: SessionStore>(api: &ApiClient<T, S>) -> Result<Vec<User>, ActionError> {
    api.list_users().await.map_err(fail("users: list", LOAD_USERS_FAILED))
}

pub async fn load_user<T: Transport, S: SessionStore>(api: &ApiClient<T, S>, id: i64) -> Result<User, ActionError> {
    api.get_user(id).await.map_err(fail("users: get", LOAD_USER_FAILED))
}

pub async fn create_user<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    draft: &UserDraft,
) -> Result<Notice, ActionError> {
    let new_user = draft.validate_new()?;
    api.create_user(&new_user).await.map_err(fail("users: create", SAVE_FAILED))?;
    Ok(Notice::then_go(CREATED, USERS_PATH))
}

/// Save the draft; on success the returned user replaces the last-fetched copy.
pub async fn update_user<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    id: i64,
    draft: &UserDraft,
) -> Result<(User, Notice), ActionError> {
    let update = draft.validate_update()?;
    let user = api.update_user(id, &update).await.map_err(fail("users: update", SAVE_FAILED))?;
    Ok((user, Notice::stay(UPDATED)))
}

pub async fn delete_user<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    id: i64,
    confirmation: Confirmation,
) -> Result<Outcome<Notice>, ActionError> {
    if confirmation == Confirmation::Declined {
        return Ok(Outcome::Cancelled);
    }
    api.delete_user(id).await.map_err(fail("users: delete", DELETE_FAILED))?;
    Ok(Outcome::Done(Notice::then_go(DELETED, USERS_PATH)))
}

pub async fn assign_role<T: Transport, S: SessionStore>(
    api: &ApiClient<T, S>,
    user_id: i64,
    role: Role,
    confirmation: Confirmation,
) -> Result<Outcome<Notice>, ActionError> {
    if confirmation == Confirmation::Declined {
        return Ok(Outcome::Cancelled);
    }
    api.assign_role(role.id(), user_id).await.map_err(fail("users: assign role", ASSIGN_ROLE_FAILED))?;
    Ok(Outcome::Done(Notice::stay(role_assigned_message(role))))
}
