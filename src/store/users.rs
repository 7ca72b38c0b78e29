use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{
    User,
    errors::ApiError,
    forms::{EMAIL_TAKEN, FieldErrors, USERNAME_TAKEN},
};

pub const DEFAULT_AVATAR: &str = "default.jpg";

#[derive(Debug, PartialEq, Eq)]
pub enum UserError {
    DuplicateUsername,
    DuplicateEmail,
    NotFound,
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUsername => {
                let mut errors = FieldErrors::new();
                errors.push("username", USERNAME_TAKEN);
                ApiError::Validation(errors)
            }
            UserError::DuplicateEmail => {
                let mut errors = FieldErrors::new();
                errors.push("email", EMAIL_TAKEN);
                ApiError::Validation(errors)
            }
            UserError::NotFound => ApiError::NotFound,
        }
    }
}

/// Credential store: user records plus uniqueness indexes for the two
/// globally unique fields.
pub struct UserStore {
    users: DashMap<Uuid, User>,
    by_username: DashMap<String, Uuid>,
    by_email: DashMap<String, Uuid>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            by_username: DashMap::new(),
            by_email: DashMap::new(),
        }
    }

    /// Create a user. Fails without writing anything when either unique
    /// field collides.
    pub fn create(
        &self,
        username: &str,
        email: &str,
        hashed_password: String,
    ) -> Result<User, UserError> {
        if self.by_username.contains_key(username) {
            return Err(UserError::DuplicateUsername);
        }
        if self.by_email.contains_key(email) {
            return Err(UserError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            hashed_password,
            avatar: DEFAULT_AVATAR.to_string(),
            created_at: Utc::now().timestamp(),
        };

        self.by_username.insert(user.username.clone(), user.id);
        self.by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user.clone());

        Ok(user)
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|u| u.clone())
    }

    pub fn by_email(&self, email: &str) -> Option<User> {
        let id = *self.by_email.get(email)?;
        self.get(id)
    }

    pub fn by_username(&self, username: &str) -> Option<User> {
        let id = *self.by_username.get(username)?;
        self.get(id)
    }

    /// Account edit: username/email in place, avatar only when a new file
    /// was uploaded. Uniqueness is re-checked against everyone but the user
    /// being edited.
    pub fn update_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
        avatar: Option<String>,
    ) -> Result<User, UserError> {
        if let Some(owner) = self.by_username.get(username) {
            if *owner != id {
                return Err(UserError::DuplicateUsername);
            }
        }
        if let Some(owner) = self.by_email.get(email) {
            if *owner != id {
                return Err(UserError::DuplicateEmail);
            }
        }

        let mut user = self.users.get_mut(&id).ok_or(UserError::NotFound)?;
        if user.username != username {
            self.by_username.remove(&user.username);
            self.by_username.insert(username.to_string(), id);
            user.username = username.to_string();
        }
        if user.email != email {
            self.by_email.remove(&user.email);
            self.by_email.insert(email.to_string(), id);
            user.email = email.to_string();
        }
        if let Some(avatar) = avatar {
            user.avatar = avatar;
        }

        Ok(user.clone())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_duplicate_username_and_email() {
        let store = UserStore::new();
        store.create("alice", "alice@example.com", "hash".into()).unwrap();

        assert_eq!(
            store.create("alice", "other@example.com", "hash".into()).unwrap_err(),
            UserError::DuplicateUsername
        );
        assert_eq!(
            store.create("bob", "alice@example.com", "hash".into()).unwrap_err(),
            UserError::DuplicateEmail
        );
        // The failed attempts wrote nothing.
        assert!(store.by_username("bob").is_none());
        assert!(store.by_email("other@example.com").is_none());
    }

    #[test]
    fn new_users_get_the_placeholder_avatar() {
        let store = UserStore::new();
        let user = store.create("alice", "alice@example.com", "hash".into()).unwrap();
        assert_eq!(user.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn update_profile_moves_indexes() {
        let store = UserStore::new();
        let user = store.create("alice", "alice@example.com", "hash".into()).unwrap();

        let updated = store
            .update_profile(user.id, "alice2", "alice2@example.com", None)
            .unwrap();
        assert_eq!(updated.username, "alice2");

        assert!(store.by_username("alice").is_none());
        assert!(store.by_email("alice@example.com").is_none());
        assert_eq!(store.by_username("alice2").map(|u| u.id), Some(user.id));
        assert_eq!(store.by_email("alice2@example.com").map(|u| u.id), Some(user.id));
    }

    #[test]
    fn update_profile_rechecks_uniqueness_excluding_self() {
        let store = UserStore::new();
        let alice = store.create("alice", "alice@example.com", "hash".into()).unwrap();
        store.create("bob", "bob@example.com", "hash".into()).unwrap();

        // Keeping your own username/email is not a collision.
        assert!(
            store
                .update_profile(alice.id, "alice", "alice@example.com", None)
                .is_ok()
        );

        assert_eq!(
            store.update_profile(alice.id, "bob", "alice@example.com", None).unwrap_err(),
            UserError::DuplicateUsername
        );
        assert_eq!(
            store.update_profile(alice.id, "alice", "bob@example.com", None).unwrap_err(),
            UserError::DuplicateEmail
        );
    }

    #[test]
    fn update_profile_sets_avatar_only_when_given() {
        let store = UserStore::new();
        let user = store.create("alice", "alice@example.com", "hash".into()).unwrap();

        let kept = store
            .update_profile(user.id, "alice", "alice@example.com", None)
            .unwrap();
        assert_eq!(kept.avatar, DEFAULT_AVATAR);

        let changed = store
            .update_profile(user.id, "alice", "alice@example.com", Some("abcd.png".into()))
            .unwrap();
        assert_eq!(changed.avatar, "abcd.png");
    }

    #[test]
    fn update_profile_unknown_user_is_not_found() {
        let store = UserStore::new();
        assert_eq!(
            store.update_profile(Uuid::new_v4(), "x", "x@example.com", None).unwrap_err(),
            UserError::NotFound
        );
    }
}
