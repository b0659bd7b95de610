//! Local player accounts, login session and per-user high scores.

use chrono::Utc;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{CURRENT_USER_KEY, USERS_KEY};
use crate::error::{LoginError, RegisterError, StorageError};
use crate::storage::{KeyValueStore, load_json, save_json};

const CREDENTIAL_SCHEME: &str = "sha256";
const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 20;
const MIN_CREDENTIAL_LEN: usize = 6;

/// Persisted player record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Salted digest of the password, never the password itself.
    pub credential: String,
    pub high_score: u32,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl User {
    fn new(
        id: String,
        username: String,
        secret: &str,
        high_score: u32,
        created_at: String,
    ) -> Self {
        let credential = hash_credential(&id, secret);
        Self {
            id,
            username,
            credential,
            high_score,
            created_at,
        }
    }

    /// Returns true when `secret` matches the stored credential.
    #[must_use]
    pub fn verify(&self, secret: &str) -> bool {
        self.credential == hash_credential(&self.id, secret)
    }

    fn matches_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }
}

fn hash_credential(user_id: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    format!("{CREDENTIAL_SCHEME}:{}", hex::encode(hasher.finalize()))
}

/// Demo accounts written into an empty store on first run.
#[must_use]
pub fn seed_users() -> Vec<User> {
    let created_at = Utc::now().to_rfc3339();
    [
        ("demo-1", "demo", 50),
        ("demo-2", "player1", 120),
        ("demo-3", "snake_master", 200),
    ]
    .into_iter()
    .map(|(id, username, high_score)| {
        User::new(
            id.to_owned(),
            username.to_owned(),
            "password",
            high_score,
            created_at.clone(),
        )
    })
    .collect()
}

/// Checks sign-up form input before it reaches [`AccountStore::register`].
///
/// Usernames are 3-20 ASCII letters, digits or underscores; passwords need at
/// least 6 characters.
pub fn validate_registration(username: &str, credential: &str) -> Result<(), RegisterError> {
    let username_ok = (MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !username_ok {
        return Err(RegisterError::InvalidUsername);
    }
    if credential.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(RegisterError::CredentialTooShort);
    }
    Ok(())
}

/// Owns the user list and the logged-in session.
///
/// Every mutation persists through the injected [`KeyValueStore`]. Storage
/// failures are logged and never undo the in-memory change.
#[derive(Debug)]
pub struct AccountStore<S: KeyValueStore> {
    storage: S,
    users: Vec<User>,
    current_user_id: Option<String>,
}

impl<S: KeyValueStore> AccountStore<S> {
    /// Creates an empty store. Call [`load_session`](Self::load_session) to
    /// read persisted data.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            users: Vec::new(),
            current_user_id: None,
        }
    }

    /// Loads users (seeding when absent) and re-resolves the saved session.
    pub fn load_session(&mut self) {
        self.users = match load_json::<Vec<User>, _>(&self.storage, USERS_KEY) {
            Ok(Some(users)) => users,
            Ok(None) => {
                info!("no stored users, writing demo accounts");
                let users = seed_users();
                if let Err(error) = save_json(&mut self.storage, USERS_KEY, &users) {
                    error!("failed to persist demo accounts: {error}");
                }
                users
            }
            Err(error) => {
                warn!("stored users unreadable, using demo accounts: {error}");
                seed_users()
            }
        };

        self.current_user_id = match load_json::<String, _>(&self.storage, CURRENT_USER_KEY) {
            Ok(Some(id)) if self.users.iter().any(|user| user.id == id) => Some(id),
            Ok(Some(id)) => {
                warn!("session points at unknown user {id}, ignoring");
                None
            }
            Ok(None) => None,
            Err(error) => {
                warn!("stored session unreadable, ignoring: {error}");
                None
            }
        };
    }

    /// Creates a new account with a zero high score.
    ///
    /// Fails only on a case-insensitive username clash. Does not log the new
    /// user in.
    pub fn register(&mut self, username: &str, credential: &str) -> Result<User, RegisterError> {
        if self.find_by_username(username).is_some() {
            return Err(RegisterError::UsernameTaken);
        }

        let user = User::new(
            Uuid::new_v4().to_string(),
            username.to_owned(),
            credential,
            0,
            Utc::now().to_rfc3339(),
        );
        self.users.push(user.clone());
        info!("registered user {}", user.username);
        self.persist_users();

        Ok(user)
    }

    /// Starts a session for the matching user.
    ///
    /// On failure the current session is left as it was.
    pub fn login(&mut self, username: &str, credential: &str) -> Result<User, LoginError> {
        let user = self
            .users
            .iter()
            .find(|user| user.matches_username(username) && user.verify(credential))
            .cloned()
            .ok_or(LoginError::InvalidCredentials)?;

        self.current_user_id = Some(user.id.clone());
        info!("user {} logged in", user.username);
        if let Err(error) = save_json(&mut self.storage, CURRENT_USER_KEY, &user.id) {
            error!("failed to persist session: {error}");
        }

        Ok(user)
    }

    /// Ends the session and forgets the persisted pointer.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user() {
            info!("user {} logged out", user.username);
        }
        self.current_user_id = None;
        if let Err(error) = self.storage.remove(CURRENT_USER_KEY) {
            error!("failed to clear persisted session: {error}");
        }
    }

    /// Raises `user_id`'s high score to `score` if it is higher.
    ///
    /// Returns true when the stored high score changed. Unknown ids and
    /// non-improving scores are no-ops.
    pub fn record_score(&mut self, user_id: &str, score: u32) -> bool {
        let Some(user) = self.users.iter_mut().find(|user| user.id == user_id) else {
            return false;
        };
        if score <= user.high_score {
            return false;
        }

        user.high_score = score;
        info!("new high score {score} for {}", user.username);
        self.persist_users();
        true
    }

    /// Currently logged-in user, resolved against the live user list.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        let id = self.current_user_id.as_deref()?;
        self.users.iter().find(|user| user.id == id)
    }

    /// All known users in registration order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.matches_username(username))
    }

    /// Top `limit` users by high score. Ties keep registration order.
    #[must_use]
    pub fn leaderboard(&self, limit: usize) -> Vec<&User> {
        let mut ranked: Vec<&User> = self.users.iter().collect();
        ranked.sort_by(|a, b| b.high_score.cmp(&a.high_score));
        ranked.truncate(limit);
        ranked
    }

    /// Gives back the underlying storage, mostly for inspection in tests.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist_users(&mut self) {
        if let Err(error) = self.try_persist_users() {
            error!("failed to persist users: {error}");
        }
    }

    fn try_persist_users(&mut self) -> Result<(), StorageError> {
        save_json(&mut self.storage, USERS_KEY, &self.users)
    }
}
