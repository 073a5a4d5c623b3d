//! Credential table persisted under the device-local users key.
//!
//! Users are never removed; deactivation flips `is_active` off and inactive
//! users can no longer sign in.

mod seed;

use crate::error::{Error, Result};
use crate::models::{User, UserUpdate};
use crate::storage::{read_json, write_json, KeyValueStore};
use crate::util::normalize_text_option;

pub use seed::{seed_users, SEED_STAFF_COUNT};

/// Access to the stored user table
#[derive(Debug)]
pub struct UserDirectory<'a, S> {
    store: &'a S,
    key: &'a str,
}

impl<'a, S: KeyValueStore> UserDirectory<'a, S> {
    pub const fn new(store: &'a S, key: &'a str) -> Self {
        Self { store, key }
    }

    /// Stored users, writing the seed table first when none are stored
    pub fn load_or_seed(&self) -> Result<Vec<User>> {
        if let Some(users) = read_json(self.store, self.key)? {
            return Ok(users);
        }

        let users = seed_users();
        write_json(self.store, self.key, &users)?;
        tracing::info!("Seeded {} users under '{}'", users.len(), self.key);
        Ok(users)
    }

    /// Stored users, or the seed table when none are stored (no write)
    pub fn all(&self) -> Result<Vec<User>> {
        Ok(read_json(self.store, self.key)?.unwrap_or_else(seed_users))
    }

    /// Active user whose username and password match exactly
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        Ok(self.all()?.into_iter().find(|user| {
            user.is_active && user.username == username && user.password == password
        }))
    }

    /// Active, non-admin users
    pub fn active_staff(&self) -> Result<Vec<User>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(User::is_active_staff)
            .collect())
    }

    /// Append a new user
    pub fn add(&self, mut user: User) -> Result<User> {
        if user.id.trim().is_empty()
            || user.name.trim().is_empty()
            || user.username.trim().is_empty()
        {
            return Err(Error::InvalidInput(
                "user id, name and username must not be empty".to_string(),
            ));
        }
        user.join_date = normalize_text_option(user.join_date);

        let mut users = self.all()?;
        if users.iter().any(|existing| existing.id == user.id) {
            return Err(Error::InvalidInput(format!("user id '{}' already exists", user.id)));
        }
        if users.iter().any(|existing| existing.username == user.username) {
            return Err(Error::InvalidInput(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        users.push(user.clone());
        write_json(self.store, self.key, &users)?;
        tracing::info!("Added user {}", user.id);
        Ok(user)
    }

    /// Apply a partial update to an existing user
    pub fn update(&self, id: &str, mut update: UserUpdate) -> Result<User> {
        update.join_date = normalize_text_option(update.join_date);
        self.modify(id, |user| update.apply_to(user))
    }

    /// Soft delete: the user stays in the table but cannot sign in
    pub fn deactivate(&self, id: &str) -> Result<User> {
        self.modify(id, |user| user.is_active = false)
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut User)) -> Result<User> {
        let mut users = self.all()?;
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| Error::NotFound(format!("user {id}")))?;
        change(user);
        let updated = user.clone();

        write_json(self.store, self.key, &users)?;
        tracing::info!("Updated user {}", id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "usersData";

    #[test]
    fn test_load_or_seed_writes_seed_once() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        let users = directory.load_or_seed().unwrap();
        assert_eq!(users.len(), SEED_STAFF_COUNT + 1);
        assert!(store.get(KEY).unwrap().is_some());

        directory.deactivate("0001").unwrap();
        let reloaded = directory.load_or_seed().unwrap();
        assert!(!reloaded.iter().find(|user| user.id == "0001").unwrap().is_active);
    }

    #[test]
    fn test_all_falls_back_to_seed_without_writing() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        assert_eq!(directory.all().unwrap().len(), SEED_STAFF_COUNT + 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_authenticate_matches_plain_credentials() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        let admin = directory.authenticate("admin", "admin123").unwrap().unwrap();
        assert!(admin.is_admin);
        assert!(directory.authenticate("admin", "wrong").unwrap().is_none());
        assert!(directory.authenticate("0007", "0007").unwrap().is_some());
    }

    #[test]
    fn test_deactivated_user_cannot_sign_in() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);
        directory.load_or_seed().unwrap();

        let user = directory.deactivate("0002").unwrap();
        assert!(!user.is_active);
        assert!(directory.authenticate("0002", "0002").unwrap().is_none());
        assert!(directory.all().unwrap().iter().any(|user| user.id == "0002"));
        assert_eq!(directory.active_staff().unwrap().len(), SEED_STAFF_COUNT - 1);
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        directory.add(User::new("0200", "New Hire", "pw")).unwrap();
        assert!(directory.authenticate("0200", "pw").unwrap().is_some());

        assert!(matches!(
            directory.add(User::new("0200", "Again", "pw")),
            Err(Error::InvalidInput(_))
        ));
        let mut clash = User::new("0201", "Clash", "pw");
        clash.username = "0001".to_string();
        assert!(matches!(directory.add(clash), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        assert!(matches!(
            directory.add(User::new("0300", "   ", "pw")),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            directory.add(User::new(" ", "Nobody", "pw")),
            Err(Error::InvalidInput(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_drops_blank_join_date() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        let mut user = User::new("0301", "Late Joiner", "pw");
        user.join_date = Some("  ".to_string());
        assert_eq!(directory.add(user).unwrap().join_date, None);
    }

    #[test]
    fn test_stored_table_with_free_text_join_date_loads() {
        let store = MemoryStore::new();
        let raw = serde_json::json!([
            {"id": "0001", "name": "J", "username": "0001", "password": "0001", "joinDate": ""},
        ]);
        store.set(KEY, &raw.to_string()).unwrap();
        let directory = UserDirectory::new(&store, KEY);

        let users = directory.load_or_seed().unwrap();
        assert_eq!(users.len(), 1);
        assert!(directory.authenticate("0001", "0001").unwrap().is_some());
    }

    #[test]
    fn test_update_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        assert!(matches!(
            directory.update("nobody", UserUpdate::default()),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(directory.deactivate("nobody"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_update_changes_fields_in_place() {
        let store = MemoryStore::new();
        let directory = UserDirectory::new(&store, KEY);

        let updated = directory
            .update(
                "0003",
                UserUpdate {
                    department: Some("Finance".to_string()),
                    ..UserUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.department.as_deref(), Some("Finance"));
        let stored = directory.all().unwrap();
        assert_eq!(stored.iter().find(|user| user.id == "0003"), Some(&updated));
    }
}
