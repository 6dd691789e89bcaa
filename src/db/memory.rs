// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process user store backed by `DashMap`.
//!
//! Reads go straight to the maps. Writes take a store-wide mutex so the
//! uniqueness checks and the index updates happen as one step.

use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::{NewUser, User};

/// Shared in-memory user store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    users: DashMap<u64, User>,
    by_username: DashMap<String, u64>,
    by_email: DashMap<String, u64>,
    next_id: AtomicU64,
    write_lock: Mutex<()>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.inner.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.users.is_empty()
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>, AppError> {
        self.inner
            .write_lock
            .lock()
            .map_err(|_| AppError::Database("User store write lock poisoned".to_string()))
    }

    /// Fails if `username`/`email` belong to a user other than `owner`.
    fn check_unique(&self, username: &str, email: &str, owner: Option<u64>) -> Result<(), AppError> {
        if let Some(id) = self.inner.by_username.get(username) {
            if Some(*id) != owner {
                return Err(AppError::Conflict(format!(
                    "Username '{}' is already taken",
                    username
                )));
            }
        }
        if let Some(id) = self.inner.by_email.get(email) {
            if Some(*id) != owner {
                return Err(AppError::Conflict(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
        }
        Ok(())
    }

    fn lookup(&self, index: &DashMap<String, u64>, key: &str) -> Option<User> {
        let id = *index.get(key)?;
        self.inner.users.get(&id).map(|u| u.clone())
    }
}

impl UserRepository for MemoryUserStore {
    async fn save(&self, new_user: NewUser) -> Result<User, AppError> {
        let _guard = self.lock_writes()?;
        self.check_unique(&new_user.username, &new_user.email, None)?;

        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            phone: new_user.phone,
            role: new_user.role,
            enabled: new_user.enabled,
            created_at: now,
            updated_at: now,
        };

        self.inner.by_username.insert(user.username.clone(), id);
        self.inner.by_email.insert(user.email.clone(), id);
        self.inner.users.insert(id, user.clone());

        tracing::debug!(user_id = id, username = %user.username, "User saved");
        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, AppError> {
        Ok(self.inner.users.get(&id).map(|u| u.clone()))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.inner.users.iter().map(|u| u.clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn update(&self, mut user: User) -> Result<User, AppError> {
        let _guard = self.lock_writes()?;

        let existing = self
            .inner
            .users
            .get(&user.id)
            .map(|u| u.clone())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;

        self.check_unique(&user.username, &user.email, Some(user.id))?;

        if existing.username != user.username {
            self.inner.by_username.remove(&existing.username);
            self.inner.by_username.insert(user.username.clone(), user.id);
        }
        if existing.email != user.email {
            self.inner.by_email.remove(&existing.email);
            self.inner.by_email.insert(user.email.clone(), user.id);
        }

        user.created_at = existing.created_at;
        user.updated_at = Utc::now();
        self.inner.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "User updated");
        Ok(user)
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), AppError> {
        let _guard = self.lock_writes()?;

        if let Some((_, user)) = self.inner.users.remove(&id) {
            self.inner.by_username.remove(&user.username);
            self.inner.by_email.remove(&user.email);
            tracing::debug!(user_id = id, "User deleted");
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.lookup(&self.inner.by_email, email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.lookup(&self.inner.by_username, username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Test User".to_string(),
            phone: None,
            role: "USER".to_string(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = MemoryUserStore::new();

        let a = store.save(new_user("alice", "alice@example.com")).await.unwrap();
        let b = store.save(new_user("bob", "bob@example.com")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_save_rejects_duplicates() {
        let store = MemoryUserStore::new();
        store.save(new_user("alice", "alice@example.com")).await.unwrap();

        let dup_name = store.save(new_user("alice", "other@example.com")).await;
        assert!(matches!(dup_name, Err(AppError::Conflict(_))));

        let dup_email = store.save(new_user("alice2", "alice@example.com")).await;
        assert!(matches!(dup_email, Err(AppError::Conflict(_))));

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = MemoryUserStore::new();
        let saved = store.save(new_user("alice", "alice@example.com")).await.unwrap();

        let by_name = store.find_by_username("alice").await.unwrap().unwrap();
        let by_email = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        let by_id = store.find_by_id(saved.id).await.unwrap().unwrap();

        assert_eq!(by_name.id, saved.id);
        assert_eq!(by_email.id, saved.id);
        assert_eq!(by_id.username, "alice");
        assert!(store.find_by_username("bob").await.unwrap().is_none());
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_reindexes_and_keeps_created_at() {
        let store = MemoryUserStore::new();
        let mut user = store.save(new_user("alice", "alice@example.com")).await.unwrap();
        let created_at = user.created_at;

        user.username = "alice2".to_string();
        user.role = "ADMIN".to_string();
        let updated = store.update(user).await.unwrap();

        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at >= created_at);
        assert!(store.find_by_username("alice").await.unwrap().is_none());
        let found = store.find_by_username("alice2").await.unwrap().unwrap();
        assert_eq!(found.role, "ADMIN");
    }

    #[tokio::test]
    async fn test_update_unknown_or_conflicting() {
        let store = MemoryUserStore::new();
        store.save(new_user("alice", "alice@example.com")).await.unwrap();
        let mut bob = store.save(new_user("bob", "bob@example.com")).await.unwrap();

        bob.email = "alice@example.com".to_string();
        assert!(matches!(
            store.update(bob.clone()).await,
            Err(AppError::Conflict(_))
        ));

        bob.id = 42;
        assert!(matches!(store.update(bob).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_frees_username() {
        let store = MemoryUserStore::new();
        let alice = store.save(new_user("alice", "alice@example.com")).await.unwrap();

        store.delete_by_id(alice.id).await.unwrap();
        store.delete_by_id(alice.id).await.unwrap();

        assert!(store.is_empty());
        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert!(store.save(new_user("alice", "alice@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_all_is_ordered() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            store
                .save(new_user(&format!("user{}", i), &format!("user{}@example.com", i)))
                .await
                .unwrap();
        }

        let ids: Vec<u64> = store.find_all().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
