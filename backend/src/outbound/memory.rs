//! Process-local `UserRepository` used when no database is configured.
//!
//! Records live in a `BTreeMap` keyed by id so listing is naturally ordered.
//! Ids are never reused, even after deletion.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

#[derive(Debug)]
struct Store {
    users: BTreeMap<UserId, User>,
    next_id: i32,
}

impl Store {
    fn email_taken(&self, draft: &UserDraft, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| Some(user.id()) != except && user.email() == draft.email())
    }
}

/// In-memory implementation of the [`UserRepository`] port.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Empty repository whose first id is 1.
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut store = self.lock();
        if store.email_taken(draft, None) {
            return Err(UserPersistenceError::duplicate_email(draft.email().as_ref()));
        }
        let id = UserId::new(store.next_id)
            .map_err(|err| UserPersistenceError::query(format!("id sequence exhausted: {err}")))?;
        store.next_id = store
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("id sequence exhausted"))?;
        let user = User::from_draft(id, draft.clone());
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut store = self.lock();
        if !store.users.contains_key(&id) {
            return Err(UserPersistenceError::not_found(id));
        }
        if store.email_taken(draft, Some(id)) {
            return Err(UserPersistenceError::duplicate_email(draft.email().as_ref()));
        }
        let user = User::from_draft(id, draft.clone());
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        match self.lock().users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(UserPersistenceError::not_found(id)),
        }
    }
}
