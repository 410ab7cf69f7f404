use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use keyward_core::UserId;

use crate::User;

/// Keyed user store.
///
/// Repositories only persist; validation (email uniqueness, password strength)
/// is the caller's job. Reads return owned copies.
pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive email match.
    fn find_by_email(&self, email: &str) -> Option<User>;

    fn find_by_id(&self, id: &UserId) -> Option<User>;

    /// Upsert by id. Silently overwrites an existing record with the same id.
    fn save(&self, user: User);

    fn remove(&self, id: &UserId) -> Option<User>;

    /// All users, ordered by id.
    fn list(&self) -> Vec<User>;

    fn exists_by_email(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }
}

impl<R> UserRepository for Arc<R>
where
    R: UserRepository + ?Sized,
{
    fn find_by_email(&self, email: &str) -> Option<User> {
        (**self).find_by_email(email)
    }

    fn find_by_id(&self, id: &UserId) -> Option<User> {
        (**self).find_by_id(id)
    }

    fn save(&self, user: User) {
        (**self).save(user)
    }

    fn remove(&self, id: &UserId) -> Option<User> {
        (**self).remove(id)
    }

    fn list(&self) -> Vec<User> {
        (**self).list()
    }

    fn exists_by_email(&self, email: &str) -> bool {
        (**self).exists_by_email(email)
    }
}

/// In-memory user store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_email(&self, email: &str) -> Option<User> {
        let map = self.inner.read().ok()?;
        map.values().find(|u| u.email == email).cloned()
    }

    fn find_by_id(&self, id: &UserId) -> Option<User> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn save(&self, user: User) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(user.id.clone(), user);
        }
    }

    fn remove(&self, id: &UserId) -> Option<User> {
        let mut map = self.inner.write().ok()?;
        map.remove(id)
    }

    fn list(&self) -> Vec<User> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut users: Vec<User> = map.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn repo_with_alice() -> InMemoryUserRepository {
        let repo = InMemoryUserRepository::new();
        repo.save(User::new("1", "Alice", "alice@example.com", "Secret123", Role::RegularUser));
        repo
    }

    #[test]
    fn finds_by_exact_email_only() {
        let repo = repo_with_alice();
        assert_eq!(repo.find_by_email("alice@example.com").unwrap().name, "Alice");
        assert!(repo.find_by_email("ALICE@example.com").is_none());
        assert!(repo.find_by_email("bob@example.com").is_none());
        assert!(repo.exists_by_email("alice@example.com"));
        assert!(!repo.exists_by_email(""));
    }

    #[test]
    fn save_overwrites_on_id_collision() {
        let repo = repo_with_alice();
        repo.save(User::new("1", "Mallory", "mallory@example.com", "x", Role::Guest));

        assert_eq!(repo.len(), 1);
        assert!(!repo.exists_by_email("alice@example.com"));
        assert_eq!(repo.find_by_id(&UserId::from("1")).unwrap().name, "Mallory");
    }

    #[test]
    fn remove_returns_the_record() {
        let repo = repo_with_alice();
        let removed = repo.remove(&UserId::from("1")).unwrap();
        assert_eq!(removed.email, "alice@example.com");
        assert!(repo.is_empty());
        assert!(repo.remove(&UserId::from("1")).is_none());
    }

    #[test]
    fn list_is_ordered_by_id() {
        let repo = repo_with_alice();
        repo.save(User::new("0", "Zed", "zed@example.com", "x", Role::Guest));
        let ids: Vec<String> = repo.list().into_iter().map(|u| u.id.to_string()).collect();
        assert_eq!(ids, vec!["0", "1"]);
    }

    #[test]
    fn shared_through_arc() {
        let repo = Arc::new(repo_with_alice());
        let other = Arc::clone(&repo);
        other.save(User::new("2", "Bob", "bob@example.com", "x", Role::Guest));
        assert!(repo.exists_by_email("bob@example.com"));
    }
}
