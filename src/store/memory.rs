//! In-memory seen-password store

use super::PasswordStore;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Process-wide set of issued passwords
///
/// Grows for the lifetime of the process and is never persisted. Readers share
/// the lock; every mutation takes it exclusively.
#[derive(Debug, Default)]
pub struct InMemoryPasswordStore {
    passwords: RwLock<HashSet<String>>,
}

impl InMemoryPasswordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with already issued passwords
    pub fn with_passwords<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            passwords: RwLock::new(passwords.into_iter().map(Into::into).collect()),
        }
    }
}

impl PasswordStore for InMemoryPasswordStore {
    fn exists(&self, password: &str) -> bool {
        self.passwords.read().contains(password)
    }

    fn add(&self, password: &str) {
        let mut passwords = self.passwords.write();
        if !passwords.contains(password) {
            passwords.insert(password.to_string());
        }
    }

    fn get_all(&self) -> Vec<String> {
        self.passwords.read().iter().cloned().collect()
    }

    fn check_and_add(&self, password: &str) -> bool {
        let mut passwords = self.passwords.write();
        if passwords.contains(password) {
            return false;
        }
        passwords.insert(password.to_string())
    }

    fn len(&self) -> usize {
        self.passwords.read().len()
    }

    fn count_matching(&self, predicate: &dyn Fn(&str) -> bool) -> usize {
        self.passwords
            .read()
            .iter()
            .filter(|p| predicate(p.as_str()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_add_and_exists() {
        let store = InMemoryPasswordStore::new();
        assert!(store.is_empty());
        assert!(!store.exists("abc123"));

        store.add("abc123");
        assert!(store.exists("abc123"));
        assert!(!store.exists("abc124"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_is_idempotent() {
        let store = InMemoryPasswordStore::new();
        store.add("Xy7");
        store.add("Xy7");

        assert!(store.exists("Xy7"));
        assert_eq!(store.get_all(), vec!["Xy7".to_string()]);
    }

    #[test]
    fn test_check_and_add() {
        let store = InMemoryPasswordStore::with_passwords(["taken"]);
        assert!(!store.check_and_add("taken"));
        assert!(store.check_and_add("fresh"));
        assert!(!store.check_and_add("fresh"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_all() {
        let store = InMemoryPasswordStore::with_passwords(["a1", "b2", "c3"]);
        let mut all = store.get_all();
        all.sort();
        assert_eq!(all, vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn test_count_matching() {
        let store = InMemoryPasswordStore::with_passwords(["1", "22", "333", "a"]);
        let digits_only = store.count_matching(&|p| p.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(digits_only, 3);
    }

    #[test]
    fn test_concurrent_check_and_add_admits_one_winner() {
        let store = Arc::new(InMemoryPasswordStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.check_and_add("contended"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|added| *added)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
