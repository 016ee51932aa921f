//! Seen-password storage
//!
//! The generator only talks to storage through [`PasswordStore`]; the raw
//! container never leaves the implementation.

mod memory;

pub use memory::InMemoryPasswordStore;

/// Set of passwords already issued by this process
pub trait PasswordStore: Send + Sync {
    /// True iff the password was previously added
    fn exists(&self, password: &str) -> bool;

    /// Record the password as issued. Adding twice has no further effect.
    fn add(&self, password: &str);

    /// All issued passwords, in no particular order
    fn get_all(&self) -> Vec<String>;

    /// Record the password unless already present, under a single write lock.
    ///
    /// Returns `true` when the password was newly added.
    fn check_and_add(&self, password: &str) -> bool;

    /// Number of issued passwords
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of issued passwords accepted by `predicate`
    fn count_matching(&self, predicate: &dyn Fn(&str) -> bool) -> usize {
        self.get_all().iter().filter(|p| predicate(p)).count()
    }
}
