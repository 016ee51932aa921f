//! Size and membership of the space of valid passwords
//!
//! A valid password has exactly `length` characters from the pool, no
//! character twice and at least one character of every enabled class.

use super::pool::CharacterPool;
use std::collections::BTreeSet;

/// Number of valid passwords for `pool` and `length`.
///
/// Inclusion-exclusion over the enabled classes: every subset of classes that
/// is forbidden removes its characters from the pool. Saturates at
/// `u128::MAX`, which is far beyond anything a store can hold.
pub fn password_space(pool: &CharacterPool, length: usize) -> u128 {
    let classes = pool.classes();
    let mut positive: u128 = 0;
    let mut negative: u128 = 0;

    for mask in 0u32..(1 << classes.len()) {
        let excluded: BTreeSet<char> = classes
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .flat_map(|(_, class)| class.alphabet().iter().copied())
            .collect();

        let available = pool.len() - excluded.iter().filter(|c| pool.contains(**c)).count();
        let Some(term) = arrangements(available, length) else {
            return u128::MAX;
        };

        let sum = if mask.count_ones() % 2 == 0 {
            &mut positive
        } else {
            &mut negative
        };
        match sum.checked_add(term) {
            Some(total) => *sum = total,
            None => return u128::MAX,
        }
    }

    positive.saturating_sub(negative)
}

/// Ordered selections of `k` distinct items out of `n`, `None` on overflow
fn arrangements(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    (n - k + 1..=n).try_fold(1u128, |acc, factor| acc.checked_mul(factor as u128))
}

/// Whether `password` is one of the valid passwords for `pool` and `length`
pub fn is_member(pool: &CharacterPool, length: usize, password: &str) -> bool {
    let mut seen = BTreeSet::new();
    let mut count = 0;

    for c in password.chars() {
        if !pool.contains(c) || !seen.insert(c) {
            return false;
        }
        count += 1;
    }

    count == length
        && pool
            .classes()
            .iter()
            .all(|class| seen.iter().any(|c| class.contains(*c)))
}
