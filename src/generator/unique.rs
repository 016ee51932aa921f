//! Unique password generation against a shared store

use super::pool::CharacterPool;
use super::space::{is_member, password_space};
use crate::error::{PassGenError, Result};
use crate::metrics::{GeneratorMetrics, MetricsSnapshot};
use crate::store::PasswordStore;
use crate::types::{GenerationOptions, GeneratorConfig};
use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Generate a password that `store` has never seen and record it there.
///
/// Shorthand for a [`PasswordGenerator`] with default configuration.
pub fn generate_unique_password(
    options: &GenerationOptions,
    store: Arc<dyn PasswordStore>,
) -> Result<String> {
    PasswordGenerator::new(store).generate(options)
}

/// Password generator bound to one process-wide store
///
/// Cloning is cheap: clones share the store and the metrics.
#[derive(Clone)]
pub struct PasswordGenerator {
    store: Arc<dyn PasswordStore>,
    config: GeneratorConfig,
    metrics: Arc<GeneratorMetrics>,
}

impl PasswordGenerator {
    pub fn new(store: Arc<dyn PasswordStore>) -> Self {
        Self::with_config(store, GeneratorConfig::default())
    }

    pub fn with_config(store: Arc<dyn PasswordStore>, config: GeneratorConfig) -> Self {
        Self {
            store,
            config,
            metrics: Arc::new(GeneratorMetrics::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn PasswordStore> {
        &self.store
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_stats()
    }

    /// Generate and register a fresh password, seeding a CSPRNG from the OS.
    pub fn generate(&self, options: &GenerationOptions) -> Result<String> {
        self.generate_seeded_from(options, OsRng)
    }

    /// Like [`generate`](Self::generate), but seeds the CSPRNG from `entropy`.
    ///
    /// A seeding failure is reported as [`PassGenError::RandomSourceFailure`]
    /// and is never retried.
    pub fn generate_seeded_from<E: RngCore>(
        &self,
        options: &GenerationOptions,
        entropy: E,
    ) -> Result<String> {
        let result = StdRng::from_rng(entropy)
            .map_err(PassGenError::from)
            .and_then(|mut rng| self.generate_with_rng(options, &mut rng));

        if let Err(e) = &result {
            self.metrics.increment_failures();
            if e.is_user_error() {
                tracing::debug!(error = %e, length = options.length(), "Rejected password request");
            } else {
                tracing::warn!(error = %e, length = options.length(), "Password generation failed");
            }
        }

        result
    }

    fn generate_with_rng<R: Rng + CryptoRng>(
        &self,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> Result<String> {
        let start_time = Instant::now();
        let pool = CharacterPool::for_options(options)?;
        let length = options.length();
        let space = password_space(&pool, length);

        self.ensure_space_left(&pool, length, space)?;

        let mut attempts: u64 = 0;
        loop {
            if let Some(max_attempts) = self.config.max_attempts {
                if attempts >= max_attempts {
                    return Err(PassGenError::AttemptsExhausted { attempts });
                }
            }
            attempts += 1;
            self.metrics.increment_attempts();

            let password = draw_candidate(&pool, length, rng)?;

            if self.store.check_and_add(&password) {
                self.metrics.increment_passwords_issued();
                tracing::debug!(
                    length,
                    attempts,
                    issued = self.store.len(),
                    duration_us = %start_time.elapsed().as_micros(),
                    "Issued unique password"
                );
                return Ok(password);
            }

            self.metrics.increment_collisions();
            tracing::debug!(attempts, length, "Candidate already issued, drawing again");
            self.ensure_space_left(&pool, length, space)?;
        }
    }

    /// Fail fast once every valid password for this pool has been issued.
    fn ensure_space_left(&self, pool: &CharacterPool, length: usize, space: u128) -> Result<()> {
        if (self.store.len() as u128) < space {
            return Ok(());
        }

        let issued = self
            .store
            .count_matching(&|password| is_member(pool, length, password));

        if issued as u128 >= space {
            return Err(PassGenError::PasswordSpaceExhausted { space });
        }
        Ok(())
    }
}

impl std::fmt::Debug for PasswordGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGenerator")
            .field("issued", &self.store.len())
            .field("config", &self.config)
            .field("metrics", &self.metrics.get_stats())
            .finish()
    }
}

/// Draw one candidate: a character from each class, then distinct pool
/// characters up to `length`, in shuffled order.
fn draw_candidate<R: Rng + CryptoRng>(
    pool: &CharacterPool,
    length: usize,
    rng: &mut R,
) -> Result<String> {
    let mut result: Vec<char> = Vec::with_capacity(length);
    let mut used: HashSet<char> = HashSet::with_capacity(length);

    for class in pool.classes() {
        let unused: Vec<char> = class
            .alphabet()
            .iter()
            .copied()
            .filter(|c| !used.contains(c))
            .collect();
        if unused.is_empty() {
            return Err(PassGenError::insufficient_unique_characters(length, result.len()));
        }

        let c = unused[rng.gen_range(0..unused.len())];
        used.insert(c);
        result.push(c);
    }

    let mut remaining: Vec<char> = pool
        .chars()
        .iter()
        .copied()
        .filter(|c| !used.contains(c))
        .collect();

    while result.len() < length {
        if remaining.is_empty() {
            return Err(PassGenError::insufficient_unique_characters(length, result.len()));
        }
        let c = remaining.swap_remove(rng.gen_range(0..remaining.len()));
        result.push(c);
    }

    result.shuffle(rng);
    Ok(result.into_iter().collect())
}
