//! Core types and structures for unique-pass-gen

use crate::error::{PassGenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;
use std::time::Duration;

const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

const LOWER: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const UPPER: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Character class a password can draw from
///
/// The derived ordering is the canonical order: digits, lower, upper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Digits,
    Lower,
    Upper,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 3] = [
        CharacterClass::Digits,
        CharacterClass::Lower,
        CharacterClass::Upper,
    ];

    /// Fixed, ordered alphabet of this class
    pub fn alphabet(&self) -> &'static [char] {
        match self {
            CharacterClass::Digits => DIGITS,
            CharacterClass::Lower => LOWER,
            CharacterClass::Upper => UPPER,
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.alphabet().contains(&c)
    }

    /// Token used by the form and the JSON API
    pub fn token(&self) -> &'static str {
        match self {
            CharacterClass::Digits => "digits",
            CharacterClass::Lower => "lower",
            CharacterClass::Upper => "upper",
        }
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for CharacterClass {
    type Err = PassGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "digits" => Ok(CharacterClass::Digits),
            "lower" => Ok(CharacterClass::Lower),
            "upper" => Ok(CharacterClass::Upper),
            other => Err(PassGenError::cli(format!("unknown character set: {}", other))),
        }
    }
}

/// Options for a single password request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    length: usize,
    classes: BTreeSet<CharacterClass>,
}

impl GenerationOptions {
    /// Create options from a length and any collection of classes
    ///
    /// No validation happens here beyond deduplicating classes; the generator
    /// rejects an empty selection and a length the pool cannot satisfy.
    pub fn new(length: usize, classes: impl IntoIterator<Item = CharacterClass>) -> Self {
        Self {
            length,
            classes: classes.into_iter().collect(),
        }
    }

    pub fn builder() -> GenerationOptionsBuilder {
        GenerationOptionsBuilder::default()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Enabled classes in canonical order
    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        self.classes.iter().copied()
    }

    pub fn has_class(&self, class: CharacterClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Builder for [`GenerationOptions`]
#[derive(Debug, Default, Clone)]
pub struct GenerationOptionsBuilder {
    length: usize,
    classes: BTreeSet<CharacterClass>,
}

impl GenerationOptionsBuilder {
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn class(mut self, class: CharacterClass) -> Self {
        self.classes.insert(class);
        self
    }

    pub fn digits(self) -> Self {
        self.class(CharacterClass::Digits)
    }

    pub fn lower(self) -> Self {
        self.class(CharacterClass::Lower)
    }

    pub fn upper(self) -> Self {
        self.class(CharacterClass::Upper)
    }

    pub fn build(self) -> GenerationOptions {
        GenerationOptions {
            length: self.length,
            classes: self.classes,
        }
    }
}

/// Configuration for the password generator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Upper bound on uniqueness attempts per request; `None` retries until a
    /// fresh password is found or the password space is known to be exhausted.
    pub max_attempts: Option<u64>,
}

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub generator: GeneratorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(10),
            generator: GeneratorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `UPG_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("UPG_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("UPG_PORT") {
            config.port = parse_var("UPG_PORT", &port)?;
        }
        if let Some(secs) = lookup("UPG_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_var("UPG_REQUEST_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(crate::config_error!("UPG_REQUEST_TIMEOUT_SECS must be positive"));
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = lookup("UPG_MAX_ATTEMPTS") {
            let attempts: u64 = parse_var("UPG_MAX_ATTEMPTS", &attempts)?;
            if attempts == 0 {
                return Err(crate::config_error!("UPG_MAX_ATTEMPTS must be positive"));
            }
            config.generator.max_attempts = Some(attempts);
        }

        Ok(config)
    }

    /// Resolve `host:port`; host names are looked up once at startup
    pub fn bind_address(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| crate::config_error!("invalid bind address {}:{}: {}", self.host, self.port, e))?
            .next()
            .ok_or_else(|| crate::config_error!("no address found for {}", self.host))
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| crate::config_error!("invalid value {:?} for {}: {}", value, key, e))
}
