//! Integration tests for unique-pass-gen

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use unique_pass_gen::{
    generate_unique_password, CharacterClass, GenerationOptions, InMemoryPasswordStore,
    PassGenError, PasswordGenerator, PasswordStore,
};

fn has_duplicate_chars(s: &str) -> bool {
    let mut seen = HashSet::new();
    !s.chars().all(|c| seen.insert(c))
}

fn contains_from(password: &str, class: CharacterClass) -> bool {
    password.chars().any(|c| class.contains(c))
}

fn shared_store() -> Arc<dyn PasswordStore> {
    Arc::new(InMemoryPasswordStore::new())
}

#[test]
fn test_all_classes_length_ten() {
    let store = shared_store();
    let options = GenerationOptions::builder().length(10).digits().lower().upper().build();

    let password = generate_unique_password(&options, store.clone()).unwrap();

    assert_eq!(password.chars().count(), 10);
    assert!(!has_duplicate_chars(&password), "{password}");
    assert!(contains_from(&password, CharacterClass::Digits));
    assert!(contains_from(&password, CharacterClass::Lower));
    assert!(contains_from(&password, CharacterClass::Upper));
    assert!(store.exists(&password));
}

#[test]
fn test_every_selection_and_length() {
    let selections: Vec<Vec<CharacterClass>> = vec![
        vec![CharacterClass::Digits],
        vec![CharacterClass::Lower],
        vec![CharacterClass::Upper],
        vec![CharacterClass::Digits, CharacterClass::Lower],
        vec![CharacterClass::Digits, CharacterClass::Upper],
        vec![CharacterClass::Lower, CharacterClass::Upper],
        CharacterClass::ALL.to_vec(),
    ];

    let generator = PasswordGenerator::new(shared_store());
    for classes in selections {
        let pool_size: usize = classes.iter().map(|c| c.alphabet().len()).sum();
        for length in classes.len()..=pool_size {
            let options = GenerationOptions::new(length, classes.clone());
            let password = generator.generate(&options).unwrap();

            assert_eq!(password.chars().count(), length);
            assert!(!has_duplicate_chars(&password), "{password}");
            for class in &classes {
                assert!(contains_from(&password, *class), "{password} lacks {class}");
            }
            for c in password.chars() {
                assert!(classes.iter().any(|class| class.contains(c)), "{password}");
            }
        }
    }
}

#[test]
fn test_no_class_selected() {
    let store = shared_store();
    for length in [0, 1, 5, 100] {
        let err = generate_unique_password(&GenerationOptions::new(length, []), store.clone())
            .unwrap_err();
        assert_eq!(err, PassGenError::NoClassSelected);
    }
    assert!(store.is_empty());
}

#[test]
fn test_length_exceeds_pool() {
    let store = shared_store();

    let options = GenerationOptions::builder().length(40).digits().build();
    let err = generate_unique_password(&options, store.clone()).unwrap_err();
    assert_eq!(err, PassGenError::length_exceeds_pool(40, 10));

    let options = GenerationOptions::builder().length(63).digits().lower().upper().build();
    let err = generate_unique_password(&options, store).unwrap_err();
    assert!(matches!(err, PassGenError::LengthExceedsPool { pool_size: 62, .. }));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_passwords_are_unique_across_generations() {
    let store = shared_store();
    let generator = PasswordGenerator::new(store.clone());
    let options = GenerationOptions::builder().length(10).digits().lower().upper().build();

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let password = generator.generate(&options).unwrap();
        assert!(seen.insert(password.clone()), "duplicate password generated: {password}");
        assert!(store.exists(&password));
    }
    assert_eq!(store.len(), 200);
}

#[test]
fn test_small_space_issues_every_password_once() {
    // 10 * 9 two-digit passwords without repeats
    let store = shared_store();
    let generator = PasswordGenerator::new(store.clone());
    let options = GenerationOptions::builder().length(2).digits().build();

    let issued: HashSet<String> = (0..90).map(|_| generator.generate(&options).unwrap()).collect();
    assert_eq!(issued.len(), 90);

    let err = generator.generate(&options).unwrap_err();
    assert_eq!(err, PassGenError::PasswordSpaceExhausted { space: 90 });
    assert_eq!(store.len(), 90);
}

#[test]
fn test_preseeded_password_is_never_returned() {
    let store: Arc<dyn PasswordStore> = Arc::new(InMemoryPasswordStore::with_passwords(["abc123"]));
    let generator = PasswordGenerator::new(store.clone());
    let options = GenerationOptions::builder().length(6).digits().lower().build();

    for _ in 0..100 {
        assert_ne!(generator.generate(&options).unwrap(), "abc123");
    }
    assert_eq!(store.len(), 101);
}

#[test]
fn test_add_is_idempotent_through_trait_object() {
    let store = shared_store();
    store.add("Qw3rty");
    store.add("Qw3rty");

    assert!(store.exists("Qw3rty"));
    assert_eq!(store.get_all(), vec!["Qw3rty".to_string()]);
}

#[test]
fn test_concurrent_generation_shares_store() {
    let store = shared_store();
    let generator = PasswordGenerator::new(store.clone());
    // 10 * 9 * 8 = 720 valid passwords; heavy contention, still no duplicates
    let options = GenerationOptions::builder().length(3).digits().build();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let generator = generator.clone();
            let options = options.clone();
            thread::spawn(move || {
                (0..50)
                    .map(|_| generator.generate(&options).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let all: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let distinct: HashSet<&String> = all.iter().collect();

    assert_eq!(all.len(), 400);
    assert_eq!(distinct.len(), 400);
    assert_eq!(store.len(), 400);
    assert_eq!(generator.get_metrics_snapshot().passwords_issued, 400);
}

#[test]
fn test_error_messages_are_distinct() {
    let no_class = PassGenError::NoClassSelected.user_message();
    let too_long = PassGenError::length_exceeds_pool(40, 10).user_message();
    let internal = PassGenError::random_source("no entropy").user_message();

    assert_ne!(no_class, too_long);
    assert_ne!(too_long, internal);
    assert_ne!(no_class, internal);
}

#[test]
fn test_library_initialization() {
    assert!(unique_pass_gen::init().is_ok());
}
