mod common;

use common::{FakeRedis, UnreachableBackend};
use drivestash_core::{
    record_fields, InMemoryBackend, KvBackend, RecordStore, RecordValidationError, RedisBackend,
    StoreError,
};

#[test]
fn save_then_fetch_roundtrip() {
    let store = RecordStore::new(InMemoryBackend::new());
    let fields = record_fields([("name", "Alice"), ("email", "alice@example.com")]);

    store.save("101", &fields).unwrap();

    let loaded = store.fetch("101").unwrap().expect("record should exist");
    assert_eq!(loaded, fields);
}

#[test]
fn fetch_of_unsaved_key_is_absent() {
    let store = RecordStore::new(InMemoryBackend::new());
    assert_eq!(store.fetch("404").unwrap(), None);
}

#[test]
fn repeated_save_keeps_fields_not_mentioned_again() {
    let store = RecordStore::new(InMemoryBackend::new());
    store
        .save(
            "101",
            &record_fields([("name", "Alice"), ("email", "alice@example.com")]),
        )
        .unwrap();
    store
        .save("101", &record_fields([("name", "Alicia"), ("phone", "555-0100")]))
        .unwrap();

    let loaded = store.fetch("101").unwrap().expect("record should exist");
    assert_eq!(loaded.get("name").map(String::as_str), Some("Alicia"));
    assert_eq!(
        loaded.get("email").map(String::as_str),
        Some("alice@example.com")
    );
    assert_eq!(loaded.get("phone").map(String::as_str), Some("555-0100"));
}

#[test]
fn records_are_stored_under_namespaced_keys() {
    let backend = InMemoryBackend::new();
    let store = RecordStore::new(&backend);
    store.save("101", &record_fields([("name", "Alice")])).unwrap();

    assert_eq!(store.storage_key("101").unwrap(), "record:101");
    assert!(!backend.get_all_fields("record:101").unwrap().is_empty());
    assert!(backend.get_all_fields("101").unwrap().is_empty());
}

#[test]
fn custom_namespace_isolates_records() {
    let backend = InMemoryBackend::new();
    let users = RecordStore::with_namespace(&backend, "user").unwrap();
    let records = RecordStore::new(&backend);

    users.save("101", &record_fields([("name", "Alice")])).unwrap();

    assert_eq!(users.storage_key("101").unwrap(), "user:101");
    assert!(users.fetch("101").unwrap().is_some());
    assert_eq!(records.fetch("101").unwrap(), None);
}

#[test]
fn blank_namespace_is_rejected() {
    let err = RecordStore::with_namespace(InMemoryBackend::new(), " ")
        .err()
        .expect("blank namespace must be rejected");
    assert_eq!(err, RecordValidationError::EmptyNamespace);
}

#[test]
fn invalid_input_is_rejected_before_reaching_backend() {
    let store = RecordStore::new(UnreachableBackend);

    let err = store
        .save("", &record_fields([("name", "Alice")]))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(RecordValidationError::EmptyKey)
    ));

    let err = store
        .save("101", &record_fields(Vec::<(String, String)>::new()))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(RecordValidationError::NoFields)
    ));

    let err = store.fetch("").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(RecordValidationError::EmptyKey)
    ));
}

#[test]
fn whitespace_keys_and_field_names_are_stored_verbatim() {
    let backend = InMemoryBackend::new();
    let store = RecordStore::new(&backend);
    let fields = record_fields([(" ", "spaced"), ("", "unnamed")]);

    store.save(" ", &fields).unwrap();

    assert_eq!(store.fetch(" ").unwrap(), Some(fields));
    assert!(!backend.get_all_fields("record: ").unwrap().is_empty());
}

#[test]
fn backend_failures_propagate() {
    let store = RecordStore::new(UnreachableBackend);

    let err = store
        .save("101", &record_fields([("name", "Alice")]))
        .unwrap_err();
    assert!(matches!(err, StoreError::Redis(_)));

    let err = store.fetch("101").unwrap_err();
    assert!(matches!(err, StoreError::Redis(_)));
}

#[test]
fn redis_backend_stays_unconnected_until_first_use_fails() {
    // Port 1 is never a Redis server; the connect attempt is refused.
    let store = RecordStore::new(RedisBackend::new("redis://127.0.0.1:1/").unwrap());
    assert!(!store.backend().is_connected());

    let err = store.fetch("101").unwrap_err();
    assert!(matches!(err, StoreError::Redis(_)));
    assert!(!store.backend().is_connected());
}

#[test]
fn redis_backend_connects_once_and_upserts_over_the_wire() {
    let server = FakeRedis::start();
    let store = RecordStore::new(RedisBackend::new(&server.url).unwrap());
    assert!(!store.backend().is_connected());
    assert_eq!(server.connections(), 0);

    store
        .save(
            "101",
            &record_fields([("name", "Alice"), ("email", "alice@example.com")]),
        )
        .unwrap();
    assert!(store.backend().is_connected());
    store.save("101", &record_fields([("name", "Bob")])).unwrap();

    let loaded = store.fetch("101").unwrap().expect("record should exist");
    assert_eq!(
        loaded,
        record_fields([("email", "alice@example.com"), ("name", "Bob")])
    );
    assert_eq!(store.fetch("nope").unwrap(), None);

    assert_eq!(server.connections(), 1);
}

/// Needs `DRIVESTASH_TEST_REDIS_URL` pointing at a disposable server.
#[test]
#[ignore = "requires a live Redis server"]
fn redis_backend_roundtrip_against_live_server() {
    let url = std::env::var("DRIVESTASH_TEST_REDIS_URL")
        .expect("DRIVESTASH_TEST_REDIS_URL must be set");
    let namespace = format!("drivestash-test-{}", std::process::id());
    let store = RecordStore::with_namespace(RedisBackend::new(&url).unwrap(), namespace).unwrap();

    store
        .save(
            "101",
            &record_fields([("name", "Alice"), ("email", "alice@example.com")]),
        )
        .unwrap();
    assert!(store.backend().is_connected());
    store.save("101", &record_fields([("name", "Bob")])).unwrap();

    let loaded = store.fetch("101").unwrap().expect("record should exist");
    assert_eq!(loaded.get("name").map(String::as_str), Some("Bob"));
    assert_eq!(
        loaded.get("email").map(String::as_str),
        Some("alice@example.com")
    );
    assert_eq!(store.fetch("never-saved").unwrap(), None);
}
