//! Integration tests for saving and loading Tomb containers.

use std::fs;

use tempfile::TempDir;
use tomb::container::format::{self, ContainerHeader, LEGACY_MAGIC, MAGIC_LEN};
use tomb::container::{Container, CURRENT_VERSION, LEGACY_VERSION};
use tomb::crypto::{Argon2Params, KdfParams};
use tomb::entry::{Entry, FolderEntry, PasswordEntry, RootEntry};
use tomb::errors::TombError;

/// Low Argon2 cost so the tests stay fast.
fn fast() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

/// Helper: create a temporary container path inside a fresh temp dir.
fn container_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.tomb");
    (dir, path)
}

/// A small tree with nesting, both entry kinds and some non-ASCII text.
fn sample_tree() -> RootEntry {
    let mut root = RootEntry::new();
    let mut work = FolderEntry::new("Work", "day job");
    work.add_child(PasswordEntry::new("Email", "corp mail", "user@x", "secret1"), None)
        .unwrap();
    let mut servers = FolderEntry::new("Servers", "");
    servers
        .add_child(PasswordEntry::new("db", "", "root", "p\u{e4}ss \"quoted\""), None)
        .unwrap();
    work.add_child(servers, None).unwrap();
    root.add_child(work, None).unwrap();
    root.add_child(PasswordEntry::new("Bank", "", "me", "1234"), None)
        .unwrap();
    root.add_child(FolderEntry::new("Empty", ""), None).unwrap();
    root
}

// ---------------------------------------------------------------------------
// Concrete scenario
// ---------------------------------------------------------------------------

#[test]
fn work_email_scenario() {
    let (_dir, path) = container_path();

    let mut container = Container::with_params(fast());
    container
        .root_mut()
        .add_child(FolderEntry::new("Work", ""), None)
        .unwrap();
    container
        .root_mut()
        .find_folder_path_mut(&["Work"])
        .unwrap()
        .add_child(PasswordEntry::new("Email", "", "user@x", "secret1"), None)
        .unwrap();
    container.save(&path, b"correct-horse").expect("save");

    let reopened = Container::open(&path, b"correct-horse", fast()).expect("reopen");
    let root = reopened.root();
    assert_eq!(root.len(), 1);

    let work = root.get(0).and_then(Entry::as_folder).expect("Work folder");
    assert_eq!(work.name(), "Work");
    assert_eq!(work.len(), 1);

    let email = work.get(0).and_then(Entry::as_password).expect("Email entry");
    assert_eq!(email.name(), "Email");
    assert_eq!(email.username(), "user@x");
    assert_eq!(email.secret(), "secret1");

    let wrong = Container::open(&path, b"wrong", fast());
    assert!(matches!(wrong, Err(TombError::AuthenticationFailed)));
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_preserves_tree_exactly() {
    let (_dir, path) = container_path();
    let tree = sample_tree();

    let container = Container::from_root(tree.clone(), fast());
    container.save(&path, b"pass phrase").unwrap();

    let loaded = Container::open(&path, b"pass phrase", fast()).unwrap();
    assert_eq!(loaded.root(), &tree);
    assert_eq!(loaded.most_recent_update(), tree.most_recent_update());
}

#[test]
fn empty_tree_roundtrips() {
    let (_dir, path) = container_path();
    Container::with_params(fast()).save(&path, b"pw").unwrap();

    let loaded = Container::open(&path, b"pw", fast()).unwrap();
    assert!(loaded.root().is_empty());
}

#[test]
fn empty_passphrase_is_allowed() {
    let (_dir, path) = container_path();
    Container::from_root(sample_tree(), fast())
        .save(&path, b"")
        .unwrap();

    assert!(Container::open(&path, b"", fast()).is_ok());
    assert!(matches!(
        Container::open(&path, b"x", fast()),
        Err(TombError::AuthenticationFailed)
    ));
}

#[test]
fn save_writes_current_header() {
    let (_dir, path) = container_path();
    Container::with_params(fast()).save(&path, b"pw").unwrap();

    let bytes = fs::read(&path).unwrap();
    let (header, _) = ContainerHeader::decode(&bytes).unwrap();
    assert_eq!(header.version(), CURRENT_VERSION);
    assert_eq!(header.kdf, KdfParams::Argon2id(fast()));
}

#[test]
fn every_save_draws_new_salt_and_iv() {
    let (_dir, path) = container_path();
    let container = Container::from_root(sample_tree(), fast());

    container.save(&path, b"pw").unwrap();
    let first = fs::read(&path).unwrap();
    container.save(&path, b"pw").unwrap();
    let second = fs::read(&path).unwrap();

    let (a, _) = ContainerHeader::decode(&first).unwrap();
    let (b, _) = ContainerHeader::decode(&second).unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.iv, b.iv);
}

// ---------------------------------------------------------------------------
// Tamper detection and wrong passphrase
// ---------------------------------------------------------------------------

#[test]
fn flipping_any_ciphertext_byte_fails_authentication() {
    let (_dir, path) = container_path();
    Container::from_root(sample_tree(), fast())
        .save(&path, b"pw")
        .unwrap();

    let original = fs::read(&path).unwrap();
    let (_, body) = ContainerHeader::decode(&original).unwrap();
    assert!(original.len() > body);

    for offset in body..original.len() {
        let mut tampered = original.clone();
        tampered[offset] ^= 0x01;
        let result = format::open(&tampered, b"pw");
        assert!(
            matches!(result, Err(TombError::AuthenticationFailed)),
            "flip at byte {offset} was not rejected"
        );
    }
}

#[test]
fn flipping_salt_or_iv_fails_authentication() {
    let (_dir, path) = container_path();
    Container::with_params(fast()).save(&path, b"pw").unwrap();

    let original = fs::read(&path).unwrap();
    let (_, body) = ContainerHeader::decode(&original).unwrap();

    // Byte 8 is the first salt byte, `body - 1` the last IV byte.
    for offset in [8, body - 1] {
        let mut tampered = original.clone();
        tampered[offset] ^= 0x80;
        fs::write(&path, &tampered).unwrap();
        assert!(matches!(
            Container::open(&path, b"pw", fast()),
            Err(TombError::AuthenticationFailed)
        ));
    }
}

#[test]
fn truncated_file_is_rejected() {
    let (_dir, path) = container_path();
    Container::from_root(sample_tree(), fast())
        .save(&path, b"pw")
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();
    assert!(matches!(
        Container::open(&path, b"pw", fast()),
        Err(TombError::AuthenticationFailed)
    ));

    fs::write(&path, &bytes[..10]).unwrap();
    assert!(matches!(
        Container::open(&path, b"pw", fast()),
        Err(TombError::InvalidFormat(_))
    ));
}

#[test]
fn non_container_file_is_invalid_format() {
    let (_dir, path) = container_path();
    fs::write(&path, b"{\"type\": \"root\"}").unwrap();

    assert!(matches!(
        Container::open(&path, b"pw", fast()),
        Err(TombError::InvalidFormat(_))
    ));
}

#[test]
fn missing_file_is_not_found() {
    let (_dir, path) = container_path();
    assert!(matches!(
        Container::open(&path, b"pw", fast()),
        Err(TombError::ContainerNotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Legacy containers
// ---------------------------------------------------------------------------

/// Build a version-2 container carrying the legacy magic.
fn legacy_container(document: &str, passphrase: &[u8]) -> Vec<u8> {
    let mut bytes = format::seal(document.as_bytes(), passphrase, KdfParams::Bcrypt { cost: 4 })
        .expect("seal legacy");
    bytes[..MAGIC_LEN].copy_from_slice(&LEGACY_MAGIC);
    bytes
}

#[test]
fn legacy_container_loads_with_matching_passphrase() {
    let (_dir, path) = container_path();
    let tree = sample_tree();
    let bytes = legacy_container(&tree.to_document().unwrap(), b"old secret");
    assert_eq!(bytes[MAGIC_LEN], LEGACY_VERSION);
    fs::write(&path, &bytes).unwrap();

    let loaded = Container::open(&path, b"old secret", fast()).unwrap();
    assert_eq!(loaded.root(), &tree);

    assert!(matches!(
        Container::open(&path, b"new secret", fast()),
        Err(TombError::AuthenticationFailed)
    ));
}

#[test]
fn saving_a_legacy_container_upgrades_it() {
    let (_dir, path) = container_path();
    let tree = sample_tree();
    fs::write(&path, legacy_container(&tree.to_document().unwrap(), b"pw")).unwrap();

    let container = Container::open(&path, b"pw", fast()).unwrap();
    container.save(&path, b"pw").unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..MAGIC_LEN], &format::MAGIC);
    assert_eq!(bytes[MAGIC_LEN], CURRENT_VERSION);
    assert_eq!(Container::open(&path, b"pw", fast()).unwrap().root(), &tree);
}

// ---------------------------------------------------------------------------
// Malformed payloads
// ---------------------------------------------------------------------------

#[test]
fn authenticated_but_unparsable_payload_is_malformed() {
    let (_dir, path) = container_path();
    let document = r#"{"type": "root", "name": "r", "description": "",
        "created_at": 1, "updated_at": 1,
        "entries": [{"type": "note", "name": "n"}]}"#;
    let bytes = format::seal(document.as_bytes(), b"pw", KdfParams::Argon2id(fast())).unwrap();
    fs::write(&path, bytes).unwrap();

    assert!(matches!(
        Container::open(&path, b"pw", fast()),
        Err(TombError::MalformedPayload(_))
    ));
}

// ---------------------------------------------------------------------------
// Failure leaves the open tree untouched
// ---------------------------------------------------------------------------

#[test]
fn failed_load_does_not_replace_open_tree() {
    let (_dir, path) = container_path();
    Container::with_params(fast()).save(&path, b"pw").unwrap();

    let mut container = Container::from_root(sample_tree(), fast());
    let before = container.root().clone();

    assert!(container.load(&path, b"wrong").is_err());
    assert_eq!(container.root(), &before);

    fs::write(&path, b"garbage").unwrap();
    assert!(container.load(&path, b"pw").is_err());
    assert_eq!(container.root(), &before);
}

// ---------------------------------------------------------------------------
// Passphrase change and plaintext interchange
// ---------------------------------------------------------------------------

#[test]
fn passphrase_change_reencrypts() {
    let (_dir, path) = container_path();
    let tree = sample_tree();
    Container::from_root(tree.clone(), fast())
        .save(&path, b"old-pass")
        .unwrap();

    let container = Container::open(&path, b"old-pass", fast()).unwrap();
    container.save(&path, b"new-pass").unwrap();

    assert!(matches!(
        Container::open(&path, b"old-pass", fast()),
        Err(TombError::AuthenticationFailed)
    ));
    let reopened = Container::open(&path, b"new-pass", fast()).unwrap();
    assert_eq!(reopened.root(), &tree);
}

#[test]
fn export_is_readable_json_with_documented_keys() {
    let container = Container::from_root(sample_tree(), fast());
    let text = container.export_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["type"], "root");
    assert_eq!(value["entries"][0]["type"], "folder");
    assert_eq!(value["entries"][0]["entries"][0]["user"], "user@x");
    assert_eq!(value["entries"][0]["entries"][0]["password"], "secret1");
    assert!(value["user_agent"].is_string());
    assert!(text.contains("\n  \"type\""));
}

#[test]
fn import_of_export_reproduces_tree() {
    let source = Container::from_root(sample_tree(), fast());
    let text = source.export_json().unwrap();

    let mut target = Container::with_params(fast());
    target.import_json(&text).unwrap();
    assert_eq!(target.root(), source.root());
}

#[test]
fn import_rejects_timestamps_beyond_the_clock_range() {
    let mut container = Container::from_root(sample_tree(), fast());
    let before = container.root().clone();
    let document = r#"{"type": "root", "name": "top-level-root", "description": "",
        "created_at": 8210266876799999, "updated_at": 8210266876799999,
        "entries": []}"#;

    assert!(matches!(
        container.import_json(document),
        Err(TombError::MalformedPayload(_))
    ));
    assert_eq!(container.root(), &before);

    let last = container.most_recent_update();
    container
        .root_mut()
        .add_child(FolderEntry::new("a", ""), None)
        .unwrap();
    assert!(container.most_recent_update() > last);
}
