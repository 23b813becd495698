//! CLI integration tests for user account commands.

mod common;

use tempfile::TempDir;

use common::{run_cli, run_cli_success};

#[test]
fn test_bootstrap_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path();

    let stdout = run_cli_success(&["user", "bootstrap"], data_dir);
    assert!(stdout.contains("Admin account created"));

    let stdout = run_cli_success(&["user", "bootstrap"], data_dir);
    assert!(stdout.contains("Admin account already present"));

    // Exactly one admin record with the bootstrap email on disk.
    let content = std::fs::read_to_string(data_dir.join("users.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    let admins: Vec<_> = records
        .iter()
        .filter(|r| r["email"] == "admin@example.com" && r["role"] == "admin")
        .collect();
    assert_eq!(admins.len(), 1);
}

#[test]
fn test_bootstrap_admin_can_log_in() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path();

    run_cli_success(&["user", "bootstrap"], data_dir);

    let stdout = run_cli_success(
        &[
            "user",
            "login",
            "--email",
            "admin@example.com",
            "--password",
            "admin123",
        ],
        data_dir,
    );
    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("\"role\": \"admin\""));
}

#[test]
fn test_register_and_login() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path();

    let stdout = run_cli_success(
        &[
            "user",
            "register",
            "--username",
            "alice",
            "--email",
            "Alice@Example.com",
            "--password",
            "s3cret-password",
        ],
        data_dir,
    );
    assert!(stdout.contains("\"email\": \"alice@example.com\""));
    assert!(stdout.contains("\"role\": \"user\""));
    assert!(!stdout.contains("password\":"));

    // The stored record keeps the hash, never the plaintext.
    let content = std::fs::read_to_string(data_dir.join("users.json")).unwrap();
    assert!(!content.contains("s3cret-password"));
    assert!(content.contains("\"password\""));

    let stdout = run_cli_success(
        &[
            "user",
            "login",
            "--email",
            "alice@example.com",
            "--password",
            "s3cret-password",
        ],
        data_dir,
    );
    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("\"lastLogin\""));
}

#[test]
fn test_login_with_wrong_password_fails() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path();

    run_cli_success(
        &[
            "user",
            "register",
            "--username",
            "bob",
            "--email",
            "bob@example.com",
            "--password",
            "right-password",
        ],
        data_dir,
    );

    let output = run_cli(
        &[
            "user",
            "login",
            "--email",
            "bob@example.com",
            "--password",
            "wrong-password",
        ],
        data_dir,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid email or password"));
}

#[test]
fn test_register_duplicate_email_fails() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path();

    run_cli_success(
        &[
            "user",
            "register",
            "--username",
            "carol",
            "--email",
            "carol@example.com",
            "--password",
            "password-one",
        ],
        data_dir,
    );

    let output = run_cli(
        &[
            "user",
            "register",
            "--username",
            "carol2",
            "--email",
            "CAROL@example.com",
            "--password",
            "password-two",
        ],
        data_dir,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already registered"));
}

#[test]
fn test_set_preferences_merges() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path();

    run_cli_success(
        &[
            "user",
            "register",
            "--username",
            "dave",
            "--email",
            "dave@example.com",
            "--password",
            "davepassword",
        ],
        data_dir,
    );

    let stdout = run_cli_success(
        &[
            "user",
            "set-preferences",
            "--email",
            "dave@example.com",
            "--theme",
            "dark",
        ],
        data_dir,
    );

    assert!(stdout.contains("\"theme\": \"dark\""));
    assert!(stdout.contains("\"defaultModel\": \"llama2\""));
}
