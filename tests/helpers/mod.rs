#![allow(dead_code)]

use gitfacade::Repository;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create an initialized repository with a test identity
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    let mut repo = Repository::new(&repo_path);
    repo.init(&[]).expect("Failed to init git repo");
    repo.config(&["user.name", "Test User"], &[])
        .expect("Failed to set git user.name");
    repo.config(&["user.email", "test@example.com"], &[])
        .expect("Failed to set git user.email");
    repo.config(&["commit.gpgsign", "false"], &[])
        .expect("Failed to disable commit signing");

    (temp_dir, repo_path, repo)
}

/// Helper to write a file and commit it
pub fn create_commit(repo: &mut Repository, file: &str, content: &str, message: &str) {
    write_file(repo.path(), file, content);

    repo.add(&[file], &[])
        .expect("Failed to add file")
        .commit(message, &[])
        .expect("Failed to commit");
}

pub fn write_file(repo_path: &Path, file: &str, content: &str) {
    let file_path = repo_path.join(file);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    fs::write(&file_path, content).expect("Failed to write file");
}
