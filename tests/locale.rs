//! Runs in its own test binary because it changes the process environment

mod helpers;

use helpers::create_test_repo;
use std::env;

/// A translated caller locale must not hide the empty-repository log case
#[test]
fn test_logs_on_empty_repository_under_translated_locale() {
    // SAFETY: the only test in this binary, so no other thread reads the environment
    unsafe {
        env::set_var("LANGUAGE", "de");
        env::set_var("LC_ALL", "C.UTF-8");
        env::set_var("LANG", "de_DE.UTF-8");
    }

    let (_temp, _path, mut repo) = create_test_repo();

    let logs = repo.logs().expect("Empty repository log should succeed");
    assert!(logs.is_empty());

    let err = repo.log(&[]).unwrap_err();
    assert!(err.stderr().is_some_and(|s| s.contains("does not have any commits yet")));
}
