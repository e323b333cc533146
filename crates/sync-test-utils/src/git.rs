//! Git repository fixtures for connector tests.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs —
//! simpler fixtures are faster and have fewer external dependencies.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Initialises a real git repository using `git2` (no initial commit, no
/// config).
///
/// Use for: tests that need valid `git2::Repository` state but no commit
/// history.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialises a real git repository with an initial commit using the
/// `git` CLI.
///
/// Specifically:
/// - Runs `git init`
/// - Configures `user.email`, `user.name`, and `commit.gpgsign = false`
/// - Creates `README.md` and makes an initial commit
/// - Renames the default branch to `main`
///
/// Use for: tests that need a real branch history before the connector
/// takes over.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run_git(path, &["init"]);
    configure_identity(path);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run_git(path, &["add", "."]);
    run_git(path, &["commit", "-m", "Initial commit"]);
    // Best-effort: older git versions may not support this flag
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(path)
        .output();
}

/// Configures a commit identity in an existing repository so `git2` can
/// build signatures without global config.
///
/// # Panics
/// Panics if any git config operation fails.
pub fn configure_identity(path: &Path) {
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);
}

/// Initialises a bare repository at `remote_path` and registers it as
/// the `origin` remote of the repository at `work_path`.
///
/// File-path remotes exercise real fetch/push plumbing without any
/// network dependency.
///
/// # Panics
/// Panics if either git operation fails.
pub fn add_local_remote(work_path: &Path, remote_path: &Path) {
    git2::Repository::init_bare(remote_path).unwrap_or_else(|e| {
        panic!(
            "add_local_remote: failed to init bare repository at {}: {e}",
            remote_path.display()
        )
    });

    let repo = git2::Repository::open(work_path).unwrap_or_else(|e| {
        panic!(
            "add_local_remote: failed to open repository at {}: {e}",
            work_path.display()
        )
    });
    repo.remote("origin", &remote_path.display().to_string())
        .unwrap_or_else(|e| panic!("add_local_remote: failed to add remote: {e}"));
}

fn run_git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
