use std::path::Path;
use std::process::Command;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git").args(args).current_dir(dir).output().expect("git failed to run");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Create a bare repository whose default branch is `main`.
pub(crate) fn init_bare_repo(path: &Path) {
    std::fs::create_dir_all(path).unwrap();
    git(path, &["init", "--bare", "--initial-branch=main"]);
}

/// Subjects of the commits reachable from `branch`, newest first.
pub(crate) fn log_subjects(repo_dir: &Path, branch: &str) -> Vec<String> {
    git(repo_dir, &["log", "--format=%s", branch]).lines().map(str::to_string).collect()
}

pub(crate) fn head_sha(repo_dir: &Path, branch: &str) -> String {
    git(repo_dir, &["rev-parse", branch]).trim().to_string()
}

/// `git status --porcelain` is empty.
pub(crate) fn is_clean(worktree: &Path) -> bool {
    git(worktree, &["status", "--porcelain"]).trim().is_empty()
}

pub(crate) fn current_branch(worktree: &Path) -> String {
    git(worktree, &["rev-parse", "--abbrev-ref", "HEAD"]).trim().to_string()
}
