// git as a child process

use super::pure::{auth_config, redact};
use super::types::GitClient;
use crate::error::SyncError;

use std::path::Path;
use std::process::{Command, Stdio};

const COMMIT_NAME: &str = "Schedule I Save Sync";
const COMMIT_EMAIL: &str = "s1sync@users.noreply.github.com";

/// Runs the system `git`. With a token, requests to GitHub carry it as a
/// per-invocation header, so it never lands in `.git/config`; it is also
/// scrubbed from any output that ends up in an error.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    token: String,
}

impl GitCli {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    fn run(&self, what: &str, workdir: Option<&Path>, args: &[&str]) -> Result<String, SyncError> {
        let mut cmd = Command::new("git");
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }
        if let Some(auth) = auth_config(&self.token) {
            cmd.arg("-c").arg(auth);
        }
        cmd.args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());

        tracing::debug!(what, "running git");
        let output = cmd
            .output()
            .map_err(|e| SyncError::RemoteApi(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncError::RemoteApi(format!(
                "git {} failed: {}",
                what,
                redact(stderr.trim(), &self.token)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl GitClient for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), SyncError> {
        let dest_str = dest.to_string_lossy();
        self.run("clone", None, &["clone", "--quiet", url, &dest_str])?;
        Ok(())
    }

    fn commit_all(&self, workdir: &Path, message: &str) -> Result<bool, SyncError> {
        self.run("add", Some(workdir), &["add", "--all"])?;

        let status = self.run("status", Some(workdir), &["status", "--porcelain"])?;
        if status.trim().is_empty() {
            return Ok(false);
        }

        let name = format!("user.name={}", COMMIT_NAME);
        let email = format!("user.email={}", COMMIT_EMAIL);
        self.run(
            "commit",
            Some(workdir),
            &["-c", &name, "-c", &email, "commit", "--quiet", "-m", message],
        )?;
        Ok(true)
    }

    fn push(&self, workdir: &Path, branch: &str) -> Result<(), SyncError> {
        let refspec = format!("HEAD:refs/heads/{}", branch);
        self.run("push", Some(workdir), &["push", "--quiet", "origin", &refspec])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TOKEN: &str = "ghp_not_a_real_token";

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    #[test]
    fn token_is_not_stored_in_working_copy() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let bare = dir.path().join("remote.git");
        let status = Command::new("git")
            .args(["init", "--bare", "--quiet"])
            .arg(&bare)
            .status()
            .unwrap();
        assert!(status.success());

        let git = GitCli::new(Some(TOKEN));
        let work = dir.path().join("work");
        git.clone_repo(&bare.to_string_lossy(), &work).unwrap();

        fs::create_dir_all(work.join("7656/SaveGame_1")).unwrap();
        fs::write(work.join("7656/SaveGame_1/Game.json"), "{}").unwrap();
        assert!(git.commit_all(&work, "first").unwrap());
        git.push(&work, "main").unwrap();
        assert!(!git.commit_all(&work, "nothing new").unwrap());

        let config = fs::read_to_string(work.join(".git/config")).unwrap();
        assert!(!config.contains(TOKEN));
        assert!(!config.contains("extraheader"));

        let pushed = Command::new("git")
            .arg("--git-dir")
            .arg(&bare)
            .args(["rev-parse", "--verify", "--quiet", "refs/heads/main"])
            .status()
            .unwrap();
        assert!(pushed.success());
    }

    #[test]
    fn failure_output_is_redacted() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(TOKEN);

        let err = GitCli::new(Some(TOKEN))
            .clone_repo(&missing.to_string_lossy(), &dir.path().join("work"))
            .unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Remote repository error: git clone failed"));
        assert!(!text.contains(TOKEN));
    }
}
