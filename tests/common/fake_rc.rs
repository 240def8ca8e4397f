//! Fake `rc` executables for exercising the real process invoker
//!
//! Each fake is a Bash script written into a temporary directory. The directory
//! is removed when the returned [`FakeRc`] is dropped.

use std::path::PathBuf;
use tempfile::TempDir;

pub struct FakeRc {
    _dir: TempDir,
    pub path: PathBuf,
}

impl FakeRc {
    /// Write `body` as the script body (a `#!/bin/bash` line is prepended)
    pub fn new(body: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("rc");
        std::fs::write(&path, format!("#!/bin/bash\n{body}\n"))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(Self { _dir: dir, path })
    }

    /// Prints its arguments one per line
    pub fn echo_args() -> anyhow::Result<Self> {
        Self::new(r#"for arg in "$@"; do echo "$arg"; done"#)
    }

    /// Copies stdin to stdout
    pub fn cat_stdin() -> anyhow::Result<Self> {
        Self::new("cat")
    }

    /// Writes to both streams and exits with `status`
    pub fn failing(status: i32) -> anyhow::Result<Self> {
        Self::new(&format!(
            "echo 'partial output'\necho 'something broke' >&2\nexit {status}"
        ))
    }

    /// Sleeps for `seconds` before answering
    pub fn sleeping(seconds: u32) -> anyhow::Result<Self> {
        Self::new(&format!("sleep {seconds}\necho done"))
    }

    pub fn command(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}
