//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a stymie command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - STYMIE and HOME set to the temporary directory
    /// - the age cipher, so no GnuPG keyring is needed
    /// - colors, logging and editors cleared
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("stymie").expect("failed to find stymie binary");
        cmd.env("STYMIE", self.dir.path());
        cmd.env("HOME", self.dir.path());
        cmd.env("STYMIE_CIPHER", "age");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("STYMIE_LOG");
        cmd.env_remove("VISUAL");
        cmd.env_remove("EDITOR");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `stymie init --yes`.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .args(["init", "--yes"])
            .output()
            .expect("failed to run stymie init")
    }

    /// Shortcut for a fully prefilled `stymie key add`.
    pub fn key_add(&self, key: &str, url: &str, username: &str, password: &str) -> Output {
        self.cmd()
            .args([
                "key",
                "add",
                key,
                "--url",
                url,
                "--username",
                username,
                "--password",
                password,
            ])
            .output()
            .expect("failed to run stymie key add")
    }

    /// Shortcut for `stymie key get`.
    pub fn key_get(&self, key: &str) -> Output {
        self.cmd()
            .args(["key", "get", key])
            .output()
            .expect("failed to run stymie key get")
    }

    /// Shortcut for `stymie key get KEY -f FIELD`.
    pub fn key_field(&self, key: &str, field: &str) -> Output {
        self.cmd()
            .args(["key", "get", key, "-f", field])
            .output()
            .expect("failed to run stymie key get -f")
    }

    /// Shortcut for `stymie key list`.
    pub fn key_list(&self) -> Output {
        self.cmd()
            .args(["key", "list"])
            .output()
            .expect("failed to run stymie key list")
    }

    /// Shortcut for `stymie file add KEY --from -` with `content` on stdin.
    pub fn file_add(&self, key: &str, content: &[u8]) -> Output {
        self.cmd()
            .args(["file", "add", key, "--from", "-"])
            .write_stdin(content.to_vec())
            .output()
            .expect("failed to run stymie file add")
    }

    /// Shortcut for `stymie file get`.
    pub fn file_get(&self, key: &str) -> Output {
        self.cmd()
            .args(["file", "get", key])
            .output()
            .expect("failed to run stymie file get")
    }
}
