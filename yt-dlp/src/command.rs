use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub struct CommandBuilder {
    binary: PathBuf,
    args: Vec<String>
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        self.arg(url)
    }

    pub fn json_output(self) -> Self {
        self.arg("--dump-json")
    }

    pub fn skip_download(self) -> Self {
        self.arg("--skip-download")
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        self.arg("-f").arg(format)
    }

    pub fn no_warnings(self) -> Self {
        self.arg("--no-warnings")
    }

    pub fn flat_playlist(self) -> Self {
        self.arg("--flat-playlist")
    }

    pub fn yes_playlist(self) -> Self {
        self.arg("--yes-playlist")
    }

    pub fn no_playlist(self) -> Self {
        self.arg("--no-playlist")
    }

    pub fn playlist_end(self, index: u32) -> Self {
        self.arg("--playlist-end").arg(index.to_string())
    }

    pub fn cookies_file(self, path: impl AsRef<Path>) -> Self {
        self.arg("--cookies").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn cookies_file_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self.cookies_file(p),
            None => self
        }
    }

    pub fn build_with_env(&self, env_vars: &HashMap<String, String>) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);

        if let Some(path_prepend) = env_vars.get("PATH_PREPEND") {
            let current_path = std::env::var("PATH").unwrap_or_default();
            cmd.env("PATH", format!("{path_prepend}:{current_path}"));
        }

        for (key, value) in env_vars {
            if key != "PATH_PREPEND" {
                cmd.env(key, value);
            }
        }

        cmd
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}
