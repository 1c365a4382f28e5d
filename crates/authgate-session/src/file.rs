//! Durable, cookie-jar style session store.
//!
//! The jar is a small JSON file mapping storage keys to scoped entries:
//!
//! ```json
//! { "access_token": { "value": "eyJhbGciOi...", "path": "/" } }
//! ```
//!
//! Every `get` re-reads the file, so a sign-out from another process is
//! seen immediately. Writes go to a sibling temp file first and are then
//! renamed over the jar, so a crash mid-write leaves the old jar intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{SessionConfig, SessionError, SessionStore, SessionToken};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JarEntry {
    value: SessionToken,
    path: String,
}

type Jar = BTreeMap<String, JarEntry>;

/// A [`SessionStore`] backed by a file, surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    config: SessionConfig,
}

impl FileSessionStore {
    /// Opens (or prepares to create) the jar at `path`.
    ///
    /// The file itself is created lazily on the first `set`.
    ///
    /// # Errors
    /// - [`SessionError::Prepare`]: the parent directory can't be created
    /// - [`SessionError::Read`]: the file exists but can't be read
    pub fn open(path: impl Into<PathBuf>, config: SessionConfig) -> Result<Self, SessionError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SessionError::Prepare {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        match fs::read(&path) {
            Ok(bytes) => {
                if serde_json::from_slice::<Jar>(&bytes).is_err() {
                    tracing::warn!(path = %path.display(), "session file is corrupt, it will be replaced on next write");
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(SessionError::Read { path, source }),
        }

        tracing::debug!(path = %path.display(), key = %config.key, "session file opened");
        Ok(Self { path, config })
    }

    /// The jar's location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Jar {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                Jar::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Jar::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read session file");
                Jar::new()
            }
        }
    }

    fn save(&self, jar: &Jar) {
        if let Err(e) = self.try_save(jar) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write session file");
        }
    }

    /// `session.json` → `session.json.tmp`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn try_save(&self, jar: &Jar) -> io::Result<()> {
        let bytes = serde_json::to_vec_pretty(jar).map_err(io::Error::other)?;
        let tmp = self.temp_path();

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<SessionToken> {
        self.load()
            .remove(&self.config.key)
            .filter(|entry| entry.path == self.config.path)
            .map(|entry| entry.value)
    }

    fn set(&self, token: SessionToken) {
        let mut jar = self.load();
        jar.insert(
            self.config.key.clone(),
            JarEntry {
                value: token,
                path: self.config.path.clone(),
            },
        );
        self.save(&jar);
        tracing::info!(key = %self.config.key, "session token stored");
    }

    fn clear(&self) {
        let mut jar = self.load();
        let in_scope = jar
            .get(&self.config.key)
            .is_some_and(|entry| entry.path == self.config.path);
        if in_scope {
            jar.remove(&self.config.key);
            self.save(&jar);
            tracing::info!(key = %self.config.key, "session token cleared");
        }
    }
}
