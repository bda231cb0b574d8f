//! File-backed session token slot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use item_admin_core::{SessionToken, TokenStore};
use tracing::warn;

/// Keeps the token in a single file, created on first login and removed on
/// logout or when the server rejects it.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, token: &SessionToken) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token.as_str())?;
        restrict_permissions(&self.path)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<SessionToken> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let raw = raw.trim();
        (!raw.is_empty()).then(|| SessionToken::new(raw))
    }

    fn set(&self, token: SessionToken) {
        if let Err(e) = self.write(&token) {
            warn!(path = %self.path.display(), error = %e, "could not persist token");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not remove token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert!(store.get().is_none());
        store.set(SessionToken::new("abc123"));
        assert_eq!(store.get(), Some(SessionToken::new("abc123")));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "abc123");

        store.clear();
        assert!(store.get().is_none());
        assert!(!store.path().exists());
        store.clear();
    }

    #[test]
    fn blank_file_means_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \n").unwrap();
        assert!(FileTokenStore::new(path).get().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.set(SessionToken::new("x"));
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
