use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The authenticated session: bearer token plus the profile fields the shell
/// displays. Mutated only through the store below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Owns the session lifecycle: `load` on boot, `store` on login, `clear` on
/// logout or a 401 from any request. Persisted as a small JSON file under the
/// platform data directory; a store without a path is memory-only.
pub struct SessionStore {
    path: Option<PathBuf>,
    current: RwLock<Session>,
}

impl SessionStore {
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "fleet-console")
            .ok_or_else(|| anyhow!("could not resolve platform data directory"))?;
        let data_dir = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
        Ok(Self::load(data_dir.join("session.json")))
    }

    pub fn load(path: PathBuf) -> Self {
        let current = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self {
            path: Some(path),
            current: RwLock::new(current),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            current: RwLock::new(Session::default()),
        }
    }

    pub fn session(&self) -> Session {
        self.current.read().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .ok()
            .and_then(|s| s.token.clone())
            .filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .map(|s| s.is_authenticated())
            .unwrap_or(false)
    }

    pub fn store(&self, session: Session) {
        if let Ok(mut current) = self.current.write() {
            *current = session.clone();
        }
        if let Some(path) = &self.path {
            let serialized = match serde_json::to_string_pretty(&session) {
                Ok(serialized) => serialized,
                Err(err) => {
                    warn!(error = %err, "failed to serialize session");
                    return;
                }
            };
            if let Err(err) = fs::write(path, serialized) {
                warn!(error = %err, path = %path.display(), "failed to persist session");
            }
        }
    }

    /// Resets the session and removes the persisted file. Never fails; a
    /// 401 path must always be able to complete.
    pub fn clear(&self) {
        if let Ok(mut current) = self.current.write() {
            *current = Session::default();
        }
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(err) = fs::remove_file(path) {
                    warn!(error = %err, path = %path.display(), "failed to remove session file");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("fleet-console-{prefix}-{nanos}"))
    }

    #[test]
    fn store_then_load_round_trips_token() {
        let temp_dir = unique_test_dir("session");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let path = temp_dir.join("session.json");

        let store = SessionStore::load(path.clone());
        store.store(Session {
            token: Some("abc123".to_string()),
            user_name: Some("Dispatcher".to_string()),
            ..Session::default()
        });

        let reloaded = SessionStore::load(path);
        assert_eq!(reloaded.token().as_deref(), Some("abc123"));
        assert!(reloaded.is_authenticated(), "persisted token should authenticate");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn clear_removes_token_and_file() {
        let temp_dir = unique_test_dir("session-clear");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let path = temp_dir.join("session.json");

        let store = SessionStore::load(path.clone());
        store.store(Session {
            token: Some("abc123".to_string()),
            ..Session::default()
        });
        store.clear();

        assert_eq!(store.token(), None);
        assert!(!store.is_authenticated());
        assert!(!path.exists(), "session file should be removed on clear");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn empty_token_does_not_authenticate() {
        let store = SessionStore::in_memory();
        store.store(Session {
            token: Some(String::new()),
            ..Session::default()
        });

        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }
}
