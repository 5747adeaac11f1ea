//! File-backed session store
//!
//! Keeps a small JSON key/value document on disk and stores the session
//! token under the fixed key `token`, so a token survives restarts the same
//! way a browser's local storage survives page loads.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::entities::SessionToken;
use crate::domain::ports::SessionStore;
use crate::error::SessionError;

/// Storage key of the session token
pub const TOKEN_KEY: &str = "token";

type Document = BTreeMap<String, String>;

/// Session store persisted to a JSON file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<Document, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt(e.to_string()))
    }

    fn write_document(&self, doc: &Document) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let raw =
            serde_json::to_string_pretty(doc).map_err(|e| SessionError::Corrupt(e.to_string()))?;

        // Write-then-rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionToken>, SessionError> {
        let doc = self.read_document()?;
        Ok(doc
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(|t| SessionToken::new(t.clone())))
    }

    fn save(&self, token: &SessionToken) -> Result<(), SessionError> {
        let mut doc = self.read_document()?;
        doc.insert(TOKEN_KEY.to_string(), token.as_str().to_string());
        self.write_document(&doc)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut doc = self.read_document()?;
        if doc.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_document(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("quotewall-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn load_missing_file_is_empty() {
        let store = FileSessionStore::new(temp_path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_load_clear() {
        let path = temp_path();
        let store = FileSessionStore::new(&path);

        store.save(&SessionToken::new("tok-1")).unwrap();
        assert_eq!(store.load().unwrap(), Some(SessionToken::new("tok-1")));

        // A second store over the same file sees the persisted token
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(SessionToken::new("tok-1")));

        store.clear().unwrap();
        assert!(reopened.load().unwrap().is_none());

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn other_keys_are_preserved() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        store.save(&SessionToken::new("tok-2")).unwrap();
        store.clear().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let doc: Document = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc.get("theme").map(String::as_str), Some("dark"));
        assert!(!doc.contains_key(TOKEN_KEY));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(matches!(store.load(), Err(SessionError::Corrupt(_))));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
