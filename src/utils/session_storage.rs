// hackmate/src/utils/session_storage.rs
use crate::models::{ClientError, User};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// On-disk shape of a signed-in session: the bearer token and the serialized user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

// Ensure the directory holding the session file exists
fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating session storage directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

// Save session to storage
pub fn save_session(path: &Path, session: &StoredSession) -> Result<(), ClientError> {
    ensure_parent_dir(path).map_err(|e| {
        error!("Failed to create session directory: {:?}", e);
        ClientError::Storage(e.to_string())
    })?;

    let session_json = serde_json::to_string_pretty(session).map_err(|e| {
        error!("Failed to serialize session: {:?}", e);
        ClientError::Storage(e.to_string())
    })?;

    fs::write(path, session_json).map_err(|e| {
        error!("Failed to save session: {:?}", e);
        ClientError::Storage(e.to_string())
    })?;

    debug!("Saved session for user {} to {}", session.user.id, path.display());
    Ok(())
}

// Load session from storage; Ok(None) when nothing has been persisted
pub fn load_session(path: &Path) -> Result<Option<StoredSession>, ClientError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read session file: {:?}", e);
        ClientError::Storage(e.to_string())
    })?;

    let session: StoredSession = serde_json::from_str(&content).map_err(|e| {
        error!("Failed to parse session JSON: {:?}", e);
        ClientError::Storage(e.to_string())
    })?;

    Ok(Some(session))
}

// Delete the persisted session; Ok(false) when there was none
pub fn clear_session(path: &Path) -> Result<bool, ClientError> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path).map_err(|e| {
        error!("Failed to delete session file: {:?}", e);
        ClientError::Storage(e.to_string())
    })?;

    Ok(true)
}
