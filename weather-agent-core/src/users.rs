//! Registered identities: a flat JSON array of email strings.

use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Opens the store at `path`, creating an empty list if the file is missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };

        if !store.path.exists() {
            store.write(&[])?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read users file: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse users file: {}", self.path.display()))
    }

    pub fn contains(&self, email: &str) -> Result<bool> {
        let email = email.trim();
        Ok(self.list()?.iter().any(|e| e == email))
    }

    /// Adds `email` unless already present. Returns `true` when it was newly added.
    pub fn register(&self, email: &str) -> Result<bool> {
        let email = email.trim();
        if email.is_empty() {
            bail!("Email cannot be empty!");
        }

        let mut users = self.list()?;
        if users.iter().any(|e| e == email) {
            return Ok(false);
        }

        users.push(email.to_string());
        self.write(&users)?;
        info!(email, "Registered user");

        Ok(true)
    }

    fn write(&self, users: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create users directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(users).context("Failed to serialize users")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write users file: {}", self.path.display()))
    }
}
