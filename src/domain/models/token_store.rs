use anyhow::Result;

/// Client-local persistence for the credential token.
pub trait TokenStore {
    /// Returns the stored token, or `None` when nothing (or only whitespace)
    /// is stored.
    fn get(&self) -> Result<Option<String>>;

    fn set(&self, token: &str) -> Result<()>;

    /// Removing a token that does not exist is not an error.
    fn remove(&self) -> Result<()>;
}
