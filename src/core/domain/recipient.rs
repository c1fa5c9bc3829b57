//! Encryption recipient.
//!
//! A public key from the trusted keyring, identified by its long and
//! short key ids.

/// A public key the index can be encrypted to.
///
/// Built only from keyring listings; never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    key_id: String,
    short_id: String,
    fingerprint: Option<String>,
    user_ids: Vec<String>,
}

impl Recipient {
    /// Create a recipient from its 16 hex-digit primary key id.
    ///
    /// The id is uppercased; the short id is its last 8 digits.
    pub fn new(key_id: &str) -> Self {
        let key_id = key_id.to_ascii_uppercase();
        let short_id = key_id
            .char_indices()
            .rev()
            .nth(7)
            .map_or(key_id.as_str(), |(i, _)| &key_id[i..])
            .to_string();
        Self {
            key_id,
            short_id,
            fingerprint: None,
            user_ids: Vec::new(),
        }
    }

    /// Attach the primary key fingerprint.
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Attach a user id.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_ids.push(user_id.into());
        self
    }

    /// Long key id, 16 uppercase hex digits.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Short key id, the last 8 digits of the long id.
    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn user_ids(&self) -> &[String] {
        &self.user_ids
    }

    /// Whether `id` names this key, by exact long or short id.
    pub fn matches(&self, id: &str) -> bool {
        id == self.key_id || id == self.short_id
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.user_ids.first() {
            Some(uid) => write!(f, "{} ({})", self.key_id, uid),
            None => write!(f, "{}", self.key_id),
        }
    }
}
