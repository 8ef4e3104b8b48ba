use std::fmt;

/// Opaque string key shared by the HMAC-SHA1 and PLAINTEXT methods.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedKey {
    value: String,
}

impl SharedKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<&str> for SharedKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SharedKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedKey").field("value", &"<redacted>").finish()
    }
}
