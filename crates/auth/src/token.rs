use std::borrow::Cow;

/// The shared-secret token every protected request must present verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(Cow<'static, str>);

impl SharedSecret {
    /// Token used when no secret is configured. Development only.
    pub const DEV_DEFAULT: &'static str = "123456";

    pub fn new(token: impl Into<Cow<'static, str>>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dev_default(&self) -> bool {
        self.as_str() == Self::DEV_DEFAULT
    }
}

impl Default for SharedSecret {
    fn default() -> Self {
        Self::new(Self::DEV_DEFAULT)
    }
}

// Never print the secret itself.
impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret(***)")
    }
}
