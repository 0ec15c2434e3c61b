//! Account form payloads, validated before any call to the auth provider.

use std::fmt;

use crate::draft::FilePart;
use crate::error::CoreError;

/// Password change form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        confirm: impl Into<String>,
    ) -> Self {
        Self {
            current: current.into(),
            new: new.into(),
            confirm: confirm.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::PasswordMismatch`] when the confirmation differs
    /// from the new password, and [`CoreError::MissingField`] when a field is
    /// empty. The mismatch check runs first.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.new != self.confirm {
            return Err(CoreError::PasswordMismatch);
        }
        if self.current.is_empty() {
            return Err(CoreError::MissingField("current password"));
        }
        if self.new.is_empty() {
            return Err(CoreError::MissingField("new password"));
        }
        Ok(())
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("current", &"[redacted]")
            .field("new", &"[redacted]")
            .field("confirm", &"[redacted]")
            .finish()
    }
}

/// Profile form: display name plus an optional new avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub image: Option<FilePart>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let change = PasswordChange::new("old-pass", "n3w-pass", "n3w-pas");
        assert_eq!(change.validate(), Err(CoreError::PasswordMismatch));
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            PasswordChange::new("", "n3w", "n3w").validate(),
            Err(CoreError::MissingField("current password"))
        );
        assert_eq!(
            PasswordChange::new("old", "", "").validate(),
            Err(CoreError::MissingField("new password"))
        );
    }

    #[test]
    fn matching_passwords_validate() {
        assert!(PasswordChange::new("old", "n3w", "n3w").validate().is_ok());
    }

    #[test]
    fn debug_never_prints_passwords() {
        let rendered = format!("{:?}", PasswordChange::new("hunter2", "s3cret", "s3cret"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
    }
}
