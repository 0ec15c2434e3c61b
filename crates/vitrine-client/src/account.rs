//! Profile and password flows over an external auth provider.

use std::future::Future;

use vitrine_core::account::ProfileUpdate;
use vitrine_core::{normalize_media_src, PasswordChange};

use crate::client::StorefrontClient;
use crate::error::ClientError;

/// The hosted identity service holding the signed-in user.
pub trait AuthProvider {
    /// Email of the signed-in user, if any.
    fn current_email(&self) -> Option<String>;

    fn reauthenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn update_password(&self, new_password: &str)
        -> impl Future<Output = Result<(), ClientError>> + Send;

    fn update_profile(
        &self,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Changes the signed-in user's password.
///
/// The form is validated before anything is sent, and the provider requires
/// a fresh sign-in with the current password before accepting the new one.
///
/// # Errors
///
/// - [`ClientError::Validation`] for a mismatched confirmation or empty field.
/// - [`ClientError::Auth`] when nobody is signed in, or as returned by the
///   provider.
pub async fn change_password(
    auth: &impl AuthProvider,
    change: &PasswordChange,
) -> Result<(), ClientError> {
    change.validate()?;

    let email = auth
        .current_email()
        .ok_or_else(|| ClientError::Auth("no signed-in user".to_owned()))?;

    auth.reauthenticate(&email, &change.current).await?;
    auth.update_password(&change.new).await?;
    tracing::info!("password updated");
    Ok(())
}

/// Updates display name and, when a new image is given, the avatar.
///
/// The image is uploaded first; the stored path is turned into an absolute
/// URL under the media base before being handed to the provider. Returns the
/// photo URL now on the profile.
///
/// # Errors
///
/// Propagates upload failures from the storefront API and provider errors.
pub async fn update_profile(
    client: &StorefrontClient,
    auth: &impl AuthProvider,
    update: &ProfileUpdate,
    current_photo: Option<&str>,
) -> Result<Option<String>, ClientError> {
    let photo_url = match &update.image {
        Some(image) => {
            let path = client.upload_profile_image(image).await?;
            Some(normalize_media_src(client.media_base(), &path))
        }
        None => current_photo.map(str::to_owned),
    };

    auth.update_profile(&update.display_name, photo_url.as_deref())
        .await?;
    tracing::info!(display_name = %update.display_name, "profile updated");
    Ok(photo_url)
}
