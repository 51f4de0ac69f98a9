//! Client facade.
//!
//! [`Imgur`] exposes one async method per remote endpoint. Each method
//! validates its arguments, builds the URL and payload, and hands off to the
//! shared [`Transport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use asyncgur::{Imgur, MediaSource, UploadPayload};
//!
//! let imgur = Imgur::new("my-client-id")?;
//! let image = imgur
//!     .upload_image(UploadPayload::new(MediaSource::url("https://example.com/cat.png")))
//!     .await?
//!     .into_data();
//! println!("{:?} (delete with {:?})", image.link, image.deletehash);
//! ```

use futures::stream::{self, Stream};
use reqwest::Url;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ImgurError, Result};
use crate::models::{
    AccountInfo, AlbumInfo, ApiResponse, CommentInfo, CommentSort, CreatedComment, FavoriteState,
    GalleryItem, GallerySection, GallerySort, ImageInfo, OAuthToken, RateLimits, SearchSort,
    TimeWindow,
};
use crate::transport::payload::indexed;
use crate::transport::{
    AlbumPayload, CommentPayload, Credentials, MediaSource, Transport, UploadPayload,
};

/// Asynchronous Imgur API client.
///
/// Cloning is cheap: clones share one connection pool, one set of
/// credentials and one rate limit snapshot. The pool is released when the
/// last clone is dropped.
#[derive(Debug, Clone)]
pub struct Imgur {
    transport: Arc<Transport>,
}

impl Imgur {
    /// Anonymous client authorized by application client ID
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        Self::from_config(&Config::with_client_id(client_id))
    }

    /// Client with explicit credentials and default settings
    pub fn with_credentials(credentials: Credentials) -> Result<Self> {
        let config = Config {
            auth: credentials.into(),
            ..Config::default()
        };
        Self::from_config(&config)
    }

    /// Client built from a full configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: Arc::new(Transport::new(config)?),
        })
    }

    /// Latest rate limit values reported by the service
    pub fn rate_limits(&self) -> RateLimits {
        self.transport.rate_limits()
    }

    /// Snapshot of the credentials in use
    pub fn credentials(&self) -> Credentials {
        self.transport.credentials()
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Get information about an image
    pub async fn get_image(&self, image_hash: &str) -> Result<ApiResponse<ImageInfo>> {
        require_id("image hash", image_hash)?;
        let url = self.transport.endpoint(&["image", image_hash])?;
        self.transport.get(url, &[]).await
    }

    /// Upload an image or video
    pub async fn upload_image(&self, payload: UploadPayload) -> Result<ApiResponse<ImageInfo>> {
        let kind = payload.source.upload_type();
        let form = payload.into_form()?;
        let url = self.transport.endpoint(&["image"])?;

        let response: ApiResponse<ImageInfo> = self.transport.post_multipart(url, form).await?;
        info!(
            id = %response.data.id,
            source = kind,
            "Upload complete"
        );
        Ok(response)
    }

    /// Upload a local file
    pub async fn upload_image_from_file<P: AsRef<Path>>(
        &self,
        path: P,
        title: Option<&str>,
        description: Option<&str>,
        name: Option<&str>,
    ) -> Result<ApiResponse<ImageInfo>> {
        let mut payload = UploadPayload::new(MediaSource::from_path(path).await?);
        payload.title = title.map(str::to_string);
        payload.description = description.map(str::to_string);
        payload.name = name.map(str::to_string);
        self.upload_image(payload).await
    }

    /// Delete an image.
    ///
    /// Takes the image hash for images owned by the authenticated user, or
    /// the deletehash for anonymous uploads.
    pub async fn delete_image(&self, image_hash: &str) -> Result<ApiResponse<bool>> {
        require_id("image hash", image_hash)?;
        let url = self.transport.endpoint(&["image", image_hash])?;
        let response = self.transport.delete(url).await?;
        info!(image = image_hash, "Image deleted");
        Ok(response)
    }

    /// Toggle the favorite flag of an image for the authenticated user
    pub async fn favorite_image(&self, image_hash: &str) -> Result<ApiResponse<FavoriteState>> {
        self.require_oauth("favorite_image")?;
        require_id("image hash", image_hash)?;
        let url = self.transport.endpoint(&["image", image_hash, "favorite"])?;
        self.transport.post_form(url, &[]).await
    }

    // =========================================================================
    // Albums
    // =========================================================================

    /// Create an album
    pub async fn create_album(&self, payload: AlbumPayload) -> Result<ApiResponse<AlbumInfo>> {
        let url = self.transport.endpoint(&["album"])?;
        let response: ApiResponse<AlbumInfo> =
            self.transport.post_form(url, &payload.to_form()).await?;
        info!(id = %response.data.id, images = payload.ids.len(), "Album created");
        Ok(response)
    }

    /// Get information about an album, including its images
    pub async fn get_album(&self, album_hash: &str) -> Result<ApiResponse<AlbumInfo>> {
        require_id("album hash", album_hash)?;
        let url = self.transport.endpoint(&["album", album_hash])?;
        self.transport.get(url, &[]).await
    }

    /// Add images to an existing album.
    ///
    /// Takes the album hash for owned albums, or the deletehash for
    /// anonymous ones.
    pub async fn add_images_to_album<S: AsRef<str>>(
        &self,
        album_hash: &str,
        image_ids: &[S],
    ) -> Result<ApiResponse<bool>> {
        require_id("album hash", album_hash)?;
        if image_ids.is_empty() {
            return Err(ImgurError::validation("no image IDs given"));
        }
        let url = self.transport.endpoint(&["album", album_hash, "add"])?;
        self.transport
            .post_form(url, &indexed("ids", image_ids))
            .await
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Get information about an account
    pub async fn get_account(&self, username: &str) -> Result<ApiResponse<AccountInfo>> {
        require_id("username", username)?;
        let url = self.transport.endpoint(&["account", username])?;
        self.transport.get(url, &[]).await
    }

    /// Images uploaded by the authenticated user
    pub async fn get_account_images(&self) -> Result<ApiResponse<Vec<ImageInfo>>> {
        self.require_oauth("get_account_images")?;
        let url = self.transport.endpoint(&["account", "me", "images"])?;
        self.transport.get(url, &[]).await
    }

    /// Albums created by the authenticated user
    pub async fn get_account_albums(&self) -> Result<ApiResponse<Vec<AlbumInfo>>> {
        self.require_oauth("get_account_albums")?;
        let url = self.transport.endpoint(&["account", "me", "albums"])?;
        self.transport.get(url, &[]).await
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Get a single comment with its replies
    pub async fn get_comment(&self, comment_id: u64) -> Result<ApiResponse<CommentInfo>> {
        let id = comment_id.to_string();
        let url = self.transport.endpoint(&["comment", &id])?;
        self.transport.get(url, &[]).await
    }

    /// Comment on a gallery image, or reply to a comment
    pub async fn create_comment(
        &self,
        image_id: &str,
        comment: &str,
        parent_id: Option<u64>,
    ) -> Result<ApiResponse<CreatedComment>> {
        self.require_oauth("create_comment")?;

        let mut payload = CommentPayload::new(image_id, comment);
        payload.parent_id = parent_id;
        payload.validate()?;

        let url = self.transport.endpoint(&["comment"])?;
        self.transport.post_form(url, &payload.to_form()).await
    }

    /// Delete a comment written by the authenticated user
    pub async fn delete_comment(&self, comment_id: u64) -> Result<ApiResponse<bool>> {
        self.require_oauth("delete_comment")?;
        let id = comment_id.to_string();
        let url = self.transport.endpoint(&["comment", &id])?;
        self.transport.delete(url).await
    }

    /// Comment tree of a gallery image or album
    pub async fn get_image_comments(
        &self,
        image_id: &str,
        sort: CommentSort,
    ) -> Result<ApiResponse<Vec<CommentInfo>>> {
        require_id("image id", image_id)?;
        let url = self
            .transport
            .endpoint(&["gallery", image_id, "comments", sort.as_str()])?;
        self.transport.get(url, &[]).await
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    /// One page of a gallery section
    pub async fn get_gallery(
        &self,
        section: GallerySection,
        sort: GallerySort,
        window: TimeWindow,
        page: u32,
    ) -> Result<ApiResponse<Vec<GalleryItem>>> {
        let page = page.to_string();
        let url = self.transport.endpoint(&[
            "gallery",
            section.as_str(),
            sort.as_str(),
            window.as_str(),
            &page,
        ])?;
        self.transport.get(url, &[]).await
    }

    /// One page of gallery search results
    pub async fn search_gallery(
        &self,
        query: &str,
        sort: SearchSort,
        window: TimeWindow,
        page: u32,
    ) -> Result<ApiResponse<Vec<GalleryItem>>> {
        if query.trim().is_empty() {
            return Err(ImgurError::validation("search query is empty"));
        }
        let page = page.to_string();
        let url = self.transport.endpoint(&[
            "gallery",
            "search",
            sort.as_str(),
            window.as_str(),
            &page,
        ])?;
        self.transport.get(url, &[("q", query.to_string())]).await
    }

    /// Get a gallery image
    pub async fn get_gallery_image(&self, gallery_hash: &str) -> Result<ApiResponse<ImageInfo>> {
        require_id("gallery hash", gallery_hash)?;
        let url = self
            .transport
            .endpoint(&["gallery", "image", gallery_hash])?;
        self.transport.get(url, &[]).await
    }

    /// Stream gallery pages starting at page 0.
    ///
    /// The stream ends after the first empty page or the first error.
    pub fn gallery_pages(
        &self,
        section: GallerySection,
        sort: GallerySort,
        window: TimeWindow,
    ) -> impl Stream<Item = Result<Vec<GalleryItem>>> {
        let client = self.clone();
        stream::try_unfold(0u32, move |page| {
            let client = client.clone();
            async move {
                let items = client
                    .get_gallery(section, sort, window, page)
                    .await?
                    .into_data();
                debug!(page, items = items.len(), "Fetched gallery page");
                if items.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some((items, page + 1)))
                }
            }
        })
    }

    // =========================================================================
    // OAuth
    // =========================================================================

    /// Exchange the refresh token for a new access token.
    ///
    /// On success the new tokens replace the old ones for every clone of
    /// this client, so subsequent requests are authorized as the user.
    pub async fn refresh_access_token(&self) -> Result<OAuthToken> {
        let credentials = self.transport.credentials();
        let (Some(secret), Some(refresh_token)) =
            (&credentials.client_secret, &credentials.refresh_token)
        else {
            return Err(ImgurError::auth_required(
                "client secret and refresh token are required to refresh",
            ));
        };

        let form = vec![
            ("refresh_token".to_string(), refresh_token.clone()),
            ("client_id".to_string(), credentials.client_id.clone()),
            ("client_secret".to_string(), secret.clone()),
            ("grant_type".to_string(), "refresh_token".to_string()),
        ];

        let url = self.transport.oauth_endpoint(&["token"])?;
        let token: OAuthToken = self.transport.post_oauth(url, &form).await?;

        self.transport
            .update_credentials(|credentials| credentials.apply_token(&token));

        info!(
            account = token.account_username.as_deref().unwrap_or("-"),
            expires_in = token.expires_in,
            "Access token refreshed"
        );

        Ok(token)
    }

    /// URL the user visits to grant this application access.
    ///
    /// Uses the token flow: the service redirects back with the access and
    /// refresh tokens in the URL fragment.
    pub fn authorization_url(&self, state: Option<&str>) -> Result<Url> {
        let mut url = self.transport.oauth_endpoint(&["authorize"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.transport.credentials().client_id)
                .append_pair("response_type", "token");
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require_oauth(&self, operation: &str) -> Result<()> {
        if self.transport.credentials().has_oauth() {
            Ok(())
        } else {
            Err(ImgurError::auth_required(format!(
                "{} needs an OAuth access token",
                operation
            )))
        }
    }
}

fn require_id(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ImgurError::validation(format!("{} is empty", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_client_id() {
        assert!(matches!(Imgur::new("  "), Err(ImgurError::Config(_))));
    }

    #[test]
    fn test_authorization_url() {
        let imgur = Imgur::new("abc123").unwrap();
        let url = imgur.authorization_url(Some("xyz")).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.imgur.com/oauth2/authorize?client_id=abc123&response_type=token&state=xyz"
        );
    }

    #[tokio::test]
    async fn test_oauth_operations_fail_locally_without_token() {
        let imgur = Imgur::new("abc123").unwrap();

        assert!(matches!(
            imgur.get_account_images().await,
            Err(ImgurError::AuthRequired(_))
        ));
        assert!(matches!(
            imgur.favorite_image("abc").await,
            Err(ImgurError::AuthRequired(_))
        ));
        assert!(matches!(
            imgur.delete_comment(1).await,
            Err(ImgurError::AuthRequired(_))
        ));
        assert!(matches!(
            imgur.refresh_access_token().await,
            Err(ImgurError::AuthRequired(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_identifiers_fail_locally() {
        let imgur = Imgur::new("abc123").unwrap();

        assert!(matches!(
            imgur.get_image("").await,
            Err(ImgurError::Validation(_))
        ));
        assert!(matches!(
            imgur.add_images_to_album::<&str>("album", &[]).await,
            Err(ImgurError::Validation(_))
        ));
        assert!(matches!(
            imgur
                .search_gallery(" ", SearchSort::Time, TimeWindow::All, 0)
                .await,
            Err(ImgurError::Validation(_))
        ));
    }
}
