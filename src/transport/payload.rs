//! Request payload construction.
//!
//! Uploads are sent as `multipart/form-data`; every other write endpoint
//! takes a url-encoded form. Optional fields are only emitted when set, and
//! list fields expand to indexed keys (`ids[0]`, `ids[1]`, ...).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::path::Path;
use tracing::debug;

use crate::error::{ImgurError, Result};
use crate::models::{AlbumLayout, AlbumPrivacy};

/// Form body as ordered key/value pairs
pub type FormFields = Vec<(String, String)>;

// =============================================================================
// Media Source
// =============================================================================

/// Where the uploaded media comes from
#[derive(Debug, Clone)]
pub enum MediaSource {
    /// Remote URL the service fetches itself
    Url(String),
    /// Raw file contents
    Bytes {
        data: Bytes,
        filename: Option<String>,
    },
    /// Base64-encoded file contents
    Base64(String),
}

impl MediaSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn bytes(data: impl Into<Bytes>) -> Self {
        Self::Bytes {
            data: data.into(),
            filename: None,
        }
    }

    /// Raw contents with a filename, used for the multipart part name and
    /// as a MIME hint when the content cannot be sniffed
    pub fn file(data: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        Self::Bytes {
            data: data.into(),
            filename: Some(filename.into()),
        }
    }

    /// Encode raw contents as base64
    pub fn base64_from_bytes(data: &[u8]) -> Self {
        Self::Base64(STANDARD.encode(data))
    }

    /// Read a local file
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        debug!(path = %path.display(), size = data.len(), "Read upload file");

        Ok(Self::Bytes {
            data: Bytes::from(data),
            filename,
        })
    }

    /// Value of the `type` form field
    pub fn upload_type(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Bytes { .. } => "file",
            Self::Base64(_) => "base64",
        }
    }

    /// Best guess at the media's MIME type.
    ///
    /// Raw bytes are sniffed by magic number, falling back to the filename
    /// extension. URLs are judged by their path extension.
    pub fn detect_mime(&self) -> Option<String> {
        match self {
            Self::Bytes { data, filename } => sniff_mime(data, filename.as_deref()),
            Self::Url(url) => Url::parse(url)
                .ok()
                .and_then(|url| mime_guess::from_path(url.path()).first())
                .map(|mime| mime.essence_str().to_string()),
            Self::Base64(encoded) => {
                // 48 decoded bytes cover every magic number we care about
                let prefix_len = encoded.len().min(64) / 4 * 4;
                STANDARD
                    .decode(&encoded.as_bytes()[..prefix_len])
                    .ok()
                    .and_then(|head| infer::get(&head))
                    .map(|kind| kind.mime_type().to_string())
            }
        }
    }

    /// Form field carrying the media: `video` for videos, `image` otherwise
    pub fn field_name(&self) -> &'static str {
        match self.detect_mime() {
            Some(mime) if mime.starts_with("video/") => "video",
            _ => "image",
        }
    }

    /// Reject sources the service would refuse anyway
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Url(url) => {
                let parsed = Url::parse(url)
                    .map_err(|e| ImgurError::validation(format!("Invalid media URL: {}", e)))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(ImgurError::validation(format!(
                        "Media URL must be http or https, got {}",
                        parsed.scheme()
                    )));
                }
            }
            Self::Bytes { data, .. } if data.is_empty() => {
                return Err(ImgurError::validation("Upload data is empty"));
            }
            Self::Base64(encoded) if encoded.trim().is_empty() => {
                return Err(ImgurError::validation("Upload data is empty"));
            }
            _ => {}
        }
        Ok(())
    }
}

// =============================================================================
// Upload
// =============================================================================

/// Image or video upload
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub source: MediaSource,
    pub title: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    /// Album ID (or deletehash for anonymous albums) to add the upload to
    pub album: Option<String>,
    /// Strip the audio track from videos
    pub disable_audio: bool,
}

impl UploadPayload {
    pub fn new(source: MediaSource) -> Self {
        Self {
            source,
            title: None,
            description: None,
            name: None,
            album: None,
            disable_audio: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn disable_audio(mut self, disable: bool) -> Self {
        self.disable_audio = disable;
        self
    }

    /// Text fields sent alongside the media, in order
    pub fn text_fields(&self) -> FormFields {
        let mut fields = FormFields::new();
        push_opt(&mut fields, "title", &self.title);
        push_opt(&mut fields, "description", &self.description);
        push_opt(&mut fields, "name", &self.name);
        push_opt(&mut fields, "album", &self.album);
        fields.push(("type".to_string(), self.source.upload_type().to_string()));
        if self.disable_audio {
            fields.push(("disable_audio".to_string(), "1".to_string()));
        }
        fields
    }

    /// Build the multipart body
    pub fn into_form(self) -> Result<Form> {
        self.source.validate()?;

        let field = self.source.field_name();
        let mut form = Form::new();
        for (key, value) in self.text_fields() {
            form = form.text(key, value);
        }

        let form = match self.source {
            MediaSource::Url(url) => form.text(field, url),
            MediaSource::Base64(encoded) => form.text(field, encoded),
            MediaSource::Bytes { data, filename } => {
                let mime = sniff_mime(&data, filename.as_deref())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let length = data.len() as u64;
                let part = Part::stream_with_length(data, length)
                    .file_name(filename.unwrap_or_else(|| "upload".to_string()))
                    .mime_str(&mime)?;
                form.part(field, part)
            }
        };

        Ok(form)
    }
}

// =============================================================================
// Album
// =============================================================================

/// Album creation
#[derive(Debug, Clone, Default)]
pub struct AlbumPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub privacy: Option<AlbumPrivacy>,
    pub layout: Option<AlbumLayout>,
    /// Image ID to use as the cover
    pub cover: Option<String>,
    /// Image IDs to include (requires ownership of the images)
    pub ids: Vec<String>,
    /// Image deletehashes to include (for anonymous albums)
    pub deletehashes: Vec<String>,
}

impl AlbumPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn privacy(mut self, privacy: AlbumPrivacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    pub fn layout(mut self, layout: AlbumLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    pub fn images<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn deletehashes<I, S>(mut self, hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deletehashes.extend(hashes.into_iter().map(Into::into));
        self
    }

    pub fn to_form(&self) -> FormFields {
        let mut fields = FormFields::new();
        push_opt(&mut fields, "title", &self.title);
        push_opt(&mut fields, "description", &self.description);
        if let Some(privacy) = self.privacy {
            fields.push(("privacy".to_string(), privacy.to_string()));
        }
        if let Some(layout) = self.layout {
            fields.push(("layout".to_string(), layout.to_string()));
        }
        push_opt(&mut fields, "cover", &self.cover);
        fields.extend(indexed("ids", &self.ids));
        fields.extend(indexed("deletehashes", &self.deletehashes));
        fields
    }
}

// =============================================================================
// Comment
// =============================================================================

/// Comment creation
#[derive(Debug, Clone)]
pub struct CommentPayload {
    pub image_id: String,
    pub comment: String,
    /// Comment being replied to
    pub parent_id: Option<u64>,
}

impl CommentPayload {
    pub fn new(image_id: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            comment: comment.into(),
            parent_id: None,
        }
    }

    pub fn reply_to(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_id.trim().is_empty() {
            return Err(ImgurError::validation("image_id is empty"));
        }
        if self.comment.trim().is_empty() {
            return Err(ImgurError::validation("comment text is empty"));
        }
        Ok(())
    }

    pub fn to_form(&self) -> FormFields {
        let mut fields = vec![
            ("image_id".to_string(), self.image_id.clone()),
            ("comment".to_string(), self.comment.clone()),
        ];
        if let Some(parent_id) = self.parent_id {
            fields.push(("parent_id".to_string(), parent_id.to_string()));
        }
        fields
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Magic-number sniffing first, then the filename extension
fn sniff_mime(data: &[u8], filename: Option<&str>) -> Option<String> {
    infer::get(data)
        .map(|kind| kind.mime_type().to_string())
        .or_else(|| {
            filename
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|mime| mime.essence_str().to_string())
        })
}

fn push_opt(fields: &mut FormFields, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        fields.push((key.to_string(), value.clone()));
    }
}

/// Expand a list into `name[0]`, `name[1]`, ... keys, preserving order
pub fn indexed<S: AsRef<str>>(name: &str, values: &[S]) -> FormFields {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| (format!("{}[{}]", name, i), value.as_ref().to_string()))
        .collect()
}
