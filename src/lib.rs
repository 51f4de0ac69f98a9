//! # asyncgur
//!
//! An asynchronous client for the Imgur image hosting API, written in Rust.
//!
//! ## Features
//!
//! - **Images**: fetch, upload (URL, raw bytes, base64, local file), delete, favorite
//! - **Albums**: create, fetch, add images
//! - **Gallery**: browse sections, search, stream pages
//! - **Comments**: fetch nested threads, post, reply, delete
//! - **Accounts**: public profiles, the authenticated user's images and albums
//! - **OAuth**: token refresh and authorization URL
//! - **Rate limits**: latest credit headers, optional client-side pacing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Client facade                    │
//! │                    Imgur                         │
//! ├─────────────────────────────────────────────────┤
//! │                 Transport                        │
//! │  ┌─────────────┐ ┌─────────────┐ ┌───────────┐ │
//! │  │ Credentials │ │  Payloads   │ │ Throttle  │ │
//! │  └─────────────┘ └─────────────┘ └───────────┘ │
//! ├─────────────────────────────────────────────────┤
//! │                   Models                         │
//! │    images · albums · comments · gallery · ...    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use asyncgur::{Imgur, MediaSource, UploadPayload};
//!
//! let imgur = Imgur::new(std::env::var("IMGUR_CLIENT_ID")?)?;
//!
//! let upload = UploadPayload::new(MediaSource::from_path("cat.png").await?)
//!     .title("A cat");
//! let image = imgur.upload_image(upload).await?.into_data();
//!
//! println!("{}", image.link.unwrap_or_default());
//! println!("credits left: {}", imgur.rate_limits().client_remaining);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

pub use client::Imgur;
pub use config::{Config, ConfigError};
pub use error::{ImgurError, Result};
pub use models::*;
pub use transport::{AlbumPayload, CommentPayload, Credentials, MediaSource, UploadPayload};
