//! Blocking HTTPS image fetch and decode.

use std::io::Read;

use image::RgbaImage;

/// Errors that can occur while fetching or decoding a remote texture.
///
/// Any variant aborts globe assembly: there is no retry and no partial
/// fallback rendering.
#[derive(Debug, thiserror::Error)]
pub enum TextureLoadError {
    /// The HTTP request failed (connection, TLS, or non-2xx status).
    #[error("texture fetch failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// Reading the response body failed.
    #[error("texture read failed for {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The fetched bytes are not a decodable image.
    #[error("texture decode failed for {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}

/// Source of decoded texture images.
///
/// The production implementation is [`HttpFetcher`]; tests substitute stubs
/// to exercise assembly ordering and failure paths without a network.
pub trait ImageFetcher {
    /// Fetch and decode the image at `url` into RGBA8.
    fn fetch(&self, url: &str) -> Result<RgbaImage, TextureLoadError>;
}

/// Fetches images over HTTPS with blocking requests.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher;

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<RgbaImage, TextureLoadError> {
        log::info!("Fetching texture {url}");

        let response = ureq::get(url).call().map_err(|e| TextureLoadError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| TextureLoadError::Io {
                url: url.to_string(),
                source: e,
            })?;

        let decoded = image::load_from_memory(&bytes).map_err(|e| TextureLoadError::Decode {
            url: url.to_string(),
            source: e,
        })?;

        let rgba = decoded.to_rgba8();
        log::info!(
            "Decoded texture {url}: {}x{} ({} bytes)",
            rgba.width(),
            rgba.height(),
            bytes.len()
        );
        Ok(rgba)
    }
}
