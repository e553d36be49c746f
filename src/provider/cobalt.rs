//! Direct structured-API provider
//!
//! The cheaper and more stable path: a single JSON POST that answers
//! with either a direct media URL or a picker of selectable items.
//! No deobfuscation involved.

use crate::core::{MediaVariant, ResolvedMedia};
use crate::error::IgdlError;
use crate::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed API endpoint
const COBALT_ENDPOINT: &str = "https://api.cobalt.tools/api/json";

/// Request body with fixed encode-option defaults, not user-configurable
#[derive(Debug, Serialize)]
struct CobaltRequest<'a> {
    url: &'a str,
    #[serde(rename = "vCodec")]
    v_codec: &'static str,
    #[serde(rename = "vQuality")]
    v_quality: &'static str,
    #[serde(rename = "aFormat")]
    a_format: &'static str,
    #[serde(rename = "filenamePattern")]
    filename_pattern: &'static str,
    #[serde(rename = "isAudioOnly")]
    is_audio_only: bool,
    #[serde(rename = "isTikWatermarkDisabled")]
    is_tik_watermark_disabled: bool,
    #[serde(rename = "isTTSMuted")]
    is_tts_muted: bool,
    #[serde(rename = "dubLang")]
    dub_lang: bool,
    #[serde(rename = "disableMetadata")]
    disable_metadata: bool,
    #[serde(rename = "twitterGif")]
    twitter_gif: bool,
    #[serde(rename = "tiktokH265")]
    tiktok_h265: bool,
}

impl<'a> CobaltRequest<'a> {
    fn new(url: &'a str) -> Self {
        Self {
            url,
            v_codec: "h264",
            v_quality: "1080",
            a_format: "mp3",
            filename_pattern: "classic",
            is_audio_only: false,
            is_tik_watermark_disabled: true,
            is_tts_muted: false,
            dub_lang: false,
            disable_metadata: false,
            twitter_gif: true,
            tiktok_h265: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CobaltResponse {
    status: Option<String>,
    text: Option<String>,
    url: Option<String>,
    picker: Option<Vec<CobaltPickerItem>>,
}

#[derive(Debug, Deserialize)]
struct CobaltPickerItem {
    url: String,
    thumb: Option<String>,
}

/// Provider backed by the cobalt structured API
pub struct CobaltProvider {
    client: Client,
    endpoint: String,
}

impl CobaltProvider {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: COBALT_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint, for tests against a local stub
    #[cfg(test)]
    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Provider for CobaltProvider {
    fn name(&self) -> &'static str {
        "cobalt"
    }

    async fn resolve(&self, url: &str) -> Result<ResolvedMedia, IgdlError> {
        debug!(url = %url, "requesting cobalt API");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&CobaltRequest::new(url))
            .send()
            .await?;
        let body: CobaltResponse = response.json().await?;

        if body.status.as_deref() == Some("error") {
            let text = body
                .text
                .unwrap_or_else(|| "API returned an error".to_string());
            return Err(IgdlError::ProviderReported(text));
        }

        if let Some(url) = body.url {
            return Ok(ResolvedMedia {
                variants: vec![MediaVariant::new("video", url)],
            });
        }

        if let Some(picker) = body.picker {
            if !picker.is_empty() {
                let variants = picker
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| MediaVariant {
                        label: format!("item {}", i + 1),
                        url: item.url,
                        thumbnail_url: item.thumb,
                    })
                    .collect();
                return Ok(ResolvedMedia { variants });
            }
        }

        Err(IgdlError::NoMediaFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::client::{build_client, HttpClientConfig};

    fn provider(server: &mockito::ServerGuard) -> CobaltProvider {
        let client = build_client(&HttpClientConfig::default()).unwrap();
        CobaltProvider::with_endpoint(client, format!("{}/api/json", server.url()))
    }

    #[tokio::test]
    async fn test_direct_url_becomes_single_variant() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"stream","url":"https://cdn.example.com/v.mp4"}"#)
            .create_async()
            .await;

        let media = provider(&server)
            .resolve("https://www.instagram.com/reel/ABC/")
            .await
            .unwrap();
        mock.assert_async().await;

        assert_eq!(media.variants.len(), 1);
        assert_eq!(media.variants[0].label, "video");
        assert_eq!(media.variants[0].url, "https://cdn.example.com/v.mp4");
    }

    #[tokio::test]
    async fn test_picker_becomes_positional_variants() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"picker","picker":[
                    {"url":"https://cdn.example.com/1.mp4","thumb":"https://cdn.example.com/1.jpg"},
                    {"url":"https://cdn.example.com/2.jpg"}
                ]}"#,
            )
            .create_async()
            .await;

        let media = provider(&server)
            .resolve("https://www.instagram.com/p/ABC/")
            .await
            .unwrap();

        assert_eq!(media.variants.len(), 2);
        assert_eq!(media.variants[0].label, "item 1");
        assert_eq!(
            media.variants[0].thumbnail_url.as_deref(),
            Some("https://cdn.example.com/1.jpg")
        );
        assert_eq!(media.variants[1].label, "item 2");
        assert!(media.variants[1].thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_provider_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"error","text":"link you provided is invalid"}"#)
            .create_async()
            .await;

        let err = provider(&server)
            .resolve("https://www.instagram.com/reel/ABC/")
            .await
            .unwrap_err();
        match err {
            IgdlError::ProviderReported(text) => {
                assert_eq!(text, "link you provided is invalid");
            }
            other => panic!("expected ProviderReported, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_fields_is_no_media_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"success"}"#)
            .create_async()
            .await;

        let err = provider(&server)
            .resolve("https://www.instagram.com/reel/ABC/")
            .await
            .unwrap_err();
        assert!(matches!(err, IgdlError::NoMediaFound));
    }
}
