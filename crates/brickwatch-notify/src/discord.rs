//! Discord delivery over the REST API with a bot token.

use std::time::Duration;

use brickwatch_core::{AppConfig, Category, ChannelIds, ProductRecord};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::json;

use crate::render::{
    attachment_name, build_embed, ensure_valid_image_url, fallback_message, image_format, Embed,
    ImageFormat,
};
use crate::{Notifier, NotifyError};

const IMAGE_TIMEOUT_SECS: u64 = 10;
const API_TIMEOUT_SECS: u64 = 15;

/// A downloaded product image ready for upload.
struct Attachment {
    file_name: String,
    bytes: Vec<u8>,
    format: ImageFormat,
}

/// Posts product embeds to the channel configured for each category.
///
/// The product image is downloaded and uploaded as an attachment when
/// possible, otherwise the embed links the remote URL. If the embed is
/// rejected a plain-text message is sent instead.
pub struct DiscordNotifier {
    api: Client,
    images: Client,
    api_base: String,
    token: String,
    channels: ChannelIds,
    store_name: String,
}

impl DiscordNotifier {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if an HTTP client cannot be built.
    pub fn new(
        token: &str,
        api_base: &str,
        channels: ChannelIds,
        store_name: &str,
        image_user_agent: &str,
    ) -> Result<Self, NotifyError> {
        let api = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .user_agent(concat!("brickwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let images = Client::builder()
            .timeout(Duration::from_secs(IMAGE_TIMEOUT_SECS))
            .user_agent(image_user_agent)
            .build()?;
        Ok(Self {
            api,
            images,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            channels,
            store_name: store_name.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`NotifyError::MissingToken`] if no bot token is configured,
    /// or [`NotifyError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let token = config
            .discord_token
            .as_deref()
            .ok_or(NotifyError::MissingToken)?;
        Self::new(
            token,
            &config.discord_api_base,
            config.channels.clone(),
            &config.store_name,
            &config.scraper_user_agent,
        )
    }

    fn post_message(&self, channel_id: &str) -> RequestBuilder {
        self.api
            .post(format!("{}/channels/{channel_id}/messages", self.api_base))
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
    }

    /// Downloads the product image and works out its upload format.
    /// Failures are logged and yield `None`.
    async fn download_image(&self, url: &str) -> Option<(Vec<u8>, ImageFormat)> {
        let result = async {
            let response = self.images.get(url).send().await?.error_for_status()?;
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((bytes, content_type))
        }
        .await;

        match result {
            Ok((bytes, content_type)) if !bytes.is_empty() => {
                Some((bytes.to_vec(), image_format(content_type.as_deref(), url)))
            }
            Ok(_) => {
                tracing::warn!(url, "image download returned an empty body");
                None
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "image download failed");
                None
            }
        }
    }

    async fn send_embed(
        &self,
        channel_id: &str,
        embed: &Embed,
        attachment: Option<Attachment>,
    ) -> Result<(), NotifyError> {
        let request = match attachment {
            Some(Attachment {
                file_name,
                bytes,
                format,
            }) => {
                let payload = json!({
                    "embeds": [embed],
                    "attachments": [{ "id": 0, "filename": file_name }],
                });
                let form = Form::new()
                    .text("payload_json", serde_json::to_string(&payload)?)
                    .part(
                        "files[0]",
                        Part::bytes(bytes).file_name(file_name).mime_str(format.mime)?,
                    );
                self.post_message(channel_id).multipart(form)
            }
            None => self
                .post_message(channel_id)
                .json(&json!({ "embeds": [embed] })),
        };
        Self::check(request).await
    }

    async fn send_text(&self, channel_id: &str, content: &str) -> Result<(), NotifyError> {
        Self::check(
            self.post_message(channel_id)
                .json(&json!({ "content": content })),
        )
        .await
    }

    async fn check(request: RequestBuilder) -> Result<(), NotifyError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Discord {
            status: status.as_u16(),
            body,
        })
    }
}

impl Notifier for DiscordNotifier {
    async fn notify(&self, category: Category, product: &ProductRecord) -> Result<(), NotifyError> {
        let Some(channel_id) = self.channels.for_category(category) else {
            tracing::warn!(%category, id = %product.id, "no channel configured, skipping");
            return Ok(());
        };

        let image_url = ensure_valid_image_url(&product.image_url);
        let attachment = if image_url.is_empty() {
            None
        } else {
            self.download_image(&image_url)
                .await
                .map(|(bytes, format)| Attachment {
                    file_name: attachment_name(product, format),
                    bytes,
                    format,
                })
        };
        let embed_image = match &attachment {
            Some(attachment) => Some(format!("attachment://{}", attachment.file_name)),
            None => Some(image_url),
        };
        let embed = build_embed(
            &self.store_name,
            category,
            product,
            embed_image,
            chrono::Utc::now(),
        );

        match self.send_embed(channel_id, &embed, attachment).await {
            Ok(()) => {
                tracing::info!(%category, id = %product.id, name = %product.name, "notification sent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    %category,
                    id = %product.id,
                    error = %e,
                    "embed rejected, sending plain-text fallback"
                );
                self.send_text(channel_id, &fallback_message(category, product))
                    .await?;
                tracing::info!(%category, id = %product.id, "fallback notification sent");
                Ok(())
            }
        }
    }
}
