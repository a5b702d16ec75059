//! ElevenLabs Client - 调用 ElevenLabs HTTP API
//!
//! 实现 VoiceProviderPort trait
//!
//! 外部 API:
//! - POST   {base}/voices/add              multipart: name, description, files -> {"voice_id": "..."}
//! - POST   {base}/text-to-speech/{voice}  JSON: text, model_id, voice_settings -> audio/mpeg binary
//! - DELETE {base}/voices/{voice}
//!
//! 每个请求都带 `xi-api-key` 头

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    ProviderError, RegisterVoiceRequest, SynthesizeRequest, SynthesizedAudio, VoiceProviderPort,
};
use crate::domain::voice::VoiceId;

const XI_API_KEY_HEADER: &str = "xi-api-key";

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettingsBody,
}

#[derive(Debug, Serialize)]
struct VoiceSettingsBody {
    stability: f32,
    similarity_boost: f32,
}

/// 音色注册响应
#[derive(Debug, Deserialize)]
struct AddVoiceResponse {
    voice_id: String,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API 密钥
    pub api_key: String,
    /// 合成模型
    pub model_id: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io/v1".to_string(),
            api_key: String::new(),
            model_id: "eleven_monolingual_v1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
    base_url: Url,
}

impl ElevenLabsClient {
    /// 创建新的客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ProviderError::InvalidRequest(format!("Invalid provider base URL: {}", e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidRequest(format!(
                "Invalid provider base URL: {}",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// 在 base URL 后追加路径段
    ///
    /// 每段单独做百分号编码，音色 ID 中的 `/`、`?`、`#` 不会改变请求的路径
    fn url(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ProviderError::InvalidRequest(format!(
                "Invalid path segment: {:?}",
                bad
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidRequest("Provider base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 附加凭证并发送请求；非 2xx 响应转换为 ProviderError::Api
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ProviderError> {
        let response = builder
            .header(XI_API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else if e.is_connect() {
                    ProviderError::Transport(format!("Cannot connect to voice provider: {}", e))
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl VoiceProviderPort for ElevenLabsClient {
    async fn register_voice(&self, request: RegisterVoiceRequest) -> Result<VoiceId, ProviderError> {
        let url = self.url(&["voices", "add"])?;
        let audio_size = request.audio.len();

        let file = Part::bytes(request.audio)
            .file_name(request.file_name)
            .mime_str(&request.mime_type)
            .map_err(|e| ProviderError::InvalidRequest(format!("Invalid sample media type: {}", e)))?;
        let form = Form::new()
            .text("name", request.display_name.clone())
            .text("description", request.description)
            .part("files", file);

        tracing::debug!(
            url = %url,
            name = %request.display_name,
            audio_size = audio_size,
            "Sending voice registration request"
        );

        let response = self.send(self.client.post(url).multipart(form)).await?;
        let body: AddVoiceResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse voice_id: {}", e)))?;

        let voice_id = VoiceId::new(body.voice_id)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        tracing::info!(voice_id = %voice_id, "Voice registered with provider");
        Ok(voice_id)
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<SynthesizedAudio, ProviderError> {
        let url = self.url(&["text-to-speech", request.voice_id.as_str()])?;
        let body = TextToSpeechBody {
            text: &request.text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettingsBody {
                stability: request.settings.stability,
                similarity_boost: request.settings.similarity_boost,
            },
        };

        tracing::debug!(
            url = %url,
            text_len = request.text.len(),
            stability = request.settings.stability,
            similarity_boost = request.settings.similarity_boost,
            "Sending text-to-speech request"
        );

        let response = self
            .send(
                self.client
                    .post(url)
                    .header(reqwest::header::ACCEPT, "audio/mpeg")
                    .json(&body),
            )
            .await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let data = response
            .bytes()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if data.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "Provider returned empty audio".to_string(),
            ));
        }

        tracing::info!(
            voice_id = %request.voice_id,
            audio_size = data.len(),
            content_type = ?content_type,
            "Text-to-speech completed"
        );

        Ok(SynthesizedAudio { data, content_type })
    }

    async fn delete_voice(&self, voice_id: &VoiceId) -> Result<(), ProviderError> {
        let url = self.url(&["voices", voice_id.as_str()])?;
        self.send(self.client.delete(url)).await?;

        tracing::info!(voice_id = %voice_id, "Voice deleted from provider");
        Ok(())
    }
}
