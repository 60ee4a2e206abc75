use crate::core::local_quiz::{build_local_payload, filter_questions, filter_questions_any, parse_bundle};
use crate::core::{ConfigProvider, QuizProvider, Storage};
use crate::domain::model::{
    CustomQuizRequest, QuizPayload, QuizQuery, QuizQuestion, QuizSource, RemoteQuizResponse,
};
use crate::utils::error::{Result, ServiceError};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// 遠端請求的形式：GET 帶查詢參數，或 POST 帶 JSON body
enum RemoteRequest<'a> {
    Get(&'a [(&'static str, String)]),
    Post(&'a CustomQuizRequest),
}

/// Quiz data fetcher with a fixed fallback order:
///
/// 1. remote primary endpoint
/// 2. remote secondary endpoint (only when enabled in config)
/// 3. bundled local quiz file (only when the caller allows it)
///
/// Tiers are tried one after another, never concurrently. Every remote attempt is
/// bounded by the configured timeout. Per-tier failures are logged and swallowed;
/// only [`ServiceError::ExhaustedSources`] reaches the caller.
pub struct QuizService<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> QuizService<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub async fn fetch_quiz_data(&self, query: &QuizQuery) -> Result<QuizPayload> {
        let count = query.effective_count();
        let params = query.query_params();
        let mut failures = Vec::new();

        if let Some(payload) = self
            .try_remote_tiers(RemoteRequest::Get(&params), count, &mut failures)
            .await
        {
            return Ok(payload);
        }

        if query.use_local_fallback {
            tracing::info!("📂 Falling back to bundled quiz file");
            match self.load_local_questions().await {
                Ok(questions) => {
                    let filtered = filter_questions(
                        &questions,
                        query.topic.as_deref(),
                        query.difficulty.as_deref(),
                    );
                    let payload = build_local_payload(&filtered, count);
                    tracing::info!(
                        "✅ Served {} question(s) from {}",
                        payload.quiz.len(),
                        payload.source
                    );
                    return Ok(payload);
                }
                Err(e) => {
                    tracing::error!("❌ Local quiz fallback failed: {}", e);
                    failures.push(format!("{}: {}", QuizSource::LocalFallback, e));
                }
            }
        }

        Err(ServiceError::ExhaustedSources { failures })
    }

    pub async fn fetch_custom_quiz_data(&self, request: &CustomQuizRequest) -> Result<QuizPayload> {
        let count = request.effective_count();
        let body = CustomQuizRequest {
            count,
            ..request.clone()
        };
        let mut failures = Vec::new();

        if let Some(payload) = self
            .try_remote_tiers(RemoteRequest::Post(&body), count, &mut failures)
            .await
        {
            return Ok(payload);
        }

        if request.use_local_fallback {
            tracing::info!("📂 Falling back to bundled quiz file for custom request");
            match self.load_local_questions().await {
                Ok(questions) => {
                    let filtered =
                        filter_questions_any(&questions, &request.topics, &request.difficulties);
                    return Ok(build_local_payload(&filtered, count));
                }
                Err(e) => {
                    tracing::error!("❌ Local quiz fallback failed: {}", e);
                    failures.push(format!("{}: {}", QuizSource::LocalFallback, e));
                }
            }
        }

        Err(ServiceError::ExhaustedSources { failures })
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms())
    }

    fn remote_tiers(&self) -> Vec<(QuizSource, &str)> {
        let mut tiers = vec![(QuizSource::RemotePrimary, self.config.primary_url())];
        if self.config.use_secondary() {
            tiers.push((QuizSource::RemoteSecondary, self.config.secondary_url()));
        }
        tiers
    }

    fn endpoint_url(&self, base_url: &str) -> String {
        format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            self.config.endpoint_path()
        )
    }

    async fn try_remote_tiers(
        &self,
        request: RemoteRequest<'_>,
        count: usize,
        failures: &mut Vec<String>,
    ) -> Option<QuizPayload> {
        for (tier, base_url) in self.remote_tiers() {
            match self.attempt_remote(tier, base_url, &request).await {
                Ok(mut payload) => {
                    if payload.quiz.len() > count {
                        tracing::debug!(
                            "{} returned {} questions, truncating to {}",
                            tier,
                            payload.quiz.len(),
                            count
                        );
                        payload.quiz.truncate(count);
                    }
                    tracing::info!("✅ Successfully fetched quiz from {}", tier);
                    return Some(payload);
                }
                Err(e) => {
                    tracing::warn!("⚠️ {} failed: {}", tier, e);
                    failures.push(format!("{}: {}", tier, e));
                }
            }
        }
        None
    }

    async fn attempt_remote(
        &self,
        tier: QuizSource,
        base_url: &str,
        request: &RemoteRequest<'_>,
    ) -> Result<QuizPayload> {
        let url = self.endpoint_url(base_url);

        let builder = match request {
            RemoteRequest::Get(params) => {
                tracing::debug!("📡 GET {} via {}", url, tier);
                self.client
                    .get(&url)
                    .query(params)
                    .header(CONTENT_TYPE, "application/json")
            }
            RemoteRequest::Post(body) => {
                tracing::debug!("📡 POST {} via {}", url, tier);
                // json() 會自動帶上 Content-Type
                self.client.post(&url).json(body)
            }
        };

        let response = builder
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| self.classify(tier, e))?;

        let status = response.status();
        tracing::debug!("{} response status: {}", tier, status);
        if !status.is_success() {
            return Err(ServiceError::Transport {
                tier: tier.to_string(),
                message: format!("unexpected HTTP status {}", status),
            });
        }

        let body: RemoteQuizResponse = response.json().await.map_err(|e| self.classify(tier, e))?;

        Ok(QuizPayload {
            quiz: body.quiz,
            metadata: body.metadata,
            source: tier,
        })
    }

    /// 區分逾時與其他傳輸錯誤
    fn classify(&self, tier: QuizSource, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout {
                tier: tier.to_string(),
                timeout_ms: self.config.timeout_ms(),
            }
        } else if err.is_decode() {
            ServiceError::Transport {
                tier: tier.to_string(),
                message: format!("invalid response body: {}", err),
            }
        } else {
            ServiceError::Transport {
                tier: tier.to_string(),
                message: err.to_string(),
            }
        }
    }

    async fn load_local_questions(&self) -> Result<Vec<QuizQuestion>> {
        let path = self.config.local_fallback_path();
        tracing::debug!("Reading bundled quiz file: {}", path);

        let bytes = tokio::time::timeout(self.timeout(), self.storage.read_file(path))
            .await
            .map_err(|_| ServiceError::Timeout {
                tier: QuizSource::LocalFallback.to_string(),
                timeout_ms: self.config.timeout_ms(),
            })??;

        parse_bundle(&bytes)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> QuizProvider for QuizService<S, C> {
    async fn fetch_quiz_data(&self, query: &QuizQuery) -> Result<QuizPayload> {
        QuizService::fetch_quiz_data(self, query).await
    }

    async fn fetch_custom_quiz_data(&self, request: &CustomQuizRequest) -> Result<QuizPayload> {
        QuizService::fetch_custom_quiz_data(self, request).await
    }
}
