use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_QUESTION_COUNT: usize = 5;

fn effective_count(count: usize) -> usize {
    if count == 0 {
        DEFAULT_QUESTION_COUNT
    } else {
        count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub topic: String,
    #[serde(default)]
    pub difficulty: String,
}

impl QuizQuestion {
    /// At least two options, and the answer must be one of them.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.options.iter().any(|option| option == &self.answer)
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option == &self.answer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizMetadata {
    #[serde(default)]
    pub total_questions: usize,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub difficulties: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
    /// 遠端回傳的其他欄位，原樣保留
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl QuizMetadata {
    /// 由本地題庫篩選結果產生 metadata
    pub fn from_questions(questions: &[QuizQuestion]) -> Self {
        let mut topics: Vec<String> = Vec::new();
        let mut difficulties: Vec<String> = Vec::new();

        for question in questions {
            if !topics.contains(&question.topic) {
                topics.push(question.topic.clone());
            }
            if !question.difficulty.is_empty() && !difficulties.contains(&question.difficulty) {
                difficulties.push(question.difficulty.clone());
            }
        }

        Self {
            total_questions: questions.len(),
            topics,
            difficulties,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            extra: serde_json::Map::new(),
        }
    }
}

/// Which tier satisfied a quiz request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizSource {
    RemotePrimary,
    RemoteSecondary,
    LocalFallback,
}

impl QuizSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizSource::RemotePrimary => "remote-primary",
            QuizSource::RemoteSecondary => "remote-secondary",
            QuizSource::LocalFallback => "local-fallback",
        }
    }
}

impl fmt::Display for QuizSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizPayload {
    pub quiz: Vec<QuizQuestion>,
    pub metadata: QuizMetadata,
    pub source: QuizSource,
}

/// Success body of the remote quiz endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteQuizResponse {
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub metadata: QuizMetadata,
}

/// 本地題庫檔案格式，不需要 metadata
#[derive(Debug, Clone, Deserialize)]
pub struct QuizBundle {
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuery {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub count: usize,
    pub use_local_fallback: bool,
}

impl Default for QuizQuery {
    fn default() -> Self {
        Self {
            topic: None,
            difficulty: None,
            count: DEFAULT_QUESTION_COUNT,
            use_local_fallback: true,
        }
    }
}

impl QuizQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn without_local_fallback(mut self) -> Self {
        self.use_local_fallback = false;
        self
    }

    /// 題數為 0 時退回預設值
    pub fn effective_count(&self) -> usize {
        effective_count(self.count)
    }

    /// 組出 GET 查詢參數，空值不送
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(topic) = self.topic.as_deref().filter(|t| !t.is_empty()) {
            params.push(("topic", topic.to_string()));
        }
        if let Some(difficulty) = self.difficulty.as_deref().filter(|d| !d.is_empty()) {
            params.push(("difficulty", difficulty.to_string()));
        }
        params.push(("count", self.effective_count().to_string()));
        params
    }
}

/// POST body for the remote quiz endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomQuizRequest {
    pub topics: Vec<String>,
    pub difficulties: Vec<String>,
    pub count: usize,
    #[serde(skip)]
    pub use_local_fallback: bool,
}

impl CustomQuizRequest {
    pub fn effective_count(&self) -> usize {
        effective_count(self.count)
    }
}

impl Default for CustomQuizRequest {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            difficulties: Vec::new(),
            count: DEFAULT_QUESTION_COUNT,
            use_local_fallback: true,
        }
    }
}

impl Validate for QuizQuery {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("count", self.count, 1)?;
        if let Some(topic) = &self.topic {
            validation::validate_non_empty_string("topic", topic)?;
        }
        if let Some(difficulty) = &self.difficulty {
            validation::validate_non_empty_string("difficulty", difficulty)?;
        }
        Ok(())
    }
}

impl Validate for CustomQuizRequest {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("count", self.count, 1)?;
        for topic in &self.topics {
            validation::validate_non_empty_string("topics", topic)?;
        }
        for difficulty in &self.difficulties {
            validation::validate_non_empty_string("difficulties", difficulty)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationStatus {
    #[serde(default)]
    pub is_installed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub id: u64,
    pub name: String,
    pub developer: String,
    pub category: String,
    pub rating: f64,
    pub reviews: u64,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_top_pick: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_status: Option<InstallationStatus>,
}

impl AppRecord {
    pub fn is_installed(&self) -> bool {
        self.installation_status
            .as_ref()
            .map(|status| status.is_installed)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppManifest {
    pub apps: Vec<AppRecord>,
    #[serde(default)]
    pub categories: Vec<String>,
}
