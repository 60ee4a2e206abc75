pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::catalog::DEFAULT_TOP_PICKS;
#[cfg(feature = "cli")]
use crate::domain::model::{CustomQuizRequest, QuizQuery, DEFAULT_QUESTION_COUNT};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio")]
#[command(about = "SmartyQuest quiz fetcher and App Mart catalog queries")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override quiz.primary_url
    #[arg(long, global = true)]
    pub primary_url: Option<String>,

    /// Override quiz.timeout_ms
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Enable the secondary (development) quiz endpoint
    #[arg(long, global = true)]
    pub use_secondary: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch a quiz through the fallback chain
    Quiz {
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
        count: usize,
        #[arg(long)]
        no_local_fallback: bool,
        /// Write the payload as JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Fetch a quiz with a POST body (multiple topics/difficulties)
    CustomQuiz {
        #[arg(long, value_delimiter = ',')]
        topics: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        difficulties: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
        count: usize,
        #[arg(long)]
        no_local_fallback: bool,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Query the App Mart catalog
    Apps {
        #[command(subcommand)]
        query: AppsQuery,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum AppsQuery {
    List,
    Categories,
    Category { name: String },
    TopPicks {
        #[arg(long, default_value_t = DEFAULT_TOP_PICKS)]
        limit: usize,
    },
    ByRating {
        #[arg(long, default_value_t = DEFAULT_TOP_PICKS)]
        limit: usize,
    },
    Search { query: String },
    Show { id: u64 },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋檔案設定
    pub fn apply_overrides(&self, config: &mut toml_config::TomlConfig) {
        if let Some(url) = &self.primary_url {
            config.quiz.primary_url = url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.quiz.timeout_ms = timeout_ms;
        }
        if self.use_secondary {
            config.quiz.use_secondary = true;
        }
    }
}

#[cfg(feature = "cli")]
impl Command {
    pub fn quiz_query(&self) -> Option<QuizQuery> {
        match self {
            Command::Quiz {
                topic,
                difficulty,
                count,
                no_local_fallback,
                ..
            } => Some(QuizQuery {
                topic: topic.clone(),
                difficulty: difficulty.clone(),
                count: *count,
                use_local_fallback: !no_local_fallback,
            }),
            _ => None,
        }
    }

    pub fn custom_request(&self) -> Option<CustomQuizRequest> {
        match self {
            Command::CustomQuiz {
                topics,
                difficulties,
                count,
                no_local_fallback,
                ..
            } => Some(CustomQuizRequest {
                topics: topics.clone(),
                difficulties: difficulties.clone(),
                count: *count,
                use_local_fallback: !no_local_fallback,
            }),
            _ => None,
        }
    }
}
