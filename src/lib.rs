pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    catalog::AppCatalog,
    format::{format_price, format_price_str, format_review_count, format_review_count_str},
    quiz_service::QuizService,
    shuffle::shuffle,
};
pub use domain::model::{CustomQuizRequest, QuizPayload, QuizQuery, QuizSource};
pub use utils::error::{Result, ServiceError};
