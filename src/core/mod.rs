pub mod catalog;
pub mod format;
pub mod local_quiz;
pub mod quiz_service;
pub mod shuffle;

pub use crate::domain::model::{
    AppRecord, CustomQuizRequest, QuizMetadata, QuizPayload, QuizQuery, QuizQuestion, QuizSource,
};
pub use crate::domain::ports::{ConfigProvider, QuizProvider, Storage};
pub use crate::utils::error::Result;
