//! Quiz module
//!
//! Static quiz catalog and the engine that scores attempts against it

pub mod catalog;
pub mod engine;

pub use catalog::{QuizCatalog, QuizDefinition, QuizQuestion, ORDER_QUIZ, SHIPPING_QUIZ};
pub use engine::{AnswerFeedback, AnswerOutcome, QuestionPrompt, QuizAttempt, QuizEngine, QuizOutcome, Tier};
