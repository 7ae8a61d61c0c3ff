//! Quiz engine
//!
//! Stateless rules over a user's quiz slot and the shared catalog. All
//! rejections leave the slot untouched.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::utils::errors::QuizError;
use super::catalog::{QuizCatalog, QuizDefinition};

/// Share of correct answers needed for the middle tier
pub const MID_TIER_RATIO: f64 = 0.7;

/// In-progress answer sequence for one quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub quiz_key: String,
    pub current_question: usize,
    pub score: usize,
    pub answers: Vec<bool>,
}

impl QuizAttempt {
    pub fn new(quiz_key: &str) -> Self {
        Self {
            quiz_key: quiz_key.to_string(),
            current_question: 0,
            score: 0,
            answers: Vec::new(),
        }
    }
}

/// Everything needed to render one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    pub quiz_key: String,
    pub title: String,
    pub index: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Top,
    Mid,
    Low,
}

impl Tier {
    pub fn for_score(score: usize, total: usize) -> Self {
        if score == total {
            Tier::Top
        } else if score as f64 >= MID_TIER_RATIO * total as f64 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }
}

/// Final result of a completed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub quiz_key: String,
    pub title: String,
    pub score: usize,
    pub max_score: usize,
    pub answers: Vec<bool>,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_option: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Next { feedback: AnswerFeedback, prompt: QuestionPrompt },
    Completed { feedback: AnswerFeedback, outcome: QuizOutcome },
}

#[derive(Debug, Clone)]
pub struct QuizEngine {
    catalog: Arc<QuizCatalog>,
}

impl QuizEngine {
    pub fn new(catalog: Arc<QuizCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    /// Begin (or restart) a quiz in `slot` and return its first question
    pub fn start(&self, slot: &mut Option<QuizAttempt>, quiz_key: &str) -> Result<QuestionPrompt, QuizError> {
        let quiz = self
            .catalog
            .get(quiz_key)
            .ok_or_else(|| QuizError::UnknownQuiz(quiz_key.to_string()))?;

        *slot = Some(QuizAttempt::new(quiz_key));
        Ok(prompt_for(quiz, 0))
    }

    /// Record the option chosen for `question`.
    ///
    /// Correctness is looked up in the catalog; only the current question is accepted.
    pub fn submit_answer(
        &self,
        slot: &mut Option<QuizAttempt>,
        quiz_key: &str,
        question: usize,
        option: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        let attempt = slot.as_mut().ok_or(QuizError::NoActiveAttempt)?;

        if attempt.quiz_key != quiz_key {
            return Err(QuizError::QuizMismatch {
                active: attempt.quiz_key.clone(),
                got: quiz_key.to_string(),
            });
        }
        if attempt.current_question != question {
            return Err(QuizError::StaleAnswer {
                expected: attempt.current_question,
                got: question,
            });
        }

        let quiz = self
            .catalog
            .get(quiz_key)
            .ok_or_else(|| QuizError::UnknownQuiz(quiz_key.to_string()))?;
        let current = quiz
            .question(question)
            .ok_or(QuizError::StaleAnswer { expected: attempt.current_question, got: question })?;
        if option >= current.options.len() {
            return Err(QuizError::InvalidOption { question, option });
        }

        let correct = option == current.correct_option;
        let feedback = AnswerFeedback {
            correct,
            correct_option: current.options[current.correct_option].clone(),
        };

        attempt.answers.push(correct);
        if correct {
            attempt.score += 1;
        }
        attempt.current_question += 1;

        if attempt.current_question < quiz.total() {
            return Ok(AnswerOutcome::Next {
                feedback,
                prompt: prompt_for(quiz, attempt.current_question),
            });
        }

        let outcome = QuizOutcome {
            quiz_key: quiz.key.clone(),
            title: quiz.title.clone(),
            score: attempt.score,
            max_score: quiz.total(),
            answers: attempt.answers.clone(),
            tier: Tier::for_score(attempt.score, quiz.total()),
        };
        *slot = None;

        Ok(AnswerOutcome::Completed { feedback, outcome })
    }
}

fn prompt_for(quiz: &QuizDefinition, index: usize) -> QuestionPrompt {
    let question = &quiz.questions[index];
    QuestionPrompt {
        quiz_key: quiz.key.clone(),
        title: quiz.title.clone(),
        index,
        total: quiz.total(),
        prompt: question.prompt.clone(),
        options: question.options.clone(),
    }
}
