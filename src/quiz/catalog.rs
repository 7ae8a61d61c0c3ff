//! Static quiz catalog

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

pub const ORDER_QUIZ: &str = "test_order";
pub const SHIPPING_QUIZ: &str = "test_shipping";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub key: String,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl QuizDefinition {
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }
}

/// Read-only set of quizzes, built once at startup
#[derive(Debug, Clone)]
pub struct QuizCatalog {
    quizzes: HashMap<String, QuizDefinition>,
}

impl QuizCatalog {
    /// Catalog with the built-in training quizzes
    pub fn new() -> Self {
        Self::from_definitions(vec![order_quiz(), shipping_quiz()])
    }

    pub fn from_definitions(definitions: Vec<QuizDefinition>) -> Self {
        let quizzes = definitions
            .into_iter()
            .map(|quiz| (quiz.key.clone(), quiz))
            .collect();
        Self { quizzes }
    }

    pub fn get(&self, key: &str) -> Option<&QuizDefinition> {
        self.quizzes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.quizzes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.quizzes.keys().map(String::as_str)
    }
}

impl Default for QuizCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn question(prompt: &str, options: &[&str], correct_option: usize) -> QuizQuestion {
    QuizQuestion {
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_option,
    }
}

fn order_quiz() -> QuizDefinition {
    QuizDefinition {
        key: ORDER_QUIZ.to_string(),
        title: "Тест: приём заказа".to_string(),
        questions: vec![
            question(
                "С чего начинается приём заказа?",
                &["Поприветствовать клиента", "Сразу выставить счёт", "Отправить подтверждение"],
                0,
            ),
            question(
                "Где фиксируется принятый заказ?",
                &["В личном блокноте", "В CRM", "Нигде, достаточно запомнить"],
                1,
            ),
        ],
    }
}

fn shipping_quiz() -> QuizDefinition {
    QuizDefinition {
        key: SHIPPING_QUIZ.to_string(),
        title: "Тест: отгрузка заказа".to_string(),
        questions: vec![question(
            "Что нужно сделать перед передачей заказа в доставку?",
            &["Проверить комплектность и адрес", "Ничего, курьер разберётся", "Отменить заказ"],
            0,
        )],
    }
}
