//! User-facing texts
//!
//! The bot speaks Russian only, so strings live here as constants instead of
//! a translation catalog.

use crate::quiz::{AnswerFeedback, QuestionPrompt, QuizOutcome, Tier};

pub const ASK_FULL_NAME: &str = "👋 Добро пожаловать в обучающий бот компании!\n\nДля начала давайте познакомимся. Введите, пожалуйста, ваше ФИО:";
pub const ASK_CITY: &str = "Спасибо! Теперь укажите город, в котором вы работаете:";
pub const WELCOME_BACK: &str = "👋 С возвращением!";
pub const REGISTRATION_REQUIRED: &str = "Сначала необходимо зарегистрироваться. Отправьте /start, чтобы начать.";
pub const SEND_START: &str = "Чтобы начать работу с ботом, отправьте /start.";
pub const USE_MENU: &str = "Пожалуйста, пользуйтесь кнопками меню. Отправьте /start, чтобы открыть главное меню.";
pub const HELP: &str = "ℹ️ Справка\n\n\
    /start - регистрация и главное меню\n\
    /about - информация о боте\n\
    /help - эта справка\n\n\
    В разделе «Обучение» собраны инструкции. После каждой инструкции можно пройти короткий тест.";

pub fn registration_complete(full_name: &str, city: &str) -> String {
    format!("✅ Регистрация завершена!\n\nФИО: {}\nГород: {}", full_name, city)
}

pub fn question(prompt: &QuestionPrompt) -> String {
    format!(
        "📝 {}\n\nВопрос {} из {}:\n{}",
        prompt.title,
        prompt.index + 1,
        prompt.total,
        prompt.prompt
    )
}

pub fn feedback(feedback: &AnswerFeedback) -> String {
    if feedback.correct {
        "✅ Верно!".to_string()
    } else {
        format!("❌ Неверно. Правильный ответ: {}", feedback.correct_option)
    }
}

pub fn quiz_result(outcome: &QuizOutcome) -> String {
    let verdict = match outcome.tier {
        Tier::Top => "🏆 Отлично! Вы ответили правильно на все вопросы.",
        Tier::Mid => "👍 Хороший результат! Осталось немного подтянуть детали.",
        Tier::Low => "📖 Рекомендуем ещё раз изучить материал и пройти тест заново.",
    };
    format!(
        "🏁 {}\n\nТест завершён. Результат: {} из {}\n\n{}",
        outcome.title, outcome.score, outcome.max_score, verdict
    )
}

pub const BACK_TO_MATERIALS: &str = "⬅️ К материалам";
pub const BACK_TO_MAIN: &str = "🏠 В главное меню";
