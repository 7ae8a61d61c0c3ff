//! Dialog router
//!
//! Maps an inbound event and the user's session to a list of replies and the
//! next session state. The user's session stays locked for the whole event,
//! including store calls and reply delivery, so events of one user are
//! processed strictly one after another.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, error, info, warn};
use crate::handlers::actions::Action;
use crate::handlers::transport::{
    BotCommand, Button, ChatTransport, EventKind, InboundEvent, Keyboard, Reply, Screen, SurfaceId,
};
use crate::menu::{MenuGraph, NodeId};
use crate::models::{PersistedQuizResult, PersistedUserRecord};
use crate::quiz::{AnswerOutcome, QuestionPrompt, QuizCatalog, QuizEngine, QuizOutcome};
use crate::services::DurableWriter;
use crate::state::{RegistrationScenario, RegistrationStep, SessionStore, UserSession};
use crate::texts;
use crate::utils::errors::{CompanyBotError, Result};
use crate::utils::logging;

pub struct DialogRouter {
    sessions: Arc<SessionStore>,
    engine: QuizEngine,
    menu: MenuGraph,
    registration: RegistrationScenario,
    writer: DurableWriter,
}

impl DialogRouter {
    /// Build the router; fails when the menu references a missing quiz or node
    pub fn new(sessions: Arc<SessionStore>, catalog: Arc<QuizCatalog>, writer: DurableWriter) -> Result<Self> {
        let menu = MenuGraph::new();
        menu.validate(&catalog)?;

        Ok(Self {
            sessions,
            engine: QuizEngine::new(catalog),
            menu,
            registration: RegistrationScenario::new()?,
            writer,
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn menu(&self) -> &MenuGraph {
        &self.menu
    }

    /// Process one event and return the replies without delivering them
    pub async fn handle(&self, event: &InboundEvent) -> Vec<Reply> {
        let mut session = self.sessions.lock(event.user_id).await;
        self.process(&mut session, event).await
    }

    /// Process one event and deliver its replies through `transport`
    pub async fn dispatch(&self, event: &InboundEvent, transport: &dyn ChatTransport) {
        let mut session = self.sessions.lock(event.user_id).await;
        let replies = self.process(&mut session, event).await;
        deliver(event, replies, transport).await;
    }

    async fn process(&self, session: &mut UserSession, event: &InboundEvent) -> Vec<Reply> {
        let checked_registry = self.reconcile(session).await;

        session.touch();
        if event.username.is_some() {
            session.username = event.username.clone();
        }

        match &event.kind {
            EventKind::Command(command) => self.on_command(session, *command, checked_registry).await,
            EventKind::Text(text) => self.on_text(session, event, text).await,
            EventKind::ButtonPress { payload, surface } => {
                self.on_button(session, event, payload, *surface).await
            }
        }
    }

    /// Consult the registry once per session. Returns whether a lookup ran.
    async fn reconcile(&self, session: &mut UserSession) -> bool {
        if session.reconciled {
            return false;
        }
        session.reconciled = true;

        if session.is_registered() {
            return false;
        }

        if self.writer.is_registered(session.user_id).await == Some(true) {
            info!(user_id = session.user_id, "Session restored from registry");
            session.mark_registered_from_registry();
        }
        true
    }

    async fn on_command(&self, session: &mut UserSession, command: BotCommand, checked_registry: bool) -> Vec<Reply> {
        match command {
            BotCommand::Start => {
                if !session.is_registered()
                    && !checked_registry
                    && self.writer.is_registered(session.user_id).await == Some(true)
                {
                    session.mark_registered_from_registry();
                }

                if session.is_registered() {
                    logging::log_user_action(session.user_id, "start", Some("registered"));
                    return vec![
                        Reply::Send(Screen::text(texts::WELCOME_BACK)),
                        Reply::Send(self.menu.render(NodeId::Main)),
                    ];
                }

                logging::log_user_action(session.user_id, "start", Some("registration"));
                session.begin_registration();
                vec![Reply::Send(Screen::text(texts::ASK_FULL_NAME))]
            }
            BotCommand::Help => vec![Reply::Send(Screen::text(texts::HELP))],
            BotCommand::About => vec![Reply::Send(self.menu.render(NodeId::About))],
        }
    }

    async fn on_text(&self, session: &mut UserSession, event: &InboundEvent, text: &str) -> Vec<Reply> {
        match self.registration.accept_text(session, text) {
            Ok(Some(RegistrationStep::FullNameAccepted)) => {
                vec![Reply::Send(Screen::text(texts::ASK_CITY))]
            }
            Ok(Some(RegistrationStep::Completed)) => self.finish_registration(session, event).await,
            Ok(None) if session.is_registered() => vec![Reply::Send(Screen::text(texts::USE_MENU))],
            Ok(None) => vec![Reply::Send(Screen::text(texts::SEND_START))],
            Err(CompanyBotError::UserInput(message)) => {
                debug!(user_id = session.user_id, state = %session.state, "Registration input rejected");
                vec![Reply::Send(Screen::text(message))]
            }
            Err(e) => {
                error!(user_id = session.user_id, error = %e, "Failed to process text");
                Vec::new()
            }
        }
    }

    async fn finish_registration(&self, session: &mut UserSession, event: &InboundEvent) -> Vec<Reply> {
        let full_name = session.display_name(&event.display_name).to_string();
        let city = session.city.clone().unwrap_or_default();

        let record = PersistedUserRecord::new(session.user_id, session.username.clone(), full_name.clone(), city.clone());
        session.durably_saved = self.writer.save_user(&record).await.is_saved();

        info!(
            user_id = session.user_id,
            durably_saved = session.durably_saved,
            "Registration completed"
        );

        vec![
            Reply::Send(Screen::text(texts::registration_complete(&full_name, &city))),
            Reply::Send(self.menu.render(NodeId::Main)),
        ]
    }

    async fn on_button(
        &self,
        session: &mut UserSession,
        event: &InboundEvent,
        payload: &str,
        surface: Option<SurfaceId>,
    ) -> Vec<Reply> {
        let action = match Action::parse(payload) {
            Ok(action) => action,
            Err(e) => {
                logging::log_protocol_rejection(session.user_id, payload, &CompanyBotError::from(e));
                return Vec::new();
            }
        };

        if !session.is_registered() && !action.is_ungated() {
            debug!(user_id = session.user_id, payload = payload, "Button pressed before registration");
            return vec![Reply::Send(Screen::text(texts::REGISTRATION_REQUIRED))];
        }

        match action {
            Action::NavigateTo(node) => vec![self.menu_reply(node, surface)],
            Action::ShowAbout => vec![self.menu_reply(NodeId::About, surface)],
            Action::BackToMain => vec![self.menu_reply(NodeId::Main, surface)],
            Action::StartQuiz(quiz_key) => self.start_quiz(session, payload, &quiz_key),
            Action::SubmitAnswer { quiz_key, question, option } => {
                self.submit_answer(session, event, payload, &quiz_key, question, option).await
            }
        }
    }

    fn menu_reply(&self, node: NodeId, surface: Option<SurfaceId>) -> Reply {
        let screen = self.menu.render(node);
        match surface {
            Some(surface) => Reply::Edit { surface, screen },
            None => Reply::Send(screen),
        }
    }

    fn start_quiz(&self, session: &mut UserSession, payload: &str, quiz_key: &str) -> Vec<Reply> {
        let user_id = session.user_id;
        let Some(slot) = session.quiz_slot() else {
            return Vec::new();
        };

        match self.engine.start(slot, quiz_key) {
            Ok(prompt) => {
                logging::log_user_action(user_id, "quiz_started", Some(quiz_key));
                vec![Reply::Send(question_screen(&prompt))]
            }
            Err(e) => {
                logging::log_protocol_rejection(user_id, payload, &CompanyBotError::from(e));
                Vec::new()
            }
        }
    }

    async fn submit_answer(
        &self,
        session: &mut UserSession,
        event: &InboundEvent,
        payload: &str,
        quiz_key: &str,
        question: usize,
        option: usize,
    ) -> Vec<Reply> {
        let user_id = session.user_id;
        let Some(slot) = session.quiz_slot() else {
            return Vec::new();
        };

        match self.engine.submit_answer(slot, quiz_key, question, option) {
            Ok(AnswerOutcome::Next { feedback, prompt }) => vec![
                Reply::Send(Screen::text(texts::feedback(&feedback))),
                Reply::Send(question_screen(&prompt)),
            ],
            Ok(AnswerOutcome::Completed { feedback, outcome }) => {
                self.record_result(session, event, &outcome).await;
                vec![
                    Reply::Send(Screen::text(texts::feedback(&feedback))),
                    Reply::Send(result_screen(&outcome)),
                ]
            }
            Err(e) => {
                logging::log_protocol_rejection(user_id, payload, &CompanyBotError::from(e));
                Vec::new()
            }
        }
    }

    async fn record_result(&self, session: &UserSession, event: &InboundEvent, outcome: &QuizOutcome) {
        logging::log_quiz_completed(session.user_id, &outcome.quiz_key, outcome.score, outcome.max_score);

        let record = PersistedQuizResult {
            user_id: session.user_id,
            full_name: session.display_name(&event.display_name).to_string(),
            quiz_key: outcome.quiz_key.clone(),
            quiz_name: outcome.title.clone(),
            score: outcome.score as i32,
            max_score: outcome.max_score as i32,
            completed_at: Utc::now(),
            answer_sequence: outcome.answers.clone(),
        };
        self.writer.save_quiz_result(&record).await;
    }
}

fn question_screen(prompt: &QuestionPrompt) -> Screen {
    let buttons = prompt
        .options
        .iter()
        .enumerate()
        .map(|(option, label)| {
            let action = Action::SubmitAnswer {
                quiz_key: prompt.quiz_key.clone(),
                question: prompt.index,
                option,
            };
            Button::new(label.clone(), action.payload())
        })
        .collect();
    Screen::with_keyboard(texts::question(prompt), Keyboard::column(buttons))
}

fn result_screen(outcome: &QuizOutcome) -> Screen {
    let keyboard = Keyboard::column(vec![
        Button::new(texts::BACK_TO_MATERIALS, Action::NavigateTo(NodeId::Training).payload()),
        Button::new(texts::BACK_TO_MAIN, Action::BackToMain.payload()),
    ]);
    Screen::with_keyboard(texts::quiz_result(outcome), keyboard)
}

async fn deliver(event: &InboundEvent, replies: Vec<Reply>, transport: &dyn ChatTransport) {
    for reply in replies {
        match reply {
            Reply::Send(screen) => {
                if let Err(e) = transport.send(event.chat_id, &screen.text, screen.keyboard.as_ref()).await {
                    warn!(user_id = event.user_id, error = %e, "Failed to send reply");
                }
            }
            Reply::Edit { surface, screen } => {
                if let Err(e) = transport.edit(surface, &screen.text, screen.keyboard.as_ref()).await {
                    // The surface may be gone or too old to edit
                    debug!(user_id = event.user_id, error = %e, "Edit failed, sending a new message");
                    if let Err(e) = transport.send(event.chat_id, &screen.text, screen.keyboard.as_ref()).await {
                        warn!(user_id = event.user_id, error = %e, "Failed to send reply");
                    }
                }
            }
        }
    }
}
