//! Menu navigation graph
//!
//! Static screens and the labeled buttons between them. Every edge is an
//! [`Action`]; the graph is checked once at startup so a button can never
//! point at a missing node or quiz.

use std::collections::HashMap;
use crate::handlers::actions::Action;
use crate::handlers::transport::{Button, Keyboard, Screen};
use crate::quiz::{QuizCatalog, ORDER_QUIZ, SHIPPING_QUIZ};
use crate::utils::errors::{CompanyBotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Main,
    Training,
    About,
    MaterialOrder,
    MaterialShipping,
}

impl NodeId {
    pub const ALL: [NodeId; 5] = [
        NodeId::Main,
        NodeId::Training,
        NodeId::About,
        NodeId::MaterialOrder,
        NodeId::MaterialShipping,
    ];

    /// Payload token
    pub fn token(&self) -> &'static str {
        match self {
            NodeId::Main => "main",
            NodeId::Training => "training",
            NodeId::About => "about",
            NodeId::MaterialOrder => "order",
            NodeId::MaterialShipping => "shipping",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|node| node.token() == token)
    }
}

/// Labeled outgoing transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub label: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: NodeId,
    pub text: String,
    pub edges: Vec<Edge>,
}

impl MenuNode {
    fn new(id: NodeId, text: &str, edges: Vec<(&str, Action)>) -> Self {
        Self {
            id,
            text: text.to_string(),
            edges: edges
                .into_iter()
                .map(|(label, action)| Edge { label: label.to_string(), action })
                .collect(),
        }
    }

    pub fn render(&self) -> Screen {
        let buttons = self
            .edges
            .iter()
            .map(|edge| Button::new(edge.label.clone(), edge.action.payload()))
            .collect();
        Screen::with_keyboard(self.text.clone(), Keyboard::column(buttons))
    }
}

#[derive(Debug, Clone)]
pub struct MenuGraph {
    nodes: HashMap<NodeId, MenuNode>,
}

impl MenuGraph {
    pub fn new() -> Self {
        let nodes = default_nodes()
            .into_iter()
            .map(|node| (node.id, node))
            .collect();
        Self { nodes }
    }

    pub fn node(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(&id)
    }

    pub fn edges(&self, id: NodeId) -> &[Edge] {
        self.nodes.get(&id).map(|node| node.edges.as_slice()).unwrap_or(&[])
    }

    pub fn has_edge(&self, from: NodeId, action: &Action) -> bool {
        self.edges(from).iter().any(|edge| &edge.action == action)
    }

    /// Render a node. Missing nodes fall back to the main menu.
    pub fn render(&self, id: NodeId) -> Screen {
        self.node(id)
            .or_else(|| self.node(NodeId::Main))
            .map(MenuNode::render)
            .unwrap_or_else(|| Screen::text(""))
    }

    /// Check that every edge leads somewhere real
    pub fn validate(&self, catalog: &QuizCatalog) -> Result<()> {
        for id in NodeId::ALL {
            if !self.nodes.contains_key(&id) {
                return Err(CompanyBotError::Config(format!("Menu node {:?} is missing", id)));
            }
        }

        for node in self.nodes.values() {
            for edge in &node.edges {
                match &edge.action {
                    Action::NavigateTo(target) if !self.nodes.contains_key(target) => {
                        return Err(CompanyBotError::Config(format!(
                            "Menu node {:?} links to missing node {:?}", node.id, target
                        )));
                    }
                    Action::StartQuiz(key) if !catalog.contains(key) => {
                        return Err(CompanyBotError::Config(format!(
                            "Menu node {:?} links to unknown quiz {}", node.id, key
                        )));
                    }
                    Action::SubmitAnswer { .. } => {
                        return Err(CompanyBotError::Config(format!(
                            "Menu node {:?} carries an answer button", node.id
                        )));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

impl Default for MenuGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn default_nodes() -> Vec<MenuNode> {
    vec![
        MenuNode::new(
            NodeId::Main,
            "🏠 Главное меню\n\nВыберите раздел:",
            vec![
                ("📚 Обучение", Action::NavigateTo(NodeId::Training)),
                ("ℹ️ О боте", Action::ShowAbout),
            ],
        ),
        MenuNode::new(
            NodeId::Training,
            "📚 Обучение\n\nВыберите материал:",
            vec![
                ("📘 Как принять заказ", Action::NavigateTo(NodeId::MaterialOrder)),
                ("📦 Как отгрузить заказ", Action::NavigateTo(NodeId::MaterialShipping)),
                ("🏠 В главное меню", Action::BackToMain),
            ],
        ),
        MenuNode::new(
            NodeId::About,
            "ℹ️ О боте\n\n\
            Бот помогает новым сотрудникам освоить рабочие процессы: \
            изучить инструкции и проверить себя в коротких тестах.\n\n\
            /start - главное меню\n\
            /help - справка",
            vec![("🏠 В главное меню", Action::BackToMain)],
        ),
        MenuNode::new(
            NodeId::MaterialOrder,
            "📘 Как принять заказ\n\n\
            1. Поприветствуйте клиента.\n\
            2. Уточните детали заказа.\n\
            3. Зафиксируйте заказ в CRM.\n\
            4. Отправьте подтверждение клиенту.",
            vec![
                ("📝 Пройти тест", Action::StartQuiz(ORDER_QUIZ.to_string())),
                ("⬅️ К материалам", Action::NavigateTo(NodeId::Training)),
            ],
        ),
        MenuNode::new(
            NodeId::MaterialShipping,
            "📦 Как отгрузить заказ\n\n\
            1. Проверьте комплектность заказа.\n\
            2. Сверьте адрес и контакты получателя.\n\
            3. Упакуйте товар и приложите документы.\n\
            4. Передайте заказ в доставку и отметьте отгрузку в CRM.",
            vec![
                ("📝 Пройти тест", Action::StartQuiz(SHIPPING_QUIZ.to_string())),
                ("⬅️ К материалам", Action::NavigateTo(NodeId::Training)),
            ],
        ),
    ]
}
