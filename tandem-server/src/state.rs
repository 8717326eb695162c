//! Application state management

use tandem::core::SocialManager;

use crate::chat::ChatClient;
use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Tandem social manager
    pub social: SocialManager,

    /// Server configuration
    pub config: ServerConfig,

    /// Chat provider client (optional, enabled via config)
    pub chat: Option<ChatClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(social: SocialManager, config: ServerConfig) -> Self {
        Self {
            social,
            config,
            chat: None, // Will be set later if the chat provider is configured
        }
    }

    /// Set the chat client (called after initialization if configured)
    pub fn set_chat_client(&mut self, chat: ChatClient) {
        self.chat = Some(chat);
    }
}
