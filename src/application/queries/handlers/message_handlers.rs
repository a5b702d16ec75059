//! Message Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::RegistryPort;
use crate::application::queries::{GetMessage, ListMessages};
use crate::domain::message::{GeneratedMessage, MessageId};

/// GetMessage Handler
pub struct GetMessageHandler {
    registry: Arc<dyn RegistryPort>,
}

impl GetMessageHandler {
    pub fn new(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, query: GetMessage) -> Result<GeneratedMessage, ApplicationError> {
        let message_id = MessageId::from_u64(query.message_id);
        self.registry
            .find_message(message_id)
            .ok_or_else(|| ApplicationError::not_found("Message", message_id))
    }
}

/// ListMessages Handler
pub struct ListMessagesHandler {
    registry: Arc<dyn RegistryPort>,
}

impl ListMessagesHandler {
    pub fn new(registry: Arc<dyn RegistryPort>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, _query: ListMessages) -> Vec<GeneratedMessage> {
        self.registry.list_messages()
    }
}
