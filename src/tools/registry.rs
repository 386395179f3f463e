//! Tool registry: tool name to handler, built once at startup.

use super::{
    IdentifyLanguageTool, ToolDescriptor, ToolHandler, TranslateTextTool, TransliterateTextTool,
};
use crate::provider::SarvamClient;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registered tools, kept in registration order.
///
/// Populate it with [`register`](Self::register), then share it behind an
/// `Arc`; nothing mutates it after startup.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry (for custom tool sets)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the three Sarvam tools sharing one client
    pub fn with_sarvam_tools(client: Arc<SarvamClient>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TranslateTextTool::new(Arc::clone(&client))));
        registry.register(Arc::new(IdentifyLanguageTool::new(Arc::clone(&client))));
        registry.register(Arc::new(TransliterateTextTool::new(client)));
        registry
    }

    /// Add a handler. A second registration under the same name replaces the
    /// first and keeps its position.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let name = handler.name();
        debug!("Registering tool handler: {}", name);

        match self.index.get(name) {
            Some(&position) => {
                warn!("Tool handler '{}' registered twice, replacing", name);
                self.handlers[position] = handler;
            }
            None => {
                self.index.insert(name, self.handlers.len());
                self.handlers.push(handler);
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&position| &self.handlers[position])
    }

    /// Descriptors of every tool, in registration order
    pub fn list_all(&self) -> Vec<ToolDescriptor> {
        self.handlers.iter().map(|h| h.descriptor()).collect()
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
