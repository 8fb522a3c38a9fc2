//! Registry of the tools available to the agent.

use crate::types::{Tool, ToolDefinition};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Registry of available tools, keyed by name.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    enabled: BTreeSet<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
            enabled: BTreeSet::new(),
        }
    }

    /// Register a tool (enabled by default).
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name.clone(), tool);
        self.enabled.insert(name);
    }

    /// Disable a tool by name.
    pub fn disable(&mut self, name: &str) {
        self.enabled.remove(name);
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Definitions of all enabled tools, sorted by name.
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .filter(|(name, _)| self.enabled.contains(*name))
            .map(|(_, tool)| tool.definition())
            .collect()
    }

    /// Get a tool by name (only if enabled).
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        if self.enabled.contains(name) {
            self.tools.get(name).cloned()
        } else {
            None
        }
    }

    /// Enabled tool names, sorted.
    pub fn list_enabled(&self) -> Vec<&str> {
        self.enabled.iter().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
