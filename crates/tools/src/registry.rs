//! The tool registry — a closed set of built-in tools behind one call.
//!
//! Tools are tagged [`ToolKind`] variants rather than a mutable
//! name-to-function table, so the set of tools is fixed at compile time.
//! The registry boundary never fails: unknown names and tool errors
//! come back as sentinel strings.

use parley_core::error::ToolError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{calculator, planner, summarizer};

/// A built-in tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Calculator,
    Summarizer,
    Planner,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [Self::Calculator, Self::Summarizer, Self::Planner];

    /// The unique name this tool is invoked by.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Calculator => "calculator",
            Self::Summarizer => "summarizer",
            Self::Planner => "planner",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Calculator => "Evaluate an arithmetic expression: +, -, *, /, parentheses, decimals.",
            Self::Summarizer => "Shorten text to its first ten words.",
            Self::Planner => "Break a task into a three-step plan.",
        }
    }

    /// What the registry returns in place of output when this tool fails.
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Calculator => "Invalid calculation.",
            Self::Summarizer => "Summary unavailable.",
            Self::Planner => "Plan unavailable.",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Run the tool, surfacing its typed error.
    pub fn run(&self, input: &str) -> Result<String, ToolError> {
        match self {
            Self::Calculator => calculator::calculate(input),
            Self::Summarizer => Ok(summarizer::summarize(input)),
            Self::Planner => Ok(planner::plan(input)),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of tools available to the engine. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolKind>,
}

impl ToolRegistry {
    /// A registry holding every built-in tool.
    pub fn builtin() -> Self {
        Self::with_tools(ToolKind::ALL)
    }

    /// A registry holding only `tools` (duplicates are ignored).
    pub fn with_tools(tools: impl IntoIterator<Item = ToolKind>) -> Self {
        let mut registered: Vec<ToolKind> = Vec::new();
        for tool in tools {
            if !registered.contains(&tool) {
                registered.push(tool);
            }
        }
        Self { tools: registered }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<ToolKind> {
        ToolKind::from_name(name).filter(|t| self.tools.contains(t))
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// One-line description of a registered tool.
    pub fn describe(&self, name: &str) -> Option<&'static str> {
        self.get(name).map(|t| t.description())
    }

    /// Invoke a tool and keep its typed error.
    pub fn try_invoke(&self, name: &str, input: &str) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.run(input)
    }

    /// Invoke a tool. Never fails.
    ///
    /// - unknown name: `"Tool '<name>' not found."`
    /// - tool error: the tool's fixed fallback, e.g. `"Invalid calculation."`
    pub fn invoke(&self, name: &str, input: &str) -> String {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "Unknown tool requested");
            return format!("Tool '{name}' not found.");
        };

        match tool.run(input) {
            Ok(output) => {
                debug!(tool = name, "Tool invoked");
                output
            }
            Err(e) => {
                warn!(tool = name, error = %e, "Tool failed, returning fallback");
                tool.fallback().to_string()
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
