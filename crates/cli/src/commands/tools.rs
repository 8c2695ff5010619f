//! `parley tools` — list the built-in tools.

use parley_tools::ToolRegistry;

pub fn run() {
    let registry = ToolRegistry::builtin();
    for name in registry.names() {
        println!("  {:<12} {}", name, registry.describe(name).unwrap_or_default());
    }
}
