//! Planner tool — a mock that picks a canned three-step plan by keyword.

const ANALYSIS_STEPS: [&str; 3] = ["Gather data", "Identify patterns", "Generate insights"];
const CALCULATION_STEPS: [&str; 3] = ["Parse input", "Perform calculation", "Return result"];
const GENERIC_STEPS: [&str; 3] = ["Define objective", "Execute task", "Review outcome"];

/// Build a plan for `task`.
///
/// Keyword checks are substring matches on the lower-cased task, with
/// `analyze` taking precedence over `calculate`.
pub fn plan(task: &str) -> String {
    let lowered = task.to_lowercase();
    let steps = if lowered.contains("analyze") {
        ANALYSIS_STEPS
    } else if lowered.contains("calculate") {
        CALCULATION_STEPS
    } else {
        GENERIC_STEPS
    };

    let mut out = format!("Plan for '{task}':");
    for step in steps {
        out.push_str("\n- ");
        out.push_str(step);
    }
    out
}
