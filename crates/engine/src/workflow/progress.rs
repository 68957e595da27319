use crate::store::Session;

const BAR_WIDTH: usize = 20;

/// Human-readable step checklist plus an ASCII progress bar, e.g.
///
/// ```text
/// [x] 1. validate_project_description
/// [>] 2. assess_model_risk
/// [ ] 3. evaluate_lifecycle_compliance
/// [#######-------------] 33% (1/3)
/// ```
pub fn render(session: &Session) -> String {
    let total = session.workflow_sequence.len();
    let mut lines = Vec::with_capacity(total + 1);
    let mut done = 0usize;
    let mut cursor_marked = false;

    for (idx, tool) in session.workflow_sequence.iter().enumerate() {
        let marker = if session.has_completed(tool) {
            done += 1;
            "[x]"
        } else if !cursor_marked {
            cursor_marked = true;
            "[>]"
        } else {
            "[ ]"
        };
        lines.push(format!("{} {}. {}", marker, idx + 1, tool));
    }

    lines.push(bar(done, total));
    lines.join("\n")
}

fn bar(done: usize, total: usize) -> String {
    if total == 0 {
        return format!("[{}] 0% (0/0)", "-".repeat(BAR_WIDTH));
    }
    let pct = done * 100 / total;
    let filled = done * BAR_WIDTH / total;
    format!(
        "[{}{}] {}% ({}/{})",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        pct,
        done,
        total
    )
}
