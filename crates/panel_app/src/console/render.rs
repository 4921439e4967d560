use panel_core::{PanelViewModel, PollingSession, SubmissionOutcome};

/// Text rendition of the panel. The whole block is reprinted whenever the
/// state says it changed.
pub fn render(view: &PanelViewModel) -> String {
    let mut out = String::new();
    out.push_str("== Staging Panel ==\n");

    let methods_line = if view.allowed_methods.is_empty() {
        "(none declared)".to_string()
    } else {
        view.allowed_methods.join(", ")
    };
    out.push_str(&format!("Allowed methods: {methods_line}\n"));
    if let Some(diagnostic) = &view.methods_diagnostic {
        out.push_str(&format!("  last refresh failed: {diagnostic}\n"));
    }

    out.push_str(&format!(
        "Submission: {}\n",
        if view.submitting { "sending" } else { "idle" }
    ));
    match &view.last_outcome {
        Some(SubmissionOutcome::Accepted { payload }) => {
            out.push_str("Last result: accepted\n");
            for line in payload.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        Some(SubmissionOutcome::Rejected(reason)) => {
            out.push_str(&format!("Last result: rejected ({reason})\n"));
        }
        Some(SubmissionOutcome::Failed { detail }) => {
            out.push_str(&format!("Last result: failed ({detail})\n"));
        }
        None => {}
    }

    let polling_label = match view.polling {
        PollingSession::Idle => "idle",
        PollingSession::Active => "active",
        PollingSession::Stopped => "stopped",
    };
    out.push_str(&format!("Log tail: {polling_label}\n"));
    if !view.log_text.is_empty() {
        out.push_str("---\n");
        out.push_str(&view.log_text);
        if !view.log_text.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("---\n");
    }
    out
}
