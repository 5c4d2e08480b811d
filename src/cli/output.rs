//! CLI output formatting

use crate::execution::ExecutionEvent;
use console::Emoji;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "- ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "* ");

/// Format a release event for display.
///
/// Returns `None` for events the console does not show.
pub fn format_execution_event(event: &ExecutionEvent) -> Option<String> {
    match event {
        ExecutionEvent::ReleaseStarted {
            old_version,
            specifier,
        } => Some(format!(
            "{}Releasing {} ({})",
            ROCKET,
            style(old_version).bold(),
            style(specifier).cyan()
        )),
        ExecutionEvent::StepStarted { message, .. } => Some(style(message).blue().to_string()),
        ExecutionEvent::CommandStarted { command, .. } => {
            Some(style(format!("> {}", command)).blue().to_string())
        }
        ExecutionEvent::StepSkipped { step, reason } => Some(format!(
            "{}{}",
            SKIP,
            style(format!("{} skipped ({})", step.label(), reason)).dim()
        )),
        ExecutionEvent::StepCompleted { message, .. } => {
            Some(format!("{}{}", CHECK, style(message).green()))
        }
        // Reported once, by the caller, from the returned error
        ExecutionEvent::StepFailed { .. } => None,
        ExecutionEvent::ReleaseCompleted { .. } => None,
    }
}

/// The single red diagnostic line for a failed run
pub fn format_error(message: &str) -> String {
    format!("{}{}", CROSS, style(format!("Error: {}", message)).red())
}

/// Final success line
pub fn format_release_success(new_version: &str, elapsed: Option<Duration>) -> String {
    let line = format!("Released new version {} successfully.", new_version);
    match elapsed {
        Some(duration) => format!(
            "{}{} {}",
            CHECK,
            style(line).green(),
            style(format!("({})", format_duration(duration))).dim()
        ),
        None => format!("{}{}", CHECK, style(line).green()),
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
