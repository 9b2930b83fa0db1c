use crate::domain::{CalendarAction, format_long, visible_month_label};
use crate::infrastructure::{StateChange, StateHook};
use anyhow::Result;

/// Plugin that logs user-visible transitions at info level
pub struct SelectionLoggerHook;

impl StateHook for SelectionLoggerHook {
    fn on_state_changed(&self, change: &StateChange) -> Result<()> {
        match change.action {
            CalendarAction::SetSelectedDate(date) => {
                log::info!("Selected {}", format_long(date));
            }
            CalendarAction::SetDisplayedDate(date) => {
                log::info!("Showing {}", visible_month_label(date));
            }
            CalendarAction::ToggleVisibility | CalendarAction::SetVisibility(_) => {
                log::info!(
                    "Calendar {}",
                    if change.current.is_visible { "opened" } else { "closed" }
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Selection Logger"
    }
}
