use crate::domain::{CalendarAction, CalendarState};
use anyhow::Result;

/// Context provided to state hooks
#[derive(Debug, Clone, Copy)]
pub struct StateChange {
    pub action: CalendarAction,
    pub previous: CalendarState,
    pub current: CalendarState,
}

impl StateChange {
    pub fn selection_changed(&self) -> bool {
        self.previous.selected_date != self.current.selected_date
    }
}

/// Trait for plugins that observe calendar transitions
pub trait StateHook {
    /// Called after the store has replaced its state
    fn on_state_changed(&self, change: &StateChange) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;

    /// Whether this hook should be enabled by default
    fn enabled_by_default(&self) -> bool {
        true
    }
}

/// Registry for managing state hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn StateHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new state hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: StateHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Run every hook in registration order. A failing hook is logged and
    /// the remaining hooks still run.
    pub fn execute_state_hooks(&self, change: &StateChange) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_state_changed(change) {
                log::warn!("Hook '{}' failed: {:#}", hook.name(), e);
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
