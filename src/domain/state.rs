use crate::domain::{DatePickerResult, next_month, previous_month, with_month, with_year};
use crate::infrastructure::{HookRegistry, StateChange};
use chrono::{Local, NaiveDate};

/// Snapshot of one picker's calendar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    pub is_visible: bool,
    /// Frozen at store creation
    pub today: NaiveDate,
    /// Month being shown; the day component only has to be valid
    pub displayed_date: NaiveDate,
    pub selected_date: Option<NaiveDate>,
}

/// Transitions accepted by [`CalendarStore`]. None of them is guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    ToggleVisibility,
    SetVisibility(bool),
    SetDisplayedDate(NaiveDate),
    SetSelectedDate(NaiveDate),
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            is_visible: false,
            today,
            displayed_date: today,
            selected_date: None,
        }
    }

    /// Derives the next snapshot. Exactly one field changes per action and
    /// `today` never does.
    pub fn reduce(self, action: CalendarAction) -> Self {
        match action {
            CalendarAction::ToggleVisibility => Self {
                is_visible: !self.is_visible,
                ..self
            },
            CalendarAction::SetVisibility(is_visible) => Self { is_visible, ..self },
            CalendarAction::SetDisplayedDate(displayed_date) => Self {
                displayed_date,
                ..self
            },
            CalendarAction::SetSelectedDate(date) => Self {
                selected_date: Some(date),
                ..self
            },
        }
    }
}

/// Owns the state of one mounted picker and notifies hooks after every
/// transition.
pub struct CalendarStore {
    state: CalendarState,
    hooks: HookRegistry,
}

impl CalendarStore {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_hooks(today, HookRegistry::new())
    }

    pub fn with_hooks(today: NaiveDate, hooks: HookRegistry) -> Self {
        Self {
            state: CalendarState::new(today),
            hooks,
        }
    }

    /// Store whose `today` is the local calendar date at this moment.
    pub fn from_clock() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn snapshot(&self) -> CalendarState {
        self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.state.today
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Replaces the state with the one derived from `action` and returns it.
    pub fn dispatch(&mut self, action: CalendarAction) -> CalendarState {
        let previous = self.state;
        let current = previous.reduce(action);
        self.state = current;

        log::debug!("calendar {:?}: {:?} -> {:?}", action, previous, current);

        let change = StateChange {
            action,
            previous,
            current,
        };
        self.hooks.execute_state_hooks(&change);
        current
    }

    pub fn toggle_visibility(&mut self) {
        self.dispatch(CalendarAction::ToggleVisibility);
    }

    pub fn set_displayed_date(&mut self, date: NaiveDate) {
        self.dispatch(CalendarAction::SetDisplayedDate(date));
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.dispatch(CalendarAction::SetSelectedDate(date));
    }

    pub fn open(&mut self) {
        if !self.state.is_visible {
            self.dispatch(CalendarAction::SetVisibility(true));
        }
    }

    pub fn close(&mut self) {
        if self.state.is_visible {
            self.dispatch(CalendarAction::SetVisibility(false));
        }
    }

    pub fn show_previous_month(&mut self) -> DatePickerResult<()> {
        let date = previous_month(self.state.displayed_date)?;
        self.set_displayed_date(date);
        Ok(())
    }

    pub fn show_next_month(&mut self) -> DatePickerResult<()> {
        let date = next_month(self.state.displayed_date)?;
        self.set_displayed_date(date);
        Ok(())
    }

    /// Shows `month` (1-12) of the displayed year.
    pub fn pick_month(&mut self, month: u32) -> DatePickerResult<()> {
        let date = with_month(self.state.displayed_date, month)?;
        self.set_displayed_date(date);
        Ok(())
    }

    /// Shows the displayed month of `year`.
    pub fn pick_year(&mut self, year: i32) -> DatePickerResult<()> {
        let date = with_year(self.state.displayed_date, year)?;
        self.set_displayed_date(date);
        Ok(())
    }

    pub fn go_to_today(&mut self) {
        self.set_displayed_date(self.state.today);
    }
}
