use crate::domain::{
    CalendarState, CalendarStore, DatePickerError, DatePickerResult, DayCell, YearWindow,
    build_month_grid, days_in_month,
};
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Inline selector open on top of the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    None,
    /// Cursor is a 1-based month
    Month(u32),
    /// Cursor is a year inside the window
    Year(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Running,
    /// User confirmed the field with this selection
    Confirmed(NaiveDate),
    /// User quit without confirming
    Cancelled,
}

/// Host-side state of the terminal picker. Translates key presses into
/// store mutations; the store itself stays the only owner of calendar state.
pub struct PickerController {
    label: String,
    store: CalendarStore,
    window: YearWindow,
    /// Day of the displayed month under the keyboard cursor
    focused_day: u32,
    editor: Editor,
    outcome: PickerOutcome,
}

impl PickerController {
    pub fn new(label: impl Into<String>, store: CalendarStore, window_length: u32) -> Self {
        let state = store.snapshot();
        Self {
            label: label.into(),
            window: YearWindow::ending_at(state.today, window_length),
            focused_day: state.displayed_date.day(),
            store,
            editor: Editor::None,
            outcome: PickerOutcome::Running,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> CalendarState {
        self.store.snapshot()
    }

    pub fn store_mut(&mut self) -> &mut CalendarStore {
        &mut self.store
    }

    pub fn window(&self) -> YearWindow {
        self.window
    }

    pub fn editor(&self) -> Editor {
        self.editor
    }

    pub fn outcome(&self) -> PickerOutcome {
        self.outcome
    }

    /// Cells of the displayed month
    pub fn grid(&self) -> Vec<DayCell> {
        let state = self.store.snapshot();
        build_month_grid(state.displayed_date, state.today)
    }

    /// Date under the cursor, always inside the displayed month
    pub fn focused_date(&self) -> NaiveDate {
        let displayed = self.store.snapshot().displayed_date;
        let length = days_in_month(displayed.year(), displayed.month()).unwrap_or(28);
        let day = self.focused_day.clamp(1, length);
        displayed.with_day(day).unwrap_or(displayed)
    }

    /// Starts a fresh interaction with the calendar opened on `date`'s month
    pub fn show(&mut self, date: NaiveDate) {
        self.store.set_displayed_date(date);
        self.focused_day = date.day();
        self.store.open();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DatePickerResult<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            self.outcome = PickerOutcome::Cancelled;
            return Ok(());
        }

        if !self.store.snapshot().is_visible {
            self.handle_closed_key(key);
            return Ok(());
        }

        match self.editor {
            Editor::None => self.handle_calendar_key(key),
            Editor::Month(cursor) => self.handle_month_editor_key(key, cursor),
            Editor::Year(cursor) => self.handle_year_editor_key(key, cursor),
        }
    }

    fn handle_closed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.outcome = PickerOutcome::Cancelled,
            KeyCode::Enter => match self.store.snapshot().selected_date {
                Some(date) => self.outcome = PickerOutcome::Confirmed(date),
                None => self.store.toggle_visibility(),
            },
            KeyCode::Char(' ') | KeyCode::Char('o') => self.store.toggle_visibility(),
            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> DatePickerResult<()> {
        match key.code {
            KeyCode::Char('q') => self.outcome = PickerOutcome::Cancelled,
            KeyCode::Esc | KeyCode::Char('x') => self.store.toggle_visibility(),

            KeyCode::Left | KeyCode::Char('h') => self.move_focus(-1)?,
            KeyCode::Right | KeyCode::Char('l') => self.move_focus(1)?,
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(-7)?,
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(7)?,

            KeyCode::PageUp | KeyCode::Char('<') => self.store.show_previous_month()?,
            KeyCode::PageDown | KeyCode::Char('>') => self.store.show_next_month()?,
            KeyCode::Char('t') => {
                self.store.go_to_today();
                self.focused_day = self.store.today().day();
            }

            KeyCode::Enter | KeyCode::Char(' ') => {
                let date = self.focused_date();
                self.store.set_selected_date(date);
            }

            KeyCode::Char('m') => {
                self.editor = Editor::Month(self.store.snapshot().displayed_date.month());
            }
            KeyCode::Char('y') => {
                let year = self.store.snapshot().displayed_date.year();
                self.editor = Editor::Year(self.window.clamp(year));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_month_editor_key(&mut self, key: KeyEvent, cursor: u32) -> DatePickerResult<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.editor = Editor::Month(if cursor == 1 { 12 } else { cursor - 1 });
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.editor = Editor::Month(if cursor == 12 { 1 } else { cursor + 1 });
            }
            KeyCode::Enter => {
                self.editor = Editor::None;
                self.store.pick_month(cursor)?;
            }
            KeyCode::Esc => self.editor = Editor::None,
            _ => {}
        }
        Ok(())
    }

    fn handle_year_editor_key(&mut self, key: KeyEvent, cursor: i32) -> DatePickerResult<()> {
        // The list shows the newest year on top
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.editor = Editor::Year(self.window.clamp(cursor + 1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.editor = Editor::Year(self.window.clamp(cursor - 1));
            }
            KeyCode::PageUp => self.editor = Editor::Year(self.window.clamp(cursor + 10)),
            KeyCode::PageDown => self.editor = Editor::Year(self.window.clamp(cursor - 10)),
            KeyCode::Enter => {
                self.editor = Editor::None;
                self.store.pick_year(cursor)?;
            }
            KeyCode::Esc => self.editor = Editor::None,
            _ => {}
        }
        Ok(())
    }

    /// Moves the cursor by `days`; leaving the displayed month shows the
    /// month the cursor lands in.
    fn move_focus(&mut self, days: i64) -> DatePickerResult<()> {
        let from = self.focused_date();
        let to = from
            .checked_add_signed(Duration::days(days))
            .ok_or(DatePickerError::DateOutOfRange)?;

        if (to.year(), to.month()) != (from.year(), from.month()) {
            self.store.set_displayed_date(to);
        }
        self.focused_day = to.day();
        Ok(())
    }
}
