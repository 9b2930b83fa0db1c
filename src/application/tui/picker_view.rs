use super::controller::{Editor, PickerController, PickerOutcome};
use super::theme::Theme;
use crate::domain::{
    CalendarState, DayCell, MONTH_ABBREVIATIONS, WEEK_HEADER, format_field, format_long,
    visible_month_label, weeks,
};
use chrono::Datelike;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEventKind, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row,
        Table,
    },
};
use std::io::{self, Stderr, stderr};

const POPOVER_WIDTH: u16 = 38;
const POPOVER_HEIGHT: u16 = 14;
const FIELD_HEIGHT: u16 = 3;

pub struct PickerView {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    theme: Theme,
    /// Last navigation error, shown in the footer
    status: Option<String>,
}

impl PickerView {
    /// Draws on stderr so stdout stays free for the chosen date.
    pub fn new(theme: Theme) -> io::Result<Self> {
        if !IsTty::is_tty(&stderr()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stderr().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stderr());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stderr().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            terminal,
            theme,
            status: None,
        })
    }

    /// Run the picker loop until the user confirms or quits
    pub fn run(&mut self, controller: &mut PickerController) -> io::Result<PickerOutcome> {
        while controller.outcome() == PickerOutcome::Running {
            let theme = &self.theme;
            let status = self.status.as_deref();
            self.terminal.draw(|frame| draw(frame, controller, theme, status))?;

            if !poll(std::time::Duration::from_millis(100))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.status = match controller.handle_key(key) {
                        Ok(()) => None,
                        Err(e) => {
                            log::warn!("Ignoring key {:?}: {}", key.code, e);
                            Some(e.to_string())
                        }
                    };
                }
                // Resize and everything else just redraws
                _ => continue,
            }
        }

        self.cleanup()?;
        Ok(controller.outcome())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for PickerView {
    fn drop(&mut self) {
        // Fallback cleanup if run() did not finish
        let _ = self.cleanup();
    }
}

/// Draws the field and, when open, the calendar popover below it
pub fn draw(frame: &mut Frame, controller: &PickerController, theme: &Theme, status: Option<&str>) {
    let area = frame.area();
    let state = controller.state();

    let total_height = if state.is_visible {
        FIELD_HEIGHT + POPOVER_HEIGHT
    } else {
        FIELD_HEIGHT
    };
    let centered = centered_area(area, POPOVER_WIDTH, total_height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FIELD_HEIGHT), Constraint::Min(0)])
        .split(centered);

    frame.render_widget(field_widget(controller.label(), &state, theme), chunks[0]);

    if !state.is_visible {
        return;
    }

    let popover = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.colors.border.to_ratatui())
        .title(Line::from(vec![
            Span::styled("< ", theme.colors.help_text.to_ratatui()),
            Span::styled(
                visible_month_label(state.displayed_date),
                theme.colors.title.to_ratatui_with_modifier(Modifier::BOLD),
            ),
            Span::styled(" >", theme.colors.help_text.to_ratatui()),
        ]))
        .title_alignment(Alignment::Center);
    let inner = popover.inner(chunks[1]);
    frame.render_widget(Clear, chunks[1]);
    frame.render_widget(popover, chunks[1]);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let grid = controller.grid();
    frame.render_widget(
        month_table(&grid, &state, controller.focused_date(), theme),
        parts[0],
    );
    frame.render_widget(footer_widget(&state, theme, status), parts[1]);

    match controller.editor() {
        Editor::None => {}
        Editor::Month(cursor) => {
            let items: Vec<ListItem> = MONTH_ABBREVIATIONS
                .iter()
                .map(|m| ListItem::new(*m))
                .collect();
            let mut list_state = ListState::default().with_selected(Some(cursor as usize - 1));
            render_selector(frame, parts[0], "Month", items, &mut list_state, theme);
        }
        Editor::Year(cursor) => {
            let years = controller.window().years();
            let items: Vec<ListItem> = years
                .iter()
                .map(|y| ListItem::new(y.to_string()))
                .collect();
            let selected = years.iter().position(|&y| y == cursor);
            let mut list_state = ListState::default().with_selected(selected);
            render_selector(frame, parts[0], "Year", items, &mut list_state, theme);
        }
    }
}

/// The labelled text field
fn field_widget(label: &str, state: &CalendarState, theme: &Theme) -> Paragraph<'static> {
    let value_style = if state.selected_date.is_some() {
        theme.colors.field.to_ratatui_with_modifier(Modifier::BOLD)
    } else {
        theme.colors.placeholder.to_ratatui()
    };

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", label), theme.colors.label.to_ratatui()),
        Span::styled(format_field(state.selected_date), value_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.colors.border.to_ratatui()),
    )
}

/// Monday-first table of the displayed month
fn month_table(
    grid: &[DayCell],
    state: &CalendarState,
    focused: chrono::NaiveDate,
    theme: &Theme,
) -> Table<'static> {
    let header = Row::new(WEEK_HEADER.iter().enumerate().map(|(column, name)| {
        let style = if column >= 5 {
            theme.colors.weekend.to_ratatui()
        } else {
            theme.colors.header.to_ratatui()
        };
        Cell::from(*name).style(style.add_modifier(Modifier::BOLD))
    }));

    let rows: Vec<Row> = weeks(grid)
        .map(|week| {
            Row::new(week.iter().map(|cell| match cell.day() {
                None => Cell::from(""),
                Some(day) => Cell::from(format!("{:>3}", day.day_index))
                    .style(day_style(cell, state, focused, theme)),
            }))
        })
        .collect();

    Table::new(rows, [Constraint::Length(4); 7])
        .header(header)
        .column_spacing(1)
}

/// Selected wins over today, today over the keyboard cursor
fn day_style(
    cell: &DayCell,
    state: &CalendarState,
    focused: chrono::NaiveDate,
    theme: &Theme,
) -> Style {
    let is_focused = cell.full_date() == Some(focused);
    let base = if cell.is_selected(state.selected_date) {
        theme.colors.selected.to_ratatui_with_modifier(Modifier::BOLD)
    } else if cell.is_today() {
        theme.colors.today.to_ratatui_with_modifier(Modifier::BOLD)
    } else if is_focused {
        theme.colors.focused.to_ratatui()
    } else if matches!(cell.day_of_week(), Some(0) | Some(6)) {
        theme.colors.weekend.to_ratatui()
    } else {
        theme.colors.day.to_ratatui()
    };

    if is_focused {
        base.add_modifier(Modifier::UNDERLINED)
    } else {
        base
    }
}

fn footer_widget(state: &CalendarState, theme: &Theme, status: Option<&str>) -> Paragraph<'static> {
    let first = match (status, state.selected_date) {
        (Some(error), _) => Line::from(Span::styled(
            error.to_string(),
            theme.colors.error_text.to_ratatui(),
        )),
        (None, Some(date)) => Line::from(Span::styled(
            format_long(date),
            theme.colors.field.to_ratatui(),
        )),
        (None, None) => Line::from(Span::styled(
            "No date selected",
            theme.colors.placeholder.to_ratatui(),
        )),
    };

    Paragraph::new(vec![
        first,
        Line::from(Span::styled(
            "<> month  m/y pick  t today  Esc OK",
            theme.colors.help_text.to_ratatui(),
        )),
    ])
    .alignment(Alignment::Center)
}

fn render_selector(
    frame: &mut Frame,
    over: Rect,
    title: &str,
    items: Vec<ListItem<'static>>,
    list_state: &mut ListState,
    theme: &Theme,
) {
    let area = centered_area(over, 12, over.height);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.colors.border.to_ratatui())
                .title(title.to_string()),
        )
        .highlight_style(theme.colors.selected.to_ratatui_with_modifier(Modifier::BOLD));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, list_state);
}

/// Calculate centered area with both horizontal and vertical centering
fn centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
    let width = std::cmp::min(available.width, needed_width);
    let height = std::cmp::min(available.height, needed_height);

    Rect {
        x: available.x + (available.width - width) / 2,
        y: available.y + (available.height - height) / 2,
        width,
        height,
    }
}

/// Plain-text rendering of a grid for non-interactive output. Today is
/// marked with `*`.
pub fn grid_to_text(grid: &[DayCell]) -> String {
    let mut out = WEEK_HEADER
        .iter()
        .map(|name| format!("{:>4}", name))
        .collect::<String>();
    out.push('\n');

    for week in weeks(grid) {
        let line: String = week
            .iter()
            .map(|cell| match cell.day() {
                None => "    ".to_string(),
                Some(day) if day.is_today => format!("{:>3}*", day.day_index),
                Some(day) => format!("{:>4}", day.day_index),
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Heading printed above [`grid_to_text`]
pub fn grid_title(grid: &[DayCell]) -> Option<String> {
    grid.iter()
        .find_map(DayCell::full_date)
        .map(|d| format!("{} {}", MONTH_ABBREVIATIONS[d.month0() as usize], d.year()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalendarStore, build_month_grid};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn render(controller: &PickerController) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| draw(frame, controller, &Theme::default(), None))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_closed_picker_shows_only_the_field() {
        let controller =
            PickerController::new("Date of Birth", CalendarStore::new(date(2024, 3, 5)), 80);
        let screen = render(&controller);

        assert!(screen.contains("Date of Birth"));
        assert!(screen.contains("-- -- --"));
        assert!(!screen.contains("Mon"));
    }

    #[test]
    fn test_open_picker_shows_month_and_selection() {
        let mut store = CalendarStore::new(date(2024, 3, 5));
        store.set_selected_date(date(2024, 3, 18));
        let mut controller = PickerController::new("Start", store, 80);
        controller.show(date(2024, 3, 1));

        let screen = render(&controller);
        assert!(screen.contains("Mar 2024"));
        assert!(screen.contains("Mon"));
        assert!(screen.contains("Sun"));
        assert!(screen.contains("31"));
        assert!(screen.contains("18 Mar 24"));
        assert!(screen.contains("Mon Mar 18 2024"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut store = CalendarStore::new(date(2024, 3, 5));
        store.open();
        let controller = PickerController::new("Due", store, 80);

        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal
            .draw(|frame| draw(frame, &controller, &Theme::default(), Some("oops")))
            .unwrap();
    }

    #[test]
    fn test_grid_to_text() {
        // 2024-09-01 is a Sunday: one fully blank row first
        let grid = build_month_grid(date(2024, 9, 1), date(2024, 9, 3));
        let text = grid_to_text(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], " Mon Tue Wed Thu Fri Sat Sun");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "   1   2  3*   4   5   6   7");
        assert_eq!(lines.last().unwrap().trim(), "29  30");
        assert_eq!(grid_title(&grid), Some("Sep 2024".to_string()));
    }

    #[test]
    fn test_grid_to_text_without_today() {
        let grid = build_month_grid(date(2024, 9, 1), date(2024, 10, 3));
        let text = grid_to_text(&grid);

        assert!(!text.contains('*'));
        assert_eq!(text.lines().nth(2), Some("   1   2   3   4   5   6   7"));
    }
}
