use crate::application::{
    DatePickerApp, grid_title, grid_to_text, init_file_logging, init_stderr_logging,
    parse_year_month,
};
use crate::domain::format_long;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "datepick")]
#[command(about = "A terminal date picker with a month calendar popover")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive picker and print the chosen date
    Pick {
        /// Field label (defaults to DATEPICK_LABEL or "Date of Birth")
        #[arg(short, long)]
        label: Option<String>,
        /// Month to show first (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Print the calendar grid of a month
    Grid {
        /// Month to print (YYYY-MM format, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Print the cells as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the selection last mirrored for a label
    Last {
        #[arg(short, long)]
        label: Option<String>,
    },
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?)
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let app = DatePickerApp::new();

        match cli.command {
            Some(Commands::Grid { month, json }) => {
                init_stderr_logging()?;
                let month = month.as_deref().map(parse_year_month).transpose()?;
                let grid = app.month_grid(month)?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&grid)?);
                } else {
                    if let Some(title) = grid_title(&grid) {
                        println!("{}", title);
                    }
                    println!("{}", grid_to_text(&grid));
                }
            }
            Some(Commands::Last { label }) => {
                init_stderr_logging()?;
                match app.last_selection(label.as_deref())? {
                    Some(date) => println!("{}", format_long(date)),
                    None => println!("No date selected yet"),
                }
            }
            Some(Commands::Pick { label, date }) => {
                let initial = date.as_deref().map(parse_date).transpose()?;
                pick(&app, label.as_deref(), initial)?;
            }
            None => {
                // Default: pick with the configured label
                pick(&app, None, None)?;
            }
        }

        Ok(())
    }
}

fn pick(
    app: &DatePickerApp,
    label: Option<&str>,
    initial: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let _guard = init_file_logging(&app.config().log_dir)?;
    if let Some(date) = app.pick(label, initial)? {
        println!("{}", date.format("%Y-%m-%d"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_subcommands() {
        let cli =
            Cli::try_parse_from(["datepick", "grid", "--month", "2024-03", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Grid { month, json }) => {
                assert_eq!(month.as_deref(), Some("2024-03"));
                assert!(json);
            }
            _ => panic!("expected grid"),
        }

        let cli =
            Cli::try_parse_from(["datepick", "pick", "-l", "Start", "-d", "2024-03-05"]).unwrap();
        match cli.command {
            Some(Commands::Pick { label, date }) => {
                assert_eq!(label.as_deref(), Some("Start"));
                assert_eq!(date.as_deref(), Some("2024-03-05"));
            }
            _ => panic!("expected pick"),
        }

        assert!(Cli::try_parse_from(["datepick"]).unwrap().command.is_none());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
    }
}
