//! RoomDesk command-line front end.
//!
//! # Responsibility
//! - Parse commands, open the reservation database and call core services.
//! - Own all formatting; business rules stay in `roomdesk_core`.

mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roomdesk_core::db::open_db;
use roomdesk_core::{
    default_log_level, init_logging, ReservationService, ReservationServiceError,
    ReserveRequest, RoomConfigService, SqliteReservationRepository, SqliteRoomConfigRepository,
    StatsReporter,
};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "roomdesk.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "roomdesk", version, about = "Room reservation desk")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "ROOMDESK_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rotating log files; logging is off when unset.
    #[arg(long, global = true, env = "ROOMDESK_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, global = true, env = "ROOMDESK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show free and booked slots for a date.
    Availability(DateArg),
    /// Book a room slot.
    Reserve(ReserveArgs),
    /// Cancel a reservation by id.
    Cancel { reservation_id: String },
    /// Show one reservation.
    Show { reservation_id: String },
    /// List reservations of a date with their time windows.
    Day(DateArg),
    /// Find reservations matching any of the given criteria.
    Search(SearchArgs),
    /// Show or change room settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Reservation counts.
    Stats,
    /// Print the core version.
    Version,
}

#[derive(Args, Debug)]
struct DateArg {
    /// `YYYY-MM-DD`; defaults to today.
    #[arg(long)]
    date: Option<String>,
}

#[derive(Args, Debug)]
struct ReserveArgs {
    #[arg(long)]
    date: String,
    #[arg(long)]
    room: u32,
    #[arg(long)]
    slot: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    agent: Option<String>,
    #[arg(long = "request")]
    special_request: Option<String>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        rooms: u32,
        /// Comma separated `HH:MM` labels.
        #[arg(long, value_delimiter = ',')]
        slots: Vec<String>,
        /// Slot length in hours; unchanged when omitted.
        #[arg(long)]
        duration: Option<u32>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    if let Command::Version = cli.command {
        println!("roomdesk_core version={}", roomdesk_core::core_version());
        return Ok(());
    }

    let db_path = resolve_db_path(cli.db);
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let settings = RoomConfigService::new(SqliteRoomConfigRepository::try_new(&conn)?);
    let config = settings.initialize()?;
    let reservations = ReservationService::new(SqliteReservationRepository::try_new(&conn)?);
    let json = cli.json;

    match cli.command {
        Command::Availability(arg) => {
            let snapshot = reservations.availability(&config, &date_or_today(arg.date))?;
            output::availability(&snapshot, json)
        }
        Command::Reserve(args) => {
            let request = ReserveRequest {
                date: args.date,
                room_number: args.room,
                time_slot: args.slot,
                name: args.name,
                reserve_agent: args.agent,
                special_request: args.special_request,
            };
            match reservations.reserve(&config, &request) {
                Ok(receipt) => output::receipt(&receipt, json),
                Err(ReservationServiceError::Conflict(conflict)) => {
                    output::conflict(&conflict, json)?;
                    anyhow::bail!("cell already reserved")
                }
                Err(err) => Err(err.into()),
            }
        }
        Command::Cancel { reservation_id } => {
            let cancelled = reservations.cancel(&reservation_id)?;
            output::cancelled(&cancelled, json)
        }
        Command::Show { reservation_id } => {
            let reservation = reservations.get(&reservation_id)?;
            output::reservation_detail(&reservation, &config, json)
        }
        Command::Day(arg) => {
            let date = date_or_today(arg.date);
            let listing = reservations.reservations_for_date(&config, &date)?;
            output::day_listing(&date, &listing, json)
        }
        Command::Search(args) => {
            let found = reservations.search(
                args.date.as_deref(),
                args.id.as_deref(),
                args.name.as_deref(),
            )?;
            output::search_results(&found, json)
        }
        Command::Settings(SettingsCommand::Show) => output::settings(&config, json),
        Command::Settings(SettingsCommand::Set {
            rooms,
            slots,
            duration,
        }) => {
            let updated = settings.update_settings(rooms, slots.as_slice(), duration)?;
            output::settings(&updated, json)
        }
        Command::Stats => {
            let stats = StatsReporter::new(SqliteReservationRepository::try_new(&conn)?).report()?;
            output::stats(&stats, json)
        }
        Command::Version => Ok(()),
    }
}

fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

fn date_or_today(date: Option<String>) -> String {
    date.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::{date_or_today, resolve_db_path, Cli, Command, SettingsCommand};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn settings_set_splits_slot_list() {
        let cli = Cli::try_parse_from([
            "roomdesk", "settings", "set", "--rooms", "2", "--slots", "09:00,10:00",
        ])
        .unwrap();
        match cli.command {
            Command::Settings(SettingsCommand::Set {
                rooms,
                slots,
                duration,
            }) => {
                assert_eq!(rooms, 2);
                assert_eq!(slots, vec!["09:00", "10:00"]);
                assert_eq!(duration, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn db_path_falls_back_to_temp_dir() {
        assert_eq!(
            resolve_db_path(Some(PathBuf::from("/data/rooms.db"))),
            PathBuf::from("/data/rooms.db")
        );
        assert!(resolve_db_path(None).ends_with("roomdesk.sqlite3"));
        assert!(resolve_db_path(Some(PathBuf::new())).ends_with("roomdesk.sqlite3"));
    }

    #[test]
    fn explicit_date_wins_over_today() {
        assert_eq!(date_or_today(Some("2024-01-01".to_string())), "2024-01-01");
        assert_eq!(date_or_today(Some(" ".to_string())).len(), 10);
    }
}
