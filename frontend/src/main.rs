//! # Habit Tracker CLI
//!
//! Terminal client for the habit tracker backend. Auth commands talk to the
//! API directly; habit and log commands go through the dashboard state, so
//! toggles run the same optimistic flip-then-confirm flow a graphical
//! client would.

mod services;
mod state;
mod view;

use clap::{value_parser, Arg, ArgAction, Command};
use tracing::{warn, Level};

use services::ApiClient;
use shared::{CreateHabitRequest, SignInRequest, SignUpRequest};
use state::{DashboardState, ToggleResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::WARN).init();

    let matches = build_cli().get_matches();

    let server_url = std::env::var("HABITS_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    let mut api = ApiClient::new(server_url);
    if let Some(token) = services::session::load_token() {
        api = api.with_token(token);
    }

    match matches.subcommand() {
        Some(("signup", args)) => {
            let request = SignUpRequest {
                name: args.get_one::<String>("name").unwrap().clone(),
                email: args.get_one::<String>("email").unwrap().clone(),
                password: args.get_one::<String>("password").unwrap().clone(),
            };
            let response = api.sign_up(request).await?;
            services::session::save_token(&response.token)?;
            println!("Welcome, {}. You are signed in.", response.user.name);
        }
        Some(("signin", args)) => {
            let request = SignInRequest {
                email: args.get_one::<String>("email").unwrap().clone(),
                password: args.get_one::<String>("password").unwrap().clone(),
            };
            let response = api.sign_in(request).await?;
            services::session::save_token(&response.token)?;
            println!("Signed in as {}.", response.user.name);
        }
        Some(("signout", _)) => {
            // Revoke server-side first, but a dead token still gets cleared
            if let Err(error) = api.sign_out().await {
                warn!("Server sign-out failed: {}", error);
            }
            services::session::clear_token()?;
            println!("Signed out.");
        }
        Some(("whoami", _)) => {
            let response = api.current_user().await?;
            println!("{} <{}>", response.user.name, response.user.email);
        }
        Some(("list", _)) => {
            let mut dashboard = DashboardState::new(api);
            dashboard.refresh().await?;
            if dashboard.habits().is_empty() {
                println!("No habits yet. Add one with: habits add --name <NAME>");
            } else {
                let today = shared::date_key::today_key();
                for habit in dashboard.habits() {
                    let mark = if dashboard.log_store().is_logged(&habit.id, &today) {
                        "*"
                    } else {
                        " "
                    };
                    let total = dashboard.log_store().logs_for_habit(&habit.id).len();
                    println!(
                        "{} {}  {}  {} ({} days logged)",
                        mark, habit.id, habit.color, habit.name, total
                    );
                }
                println!("\n* = done today ({})", today);
            }
        }
        Some(("add", args)) => {
            let request = CreateHabitRequest {
                name: args.get_one::<String>("name").unwrap().clone(),
                color: args.get_one::<String>("color").unwrap().clone(),
                description: args.get_one::<String>("description").cloned(),
            };
            let mut dashboard = DashboardState::new(api);
            dashboard.refresh().await?;
            let habit = dashboard.create_habit(request).await?;
            println!("Created {}: {}", habit.id, habit.name);
        }
        Some(("remove", args)) => {
            let habit_id = args.get_one::<String>("habit_id").unwrap();
            let mut dashboard = DashboardState::new(api);
            dashboard.refresh().await?;
            let response = dashboard.delete_habit(habit_id).await?;
            println!(
                "Removed {} ({} logs deleted)",
                response.habit_id, response.removed_log_count
            );
        }
        Some(("toggle", args)) => {
            let habit_id = args.get_one::<String>("habit_id").unwrap();
            let date = args
                .get_one::<String>("date")
                .cloned()
                .unwrap_or_else(shared::date_key::today_key);
            let notes = args.get_one::<String>("notes").cloned();

            let mut dashboard = DashboardState::new(api);
            dashboard.refresh().await?;
            let name = dashboard
                .habits()
                .iter()
                .find(|h| h.id == *habit_id)
                .map(|h| h.name.clone())
                .unwrap_or_else(|| habit_id.clone());

            let result = dashboard.toggle_log(habit_id, &date, notes).await?;
            let done_count = dashboard.log_store().logs_on(&date).len();
            match result {
                ToggleResult::Logged(log) => {
                    println!(
                        "Logged {} on {} ({} habit(s) done that day)",
                        name, log.date, done_count
                    );
                }
                ToggleResult::Cleared { .. } => {
                    println!(
                        "Cleared {} on {} ({} habit(s) done that day)",
                        name, date, done_count
                    );
                }
                ToggleResult::UnknownHabit => {
                    eprintln!("No habit with ID {}. Run `habits list` to see yours.", habit_id);
                    std::process::exit(1);
                }
            }
        }
        Some(("month", args)) => {
            let mut dashboard = DashboardState::new(api);
            dashboard.refresh().await?;

            let focus = dashboard.focus();
            let month = args.get_one::<u32>("month").copied().unwrap_or(focus.month);
            let year = args.get_one::<u32>("year").copied().unwrap_or(focus.year);
            dashboard.set_focus(month, year);
            if args.get_flag("prev") {
                dashboard.go_previous_month();
            }
            if args.get_flag("next") {
                dashboard.go_next_month();
            }

            let calendar = dashboard.calendar_month().await?;
            let filter = args.get_one::<String>("habit").map(String::as_str);
            print!("{}", view::render_month(&calendar, dashboard.habits(), filter));
        }
        _ => {}
    }

    Ok(())
}

fn build_cli() -> Command {
    Command::new("habits")
        .version("0.1.0")
        .about("Track daily habits from the terminal")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("signup")
                .about("Create an account and sign in")
                .arg(Arg::new("name").long("name").required(true).help("Display name"))
                .arg(Arg::new("email").long("email").required(true).help("Email address"))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .required(true)
                        .help("Password, at least 6 characters"),
                ),
        )
        .subcommand(
            Command::new("signin")
                .about("Sign in to an existing account")
                .arg(Arg::new("email").long("email").required(true).help("Email address"))
                .arg(Arg::new("password").long("password").required(true).help("Password")),
        )
        .subcommand(Command::new("signout").about("Sign out and forget the saved session"))
        .subcommand(Command::new("whoami").about("Show the signed-in account"))
        .subcommand(Command::new("list").about("List your habits"))
        .subcommand(
            Command::new("add")
                .about("Create a new habit")
                .arg(Arg::new("name").long("name").required(true).help("Habit name"))
                .arg(
                    Arg::new("color")
                        .long("color")
                        .default_value("#4caf50")
                        .help("Display color as a hex code"),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .help("Optional description"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Delete a habit and all of its logs")
                .arg(Arg::new("habit_id").required(true).help("Habit ID from `habits list`")),
        )
        .subcommand(
            Command::new("toggle")
                .about("Flip a habit's completion for a day")
                .arg(Arg::new("habit_id").required(true).help("Habit ID from `habits list`"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Day as YYYY-MM-DD (defaults to today)"),
                )
                .arg(
                    Arg::new("notes")
                        .long("notes")
                        .help("Note stored when the toggle logs the day"),
                ),
        )
        .subcommand(
            Command::new("month")
                .about("Show a month of completions as a calendar grid")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_parser(value_parser!(u32).range(1..=12))
                        .help("Month number (defaults to the current month)"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(u32))
                        .help("Year (defaults to the current year)"),
                )
                .arg(
                    Arg::new("prev")
                        .long("prev")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["month", "year"])
                        .help("Show the month before the focused one"),
                )
                .arg(
                    Arg::new("next")
                        .long("next")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("prev")
                        .conflicts_with_all(["month", "year"])
                        .help("Show the month after the focused one"),
                )
                .arg(
                    Arg::new("habit")
                        .long("habit")
                        .help("Only mark days completed for this habit ID"),
                ),
        )
}
