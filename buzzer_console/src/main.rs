#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod network;
mod tui;

use std::time::Duration;

use clap::{Arg, ArgMatches, Command, arg};

use client_main::{ClientConfig, LandingCommand};


fn main() -> anyhow::Result<()> {
    // Logs go to stderr so that they can be redirected away from the TUI: `2>buzzer.log`.
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = cli().get_matches();

    let (command, sub_matches) = match matches.subcommand() {
        Some(("create", sub_matches)) => (
            LandingCommand::Create {
                username: get_string(sub_matches, "username"),
            },
            sub_matches,
        ),
        Some(("join", sub_matches)) => (
            LandingCommand::Join {
                game_ext_id: get_string(sub_matches, "game_id"),
                username: get_string(sub_matches, "username"),
            },
            sub_matches,
        ),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    };
    client_main::run(ClientConfig {
        server_address: get_string(sub_matches, "server"),
        poll_interval: sub_matches
            .get_one::<Duration>("poll-interval")
            .copied()
            .unwrap_or(buzzer::poll::POLL_INTERVAL),
        command,
    })
}

fn cli() -> Command {
    let server_arg = arg!(--"server" <url> "Server base URL")
        .default_value("http://localhost:8080/")
        .global(true);
    let poll_interval_arg = Arg::new("poll-interval")
        .long("poll-interval")
        .value_name("duration")
        .help("How often to fetch game state, e.g. \"200ms\" or \"1s\"")
        .value_parser(humantime::parse_duration)
        .default_value("200ms")
        .global(true);

    Command::new("Buzzer")
        .version(clap::crate_version!())
        .about("Buzzer quiz game console client")
        .subcommand_required(true)
        .arg(server_arg)
        .arg(poll_interval_arg)
        .subcommand(
            Command::new("create")
                .about("Create a new game and enter it")
                .arg(arg!(<username> "Your name in the game")),
        )
        .subcommand(
            Command::new("join")
                .about("Join an existing game")
                .arg(arg!(<game_id> "Game ID shared by the creator"))
                .arg(arg!(<username> "Your name in the game")),
        )
}

// Only for arguments that are required or have a default value.
fn get_string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}
