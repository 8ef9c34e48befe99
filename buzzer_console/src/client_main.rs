use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};
use buzzer::event::NotableEvent;
use buzzer::game_view::GameViewState;
use buzzer::landing::LandingState;
use buzzer::network::{OutgoingRequest, RequestId, RequestResult};
use buzzer::session_store::MemoryStorage;
use crossterm::event::{self as term_event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, style, terminal};
use itertools::Itertools;
use scopeguard::defer;

use crate::network::HttpClient;
use crate::tui;


pub enum LandingCommand {
    Create { username: String },
    Join { game_ext_id: String, username: String },
}

pub struct ClientConfig {
    pub server_address: String,
    pub poll_interval: Duration,
    pub command: LandingCommand,
}

enum IncomingEvent {
    Network(RequestId, RequestResult),
    Terminal(term_event::Event),
    Tick,
}

enum KeyAction {
    Buzz,
    ClearBuzz,
    QNumUp,
    QNumDown,
    Quit,
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let http = HttpClient::new(&config.server_address)?;
    // The storage plays the role of the browser tab: landing fills it, game view reads it.
    let storage = enter_game(&http, &config.command)?;
    run_game_view(&http, &storage, config.poll_interval)
}

fn enter_game(http: &HttpClient, command: &LandingCommand) -> anyhow::Result<MemoryStorage> {
    let (requests_tx, requests_rx) = mpsc::channel();
    let mut landing = LandingState::new(MemoryStorage::new(), requests_tx);
    match command {
        LandingCommand::Create { username } => landing.create(username),
        LandingCommand::Join { game_ext_id, username } => landing.join(username, game_ext_id),
    };
    // Landing has nothing to show while waiting, so plain blocking calls are fine here.
    for OutgoingRequest { id, request } in requests_rx.try_iter().collect_vec() {
        let result = http.send(&request);
        match landing.process_response(id, result) {
            NotableEvent::Navigate(path) => println!("Entering game at {path}"),
            NotableEvent::Alert(message) => bail!("{message}"),
            NotableEvent::None | NotableEvent::GameUpdated => {}
        }
    }
    Ok(landing.into_storage())
}

fn key_action(event: &term_event::Event) -> Option<KeyAction> {
    let term_event::Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // Raw mode swallows Ctrl+C, so handle it by hand.
        return (key.code == KeyCode::Char('c')).then_some(KeyAction::Quit);
    }
    match key.code {
        KeyCode::Char('b') | KeyCode::Char(' ') => Some(KeyAction::Buzz),
        KeyCode::Char('c') => Some(KeyAction::ClearBuzz),
        KeyCode::Char('+') | KeyCode::Up => Some(KeyAction::QNumUp),
        KeyCode::Char('-') | KeyCode::Down => Some(KeyAction::QNumDown),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        _ => None,
    }
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(
            stdout,
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            cursor::MoveToNextLine(1)
        )?;
    }
    Ok(())
}

fn render(stdout: &mut io::Stdout, state: &GameViewState) -> io::Result<()> {
    let game_ext_id = state.game_ext_id().map_or("", |id| id.as_str());
    let q_num = state.has_game_state().then(|| state.q_num());
    execute!(stdout, cursor::MoveTo(0, 0))?;
    writeln_raw(stdout, tui::render_game(game_ext_id, q_num, &state.player_rows()))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    Ok(())
}

fn run_game_view(
    http: &HttpClient, storage: &MemoryStorage, poll_interval: Duration,
) -> anyhow::Result<()> {
    let (requests_tx, requests_rx) = mpsc::channel();
    let mut state = GameViewState::new(storage, requests_tx);
    if let NotableEvent::Navigate(_) = state.initial_event() {
        bail!("Not in a game");
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("Cannot enter raw mode")?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    };

    let (tx, rx) = mpsc::channel();
    let tx_local = tx.clone();
    let tx_tick = tx.clone();
    thread::spawn(move || {
        loop {
            match term_event::read() {
                Ok(ev) => {
                    if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("Cannot read terminal input: {err}");
                    break;
                }
            }
        }
    });
    // The poll timer stops as soon as the event loop is gone.
    thread::spawn(move || {
        loop {
            thread::sleep(poll_interval);
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                break;
            }
        }
    });

    render(&mut stdout, &state)?;
    for event in rx.iter() {
        let mut need_render = false;
        match event {
            IncomingEvent::Tick => {
                state.poll();
            }
            IncomingEvent::Terminal(event) => {
                match key_action(&event) {
                    Some(KeyAction::Buzz) => {
                        state.buzz();
                    }
                    Some(KeyAction::ClearBuzz) => {
                        state.clear_buzz();
                    }
                    Some(KeyAction::QNumUp) => {
                        state.q_num_up();
                    }
                    Some(KeyAction::QNumDown) => {
                        state.q_num_down();
                    }
                    Some(KeyAction::Quit) => return Ok(()),
                    None => {}
                }
                need_render = matches!(event, term_event::Event::Resize(..));
            }
            IncomingEvent::Network(id, result) => match state.process_response(id, result) {
                NotableEvent::None => {}
                NotableEvent::GameUpdated => need_render = true,
                NotableEvent::Navigate(_) => bail!("The server no longer accepts this session"),
                NotableEvent::Alert(message) => bail!("{message}"),
            },
        }
        for outgoing in requests_rx.try_iter() {
            http.spawn_send(outgoing, tx.clone(), IncomingEvent::Network);
        }
        if need_render {
            render(&mut stdout, &state)?;
        }
    }
    unreachable!("The event loop keeps a sender alive");
}
