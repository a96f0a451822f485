use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Local;
use pokedex_core::{update, AppState, Msg};
use pokedex_engine::ReqwestCatalogClient;
use pokedex_logging::{dex_info, dex_warn};

use super::commands::{parse_command, Command, HELP};
use super::config::{AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::render::{render, render_categories};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = AppConfig::load(&config_path)?;
    pokedex_logging::initialize(config.log_destination(), config.log_level());

    let client = ReqwestCatalogClient::new(config.client_settings())
        .context("failed to build catalog client")?;
    let mut state = AppState::with_first_page(client.first_page_url());

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let runner = EffectRunner::new(Arc::new(client), cmd_tx.clone());
    spawn_input_reader(cmd_tx);

    println!("{HELP}\n");
    state = dispatch(state, Msg::Started, &runner);

    while let Ok(command) = cmd_rx.recv() {
        match command {
            Command::Dispatch(msg) => state = dispatch(state, msg, &runner),
            Command::ListTypes => println!("{}", render_categories(&state.view().listing)),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(line) => println!("Unknown command `{line}`. Type `help`."),
        }
    }

    dex_info!("Exiting");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        let clock = Local::now().format("%H:%M:%S").to_string();
        println!("{}\n", render(&state.view(), &clock));
    }
    state
}

/// Forwards stdin lines as commands; end of input quits.
fn spawn_input_reader(cmd_tx: mpsc::Sender<Command>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    dex_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            if cmd_tx.send(parse_command(&line)).is_err() {
                return;
            }
        }
        let _ = cmd_tx.send(Command::Quit);
    });
}
