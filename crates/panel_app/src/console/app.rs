use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::anyhow;

use panel_client::{ClientHandle, ClientSettings};
use panel_core::{update, Msg, OperationRequest, PanelState, SubmissionPhase};
use panel_logging::panel_info;

use super::commands::{self, ShellCommand};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::render;

const IDLE_SLEEP: Duration = Duration::from_millis(20);

pub fn run() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let settings = resolve_settings();
    panel_info!("Staging console starting against {}", settings.base_url);
    let handle = ClientHandle::new(settings)
        .map_err(|err| anyhow!("service client setup failed: {err}"))?;
    let runner = EffectRunner::new(handle);

    let lines = spawn_stdin_reader();

    let mut state = PanelState::new();
    dispatch(&mut state, Msg::Activated, &runner);

    println!("{}", commands::HELP_TEXT);

    let mut quitting = false;
    let mut input_open = true;
    while !quitting {
        loop {
            match lines.try_recv() {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match commands::parse(&line) {
                        Ok(command) => {
                            if apply_command(&mut state, command, &runner) {
                                quitting = true;
                                break;
                            }
                        }
                        Err(usage) => println!("{usage}"),
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    input_open = false;
                    break;
                }
            }
        }

        for msg in runner.drain_events() {
            dispatch(&mut state, msg, &runner);
        }

        // With stdin closed, leave once nothing is in flight.
        if !input_open && !quitting && state.submission_phase() == SubmissionPhase::Idle {
            dispatch(&mut state, Msg::Deactivated, &runner);
            quitting = true;
        }

        if state.consume_dirty() {
            print!("{}", render::render(&state.view()));
        }

        if !quitting {
            thread::sleep(IDLE_SLEEP);
        }
    }

    panel_info!("Staging console stopped");
    Ok(())
}

/// Returns true when the console should exit.
fn apply_command(state: &mut PanelState, command: ShellCommand, runner: &EffectRunner) -> bool {
    match command {
        ShellCommand::Create { filename, content } => {
            let request = OperationRequest::CreateFile { filename, content };
            dispatch(state, Msg::SubmitRequested { request }, runner);
        }
        ShellCommand::Stage {
            method,
            username,
            local_path,
            relative_path,
        } => {
            let request = OperationRequest::StageData {
                method,
                username,
                local_path,
                relative_path,
            };
            dispatch(state, Msg::SubmitRequested { request }, runner);
        }
        ShellCommand::RefreshMethods => dispatch(state, Msg::MethodsRefreshRequested, runner),
        ShellCommand::LogsOn => dispatch(state, Msg::LogsStartRequested, runner),
        ShellCommand::LogsOff => dispatch(state, Msg::LogsStopRequested, runner),
        ShellCommand::Show => print!("{}", render::render(&state.view())),
        ShellCommand::Help => println!("{}", commands::HELP_TEXT),
        ShellCommand::Quit => {
            dispatch(state, Msg::Deactivated, runner);
            return true;
        }
    }
    false
}

fn dispatch(state: &mut PanelState, msg: Msg, runner: &EffectRunner) {
    let current = std::mem::take(state);
    let (next, effects) = update(current, msg);
    *state = next;
    runner.run(effects);
}

// Base URL comes from the first argument, then PANEL_BASE_URL, then the
// service's dev address.
fn resolve_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();
    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PANEL_BASE_URL").ok());
    if let Some(base_url) = base_url {
        if !base_url.trim().is_empty() {
            settings.base_url = base_url;
        }
    }
    settings
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}
