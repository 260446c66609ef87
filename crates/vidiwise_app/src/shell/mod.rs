//! Interactive terminal front end over the pure core.
//!
//! One thread reads stdin, one forwards engine results; both feed a single
//! channel that the main loop drains. Every message goes through
//! [`vidiwise_core::update`], effects go to the engine, and the view is
//! re-rendered when the state reports itself dirty.

mod effects;
mod input;
mod render;

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use vidiwise_core::{update, AppState, Msg};
use vidiwise_logging::{vidiwise_debug, vidiwise_info};

use crate::config::AppConfig;
use effects::EffectRunner;
use input::{parse_line, Input, HELP};
use render::TerminalRenderer;

pub enum ShellEvent {
    Line(String),
    Msg(Msg),
    InputClosed,
}

pub fn run(config: &AppConfig, initial_url: Option<String>) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel();
    let runner = EffectRunner::new(config.service_settings(), event_tx.clone())
        .context("failed to start the engine")?;
    runner.probe_health();
    spawn_stdin_reader(event_tx);

    let mut shell = Shell {
        state: AppState::with_poll_interval(config.poll_interval()),
        runner,
        renderer: TerminalRenderer::default(),
    };
    println!("vidiwise: connected to {} (type /help for commands)", config.server_url);
    shell.render(true)?;

    if let Some(url) = initial_url {
        shell.dispatch(Msg::InputChanged(url))?;
        shell.dispatch(Msg::VideoSubmitted)?;
    }

    while let Ok(event) = event_rx.recv() {
        match event {
            ShellEvent::Line(line) => {
                let screen = shell.state.view().screen;
                match parse_line(screen, &line) {
                    Input::Msgs(msgs) => {
                        for msg in msgs {
                            shell.dispatch(msg)?;
                        }
                    }
                    Input::Help => println!("{HELP}"),
                    Input::Quit => break,
                    Input::Ignored => {}
                }
            }
            ShellEvent::Msg(msg) => shell.dispatch(msg)?,
            ShellEvent::InputClosed => {
                vidiwise_info!("Standard input closed");
                break;
            }
        }
    }

    // Abandon any running job before leaving.
    shell.dispatch(Msg::CancelClicked)?;
    Ok(())
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    renderer: TerminalRenderer,
}

impl Shell {
    fn dispatch(&mut self, msg: Msg) -> Result<()> {
        vidiwise_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
        self.render(false)
    }

    fn render(&mut self, force: bool) -> Result<()> {
        if !self.state.consume_dirty() && !force {
            return Ok(());
        }
        let lines = self.renderer.render(&self.state.view());
        let mut stdout = io::stdout().lock();
        for line in lines {
            writeln!(stdout, "{line}").context("failed to write to stdout")?;
        }
        stdout.flush().context("failed to flush stdout")
    }
}

fn spawn_stdin_reader(events: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if events.send(ShellEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = events.send(ShellEvent::InputClosed);
    });
}
