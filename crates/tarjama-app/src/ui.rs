use std::io::{BufRead, Write};

use kanal::{AsyncReceiver, AsyncSender};
use tarjama_config::ui::UiConfig;
use tarjama_types::{AppEvent, TranslationRequest};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub mod command;
pub mod render;

use command::{Command, HELP, parse_command};
use render::render_event;

fn prompt(ui: &UiConfig, interactive: bool) {
    if interactive {
        print!("{}", ui.prompt);
        let _ = std::io::stdout().flush();
    }
}

/// Stdin lines from a detached thread, so a pending read never holds up shutdown.
/// The channel closes at end of input.
fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Terminal view: reads commands from stdin and prints app events
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    ui: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let mut input = stdin_lines();
    // lyrics being pasted after a bare `translate`
    let mut pasting: Option<Vec<String>> = None;

    if interactive {
        println!("Type help for a list of commands");
    }
    prompt(&ui, interactive);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            event = app_to_ui_rx.recv() => {
                if let Some(text) = render_event(&event?, &ui) {
                    println!("{}", text);
                    prompt(&ui, interactive);
                }
            }

            line = input.recv() => {
                let Some(line) = line else {
                    tracing::debug!("stdin closed");
                    if let Some(lines) = pasting.take() {
                        ui_to_app_tx
                            .send(AppEvent::Translate(TranslationRequest::lyrics(lines.join("\n"))))
                            .await?;
                    }
                    ui_to_app_tx.send(AppEvent::Quit).await?;
                    break;
                };

                if let Some(lines) = pasting.as_mut() {
                    if line.trim() == "." {
                        let lyrics = lines.join("\n");
                        pasting = None;
                        ui_to_app_tx
                            .send(AppEvent::Translate(TranslationRequest::lyrics(lyrics)))
                            .await?;
                    } else {
                        lines.push(line);
                    }
                    continue;
                }

                match parse_command(&line) {
                    Command::Send(AppEvent::Quit) => {
                        ui_to_app_tx.send(AppEvent::Quit).await?;
                        break;
                    }
                    Command::Send(event) => ui_to_app_tx.send(event).await?,
                    Command::BeginLyrics => {
                        if interactive {
                            println!("Paste the lyrics, then a line with a single '.'");
                        }
                        pasting = Some(Vec::new());
                        continue;
                    }
                    Command::ReadLyricsFile(path) => {
                        match tokio::fs::read_to_string(&path).await {
                            Ok(lyrics) => {
                                ui_to_app_tx
                                    .send(AppEvent::Translate(TranslationRequest::lyrics(lyrics)))
                                    .await?
                            }
                            Err(e) => {
                                println!("Error: could not read {}: {}", path.display(), e);
                                prompt(&ui, interactive);
                            }
                        }
                    }
                    Command::Help => {
                        println!("{}", HELP);
                        prompt(&ui, interactive);
                    }
                    Command::Invalid(message) => {
                        println!("{}", message);
                        prompt(&ui, interactive);
                    }
                    Command::Nothing => prompt(&ui, interactive),
                }
            }
        }
    }

    Ok(())
}
