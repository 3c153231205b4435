//! Turning terminal input into [`SurfaceEvent`]s.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use hometray_app::ports::{IconHandle, SurfaceEvent};

/// What one line of input means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Event(SurfaceEvent),
    Blank,
    Unrecognized(String),
}

/// Interpret one line typed by the user.
#[must_use]
pub fn parse_line(line: &str) -> InputLine {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" => InputLine::Blank,
        "q" | "quit" | "exit" => InputLine::Event(SurfaceEvent::ExitRequested),
        other => match other.parse::<u32>() {
            Ok(raw) => InputLine::Event(SurfaceEvent::Activate(IconHandle::new(raw))),
            Err(_) => InputLine::Unrecognized(line.to_string()),
        },
    }
}

/// Read lines from `reader` and forward the events they describe.
///
/// Ends at end of input or once the receiving side is gone. End of input
/// does not request exit; the process keeps running without a keyboard.
pub fn spawn_input<R>(reader: R, events: mpsc::Sender<SurfaceEvent>) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!("console input closed");
                    break;
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to read console input");
                    break;
                }
            };

            match parse_line(&line) {
                InputLine::Event(event) => {
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
                InputLine::Blank => {}
                InputLine::Unrecognized(text) => {
                    tracing::warn!(input = %text, "unrecognized command");
                }
            }
        }
    })
}

/// [`spawn_input`] over standard input.
pub fn spawn_stdin(events: mpsc::Sender<SurfaceEvent>) -> JoinHandle<()> {
    spawn_input(BufReader::new(tokio::io::stdin()), events)
}

/// Request exit on Ctrl+C.
pub fn spawn_ctrl_c(events: mpsc::Sender<SurfaceEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("received Ctrl+C");
                let _ = events.send(SurfaceEvent::ExitRequested).await;
            }
            Err(err) => tracing::error!(%err, "failed to listen for Ctrl+C"),
        }
    })
}
