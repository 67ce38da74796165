use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use reel_clip_interface::ClipResult;
use reel_playback::{ClientError, LoadTicket};
use tokio::sync::mpsc;

pub struct FetchOutcome {
    pub ticket: LoadTicket,
    pub result: Result<Vec<ClipResult>, ClientError>,
}

pub enum AppEvent {
    Key(KeyEvent),
    Fetched(FetchOutcome),
    Resize,
    Tick,
}

/// Merges terminal input, fetch results and the playback clock into one
/// stream for the main loop.
pub struct EventHandler {
    input_rx: mpsc::UnboundedReceiver<Event>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    tick: tokio::time::Interval,
}

impl EventHandler {
    pub fn new(fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>, tick_rate: Duration) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, so it gets its own thread.
        std::thread::spawn(move || {
            loop {
                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if input_tx.send(ev).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                    Ok(false) => {
                        if input_tx.is_closed() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        let mut tick = tokio::time::interval(tick_rate);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        Self {
            input_rx,
            fetch_rx,
            tick,
        }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        loop {
            tokio::select! {
                ev = self.input_rx.recv() => match ev? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        return Some(AppEvent::Key(key));
                    }
                    Event::Resize(..) => return Some(AppEvent::Resize),
                    _ => continue,
                },
                Some(outcome) = self.fetch_rx.recv() => return Some(AppEvent::Fetched(outcome)),
                _ = self.tick.tick() => return Some(AppEvent::Tick),
            }
        }
    }
}
