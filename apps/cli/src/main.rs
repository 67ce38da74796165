mod app;
mod event;
mod sink;
mod ui;

use std::time::Duration;

use clap::Parser;
use reel_playback::ClipsClient;

use crate::{
    app::App,
    event::{AppEvent, EventHandler, FetchOutcome},
};

const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "reel", about = "Play movie clips matching a phrase")]
struct Cli {
    #[arg(long, env = "REEL_PHRASE")]
    phrase: String,

    #[arg(long, env = "REEL_LANGUAGE", default_value = reel_clip_interface::DEFAULT_LANGUAGE)]
    language: String,

    #[arg(long, env = "REEL_BASE_URL", default_value = "http://localhost:3001")]
    base_url: String,
}

fn setup_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        original(info);
    }));
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match ClipsClient::new(&cli.base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut app = App::new(cli.phrase, cli.language);
    let (fetch_tx, fetch_rx) = tokio::sync::mpsc::unbounded_channel();

    let ticket = app.begin_query();
    {
        let phrase = app.phrase.clone();
        let language = app.language.clone();
        tokio::spawn(async move {
            let result = client.fetch(&phrase, &language).await;
            let _ = fetch_tx.send(FetchOutcome { ticket, result });
        });
    }

    setup_panic_hook();
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(fetch_rx, TICK);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app)).ok();

        match events.next().await {
            Some(AppEvent::Key(key)) => app.handle_key(key),
            Some(AppEvent::Fetched(outcome)) => app.handle_fetched(outcome),
            Some(AppEvent::Tick) => app.tick(TICK.as_millis() as i64),
            Some(AppEvent::Resize) => {}
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();
}
