//! Line-oriented terminal front end.
//!
//! Redraws the game screen whenever the session view changes and turns
//! each line typed on stdin into a session operation. Outcomes are kept as
//! a short list of timestamped records under the screen.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sketch_relay::{GameApi, ImageData, ResultChain, Session, SessionView};
use std::{
    collections::VecDeque,
    fmt,
    io::{self, Write},
    path::Path,
    time::Duration,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::{MissedTickBehavior, interval},
};

use crate::{
    commands::{Command, parse_command},
    display::{render_results, render_view},
};

const HELP: &str = "\
phrase <text>
        Submit a phrase. Only available when the game asks you for one.
image <path>
        Submit the image file at <path> as your drawing.
results
        Show every chain once the game is over.
restart
        Clear the finished game on the server.
status
        Refresh the game state right away.
help
        Show this message.
quit
        Leave the game.
";
const MAX_RECORDS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Ack,
    Error,
    Game,
    You,
}

impl RecordKind {
    fn label(self) -> &'static str {
        match self {
            Self::Ack => "ACK",
            Self::Error => "ERROR",
            Self::Game => "GAME",
            Self::You => "YOU",
        }
    }
}

/// A timestamped message with an importance label to help direct user
/// attention.
#[derive(Clone, Debug)]
pub struct Record {
    datetime: DateTime<Utc>,
    pub kind: RecordKind,
    pub content: String,
}

impl Record {
    pub fn new(kind: RecordKind, content: impl Into<String>) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content: content.into(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {:5}]: {}",
            self.datetime.format("%H:%M:%S"),
            self.kind.label(),
            self.content
        )
    }
}

pub struct CliApp<A: GameApi + 'static> {
    session: Session<A>,
    render_interval: Duration,
    records: VecDeque<Record>,
    results: Option<Vec<ResultChain>>,
    show_help: bool,
}

impl<A: GameApi + 'static> CliApp<A> {
    pub fn new(session: Session<A>, render_interval: Duration) -> Self {
        Self {
            session,
            render_interval,
            records: VecDeque::with_capacity(MAX_RECORDS),
            results: None,
            show_help: false,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    fn push(&mut self, record: Record) {
        if self.records.len() == MAX_RECORDS {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Runs until the player quits or stdin closes, then stops the session.
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut redraw = interval(self.render_interval);
        redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_view: Option<SessionView> = None;

        loop {
            tokio::select! {
                _ = redraw.tick() => {
                    let view = self.session.current_view().await;
                    if last_view.as_ref() != Some(&view) {
                        if let Some(previous) = &last_view
                            && previous.phase != view.phase
                        {
                            self.push(Record::new(RecordKind::Game, view.phase.headline()));
                        }
                        self.draw(&view)?;
                        last_view = Some(view);
                    }
                }

                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_command(&line) {
                        Ok(Command::Quit) => break,
                        Ok(command) => {
                            let record = self.handle(command).await;
                            self.push(record);
                        }
                        Err(e) => self.push(Record::new(RecordKind::Error, e.to_string())),
                    }
                    let view = self.session.current_view().await;
                    self.draw(&view)?;
                    last_view = Some(view);
                }
            }
        }

        println!("Leaving the game...");
        self.session.shutdown().await;
        Ok(())
    }

    fn draw(&self, view: &SessionView) -> Result<()> {
        let mut stdout = io::stdout().lock();
        // Clear screen and move cursor to top
        write!(stdout, "\x1B[2J\x1B[1;1H")?;
        writeln!(stdout, "{}", render_view(view))?;
        if let Some(results) = &self.results {
            writeln!(stdout, "{}", render_results(results))?;
        }
        if self.show_help {
            writeln!(stdout, "{HELP}")?;
        }
        for record in &self.records {
            writeln!(stdout, "{record}")?;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
        Ok(())
    }

    /// Carries out one command and reports how it went.
    pub async fn handle(&mut self, command: Command) -> Record {
        self.show_help = false;
        match command {
            Command::Phrase(phrase) => match self.session.submit_phrase(&phrase).await {
                Ok(()) => Record::new(RecordKind::You, format!("Submitted \"{phrase}\"")),
                Err(e) => Record::new(RecordKind::Error, e.to_string()),
            },
            Command::Image(path) => {
                let image = match path {
                    Some(path) => match load_image(&path).await {
                        Ok(image) => Some(image),
                        Err(e) => return Record::new(RecordKind::Error, format!("{e:#}")),
                    },
                    None => None,
                };
                match self.session.submit_image(image).await {
                    Ok(()) => Record::new(RecordKind::You, "Submitted your drawing"),
                    Err(e) => Record::new(RecordKind::Error, e.to_string()),
                }
            }
            Command::Results => match self.session.results().await {
                Ok(results) => {
                    let count = results.len();
                    self.results = Some(results);
                    Record::new(RecordKind::Ack, format!("Revealed {count} chains"))
                }
                Err(e) => Record::new(RecordKind::Error, e.to_string()),
            },
            Command::Restart => match self.session.restart().await {
                Ok(()) => Record::new(RecordKind::Ack, "Asked the server to restart the game"),
                Err(e) => Record::new(RecordKind::Error, e.to_string()),
            },
            Command::Status => match self.session.refresh().await {
                Ok(()) => Record::new(RecordKind::Ack, "Refreshed"),
                Err(e) => Record::new(RecordKind::Error, e.to_string()),
            },
            Command::Help => {
                self.show_help = true;
                Record::new(RecordKind::Ack, "Showing help")
            }
            Command::Quit => Record::new(RecordKind::Ack, "Leaving the game..."),
        }
    }
}

/// Reads an image file and encodes it as a data URL, picking the mime type
/// from the extension.
pub async fn load_image(path: &Path) -> Result<ImageData> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok(ImageData::encode(ImageData::mime_for_path(path), &bytes))
}
