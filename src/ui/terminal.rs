//! Terminal presenter and input loop

use crate::error::Result;
use crate::rating::RatingCalculator;
use crate::session::{Notice, Presenter, Session, SessionEvent, SessionView};
use crate::storage::KeyValueStore;
use crate::ui::command::{resolve_target, Command};
use crate::utils::short_id;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{info, warn};

const HELP: &str = "\
Commands:
  add <names>     register names, separated by , 、 or ，
  1 | left        left wins
  2 | right       right wins
  0 | draw        draw
  skip            show another matchup
  rm <rank|id>    remove a character
  list            show the ranking again
  reset           delete everything (asks first)
  help            this text
  quit            leave";

const EMPTY_MATCHUP: &str = "Register at least two characters to start voting.";

/// Presenter that draws plain-text frames
pub struct TerminalPresenter<I: BufRead, W: Write> {
    input: I,
    output: W,
}

impl<I: BufRead, W: Write> TerminalPresenter<I, W> {
    pub fn new(input: I, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink (for inspecting what was drawn)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompt for and parse the next command; `None` on end of input
    pub fn read_command(&mut self) -> Option<Command> {
        self.emit(format_args!("> "));
        self.read_line().map(|line| Command::parse(&line))
    }

    pub fn show_help(&mut self) {
        self.emit(format_args!("{}\n", HELP));
    }

    pub fn show_message(&mut self, message: &str) {
        self.emit(format_args!("{}\n", message));
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = self
            .output
            .write_fmt(args)
            .and_then(|_| self.output.flush())
        {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<I: BufRead, W: Write> Presenter for TerminalPresenter<I, W> {
    fn render(&mut self, view: &SessionView) {
        self.emit(format_args!("\n--- Ranking ---\n"));
        if view.ranking.is_empty() {
            self.emit(format_args!("(no characters yet)\n"));
        } else {
            self.emit(format_args!(
                "{:<5} {:<24} {:>7}  {:<14} {}\n",
                "Rank", "Name", "Rating", "W / L / D", "ID"
            ));
            for row in &view.ranking {
                let record = format!("{} / {} / {}", row.wins, row.losses, row.draws);
                self.emit(format_args!(
                    "{:<5} {:<24} {:>7.0}  {:<14} {}\n",
                    row.rank,
                    row.name,
                    row.rating,
                    record,
                    short_id(&row.id)
                ));
            }
        }

        self.emit(format_args!("\n--- Matchup ---\n"));
        match &view.matchup {
            Some(m) => self.emit(format_args!(
                "[1] {}  vs  [2] {}    (0 = draw)\n",
                m.left.name, m.right.name
            )),
            None => self.emit(format_args!("{}\n", EMPTY_MATCHUP)),
        }
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::DuplicateNames { names } => self.emit(format_args!(
                "Already registered: {}\n",
                names.join(", ")
            )),
            Notice::Registered { names, skipped } => {
                self.emit(format_args!("Registered: {}\n", names.join(", ")));
                if !skipped.is_empty() {
                    self.emit(format_args!("Skipped duplicates: {}\n", skipped.join(", ")));
                }
            }
            Notice::Removed { id } => {
                self.emit(format_args!("Removed {}\n", short_id(id)))
            }
            Notice::VoteRecorded {
                left_name,
                right_name,
                left,
                right,
            } => self.emit(format_args!(
                "{} {:.0} ({:+.0}), {} {:.0} ({:+.0})\n",
                left_name,
                left.new_rating,
                left.delta(),
                right_name,
                right.new_rating,
                right.delta()
            )),
            Notice::NeedMoreCharacters => self.emit(format_args!("{}\n", EMPTY_MATCHUP)),
            Notice::ResetDone => self.emit(format_args!("All data deleted.\n")),
            Notice::ResetCancelled => self.emit(format_args!("Reset cancelled.\n")),
        }
    }

    fn confirm_reset(&mut self) -> bool {
        self.emit(format_args!("Really delete all characters and ratings? [y/N] "));
        match self.read_line() {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

/// Drive a session from terminal input until `quit` or end of input
pub fn run_loop<S, C, R, I, W>(
    session: &mut Session<S, C, R>,
    presenter: &mut TerminalPresenter<I, W>,
) -> Result<()>
where
    S: KeyValueStore,
    C: RatingCalculator,
    R: Rng,
    I: BufRead,
    W: Write,
{
    session.start(presenter);

    while let Some(command) = presenter.read_command() {
        let event = match command {
            Command::Add(input) => SessionEvent::Add(input),
            Command::Vote(outcome) => SessionEvent::Vote(outcome),
            Command::Remove(target) => match resolve_target(&session.store().ranking(), &target)
            {
                Some(id) => SessionEvent::Remove(id),
                None => {
                    presenter.show_message(&format!("No character matches '{}'", target));
                    continue;
                }
            },
            Command::Skip => SessionEvent::Skip,
            Command::List => SessionEvent::Refresh,
            Command::Reset => SessionEvent::Reset,
            Command::Help => {
                presenter.show_help();
                continue;
            }
            Command::Quit => break,
            Command::Empty => continue,
            Command::Unknown(line) => {
                presenter.show_message(&format!("Unknown command '{}', try 'help'", line));
                continue;
            }
        };

        session.handle(event, presenter)?;
    }

    info!("Session ended with {} characters", session.store().len());
    Ok(())
}
