//! Command parsing for the terminal front end

use crate::types::{CharacterId, MatchOutcome, RankingRow};

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(String),
    Vote(MatchOutcome),
    /// Rank number or (prefix of) an id
    Remove(String),
    Skip,
    List,
    Reset,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "" => Command::Empty,
            "add" | "a" => Command::Add(rest.to_string()),
            "1" | "left" | "l" => Command::Vote(MatchOutcome::AWins),
            "2" | "right" | "r" => Command::Vote(MatchOutcome::BWins),
            "0" | "draw" | "d" | "=" => Command::Vote(MatchOutcome::Draw),
            "rm" | "remove" | "del" if !rest.is_empty() => Command::Remove(rest.to_string()),
            "skip" | "s" | "next" => Command::Skip,
            "list" | "ls" => Command::List,
            "reset" => Command::Reset,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Resolve a removal target against the ranking shown to the user
///
/// A number is a rank; anything else must be an exact id or a prefix that
/// matches exactly one id.
pub fn resolve_target(ranking: &[RankingRow], target: &str) -> Option<CharacterId> {
    if let Ok(rank) = target.parse::<usize>() {
        return ranking.iter().find(|r| r.rank == rank).map(|r| r.id.clone());
    }

    if let Some(row) = ranking.iter().find(|r| r.id == target) {
        return Some(row.id.clone());
    }

    let mut matches = ranking.iter().filter(|r| r.id.starts_with(target));
    match (matches.next(), matches.next()) {
        (Some(row), None) => Some(row.id.clone()),
        _ => None,
    }
}
