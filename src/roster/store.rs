//! Roster store
//!
//! Holds the registered characters, applies votes through a rating calculator
//! and writes the whole roster back to its key-value slot after every
//! mutation.

use crate::error::{Result, RosterError};
use crate::rating::RatingCalculator;
use crate::roster::names::parse_names;
use crate::storage::KeyValueStore;
use crate::types::{Character, Matchup, MatchOutcome, RankingRow, RatingChange, RosterState};
use crate::utils::generate_character_id;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Outcome of registering a batch of names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddReport {
    /// Characters appended to the roster, in input order
    pub added: Vec<Character>,
    /// Names dropped because they were already taken
    pub skipped: Vec<String>,
}

impl AddReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.skipped.is_empty()
    }
}

/// The roster and its persistence slot
#[derive(Debug)]
pub struct RosterStore<S: KeyValueStore, C: RatingCalculator> {
    storage: S,
    key: String,
    calculator: C,
    state: RosterState,
}

impl<S: KeyValueStore, C: RatingCalculator> RosterStore<S, C> {
    /// Open the store, loading whatever the slot currently holds
    pub fn open(storage: S, key: impl Into<String>, calculator: C) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            calculator,
            state: RosterState::default(),
        };
        store.state = store.load();
        info!(
            "Loaded {} characters from slot '{}'",
            store.state.characters.len(),
            store.key
        );
        store
    }

    /// Read the persisted roster
    ///
    /// Fails open: an absent, unreadable or malformed slot yields an empty
    /// roster.
    pub fn load(&self) -> RosterState {
        match self.storage.get(&self.key) {
            Ok(raw) => decode_state(raw.as_deref()),
            Err(e) => {
                warn!("Failed to read slot '{}', starting empty: {}", self.key, e);
                RosterState::default()
            }
        }
    }

    /// Write the full roster, replacing the previous slot value
    pub fn save(&mut self) -> Result<()> {
        write_slot(&mut self.storage, &self.key, &self.state)
    }

    /// Persist `next` and only then make it the in-memory roster
    fn commit(&mut self, next: RosterState) -> Result<()> {
        write_slot(&mut self.storage, &self.key, &next)?;
        self.state = next;
        Ok(())
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    /// Characters in registration order
    pub fn characters(&self) -> &[Character] {
        &self.state.characters
    }

    pub fn len(&self) -> usize {
        self.state.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.characters.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Character> {
        self.state.characters.iter().find(|c| c.id == id)
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register characters
    ///
    /// Every entry is split on comma-like delimiters. Names already on the
    /// roster, or repeated within the batch, are skipped. When nothing is left
    /// to add the call is a no-op; when every proposed name was a duplicate it
    /// fails with [`RosterError::AllDuplicates`] and the roster is untouched.
    pub fn add_characters<I, T>(&mut self, entries: I) -> Result<AddReport>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let names: Vec<String> = entries
            .into_iter()
            .flat_map(|entry| parse_names(entry.as_ref()))
            .collect();
        if names.is_empty() {
            debug!("Ignoring empty name input");
            return Ok(AddReport::default());
        }

        let mut taken: HashSet<String> =
            self.state.characters.iter().map(|c| c.name.clone()).collect();
        let mut report = AddReport::default();

        for name in names {
            if taken.contains(&name) {
                report.skipped.push(name);
                continue;
            }
            taken.insert(name.clone());
            report.added.push(Character::new(
                generate_character_id(),
                name,
                self.calculator.initial_rating(),
            ));
        }

        if report.added.is_empty() {
            info!("Rejected batch of duplicate names: {:?}", report.skipped);
            return Err(RosterError::AllDuplicates {
                names: report.skipped,
            }
            .into());
        }

        let mut next = self.state.clone();
        next.characters.extend(report.added.iter().cloned());
        self.commit(next)?;

        info!(
            "Registered {} characters ({} skipped as duplicates)",
            report.added.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Remove a character by id; absent ids are not an error
    ///
    /// Returns whether a character was removed. The roster is persisted
    /// either way.
    pub fn remove_character(&mut self, id: &str) -> Result<bool> {
        let mut next = self.state.clone();
        next.characters.retain(|c| c.id != id);
        let removed = next.characters.len() != self.state.characters.len();

        self.commit(next)?;

        if removed {
            info!("Removed character {}", id);
        } else {
            debug!("No character with id {} to remove", id);
        }
        Ok(removed)
    }

    /// Drop every character
    pub fn reset(&mut self) -> Result<()> {
        let dropped = self.state.characters.len();
        self.commit(RosterState::default())?;
        info!("Reset roster, dropped {} characters", dropped);
        Ok(())
    }

    /// Apply a vote to the matchup
    ///
    /// Updates both ratings and exactly one pair of counters, then persists.
    /// Nothing changes in memory unless the write succeeds. Returns the
    /// rating changes for (left, right).
    pub fn record_vote(
        &mut self,
        matchup: &Matchup,
        outcome: MatchOutcome,
    ) -> Result<(RatingChange, RatingChange)> {
        if matchup.left == matchup.right {
            return Err(RosterError::InvalidMatchup {
                id: matchup.left.clone(),
            }
            .into());
        }

        let left = self.position(&matchup.left)?;
        let right = self.position(&matchup.right)?;

        let old_a = self.state.characters[left].rating;
        let old_b = self.state.characters[right].rating;
        let (new_a, new_b) = self.calculator.calculate(old_a, old_b, outcome);

        let mut next = self.state.clone();
        {
            let a = &mut next.characters[left];
            a.rating = new_a;
            let counter = match outcome {
                MatchOutcome::AWins => &mut a.wins,
                MatchOutcome::BWins => &mut a.losses,
                MatchOutcome::Draw => &mut a.draws,
            };
            *counter = counter.saturating_add(1);
        }
        {
            let b = &mut next.characters[right];
            b.rating = new_b;
            let counter = match outcome {
                MatchOutcome::AWins => &mut b.losses,
                MatchOutcome::BWins => &mut b.wins,
                MatchOutcome::Draw => &mut b.draws,
            };
            *counter = counter.saturating_add(1);
        }

        self.commit(next)?;

        info!(
            "Vote {}: {} {} -> {}, {} {} -> {}",
            outcome,
            self.state.characters[left].name,
            old_a,
            new_a,
            self.state.characters[right].name,
            old_b,
            new_b
        );

        Ok((
            RatingChange {
                character_id: matchup.left.clone(),
                old_rating: old_a,
                new_rating: new_a,
            },
            RatingChange {
                character_id: matchup.right.clone(),
                old_rating: old_b,
                new_rating: new_b,
            },
        ))
    }

    /// Ranking view: rating descending, ties in registration order
    pub fn ranking(&self) -> Vec<RankingRow> {
        let mut sorted: Vec<&Character> = self.state.characters.iter().collect();
        sorted.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        sorted
            .into_iter()
            .enumerate()
            .map(|(i, c)| RankingRow {
                rank: i + 1,
                id: c.id.clone(),
                name: c.name.clone(),
                rating: c.rating,
                wins: c.wins,
                losses: c.losses,
                draws: c.draws,
            })
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.state
            .characters
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RosterError::CharacterNotFound { id: id.to_string() }.into())
    }
}

fn write_slot<S: KeyValueStore>(storage: &mut S, key: &str, state: &RosterState) -> Result<()> {
    let raw = serde_json::to_string(state)?;
    storage.set(key, &raw)?;
    debug!(
        "Saved {} characters to slot '{}'",
        state.characters.len(),
        key
    );
    Ok(())
}

/// Decode a slot value, falling back to an empty roster
pub fn decode_state(raw: Option<&str>) -> RosterState {
    let Some(raw) = raw else {
        return RosterState::default();
    };

    match serde_json::from_str::<RosterState>(raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("Discarding malformed roster payload: {}", e);
            RosterState::default()
        }
    }
}
