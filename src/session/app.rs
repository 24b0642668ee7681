//! Session state and event handling
//!
//! The session owns the roster store, the random source used for pairing and
//! the matchup currently on screen.

use crate::config::{AppConfig, StorageBackend};
use crate::error::{Result, RosterError};
use crate::rating::{EloRatingCalculator, RatingCalculator};
use crate::roster::{pick, RosterStore};
use crate::session::presenter::{MatchupView, Notice, Presenter, SessionView};
use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
use crate::types::{CharacterId, MatchOutcome, Matchup};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// User actions the session reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Register names from free-text input
    Add(String),
    /// Remove a character by id
    Remove(CharacterId),
    /// Vote on the current matchup
    Vote(MatchOutcome),
    /// Draw a new matchup without voting
    Skip,
    /// Re-render without changing anything
    Refresh,
    /// Drop everything, after confirmation
    Reset,
}

/// The interactive loop's state
pub struct Session<S: KeyValueStore, C: RatingCalculator, R: Rng> {
    store: RosterStore<S, C>,
    rng: R,
    current: Option<Matchup>,
}

/// Session as assembled from configuration
pub type ConfiguredSession = Session<Box<dyn KeyValueStore>, EloRatingCalculator, StdRng>;

impl ConfiguredSession {
    /// Build storage, calculator and random source from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let storage: Box<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Box::new(InMemoryKeyValueStore::new()),
            StorageBackend::File => Box::new(FileKeyValueStore::new(&config.storage.data_dir)),
        };
        let calculator = EloRatingCalculator::new(&config.rating)?;
        let rng = match config.rating.pairing_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "Opening roster slot '{}' ({:?} backend)",
            config.storage.key, config.storage.backend
        );
        let store = RosterStore::open(storage, config.storage.key.clone(), calculator);
        Ok(Session::new(store, rng))
    }
}

impl<S: KeyValueStore, C: RatingCalculator, R: Rng> Session<S, C, R> {
    pub fn new(store: RosterStore<S, C>, rng: R) -> Self {
        Self {
            store,
            rng,
            current: None,
        }
    }

    pub fn store(&self) -> &RosterStore<S, C> {
        &self.store
    }

    /// The matchup currently on screen
    pub fn current_matchup(&self) -> Option<&Matchup> {
        self.current.as_ref()
    }

    /// Pick the first matchup and draw the first frame
    pub fn start<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.refresh(presenter);
    }

    /// Apply one user event
    ///
    /// Recoverable conditions (duplicate names, no matchup, declined reset)
    /// are reported through the presenter. Storage failures are returned.
    pub fn handle<P: Presenter + ?Sized>(
        &mut self,
        event: SessionEvent,
        presenter: &mut P,
    ) -> Result<()> {
        debug!("Handling {:?}", event);
        match event {
            SessionEvent::Add(input) => self.on_add(&input, presenter),
            SessionEvent::Remove(id) => self.on_remove(&id, presenter),
            SessionEvent::Vote(outcome) => self.on_vote(outcome, presenter),
            SessionEvent::Skip => {
                self.refresh(presenter);
                Ok(())
            }
            SessionEvent::Refresh => {
                presenter.render(&self.view());
                Ok(())
            }
            SessionEvent::Reset => self.on_reset(presenter),
        }
    }

    /// Current frame
    pub fn view(&self) -> SessionView {
        let matchup = self.current.as_ref().and_then(|m| {
            Some(MatchupView {
                left: self.store.find(&m.left)?.clone(),
                right: self.store.find(&m.right)?.clone(),
            })
        });

        SessionView {
            ranking: self.store.ranking(),
            matchup,
        }
    }

    fn on_add<P: Presenter + ?Sized>(&mut self, input: &str, presenter: &mut P) -> Result<()> {
        match self.store.add_characters([input]) {
            Ok(report) if report.is_empty() => Ok(()),
            Ok(report) => {
                presenter.notify(&Notice::Registered {
                    names: report.added.into_iter().map(|c| c.name).collect(),
                    skipped: report.skipped,
                });
                self.refresh(presenter);
                Ok(())
            }
            Err(e) => match e.downcast::<RosterError>() {
                Ok(RosterError::AllDuplicates { names }) => {
                    presenter.notify(&Notice::DuplicateNames { names });
                    Ok(())
                }
                Ok(other) => Err(other.into()),
                Err(e) => Err(e),
            },
        }
    }

    fn on_remove<P: Presenter + ?Sized>(&mut self, id: &str, presenter: &mut P) -> Result<()> {
        if self.store.remove_character(id)? {
            presenter.notify(&Notice::Removed { id: id.to_string() });
        }
        self.refresh(presenter);
        Ok(())
    }

    fn on_vote<P: Presenter + ?Sized>(
        &mut self,
        outcome: MatchOutcome,
        presenter: &mut P,
    ) -> Result<()> {
        let Some(matchup) = self.current.take() else {
            presenter.notify(&Notice::NeedMoreCharacters);
            return Ok(());
        };

        let (left, right) = self.store.record_vote(&matchup, outcome)?;
        let name_of = |id: &str| {
            self.store
                .find(id)
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };
        presenter.notify(&Notice::VoteRecorded {
            left_name: name_of(&left.character_id),
            right_name: name_of(&right.character_id),
            left,
            right,
        });

        self.refresh(presenter);
        Ok(())
    }

    fn on_reset<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<()> {
        if !presenter.confirm_reset() {
            presenter.notify(&Notice::ResetCancelled);
            return Ok(());
        }

        self.store.reset()?;
        presenter.notify(&Notice::ResetDone);
        self.refresh(presenter);
        Ok(())
    }

    /// Re-pick the matchup and draw
    fn refresh<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.current = pick(self.store.characters(), &mut self.rng);
        presenter.render(&self.view());
    }
}
