//! Scorekeeper service: drives the active session and persists it.
//!
//! Every successful commit or undo is followed by a save. When the save
//! fails the in-memory session keeps the change and the caller gets
//! [`AppError::Store`]; [`Scorekeeper::save`] can be retried.

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::domain::end_game::Standing;
use crate::domain::session::GameSession;
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::state::{GameOptions, Phase, RoundRecord, SeatAction};
use crate::domain::tricks::RoundScores;
use crate::services::AppError;
use crate::store::{codec, SessionStore};

pub struct Scorekeeper<S: SessionStore> {
    store: S,
    session: Option<GameSession>,
}

impl<S: SessionStore> Scorekeeper<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Replace any active session with a fresh one.
    pub fn start<N: AsRef<str>>(
        &mut self,
        num_players: u8,
        names: &[N],
        options: GameOptions,
    ) -> Result<&GameSession, AppError> {
        let session = GameSession::start_new_session(num_players, names, options)?;
        info!(
            players = num_players,
            rounds = session.total_rounds(),
            abandon_budget = options.abandon_budget.allowance(),
            bonus = options.bonus_enabled,
            "Session started"
        );
        self.session = Some(session);
        self.save()?;
        self.active()
    }

    pub fn start_from_config(&mut self, config: SessionConfig) -> Result<&GameSession, AppError> {
        let setup = config.into_setup()?;
        self.start(setup.num_players, &setup.names, setup.options)
    }

    /// Load the persisted session, if any. A corrupt blob is an error and
    /// leaves the store untouched.
    pub fn resume(&mut self) -> Result<Option<&GameSession>, AppError> {
        let Some(blob) = self.store.load()? else {
            debug!("No stored session to resume");
            return Ok(None);
        };
        let session = codec::decode(&blob).inspect_err(|e| {
            warn!(error = %e, "Stored session rejected");
        })?;
        info!(
            round = session.current_round_index() + 1,
            phase = ?session.current_phase(),
            "Session resumed"
        );
        self.session = Some(session);
        Ok(self.session.as_ref())
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, AppError> {
        Ok(self.active()?.snapshot()?)
    }

    pub fn submit_bids(&mut self, actions: &[SeatAction]) -> Result<RoundRecord, AppError> {
        let session = self.active_mut()?;
        let record = session.submit_bids(actions)?.clone();
        info!(
            round = record.round_no,
            cards = record.card_count,
            dealer = record.dealer,
            reversal_seat = record.reversal.map(|r| r.seat),
            abandoned = record.bids.iter().filter(|b| b.is_abandoned()).count(),
            "Bids committed"
        );
        debug!(round = record.round_no, "Transition: Bidding -> Tricks");
        self.save()?;
        Ok(record)
    }

    pub fn submit_tricks(&mut self, tricks: &[u8]) -> Result<RoundScores, AppError> {
        let session = self.active_mut()?;
        let scores = session.submit_tricks(tricks)?;
        info!(
            round = scores.round_no,
            cards = scores.card_count,
            deltas = ?scores.deltas,
            "Round scored"
        );
        if scores.game_over {
            debug!(round = scores.round_no, "Transition: Tricks -> GameOver");
            info!(standings = ?session.standings(), "Session complete");
        } else {
            debug!(round = scores.round_no + 1, "Transition: Tricks -> Bidding");
        }
        self.save()?;
        Ok(scores)
    }

    pub fn cancel_bids(&mut self) -> Result<RoundRecord, AppError> {
        let session = self.active_mut()?;
        let record = session.cancel_bids()?;
        info!(round = record.round_no, "Bids cancelled");
        debug!(round = record.round_no, "Transition: Tricks -> Bidding");
        self.save()?;
        Ok(record)
    }

    pub fn undo_last_round(&mut self) -> Result<RoundRecord, AppError> {
        let session = self.active_mut()?;
        let from = session.current_phase();
        let record = session.undo_last_round()?;
        info!(round = record.round_no, dealer = record.dealer, "Round undone");
        if from == Phase::GameOver {
            debug!(round = record.round_no, "Transition: GameOver -> Bidding");
        }
        self.save()?;
        Ok(record)
    }

    pub fn evaluate_end_game(&self) -> Result<Vec<Standing>, AppError> {
        Ok(self.active()?.evaluate_end_game()?)
    }

    /// Drop the active session and its stored copy.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.session = None;
        self.store.clear()?;
        info!("Session cleared");
        Ok(())
    }

    /// Persist the active session. Called after every commit; callers retry
    /// it after an [`AppError::Store`].
    pub fn save(&mut self) -> Result<(), AppError> {
        let session = self.session.as_ref().ok_or(AppError::NoActiveSession)?;
        let blob = codec::encode(session)?;
        self.store.save(&blob).inspect_err(|e| {
            warn!(
                error = %e,
                round = session.current_round_index() + 1,
                "Failed to save session; in-memory state kept"
            );
        })?;
        Ok(())
    }

    fn active(&self) -> Result<&GameSession, AppError> {
        self.session.as_ref().ok_or(AppError::NoActiveSession)
    }

    fn active_mut(&mut self) -> Result<&mut GameSession, AppError> {
        self.session.as_mut().ok_or(AppError::NoActiveSession)
    }
}
