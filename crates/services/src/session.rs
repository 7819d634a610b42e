//! Async driver for one player's game.
//!
//! A single task owns the [`Game`] and applies commands and collaborator
//! responses one at a time. Collaborator calls run in their own tasks and
//! report back through a completion channel; the state after every event is
//! published on a `watch` channel as a [`GameSnapshot`].

use std::future::Future;
use std::ops::ControlFlow;
use std::sync::Arc;

use guess_core::game::{
    AdvanceTicket, Applied, Game, GameSnapshot, HintTicket, Resolution, RoundTicket, VerifyTicket,
};
use guess_core::{Failure, HintSource, Language, Round, Verdict};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::GameConfig;
use crate::error::SessionClosed;
use crate::providers::Collaborators;

#[derive(Debug)]
enum Command {
    StartNewRound,
    SubmitGuess(String),
    Skip,
    RequestHint,
    ToggleLanguage,
    Shutdown,
}

#[derive(Debug)]
enum Completion {
    RoundLoaded {
        ticket: RoundTicket,
        result: Result<Round, Failure>,
    },
    GuessVerified {
        ticket: VerifyTicket,
        result: Result<Verdict, Failure>,
    },
    HintReady {
        ticket: HintTicket,
        result: Result<String, Failure>,
    },
    AdvanceDue(AdvanceTicket),
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Cheap, cloneable front door to a running [`GameSession`].
///
/// Every operation only enqueues a command; the outcome shows up in the next
/// published snapshot.
#[derive(Clone, Debug)]
pub struct GameHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<GameSnapshot>,
}

impl GameHandle {
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session has stopped.
    pub fn start_new_round(&self) -> Result<(), SessionClosed> {
        self.send(Command::StartNewRound)
    }

    /// Submit a raw guess. Blank guesses are ignored by the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session has stopped.
    pub fn submit_guess(&self, raw: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(Command::SubmitGuess(raw.into()))
    }

    /// # Errors
    ///
    /// Returns `SessionClosed` if the session has stopped.
    pub fn skip(&self) -> Result<(), SessionClosed> {
        self.send(Command::Skip)
    }

    /// # Errors
    ///
    /// Returns `SessionClosed` if the session has stopped.
    pub fn request_hint(&self) -> Result<(), SessionClosed> {
        self.send(Command::RequestHint)
    }

    /// # Errors
    ///
    /// Returns `SessionClosed` if the session has stopped.
    pub fn toggle_language(&self) -> Result<(), SessionClosed> {
        self.send(Command::ToggleLanguage)
    }

    /// Ask the session to stop. Pending requests and the auto-advance timer are
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns `SessionClosed` if the session has already stopped.
    pub fn shutdown(&self) -> Result<(), SessionClosed> {
        self.send(Command::Shutdown)
    }

    /// The most recently published state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that wakes on every published change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    fn send(&self, command: Command) -> Result<(), SessionClosed> {
        self.commands.send(command).map_err(|_| SessionClosed)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A running game session and its driver task.
pub struct GameSession {
    handle: GameHandle,
    task: JoinHandle<()>,
}

impl GameSession {
    /// Spawn the driver task on the current tokio runtime.
    ///
    /// The session starts idle; call [`GameHandle::start_new_round`] to fetch
    /// the first round.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(collaborators: Collaborators, config: GameConfig, language: Language) -> Self {
        let game = Game::with_advance_delay(language, config.advance_delay);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(game.snapshot());

        let driver = SessionLoop {
            game,
            collaborators,
            completions: completions_tx,
            snapshots: snapshots_tx,
            shutdown: CancellationToken::new(),
            advance: None,
        };
        let task = tokio::spawn(
            driver
                .run(commands_rx, completions_rx)
                .instrument(info_span!("game_session")),
        );

        Self {
            handle: GameHandle {
                commands: commands_tx,
                snapshots: snapshots_rx,
            },
            task,
        }
    }

    #[must_use]
    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Stop the session and wait for the driver task to finish.
    ///
    /// # Errors
    ///
    /// Returns `JoinError` if the driver task panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        // Already stopped if this fails; joining still reports how it ended.
        let _ = self.handle.shutdown();
        self.task.await
    }
}

//
// ─── DRIVER ────────────────────────────────────────────────────────────────────
//

struct SessionLoop {
    game: Game,
    collaborators: Collaborators,
    completions: mpsc::UnboundedSender<Completion>,
    snapshots: watch::Sender<GameSnapshot>,
    /// Cancels every in-flight request when the session stops.
    shutdown: CancellationToken,
    /// Armed while an auto-advance is scheduled.
    advance: Option<CancellationToken>,
}

impl SessionLoop {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        info!(language = %self.game.language().language(), "game session started");

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("all handles dropped");
                        break;
                    };
                    if self.handle_command(command).is_break() {
                        break;
                    }
                }
                Some(completion) = completions.recv() => self.handle_completion(completion),
            }
            self.publish();
        }

        self.teardown();
    }

    fn handle_command(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::StartNewRound => {
                let ticket = self.game.start_new_round();
                self.fetch_round(ticket);
            }
            Command::Skip => {
                let ticket = self.game.skip();
                debug!(generation = %ticket.generation, "round skipped");
                self.fetch_round(ticket);
            }
            Command::SubmitGuess(raw) => match self.game.submit_guess(&raw) {
                Ok(ticket) => self.verify_guess(ticket),
                Err(rejected) => debug!(%rejected, "guess ignored"),
            },
            Command::RequestHint => match self.game.request_hint() {
                Ok(ticket) => self.fetch_hint(ticket),
                Err(rejected) => debug!(%rejected, "hint request ignored"),
            },
            Command::ToggleLanguage => {
                let language = self.game.toggle_language();
                info!(%language, "language switched");
            }
            Command::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::RoundLoaded { ticket, result } => {
                if let Err(failure) = &result {
                    warn!(error = %failure, "quiz provider failed");
                }
                match self.game.round_loaded(ticket, result) {
                    Applied::Current(status) => {
                        debug!(generation = %ticket.generation, %status, "round loaded");
                    }
                    Applied::Stale => {
                        debug!(generation = %ticket.generation, "stale round dropped");
                    }
                }
            }
            Completion::GuessVerified { ticket, result } => {
                match self.game.guess_verified(&ticket, result) {
                    Applied::Current(Resolution::Correct(advance)) => {
                        info!(round = %ticket.round_id, "guess correct");
                        self.schedule_advance(advance);
                    }
                    Applied::Current(Resolution::Wrong) => {
                        info!(round = %ticket.round_id, "guess wrong");
                    }
                    Applied::Current(Resolution::TransportFailed(failure)) => {
                        warn!(round = %ticket.round_id, error = %failure, "verification failed");
                    }
                    Applied::Stale => {
                        debug!(generation = %ticket.generation, "stale verdict dropped");
                    }
                }
            }
            Completion::HintReady { ticket, result } => {
                if let Err(failure) = &result {
                    warn!(round = %ticket.round_id, error = %failure, "hint generator failed");
                }
                match self.game.hint_ready(&ticket, result) {
                    Applied::Current(HintSource::Generated) => {
                        debug!(round = %ticket.round_id, "hint stored");
                    }
                    Applied::Current(HintSource::Unavailable) => {}
                    Applied::Stale => {
                        debug!(generation = %ticket.generation, "stale hint dropped");
                    }
                }
            }
            Completion::AdvanceDue(ticket) => {
                self.advance = None;
                match self.game.advance_due(ticket) {
                    Applied::Current(next) => self.fetch_round(next),
                    Applied::Stale => {
                        debug!(generation = %ticket.generation, "stale advance dropped");
                    }
                }
            }
        }
    }

    fn fetch_round(&mut self, ticket: RoundTicket) {
        self.cancel_advance_timer();
        let quiz = Arc::clone(&self.collaborators.quiz);
        self.spawn_request(async move {
            let result = quiz
                .new_round()
                .await
                .map_err(|err| Failure::LoadFailure(err.to_string()));
            Completion::RoundLoaded { ticket, result }
        });
    }

    fn verify_guess(&self, ticket: VerifyTicket) {
        let oracle = Arc::clone(&self.collaborators.oracle);
        self.spawn_request(async move {
            let result = oracle
                .verify(&ticket.round_id, &ticket.guess)
                .await
                .map_err(|err| Failure::VerificationTransportFailure(err.to_string()));
            Completion::GuessVerified { ticket, result }
        });
    }

    fn fetch_hint(&self, ticket: HintTicket) {
        let hints = Arc::clone(&self.collaborators.hints);
        self.spawn_request(async move {
            let result = hints
                .hint(&ticket.round_id, ticket.language)
                .await
                .map_err(|err| Failure::HintUnavailable(err.to_string()));
            Completion::HintReady { ticket, result }
        });
    }

    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let completions = self.completions.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(
            async move {
                tokio::select! {
                    () = shutdown.cancelled() => {}
                    completion = request => {
                        let _ = completions.send(completion);
                    }
                }
            }
            .in_current_span(),
        );
    }

    fn schedule_advance(&mut self, ticket: AdvanceTicket) {
        self.cancel_advance_timer();
        let token = self.shutdown.child_token();
        self.advance = Some(token.clone());

        let completions = self.completions.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(ticket.delay) => {
                    let _ = completions.send(Completion::AdvanceDue(ticket));
                }
            }
        });
    }

    fn cancel_advance_timer(&mut self) {
        if let Some(token) = self.advance.take() {
            token.cancel();
        }
    }

    fn publish(&self) {
        let snapshot = self.game.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    fn teardown(&mut self) {
        if self.game.cancel_advance() {
            debug!("pending auto-advance cancelled");
        }
        self.cancel_advance_timer();
        self.shutdown.cancel();
        self.publish();
        info!(
            score = self.game.stats().score(),
            attempts = self.game.stats().attempts(),
            "game session stopped"
        );
    }
}
