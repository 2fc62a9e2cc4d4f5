use log::{info, warn};
use std::{mem, sync::Arc};
use tokio::{
    sync::{RwLock, watch},
    task::JoinHandle,
};

use super::{
    errors::{SessionError, SessionResult},
    poller::{PollConfig, PollTarget, Poller, SharedState},
    state::{SessionState, SessionView, Stage},
};
use crate::{
    game::{
        action_gate::{Submission, SubmissionRequest},
        entities::{Identity, ImageData, ResultChain},
    },
    net::api::GameApi,
};

/// A single player's connection to one room.
///
/// Owns the session state and the two background pollers. Dropping the
/// session cancels the pollers; [`Session::shutdown`] also waits for them.
pub struct Session<A: GameApi + 'static> {
    api: Arc<A>,
    config: PollConfig,
    state: SharedState,
    cancel: watch::Sender<bool>,
    pollers: Vec<JoinHandle<()>>,
}

impl<A: GameApi + 'static> Session<A> {
    pub fn new(api: Arc<A>, config: PollConfig) -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            api,
            config,
            state: Arc::new(RwLock::new(SessionState::new())),
            cancel,
            pollers: Vec::new(),
        }
    }

    /// Snapshot of the latest known values.
    pub async fn current_view(&self) -> SessionView {
        self.state.read().await.view()
    }

    /// Full copy of the session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn stage(&self) -> Stage {
        self.state.read().await.stage()
    }

    async fn update(&self, transition: impl FnOnce(SessionState) -> SessionState) {
        let mut state = self.state.write().await;
        *state = transition(mem::take(&mut *state));
    }

    async fn identity(&self) -> SessionResult<Identity> {
        self.state
            .read()
            .await
            .identity()
            .cloned()
            .ok_or(SessionError::NotJoined)
    }

    /// Joins a room, fetches the phase and summary once, and starts polling.
    ///
    /// A rejected or failed join leaves the session where it was, so the
    /// caller may try again.
    pub async fn join(&mut self, username: &str, room_code: &str) -> SessionResult<()> {
        let identity = Identity::new(username, room_code)?;
        if let Some(joined) = self.state.read().await.identity() {
            return Err(SessionError::AlreadyJoined(joined.room_code.to_string()));
        }

        if let Err(error) = self
            .api
            .join(&identity.username, &identity.room_code)
            .await
        {
            warn!("join of {identity} failed: {error}");
            return Err(error.into());
        }

        {
            let mut state = self.state.write().await;
            let joining = state.clone().begin_join(identity.clone())?;
            *state = joining;
        }

        self.refresh().await?;
        self.update(SessionState::activate).await;

        match self.stage().await {
            Stage::Ended => info!("{identity} joined a finished game"),
            _ => {
                self.spawn_pollers(identity.clone());
                info!("{identity} joined");
            }
        }
        Ok(())
    }

    fn spawn_pollers(&mut self, identity: Identity) {
        let targets = [
            (PollTarget::Status, self.config.phase_interval),
            (PollTarget::Summary, self.config.summary_interval),
        ];
        for (target, period) in targets {
            let poller = Poller::new(
                self.api.clone(),
                self.state.clone(),
                identity.clone(),
                self.cancel.subscribe(),
            );
            self.pollers.push(poller.spawn(target, period));
        }
    }

    /// Fetches the phase and the summary concurrently and applies whatever
    /// came back. Failures are logged and the previous values kept.
    pub async fn refresh(&self) -> SessionResult<()> {
        let identity = self.identity().await?;
        let (status, summary) = tokio::join!(
            self.api
                .fetch_player_status(&identity.username, &identity.room_code),
            self.api.fetch_room_summary(&identity.room_code),
        );
        self.update(|state| state.apply_status(status).apply_summary(summary))
            .await;
        Ok(())
    }

    pub async fn submit_phrase(&self, phrase: &str) -> SessionResult<()> {
        self.submit(SubmissionRequest::Phrase(phrase.to_string()))
            .await
    }

    /// Submits a drawing. `None` means nothing was selected and is refused
    /// without a request.
    pub async fn submit_image(&self, image: Option<ImageData>) -> SessionResult<()> {
        self.submit(SubmissionRequest::Image(image)).await
    }

    async fn submit(&self, request: SubmissionRequest) -> SessionResult<()> {
        // Authorize and reserve under one write lock so overlapping submits
        // for the same phase can't both pass the gate.
        let (identity, submission, phase) = {
            let mut state = self.state.write().await;
            let identity = state.identity().cloned().ok_or(SessionError::NotJoined)?;
            let submission = state.gate().authorize(request)?;
            let phase = state.phase().clone();
            *state = mem::take(&mut *state).begin_submission(phase.clone());
            (identity, submission, phase)
        };

        let sent = match &submission {
            Submission::Phrase(phrase) => {
                self.api
                    .submit_phrase(&identity.username, &identity.room_code, phrase)
                    .await
            }
            Submission::Image(image) => {
                self.api
                    .submit_image(&identity.username, &identity.room_code, image)
                    .await
            }
        };
        if let Err(error) = sent {
            warn!("submission while {phase} failed: {error}");
            self.update(|state| state.abort_submission(&phase)).await;
            return Err(error.into());
        }

        // The displayed phase only moves on when a poll says so.
        Ok(())
    }

    /// Every chain of the finished game. Fetched once, then served from the
    /// session.
    pub async fn results(&self) -> SessionResult<Vec<ResultChain>> {
        let identity = {
            let state = self.state.read().await;
            if state.stage() != Stage::Ended {
                return Err(SessionError::ResultsUnavailable);
            }
            if let Some(results) = state.results() {
                return Ok(results.to_vec());
            }
            state.identity().cloned().ok_or(SessionError::NotJoined)?
        };

        let results = self.api.fetch_results(&identity.room_code).await?;
        info!(
            "fetched {} result chains for room {}",
            results.len(),
            identity.room_code
        );
        let cached = results.clone();
        self.update(|state| state.with_results(cached)).await;
        Ok(results)
    }

    /// Asks the authority to clear the finished game.
    pub async fn restart(&self) -> SessionResult<()> {
        if self.stage().await != Stage::Ended {
            return Err(SessionError::GameInProgress);
        }
        self.api.restart().await?;
        info!("requested a restart");
        Ok(())
    }

    /// Whether any poller is still running.
    pub fn is_running(&self) -> bool {
        self.pollers.iter().any(|poller| !poller.is_finished())
    }

    /// Stops both pollers and waits for them to exit. Polls still in flight
    /// are discarded.
    pub async fn shutdown(&mut self) {
        self.cancel.send_replace(true);
        for poller in self.pollers.drain(..) {
            if let Err(error) = poller.await {
                warn!("poller exited abnormally: {error}");
            }
        }
    }
}

impl<A: GameApi + 'static> Drop for Session<A> {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}
