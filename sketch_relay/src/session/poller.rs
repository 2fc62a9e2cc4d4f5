//! Background refresh of the phase and the room summary.
//!
//! Each poller is its own task on its own fixed interval, so a slow or
//! failing summary fetch never holds up the phase and vice versa. Both stop
//! once the session ends or the cancellation flag is raised.

use log::debug;
use std::{mem, ops::ControlFlow, sync::Arc, time::Duration};
use tokio::{
    sync::{RwLock, watch},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

use super::state::{SessionState, Stage};
use crate::{game::entities::Identity, net::api::GameApi};

pub(crate) type SharedState = Arc<RwLock<SessionState>>;

/// Polling cadence for the two refresh tasks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollConfig {
    pub phase_interval: Duration,
    pub summary_interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            phase_interval: Duration::from_secs(2),
            summary_interval: Duration::from_secs(3),
        }
    }
}

/// Which resource a poller keeps fresh.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PollTarget {
    Status,
    Summary,
}

impl PollTarget {
    fn name(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Summary => "summary",
        }
    }
}

pub(crate) struct Poller<A: GameApi + 'static> {
    api: Arc<A>,
    state: SharedState,
    identity: Identity,
    cancel: watch::Receiver<bool>,
}

impl<A: GameApi + 'static> Poller<A> {
    pub(crate) fn new(
        api: Arc<A>,
        state: SharedState,
        identity: Identity,
        cancel: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api,
            state,
            identity,
            cancel,
        }
    }

    pub(crate) fn spawn(self, target: PollTarget, period: Duration) -> JoinHandle<()> {
        tokio::spawn(self.run(target, period))
    }

    fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    async fn run(mut self, target: PollTarget, period: Duration) {
        // The join already fetched both once, so the first tick is a full
        // period out.
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!("{} poller started for {}", target.name(), self.identity);
        while !self.is_cancelled() {
            tokio::select! {
                changed = self.cancel.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let flow = match target {
                        PollTarget::Status => self.poll_status().await,
                        PollTarget::Summary => self.poll_summary().await,
                    };
                    if flow.is_break() {
                        break;
                    }
                }
            }
        }
        debug!("{} poller stopped for {}", target.name(), self.identity);
    }

    async fn poll_status(&self) -> ControlFlow<()> {
        if self.state.read().await.stage() == Stage::Ended {
            return ControlFlow::Break(());
        }
        let outcome = self
            .api
            .fetch_player_status(&self.identity.username, &self.identity.room_code)
            .await;
        if self.is_cancelled() {
            return ControlFlow::Break(());
        }

        let mut state = self.state.write().await;
        *state = mem::take(&mut *state).apply_status(outcome);
        continue_until_ended(&state)
    }

    async fn poll_summary(&self) -> ControlFlow<()> {
        if self.state.read().await.stage() == Stage::Ended {
            return ControlFlow::Break(());
        }
        let outcome = self
            .api
            .fetch_room_summary(&self.identity.room_code)
            .await;
        if self.is_cancelled() {
            return ControlFlow::Break(());
        }

        let mut state = self.state.write().await;
        *state = mem::take(&mut *state).apply_summary(outcome);
        continue_until_ended(&state)
    }
}

fn continue_until_ended(state: &SessionState) -> ControlFlow<()> {
    match state.stage() {
        Stage::Ended => ControlFlow::Break(()),
        _ => ControlFlow::Continue(()),
    }
}
