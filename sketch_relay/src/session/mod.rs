//! Session state machine.
//!
//! A session moves through `PreJoin -> Joining -> Active -> Ended` exactly
//! once. [`SessionState`] is the plain value each transition consumes and
//! returns; [`Session`] owns one behind a lock, talks to the game authority
//! and runs the two polling tasks that keep the phase and room summary
//! fresh.
//!
//! ## Example
//!
//! ```no_run
//! use sketch_relay::{GameApi, PollConfig, Session};
//! use std::sync::Arc;
//!
//! async fn play<A: GameApi + 'static>(api: Arc<A>) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session::new(api, PollConfig::default());
//!     session.join("Billy", "TheClubhouse").await?;
//!
//!     let view = session.current_view().await;
//!     println!("{}", view.phase.headline());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod poller;
pub mod state;

pub use errors::{SessionError, SessionResult};
pub use manager::Session;
pub use poller::PollConfig;
pub use state::{SessionState, SessionView, Stage};
