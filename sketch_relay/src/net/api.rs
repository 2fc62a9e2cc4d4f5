use async_trait::async_trait;

use super::{
    errors::ApiResult,
    messages::{RawStatus, RawSummary},
};
use crate::game::entities::{ImageData, ResultChain, RoomCode, Username};

/// Requests the client can make of the game authority.
///
/// Implementations translate each call into exactly one request and report
/// every failure to the caller. They never retry; polling cadence and
/// recovery belong to the session.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// `POST /join`
    async fn join(&self, username: &Username, room_code: &RoomCode) -> ApiResult<()>;

    /// `POST /phrase`
    async fn submit_phrase(
        &self,
        username: &Username,
        room_code: &RoomCode,
        phrase: &str,
    ) -> ApiResult<()>;

    /// `POST /image`
    async fn submit_image(
        &self,
        username: &Username,
        room_code: &RoomCode,
        image: &ImageData,
    ) -> ApiResult<()>;

    /// `GET /game/{game}/player/{username}`
    async fn fetch_player_status(
        &self,
        username: &Username,
        room_code: &RoomCode,
    ) -> ApiResult<RawStatus>;

    /// `GET /game/{game}`
    async fn fetch_room_summary(&self, room_code: &RoomCode) -> ApiResult<RawSummary>;

    /// `GET /game/{game}/results`
    async fn fetch_results(&self, room_code: &RoomCode) -> ApiResult<Vec<ResultChain>>;

    /// `POST /restart`, clearing a finished game on the authority.
    async fn restart(&self) -> ApiResult<()>;
}
