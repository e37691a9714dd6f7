//! Session roster: ordered players with scores.

use tracing::{debug, info};

use crate::{
    dao::{
        game_store::GameStore,
        models::{NewPlayer, PlayerEntity, PlayerUpdate},
    },
    dto::{
        StatusResponse,
        players::{
            AddPlayerRequest, PlayerResponse, PlayersQuery, PlayersResponse, RemovePlayerRequest,
            ResetPlayersRequest, ResetPlayersResponse, UpdatePlayerRequest,
        },
    },
    error::ServiceError,
    state::SharedState,
};

/// Number of placeholder players created by a reset.
const DEFAULT_ROSTER_SIZE: i64 = 2;

/// How a request designates a player.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayerRef {
    Id(i64),
    Name(String),
}

impl PlayerRef {
    /// `player_id` wins over `player_name` when both are sent.
    fn from_request(
        player_id: Option<i64>,
        player_name: Option<String>,
    ) -> Result<Self, ServiceError> {
        match (player_id, player_name) {
            (Some(id), _) => Ok(PlayerRef::Id(id)),
            (None, Some(name)) if !name.trim().is_empty() => Ok(PlayerRef::Name(name)),
            _ => Err(ServiceError::InvalidInput(
                "player_id or player_name is required".into(),
            )),
        }
    }
}

/// Pick the single player designated by `reference` among `roster`.
fn select(roster: Vec<PlayerEntity>, reference: &PlayerRef) -> Result<PlayerEntity, ServiceError> {
    let mut matches = roster.into_iter().filter(|player| match reference {
        PlayerRef::Id(id) => player.id == *id,
        PlayerRef::Name(name) => player.player_name == *name,
    });

    let Some(player) = matches.next() else {
        return Err(ServiceError::NotFound("Player not found".into()));
    };
    if matches.next().is_some() {
        return Err(ServiceError::InvalidState(
            "ambiguous player name, use player_id".into(),
        ));
    }
    Ok(player)
}

async fn resolve(
    store: &dyn GameStore,
    session_id: &str,
    reference: &PlayerRef,
) -> Result<PlayerEntity, ServiceError> {
    let roster = store.list_players(session_id.to_owned()).await?;
    select(roster, reference)
}

fn non_blank(name: Option<String>) -> Option<String> {
    name.map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
}

pub async fn list_players(
    state: &SharedState,
    query: PlayersQuery,
) -> Result<PlayersResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let players = store.list_players(query.session_id).await?;
    Ok(PlayersResponse {
        players: players.into_iter().map(Into::into).collect(),
    })
}

/// Seat a new player after the last one.
pub async fn add_player(
    state: &SharedState,
    request: AddPlayerRequest,
) -> Result<PlayerResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let player = store
        .add_player(NewPlayer {
            session_id: request.session_id,
            player_name: non_blank(request.player_name),
            placeholder_prefix: state.config().player_name_prefix().to_owned(),
        })
        .await?;

    debug!(
        session_id = %player.session_id,
        player_id = player.id,
        position = player.position,
        "player added"
    );
    Ok(PlayerResponse::success(player.into()))
}

/// Set the score of a player, renaming them when a new name is given.
pub async fn update_player(
    state: &SharedState,
    request: UpdatePlayerRequest,
) -> Result<PlayerResponse, ServiceError> {
    let reference = PlayerRef::from_request(request.player_id, request.player_name)?;
    let store = state.require_game_store().await?;
    let target = resolve(store.as_ref(), &request.session_id, &reference).await?;

    let updated = store
        .update_player(
            request.session_id,
            PlayerUpdate {
                player_id: target.id,
                score: request.score,
                player_name: non_blank(request.new_player_name),
            },
        )
        .await?
        .ok_or_else(|| ServiceError::NotFound("Player not found".into()))?;

    Ok(PlayerResponse::success(updated.into()))
}

/// Remove a player; the remaining seats are renumbered 1..N.
pub async fn remove_player(
    state: &SharedState,
    request: RemovePlayerRequest,
) -> Result<StatusResponse, ServiceError> {
    let reference = PlayerRef::from_request(request.player_id, request.player_name)?;
    let store = state.require_game_store().await?;
    let target = resolve(store.as_ref(), &request.session_id, &reference).await?;

    if !store.remove_player(request.session_id, target.id).await? {
        return Err(ServiceError::NotFound("Player not found".into()));
    }
    Ok(StatusResponse::success())
}

/// Replace the roster with two placeholder players.
pub async fn reset_players(
    state: &SharedState,
    request: ResetPlayersRequest,
) -> Result<ResetPlayersResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let names = (1..=DEFAULT_ROSTER_SIZE)
        .map(|position| state.config().placeholder_player_name(position))
        .collect();

    let players = store.reset_players(request.session_id.clone(), names).await?;
    info!(session_id = %request.session_id, "roster reset");
    Ok(ResetPlayersResponse::success(
        players.into_iter().map(Into::into).collect(),
    ))
}
