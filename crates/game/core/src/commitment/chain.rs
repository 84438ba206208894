use crate::state::{BoardState, PieceState};

use super::{Commitment, CommitmentScheme};

pub const GENESIS_DOMAIN: &str = "arena/genesis/v1";
pub const TURN_DOMAIN: &str = "arena/turn/v1";

/// `nonce, board_id, player[pos, hp, atk, def], enemy[pos, hp, atk, def]`
fn board_words(nonce: u64, board_id: u64, player: &PieceState, enemy: &PieceState) -> [u64; 10] {
    let mut words = [0u64; 10];
    words[0] = nonce;
    words[1] = board_id;
    words[2..6].copy_from_slice(&player.commitment_words());
    words[6..10].copy_from_slice(&enemy.commitment_words());
    words
}

/// Commitment of a freshly created board.
pub fn genesis_commitment(
    scheme: &impl CommitmentScheme,
    nonce: u64,
    board_id: u64,
    player: &PieceState,
    enemy: &PieceState,
) -> Commitment {
    scheme.digest(
        GENESIS_DOMAIN,
        None,
        &board_words(nonce, board_id, player, enemy),
    )
}

/// Commitment of a board derived from the state committed as `prior`.
pub fn chained_commitment(
    scheme: &impl CommitmentScheme,
    prior: &Commitment,
    nonce: u64,
    board_id: u64,
    player: &PieceState,
    enemy: &PieceState,
) -> Commitment {
    scheme.digest(
        TURN_DOMAIN,
        Some(prior),
        &board_words(nonce, board_id, player, enemy),
    )
}

/// Recomputes the commitment `state` should carry from its own fields.
pub(crate) fn expected_commitment(scheme: &impl CommitmentScheme, state: &BoardState) -> Commitment {
    match &state.previous {
        None => genesis_commitment(
            scheme,
            state.nonce,
            state.board_id,
            &state.player,
            &state.enemy,
        ),
        Some(prior) => chained_commitment(
            scheme,
            prior,
            state.nonce,
            state.board_id,
            &state.player,
            &state.enemy,
        ),
    }
}
