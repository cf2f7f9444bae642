use tracing::debug;
use uuid::Uuid;

use crate::game::models::{GameModel, GoalModel};
use crate::membership::models::MembershipRecord;

/// Determines which team a player played for in a historical game.
///
/// Team membership is mutable, unversioned state, so the answer is
/// reconstructed from ranked evidence; the first source that speaks wins:
///
/// 1. Goal evidence: the credited team of the player's earliest goal in
///    this game. A goal's credited team is by definition correct for the
///    game it was scored in.
/// 2. Ledger evidence: the membership ledger for the game's tournament,
///    accepted only when exactly one of the two sides matches. Stable
///    across roster changes.
/// 3. Current team: the player's present assignment, if it is one of the
///    two sides. Weakest evidence, kept for data written before the
///    ledger existed.
///
/// Returns None when no source resolves; the game is then excluded from
/// the player's record rather than guessed at.
pub fn resolve_participant(
    game: &GameModel,
    player_id: Uuid,
    game_goals: &[GoalModel],
    ledger: &[MembershipRecord],
    current_team_id: Option<Uuid>,
) -> Option<Uuid> {
    // Rule 1: goal evidence
    let scored_for = game_goals
        .iter()
        .filter(|goal| goal.player_id == player_id && game.involves_team(goal.team_id))
        .min_by_key(|goal| goal.created_at)
        .map(|goal| goal.team_id);
    if scored_for.is_some() {
        return scored_for;
    }

    // Rule 2: ledger evidence, only within the game's tournament
    if let Some(tournament_id) = game.tournament_id {
        // Triples are unique in the ledger, so each side appears at most once
        let ledger_teams: Vec<Uuid> = ledger
            .iter()
            .filter(|record| {
                record.player_id == player_id
                    && record.tournament_id == tournament_id
                    && game.involves_team(record.team_id)
            })
            .map(|record| record.team_id)
            .collect();

        match ledger_teams.as_slice() {
            [team_id] => return Some(*team_id),
            [] => {}
            _ => {
                // Both sides claim the player; the ledger cannot decide
                debug!(
                    game_id = %game.id,
                    player_id = %player_id,
                    "Ambiguous ledger evidence, falling through to current team"
                );
            }
        }
    }

    // Rule 3: current assignment
    if let Some(team_id) = current_team_id {
        if game.involves_team(team_id) {
            return Some(team_id);
        }
    }

    None
}
