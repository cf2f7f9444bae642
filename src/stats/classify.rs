use uuid::Uuid;

use super::models::GameOutcome;
use crate::game::models::GameModel;

/// Classifies a finished game from one team's perspective.
///
/// Own goals are already reflected in the maintained scores, so the final
/// scores are the whole truth here. Only defined for finished games with
/// `team_id` on one of the two sides; callers filter before asking.
pub fn classify(game: &GameModel, team_id: Uuid) -> GameOutcome {
    debug_assert!(game.involves_team(team_id));

    let (own, opponent) = if team_id == game.home_team_id {
        (game.home_score, game.away_score)
    } else {
        (game.away_score, game.home_score)
    };

    if own > opponent {
        GameOutcome::Win
    } else if own == opponent {
        GameOutcome::Draw
    } else {
        GameOutcome::Loss
    }
}
