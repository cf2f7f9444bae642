use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

use crate::game::models::{GameModel, GoalModel};
use crate::membership::models::MembershipRecord;
use crate::player::models::PlayerModel;

use super::classify::classify;
use super::models::{GameOutcome, PlayerRecord, NO_TEAM_LABEL};
use super::resolve::resolve_participant;

/// Folds a player's full history into their lifetime record.
///
/// `finished_games` is every finished game (tournament or legacy) in
/// creation order, `goals_by_game` the goals per game, `player_goals` every
/// goal the player ever scored in creation order, and `ledger` the player's
/// membership rows oldest first. Data gaps degrade, they never fail: a goal
/// pointing at a vanished game is skipped, an unresolvable game is simply
/// excluded from the win/draw/loss tallies.
pub fn compute_player_record(
    player: &PlayerModel,
    finished_games: &[GameModel],
    goals_by_game: &HashMap<Uuid, Vec<GoalModel>>,
    player_goals: &[GoalModel],
    ledger: &[MembershipRecord],
    team_names: &HashMap<Uuid, String>,
) -> PlayerRecord {
    let games_by_id: HashMap<Uuid, &GameModel> =
        finished_games.iter().map(|g| (g.id, g)).collect();
    let no_goals: Vec<GoalModel> = Vec::new();

    // Goal tallies count every goal the player scored, regardless of
    // whether the game still resolves to a team
    let goals_scored = player_goals.iter().filter(|g| !g.own_goal).count() as u32;
    let own_goals = player_goals.iter().filter(|g| g.own_goal).count() as u32;

    // Tournaments: scored games, the current context, and the ledger
    let mut tournaments: HashSet<Uuid> = HashSet::new();
    for goal in player_goals {
        match games_by_id.get(&goal.game_id) {
            Some(game) => {
                if let Some(tournament_id) = game.tournament_id {
                    tournaments.insert(tournament_id);
                }
            }
            None => {
                debug!(
                    goal_id = %goal.id,
                    game_id = %goal.game_id,
                    "Goal references a missing or unfinished game, skipped"
                );
            }
        }
    }
    if let Some(tournament_id) = player.tournament_id {
        tournaments.insert(tournament_id);
    }
    for record in ledger {
        tournaments.insert(record.tournament_id);
    }

    // Win/draw/loss over every finished game the resolver can attribute.
    // Each game is resolved once, so it is counted at most once.
    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;
    let mut resolved_games: Vec<(&GameModel, Uuid)> = Vec::new();
    for game in finished_games {
        let game_goals = goals_by_game.get(&game.id).unwrap_or(&no_goals);
        match resolve_participant(game, player.id, game_goals, ledger, player.team_id) {
            Some(team_id) => {
                match classify(game, team_id) {
                    GameOutcome::Win => wins += 1,
                    GameOutcome::Draw => draws += 1,
                    GameOutcome::Loss => losses += 1,
                }
                resolved_games.push((game, team_id));
            }
            None => {
                debug!(
                    game_id = %game.id,
                    player_id = %player.id,
                    "Participant unresolvable, game excluded from record"
                );
            }
        }
    }

    let team_name = display_team_name(player, player_goals, ledger, &resolved_games, team_names);

    PlayerRecord {
        id: player.id,
        name: player.name.clone(),
        number: player.number,
        team_name,
        wins,
        draws,
        losses,
        goals_scored,
        own_goals,
        tournaments_participated: tournaments.len(),
    }
}

/// Resolution order for the displayed team name: current assignment, then
/// the earliest ledger row, then the most recent goal's credited team, then
/// the most recent resolved game, then the sentinel.
fn display_team_name(
    player: &PlayerModel,
    player_goals: &[GoalModel],
    ledger: &[MembershipRecord],
    resolved_games: &[(&GameModel, Uuid)],
    team_names: &HashMap<Uuid, String>,
) -> String {
    if let Some(name) = player.team_id.and_then(|id| team_names.get(&id)) {
        return name.clone();
    }

    if let Some(name) = ledger
        .iter()
        .find_map(|record| team_names.get(&record.team_id))
    {
        return name.clone();
    }

    if let Some(name) = player_goals
        .iter()
        .rev()
        .find_map(|goal| team_names.get(&goal.team_id))
    {
        return name.clone();
    }

    if let Some(name) = resolved_games
        .iter()
        .rev()
        .find_map(|(_, team_id)| team_names.get(team_id))
    {
        return name.clone();
    }

    NO_TEAM_LABEL.to_string()
}
