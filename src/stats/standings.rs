use crate::game::models::GameModel;
use crate::team::models::TeamModel;

use super::classify::classify;
use super::models::{GameOutcome, TeamRow};

/// Folds a tournament's finished games into its league table.
///
/// Every team appears, including teams with no finished games yet. The
/// ordering is points, then goal difference, then goals scored, all
/// descending; ties beyond that keep team creation order (the sort is
/// stable).
pub fn compute_standings(teams: &[TeamModel], finished_games: &[GameModel]) -> Vec<TeamRow> {
    let mut rows: Vec<TeamRow> = teams
        .iter()
        .map(|team| {
            let mut row = TeamRow::new(team.id, team.name.clone());

            for game in finished_games
                .iter()
                .filter(|g| g.is_finished() && g.involves_team(team.id))
            {
                let (goals_for, goals_against) = if game.home_team_id == team.id {
                    (game.home_score, game.away_score)
                } else {
                    (game.away_score, game.home_score)
                };

                row.games_played += 1;
                row.goals_for += goals_for;
                row.goals_against += goals_against;
                match classify(game, team.id) {
                    GameOutcome::Win => row.wins += 1,
                    GameOutcome::Draw => row.draws += 1,
                    GameOutcome::Loss => row.losses += 1,
                }
            }

            row.points = row.wins * 3 + row.draws;
            row
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference().cmp(&a.goal_difference()))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    rows
}
