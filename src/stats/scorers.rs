use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::game::models::{GameModel, GoalModel};
use crate::player::models::PlayerModel;

use super::models::TopScorerRow;

/// Ranks a tournament's players by goals in finished games, own goals
/// excluded. The team name shown is the credited team of the player's first
/// counted goal in the tournament. The full list is returned, sorted by
/// goal count descending (stable beyond that).
pub fn compute_top_scorers(
    finished_games: &[GameModel],
    goals_by_game: &HashMap<Uuid, Vec<GoalModel>>,
    players_by_id: &HashMap<Uuid, PlayerModel>,
    team_names: &HashMap<Uuid, String>,
) -> Vec<TopScorerRow> {
    let mut rows: Vec<TopScorerRow> = Vec::new();
    let mut index_by_player: HashMap<Uuid, usize> = HashMap::new();

    for game in finished_games.iter().filter(|g| g.is_finished()) {
        let Some(goals) = goals_by_game.get(&game.id) else {
            continue;
        };
        for goal in goals.iter().filter(|g| !g.own_goal) {
            let Some(player) = players_by_id.get(&goal.player_id) else {
                debug!(
                    goal_id = %goal.id,
                    player_id = %goal.player_id,
                    "Goal references a missing player, skipped"
                );
                continue;
            };

            match index_by_player.get(&player.id) {
                Some(&index) => rows[index].goals += 1,
                None => {
                    let team_name = team_names
                        .get(&goal.team_id)
                        .cloned()
                        .unwrap_or_default();
                    index_by_player.insert(player.id, rows.len());
                    rows.push(TopScorerRow {
                        player_id: player.id,
                        player_name: player.name.clone(),
                        player_number: player.number,
                        team_name,
                        goals: 1,
                    });
                }
            }
        }
    }

    rows.sort_by(|a, b| b.goals.cmp(&a.goals));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::models::GameStatus;
    use crate::team::models::TeamModel;

    struct World {
        home: TeamModel,
        away: TeamModel,
        games: Vec<GameModel>,
        goals_by_game: HashMap<Uuid, Vec<GoalModel>>,
        players_by_id: HashMap<Uuid, PlayerModel>,
        team_names: HashMap<Uuid, String>,
    }

    impl World {
        fn new() -> Self {
            let tournament_id = Uuid::new_v4();
            let home = TeamModel::new("Alfa".to_string(), tournament_id);
            let away = TeamModel::new("Beta".to_string(), tournament_id);
            let mut team_names = HashMap::new();
            team_names.insert(home.id, home.name.clone());
            team_names.insert(away.id, away.name.clone());
            Self {
                home,
                away,
                games: Vec::new(),
                goals_by_game: HashMap::new(),
                players_by_id: HashMap::new(),
                team_names,
            }
        }

        fn player(&mut self, name: &str, number: i32) -> Uuid {
            let player = PlayerModel::new_free(name.to_string(), number);
            let id = player.id;
            self.players_by_id.insert(id, player);
            id
        }

        fn finished_game(&mut self) -> Uuid {
            let mut game = GameModel::new(self.home.tournament_id, self.home.id, self.away.id);
            game.status = GameStatus::Finished;
            let id = game.id;
            self.games.push(game);
            id
        }

        fn goal(&mut self, game_id: Uuid, player_id: Uuid, team_id: Uuid, own_goal: bool) {
            self.goals_by_game
                .entry(game_id)
                .or_default()
                .push(GoalModel::new(game_id, player_id, team_id, own_goal));
        }

        fn compute(&self) -> Vec<TopScorerRow> {
            compute_top_scorers(
                &self.games,
                &self.goals_by_game,
                &self.players_by_id,
                &self.team_names,
            )
        }
    }

    #[test]
    fn counts_and_ranks_excluding_own_goals() {
        let mut w = World::new();
        let asib = w.player("Asib", 10);
        let amir = w.player("Amir", 11);
        let (home, away) = (w.home.id, w.away.id);

        let g1 = w.finished_game();
        let g2 = w.finished_game();
        w.goal(g1, asib, home, false);
        w.goal(g1, amir, away, false);
        w.goal(g2, asib, home, false);
        w.goal(g2, amir, home, true); // own goal, not counted

        let rows = w.compute();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player_name, "Asib");
        assert_eq!(rows[0].goals, 2);
        assert_eq!(rows[0].team_name, "Alfa");
        assert_eq!(rows[1].player_name, "Amir");
        assert_eq!(rows[1].goals, 1);
        assert_eq!(rows[1].team_name, "Beta");
    }

    #[test]
    fn only_finished_games_count() {
        let mut w = World::new();
        let asib = w.player("Asib", 10);
        let home = w.home.id;

        let g = w.finished_game();
        w.goal(g, asib, home, false);
        if let Some(game) = w.games.last_mut() {
            game.status = GameStatus::InProgress;
        }

        assert!(w.compute().is_empty());
    }

    #[test]
    fn missing_players_are_skipped_not_fatal() {
        let mut w = World::new();
        let home = w.home.id;
        let g = w.finished_game();
        w.goal(g, Uuid::new_v4(), home, false); // deleted player

        assert!(w.compute().is_empty());
    }
}
