use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::game::models::{GameModel, GoalModel};
use crate::game::repository::GameRepository;
use crate::membership::repository::MembershipRepository;
use crate::player::models::PlayerModel;
use crate::player::repository::PlayerRepository;
use crate::team::repository::TeamRepository;

use super::models::{PlayerRecord, TeamRow, TopScorerRow};
use super::players::compute_player_record;
use super::scorers::compute_top_scorers;
use super::standings::compute_standings;
use super::StatsError;

/// Service for the derived statistics views. Everything here is a pure
/// read path: each call reconstructs its result from full history, nothing
/// is cached or incrementally maintained.
pub struct StatsService {
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    team_repository: Arc<dyn TeamRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        team_repository: Arc<dyn TeamRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        membership_repository: Arc<dyn MembershipRepository + Send + Sync>,
    ) -> Self {
        Self {
            game_repository,
            team_repository,
            player_repository,
            membership_repository,
        }
    }

    /// The league table of a tournament
    #[instrument(skip(self))]
    pub async fn standings(&self, tournament_id: Uuid) -> Result<Vec<TeamRow>, StatsError> {
        let teams = self
            .team_repository
            .list_by_tournament(tournament_id)
            .await?;
        let finished_games = self.finished_tournament_games(tournament_id).await?;

        debug!(
            tournament_id = %tournament_id,
            teams = teams.len(),
            finished_games = finished_games.len(),
            "Computing standings"
        );
        Ok(compute_standings(&teams, &finished_games))
    }

    /// The top-scorer ranking of a tournament
    #[instrument(skip(self))]
    pub async fn top_scorers(&self, tournament_id: Uuid) -> Result<Vec<TopScorerRow>, StatsError> {
        let finished_games = self.finished_tournament_games(tournament_id).await?;
        let goals_by_game = self.goals_by_game().await?;
        let players_by_id = self.players_by_id().await?;
        let team_names = self.team_names().await?;

        Ok(compute_top_scorers(
            &finished_games,
            &goals_by_game,
            &players_by_id,
            &team_names,
        ))
    }

    /// Lifetime records for every player, reconstructed from full history
    #[instrument(skip(self))]
    pub async fn player_stats(&self) -> Result<Vec<PlayerRecord>, StatsError> {
        let players = self.player_repository.list_players().await?;
        let finished_games = self.game_repository.list_finished_games().await?;
        let all_goals = self.game_repository.list_goals().await?;
        let goals_by_game = group_goals(&all_goals);
        let team_names = self.team_names().await?;

        let mut records = Vec::with_capacity(players.len());
        for player in &players {
            let player_goals: Vec<GoalModel> = all_goals
                .iter()
                .filter(|g| g.player_id == player.id)
                .cloned()
                .collect();
            let ledger = self
                .membership_repository
                .teams_for_player(player.id)
                .await?;

            records.push(compute_player_record(
                player,
                &finished_games,
                &goals_by_game,
                &player_goals,
                &ledger,
                &team_names,
            ));
        }

        debug!(players = records.len(), "Player statistics computed");
        Ok(records)
    }

    async fn finished_tournament_games(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<GameModel>, StatsError> {
        let games = self
            .game_repository
            .list_by_tournament(tournament_id)
            .await?;
        Ok(games.into_iter().filter(|g| g.is_finished()).collect())
    }

    async fn goals_by_game(&self) -> Result<HashMap<Uuid, Vec<GoalModel>>, StatsError> {
        let goals = self.game_repository.list_goals().await?;
        Ok(group_goals(&goals))
    }

    async fn players_by_id(&self) -> Result<HashMap<Uuid, PlayerModel>, StatsError> {
        let players = self.player_repository.list_players().await?;
        Ok(players.into_iter().map(|p| (p.id, p)).collect())
    }

    async fn team_names(&self) -> Result<HashMap<Uuid, String>, StatsError> {
        let teams = self.team_repository.list_teams().await?;
        Ok(teams.into_iter().map(|t| (t.id, t.name)).collect())
    }
}

/// Groups goals by their game, preserving creation order within each game
fn group_goals(goals: &[GoalModel]) -> HashMap<Uuid, Vec<GoalModel>> {
    let mut by_game: HashMap<Uuid, Vec<GoalModel>> = HashMap::new();
    for goal in goals {
        by_game.entry(goal.game_id).or_default().push(goal.clone());
    }
    by_game
}
