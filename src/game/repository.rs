use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::models::{GameModel, GameStatus, GoalModel};
use crate::shared::AppError;

/// Result of attempting a game status transition
#[derive(Debug, Clone)]
pub enum TransitionResult {
    /// Transition applied, returns the updated game
    Success(GameModel),
    /// Game does not exist
    GameNotFound,
    /// Game was not in the expected source status
    WrongStatus(GameStatus),
}

/// Result of atomically inserting a goal and bumping the credited score
#[derive(Debug, Clone)]
pub enum AddGoalResult {
    /// Goal stored and score updated, returns the updated game and the goal
    Success { game: GameModel, goal: GoalModel },
    /// Game does not exist
    GameNotFound,
    /// The goal's credited team is neither side of the game
    CreditedTeamNotInGame,
}

/// Result of atomically deleting a goal and decrementing the credited score
#[derive(Debug, Clone)]
pub enum DeleteGoalResult {
    /// Goal removed; the updated game, or None if the game was already gone
    Success { game: Option<GameModel> },
    /// Goal does not exist
    GoalNotFound,
}

/// Trait for game and goal repository operations.
///
/// Goals live with their game: the compound writes (goal insert/delete plus
/// score update) are single repository operations so a half-applied state is
/// never observable.
#[async_trait]
pub trait GameRepository {
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError>;
    async fn get_game(&self, game_id: Uuid) -> Result<Option<GameModel>, AppError>;

    /// All games, newest first
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError>;

    /// Games of a tournament in creation order
    async fn list_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<GameModel>, AppError>;

    /// All finished games across tournaments (and legacy games)
    async fn list_finished_games(&self) -> Result<Vec<GameModel>, AppError>;

    async fn count_finished_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError>;

    /// Atomically moves a game from `from` to `to`
    async fn try_transition(
        &self,
        game_id: Uuid,
        from: GameStatus,
        to: GameStatus,
    ) -> Result<TransitionResult, AppError>;

    /// Atomically stores a goal and increments the credited side's score
    async fn add_goal(&self, goal: &GoalModel) -> Result<AddGoalResult, AppError>;

    /// Atomically removes a goal and decrements the credited side's score,
    /// never below zero
    async fn delete_goal(&self, goal_id: Uuid) -> Result<DeleteGoalResult, AppError>;

    async fn get_goal(&self, goal_id: Uuid) -> Result<Option<GoalModel>, AppError>;

    /// Goals of one game in creation order
    async fn list_goals_by_game(&self, game_id: Uuid) -> Result<Vec<GoalModel>, AppError>;

    /// Every goal in the store
    async fn list_goals(&self) -> Result<Vec<GoalModel>, AppError>;

    /// Deletes a game together with its goals
    async fn delete_game(&self, game_id: Uuid) -> Result<(), AppError>;

    /// Deletes every game (and their goals) of the given tournament
    async fn delete_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError>;

    /// Deletes all games and goals, returns (games, goals) removed
    async fn clear_games(&self) -> Result<(u64, u64), AppError>;
}

#[derive(Default)]
struct GameStore {
    games: HashMap<Uuid, GameModel>,
    goals: HashMap<Uuid, GoalModel>,
}

/// In-memory implementation of GameRepository for development and testing.
/// A single lock over games and goals gives the compound goal/score writes
/// their atomicity.
pub struct InMemoryGameRepository {
    store: Mutex<GameStore>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            store: Mutex::new(GameStore::default()),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError> {
        debug!(game_id = %game.id, "Creating game in memory");

        let mut store = self.store.lock().unwrap();
        if store.games.contains_key(&game.id) {
            warn!(game_id = %game.id, "Game already exists in memory");
            return Err(AppError::DatabaseError("Game already exists".to_string()));
        }
        store.games.insert(game.id, game.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: Uuid) -> Result<Option<GameModel>, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store.games.get(&game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError> {
        let store = self.store.lock().unwrap();
        let mut all: Vec<GameModel> = store.games.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn list_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<GameModel>, AppError> {
        let store = self.store.lock().unwrap();
        let mut games: Vec<GameModel> = store
            .games
            .values()
            .filter(|g| g.tournament_id == Some(tournament_id))
            .cloned()
            .collect();
        games.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn list_finished_games(&self) -> Result<Vec<GameModel>, AppError> {
        let store = self.store.lock().unwrap();
        let mut games: Vec<GameModel> = store
            .games
            .values()
            .filter(|g| g.status == GameStatus::Finished)
            .cloned()
            .collect();
        games.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn count_finished_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .games
            .values()
            .filter(|g| g.tournament_id == Some(tournament_id) && g.status == GameStatus::Finished)
            .count() as u64)
    }

    #[instrument(skip(self))]
    async fn try_transition(
        &self,
        game_id: Uuid,
        from: GameStatus,
        to: GameStatus,
    ) -> Result<TransitionResult, AppError> {
        debug!(game_id = %game_id, %from, %to, "Attempting game transition atomically");

        let mut store = self.store.lock().unwrap();
        let game = match store.games.get_mut(&game_id) {
            Some(game) => game,
            None => {
                debug!(game_id = %game_id, "Game not found");
                return Ok(TransitionResult::GameNotFound);
            }
        };

        if game.status != from {
            debug!(game_id = %game_id, status = %game.status, "Game is not in expected status");
            return Ok(TransitionResult::WrongStatus(game.status));
        }

        game.status = to;
        info!(game_id = %game_id, %to, "Game transitioned");
        Ok(TransitionResult::Success(game.clone()))
    }

    #[instrument(skip(self, goal))]
    async fn add_goal(&self, goal: &GoalModel) -> Result<AddGoalResult, AppError> {
        debug!(goal_id = %goal.id, game_id = %goal.game_id, "Adding goal atomically");

        let mut store = self.store.lock().unwrap();
        let game = match store.games.get_mut(&goal.game_id) {
            Some(game) => game,
            None => {
                debug!(game_id = %goal.game_id, "Game not found for goal");
                return Ok(AddGoalResult::GameNotFound);
            }
        };

        // Credited team must be one of the game's two teams
        if goal.team_id == game.home_team_id {
            game.home_score += 1;
        } else if goal.team_id == game.away_team_id {
            game.away_score += 1;
        } else {
            warn!(goal_id = %goal.id, team_id = %goal.team_id, "Credited team not in game");
            return Ok(AddGoalResult::CreditedTeamNotInGame);
        }

        let updated_game = game.clone();
        store.goals.insert(goal.id, goal.clone());

        info!(
            goal_id = %goal.id,
            game_id = %goal.game_id,
            home_score = updated_game.home_score,
            away_score = updated_game.away_score,
            "Goal stored with score update"
        );

        Ok(AddGoalResult::Success {
            game: updated_game,
            goal: goal.clone(),
        })
    }

    #[instrument(skip(self))]
    async fn delete_goal(&self, goal_id: Uuid) -> Result<DeleteGoalResult, AppError> {
        debug!(goal_id = %goal_id, "Deleting goal atomically");

        let mut store = self.store.lock().unwrap();
        let goal = match store.goals.remove(&goal_id) {
            Some(goal) => goal,
            None => {
                debug!(goal_id = %goal_id, "Goal not found");
                return Ok(DeleteGoalResult::GoalNotFound);
            }
        };

        // A goal may outlive its game only transiently (cascade in flight);
        // in that case there is no score left to maintain.
        let game = match store.games.get_mut(&goal.game_id) {
            Some(game) => {
                if goal.team_id == game.home_team_id {
                    game.home_score = (game.home_score - 1).max(0);
                } else if goal.team_id == game.away_team_id {
                    game.away_score = (game.away_score - 1).max(0);
                }
                info!(
                    goal_id = %goal_id,
                    game_id = %goal.game_id,
                    home_score = game.home_score,
                    away_score = game.away_score,
                    "Goal deleted with score update"
                );
                Some(game.clone())
            }
            None => {
                warn!(goal_id = %goal_id, game_id = %goal.game_id, "Deleted goal referenced missing game");
                None
            }
        };

        Ok(DeleteGoalResult::Success { game })
    }

    #[instrument(skip(self))]
    async fn get_goal(&self, goal_id: Uuid) -> Result<Option<GoalModel>, AppError> {
        let store = self.store.lock().unwrap();
        Ok(store.goals.get(&goal_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_goals_by_game(&self, game_id: Uuid) -> Result<Vec<GoalModel>, AppError> {
        let store = self.store.lock().unwrap();
        let mut goals: Vec<GoalModel> = store
            .goals
            .values()
            .filter(|g| g.game_id == game_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    #[instrument(skip(self))]
    async fn list_goals(&self) -> Result<Vec<GoalModel>, AppError> {
        let store = self.store.lock().unwrap();
        let mut goals: Vec<GoalModel> = store.goals.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, game_id: Uuid) -> Result<(), AppError> {
        debug!(game_id = %game_id, "Deleting game with its goals from memory");

        let mut store = self.store.lock().unwrap();
        if store.games.remove(&game_id).is_none() {
            warn!(game_id = %game_id, "Game not found for delete in memory");
            return Err(AppError::NotFound("Game not found".to_string()));
        }
        store.goals.retain(|_, g| g.game_id != game_id);

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let mut store = self.store.lock().unwrap();
        let doomed: Vec<Uuid> = store
            .games
            .values()
            .filter(|g| g.tournament_id == Some(tournament_id))
            .map(|g| g.id)
            .collect();

        for game_id in &doomed {
            store.games.remove(game_id);
        }
        store
            .goals
            .retain(|_, g| !doomed.contains(&g.game_id));

        Ok(doomed.len() as u64)
    }

    #[instrument(skip(self))]
    async fn clear_games(&self) -> Result<(u64, u64), AppError> {
        let mut store = self.store.lock().unwrap();
        let games = store.games.len() as u64;
        let goals = store.goals.len() as u64;
        store.games.clear();
        store.goals.clear();

        info!(games, goals, "Cleared all games and goals");
        Ok((games, goals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn in_progress_game(repo: &InMemoryGameRepository) -> GameModel {
        let mut game = GameModel::new(Some(Uuid::new_v4()), Uuid::new_v4(), Uuid::new_v4());
        game.status = GameStatus::InProgress;
        repo.create_game(&game).await.unwrap();
        game
    }

    #[tokio::test]
    async fn score_tracks_goal_set_through_adds_and_deletes() {
        let repo = InMemoryGameRepository::new();
        let game = in_progress_game(&repo).await;
        let scorer = Uuid::new_v4();

        let first = GoalModel::new(game.id, scorer, game.home_team_id, false);
        let second = GoalModel::new(game.id, scorer, game.away_team_id, false);
        repo.add_goal(&first).await.unwrap();
        let result = repo.add_goal(&second).await.unwrap();

        let updated = match result {
            AddGoalResult::Success { game, .. } => game,
            other => panic!("unexpected result: {:?}", other),
        };
        assert_eq!((updated.home_score, updated.away_score), (1, 1));

        let result = repo.delete_goal(first.id).await.unwrap();
        let updated = match result {
            DeleteGoalResult::Success { game: Some(game) } => game,
            other => panic!("unexpected result: {:?}", other),
        };
        assert_eq!((updated.home_score, updated.away_score), (0, 1));

        // Score always equals the count of goals credited per side
        let goals = repo.list_goals_by_game(game.id).await.unwrap();
        assert_eq!(
            goals
                .iter()
                .filter(|g| g.team_id == game.away_team_id)
                .count(),
            updated.away_score as usize
        );
    }

    #[tokio::test]
    async fn delete_never_drives_score_below_zero() {
        let repo = InMemoryGameRepository::new();
        let game = in_progress_game(&repo).await;

        let goal = GoalModel::new(game.id, Uuid::new_v4(), game.home_team_id, false);
        repo.add_goal(&goal).await.unwrap();
        repo.delete_goal(goal.id).await.unwrap();

        // Second delete of the same goal is simply not found
        let result = repo.delete_goal(goal.id).await.unwrap();
        assert!(matches!(result, DeleteGoalResult::GoalNotFound));

        let fetched = repo.get_game(game.id).await.unwrap().unwrap();
        assert_eq!((fetched.home_score, fetched.away_score), (0, 0));
    }

    #[tokio::test]
    async fn rejects_credited_team_outside_game() {
        let repo = InMemoryGameRepository::new();
        let game = in_progress_game(&repo).await;

        let stray = GoalModel::new(game.id, Uuid::new_v4(), Uuid::new_v4(), false);
        let result = repo.add_goal(&stray).await.unwrap();
        assert!(matches!(result, AddGoalResult::CreditedTeamNotInGame));

        let fetched = repo.get_game(game.id).await.unwrap().unwrap();
        assert_eq!((fetched.home_score, fetched.away_score), (0, 0));
    }

    #[tokio::test]
    async fn transition_requires_expected_status() {
        let repo = InMemoryGameRepository::new();
        let game = GameModel::new(None, Uuid::new_v4(), Uuid::new_v4());
        repo.create_game(&game).await.unwrap();

        let result = repo
            .try_transition(game.id, GameStatus::InProgress, GameStatus::Finished)
            .await
            .unwrap();
        assert!(matches!(
            result,
            TransitionResult::WrongStatus(GameStatus::Scheduled)
        ));

        let result = repo
            .try_transition(game.id, GameStatus::Scheduled, GameStatus::InProgress)
            .await
            .unwrap();
        assert!(matches!(result, TransitionResult::Success(_)));
    }

    #[tokio::test]
    async fn delete_by_tournament_takes_goals_with_it() {
        let repo = InMemoryGameRepository::new();
        let tournament_id = Uuid::new_v4();
        let mut game = GameModel::new(Some(tournament_id), Uuid::new_v4(), Uuid::new_v4());
        game.status = GameStatus::InProgress;
        repo.create_game(&game).await.unwrap();
        repo.add_goal(&GoalModel::new(
            game.id,
            Uuid::new_v4(),
            game.home_team_id,
            false,
        ))
        .await
        .unwrap();

        let other = in_progress_game(&repo).await;

        let deleted = repo.delete_by_tournament(tournament_id).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(repo.list_goals().await.unwrap().is_empty());
        assert!(repo.get_game(other.id).await.unwrap().is_some());
    }
}
