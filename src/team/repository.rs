use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::TeamModel;
use crate::shared::AppError;

/// Trait for team repository operations
#[async_trait]
pub trait TeamRepository {
    async fn create_team(&self, team: &TeamModel) -> Result<(), AppError>;
    async fn get_team(&self, team_id: Uuid) -> Result<Option<TeamModel>, AppError>;
    async fn list_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<TeamModel>, AppError>;
    async fn list_teams(&self) -> Result<Vec<TeamModel>, AppError>;
    async fn delete_team(&self, team_id: Uuid) -> Result<(), AppError>;

    /// Deletes every team of the given tournament
    async fn delete_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError>;
}

/// In-memory implementation of TeamRepository for development and testing
pub struct InMemoryTeamRepository {
    teams: Mutex<HashMap<Uuid, TeamModel>>,
}

impl Default for InMemoryTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTeamRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            teams: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    #[instrument(skip(self, team))]
    async fn create_team(&self, team: &TeamModel) -> Result<(), AppError> {
        debug!(team_id = %team.id, name = %team.name, "Creating team in memory");

        let mut teams = self.teams.lock().unwrap();
        if teams.contains_key(&team.id) {
            warn!(team_id = %team.id, "Team already exists in memory");
            return Err(AppError::DatabaseError("Team already exists".to_string()));
        }
        teams.insert(team.id, team.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_team(&self, team_id: Uuid) -> Result<Option<TeamModel>, AppError> {
        let teams = self.teams.lock().unwrap();
        Ok(teams.get(&team_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_by_tournament(&self, tournament_id: Uuid) -> Result<Vec<TeamModel>, AppError> {
        let teams = self.teams.lock().unwrap();
        let mut in_tournament: Vec<TeamModel> = teams
            .values()
            .filter(|t| t.tournament_id == Some(tournament_id))
            .cloned()
            .collect();
        in_tournament.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(in_tournament)
    }

    #[instrument(skip(self))]
    async fn list_teams(&self) -> Result<Vec<TeamModel>, AppError> {
        let teams = self.teams.lock().unwrap();
        let mut all: Vec<TeamModel> = teams.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn delete_team(&self, team_id: Uuid) -> Result<(), AppError> {
        debug!(team_id = %team_id, "Deleting team from memory");

        let mut teams = self.teams.lock().unwrap();
        if teams.remove(&team_id).is_none() {
            warn!(team_id = %team_id, "Team not found for delete in memory");
            return Err(AppError::NotFound("Team not found".to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_tournament(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let mut teams = self.teams.lock().unwrap();
        let before = teams.len();
        teams.retain(|_, t| t.tournament_id != Some(tournament_id));
        Ok((before - teams.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_teams_scoped_to_tournament() {
        let repo = InMemoryTeamRepository::new();
        let tournament_a = Uuid::new_v4();
        let tournament_b = Uuid::new_v4();

        repo.create_team(&TeamModel::new("Alfa".to_string(), tournament_a))
            .await
            .unwrap();
        repo.create_team(&TeamModel::new("Beta".to_string(), tournament_b))
            .await
            .unwrap();

        let teams = repo.list_by_tournament(tournament_a).await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Alfa");
    }

    #[tokio::test]
    async fn delete_by_tournament_removes_all_teams() {
        let repo = InMemoryTeamRepository::new();
        let tournament_id = Uuid::new_v4();
        repo.create_team(&TeamModel::new("Alfa".to_string(), tournament_id))
            .await
            .unwrap();
        repo.create_team(&TeamModel::new("Beta".to_string(), tournament_id))
            .await
            .unwrap();

        let deleted = repo.delete_by_tournament(tournament_id).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(repo
            .list_by_tournament(tournament_id)
            .await
            .unwrap()
            .is_empty());
    }
}
