use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{models::MembershipRecord, repository::MembershipRepository};
use crate::{
    player::repository::PlayerRepository, shared::AppError, team::repository::TeamRepository,
};

/// Service for the membership ledger: idempotent recording plus the roster
/// backstop that runs when a tournament's first game finishes.
pub struct MembershipService {
    repository: Arc<dyn MembershipRepository + Send + Sync>,
    team_repository: Arc<dyn TeamRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl MembershipService {
    pub fn new(
        repository: Arc<dyn MembershipRepository + Send + Sync>,
        team_repository: Arc<dyn TeamRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            team_repository,
            player_repository,
        }
    }

    /// Records that a player is on a team within a tournament. Safe to call
    /// repeatedly for the same triple.
    #[instrument(skip(self))]
    pub async fn record_membership(
        &self,
        tournament_id: Uuid,
        team_id: Uuid,
        player_id: Uuid,
    ) -> Result<bool, AppError> {
        self.repository
            .record(&MembershipRecord::new(tournament_id, team_id, player_id))
            .await
    }

    /// Every (tournament, team) a player is known to have been rostered on
    #[instrument(skip(self))]
    pub async fn teams_for_player(
        &self,
        player_id: Uuid,
    ) -> Result<Vec<MembershipRecord>, AppError> {
        self.repository.teams_for_player(player_id).await
    }

    /// Captures the current roster of every team in a tournament into the
    /// ledger. Invoked when the tournament's first game finishes, as a
    /// backstop for rosters assembled before the ledger was written on
    /// every roster add. Returns the number of newly written rows.
    #[instrument(skip(self))]
    pub async fn capture_tournament_rosters(&self, tournament_id: Uuid) -> Result<u64, AppError> {
        let teams = self.team_repository.list_by_tournament(tournament_id).await?;

        let mut captured = 0;
        for team in &teams {
            let roster = self.player_repository.list_by_team(team.id).await?;
            for player in roster {
                if self
                    .repository
                    .record(&MembershipRecord::new(tournament_id, team.id, player.id))
                    .await?
                {
                    captured += 1;
                }
            }
        }

        debug!(
            tournament_id = %tournament_id,
            teams = teams.len(),
            captured,
            "Roster backstop capture completed"
        );
        Ok(captured)
    }
}
