//! The service facade and the access decision engine.

use std::sync::Arc;

use chrono::Utc;

use rollcall_storage::{Capability, Store, StoreError, Team, TeamId};

use crate::auth::Principal;
use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// Shared handle the handler functions operate on: the storage backend and
/// the service configuration.
#[derive(Clone)]
pub struct RollcallService {
    pub store: Arc<dyn Store>,
    pub config: ServiceConfig,
}

impl RollcallService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Check whether the principal may exercise `capability` on the team.
    ///
    /// Decision order (short-circuit):
    /// 1. Team missing: `NotFound`.
    /// 2. Owner: allow. Ownership implies every capability, so a narrower
    ///    grant the owner also happens to hold never restricts them.
    /// 3. Share token, if presented: must resolve to a link for this exact
    ///    team, be unexpired, and list the capability.
    /// 4. Otherwise deny.
    ///
    /// The decision is not transitive through the hierarchy: owning a parent
    /// team grants nothing on its children.
    pub async fn check_permission(
        &self,
        principal: &Principal,
        team_id: &TeamId,
        capability: Capability,
    ) -> Result<(), ServiceError> {
        let team = match self.store.get_team(team_id).await {
            Ok(team) => team,
            Err(StoreError::NotFound) => return Err(ServiceError::NotFound),
            Err(e) => return Err(e.into()),
        };

        if team.owner_id == principal.user_id {
            return Ok(());
        }

        let Some(token) = principal.share_token.as_deref() else {
            return Err(self.denied());
        };

        let link = match self.store.get_share_link_by_token(token).await {
            Ok(link) => link,
            Err(StoreError::NotFound) => return Err(self.denied()),
            Err(e) => return Err(e.into()),
        };

        if link.team_id != *team_id {
            return Err(self.denied());
        }
        if link.is_expired(Utc::now()) {
            return Err(self.denied());
        }
        if !link.grants(capability) {
            return Err(self.denied());
        }

        Ok(())
    }

    /// Boolean form of [`RollcallService::check_permission`]: a missing team
    /// and a denial both come back as `false`; only backend faults surface
    /// as errors.
    pub async fn is_authorized(
        &self,
        principal: &Principal,
        team_id: &TeamId,
        capability: Capability,
    ) -> Result<bool, ServiceError> {
        match self.check_permission(principal, team_id, capability).await {
            Ok(()) => Ok(true),
            Err(ServiceError::Unauthorized) | Err(ServiceError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Owner-only operations (team mutation, share-link management) bypass
    /// grant evaluation entirely: a share link can never authorize them.
    pub async fn require_owner(
        &self,
        principal: &Principal,
        team_id: &TeamId,
    ) -> Result<Team, ServiceError> {
        let team = match self.store.get_team(team_id).await {
            Ok(team) => team,
            Err(StoreError::NotFound) => return Err(ServiceError::NotFound),
            Err(e) => return Err(e.into()),
        };
        if team.owner_id != principal.user_id {
            return Err(self.denied());
        }
        Ok(team)
    }

    /// Shape an authorization denial according to configuration.
    pub(crate) fn denied(&self) -> ServiceError {
        if self.config.conceal_denials {
            ServiceError::NotFound
        } else {
            ServiceError::Unauthorized
        }
    }
}
