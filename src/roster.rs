// 🔄 Roster - Mutation Orchestrator
//
// Single owner of the displayed agent list. Every write goes through here:
// mutate remotely, then refetch the whole collection. Nothing is applied
// optimistically, so the list is always the last answer the service gave.
//
// Refetches carry a sequence number; only the latest issued one may replace
// the list. Per-row flags live in an explicit state machine and are reset by
// a drop guard, so a failed or abandoned task never leaves a row stuck.

use crate::entities::{Agent, AgentId, CompensationUpdate, NewAgent};
use crate::remote::{CollectionError, RemoteCollection};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};

// ============================================================================
// ROW STATE MACHINE
// ============================================================================

/// Per-row state.
///
/// ```text
/// Viewing ──begin_edit──▶ Editing ──update ok / cancel──▶ Viewing
/// Viewing ──delete──▶ Deleting ──ok──▶ (removed)
///                              └─failure──▶ Viewing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Viewing,
    /// `submitting` is set while an update is in flight
    Editing { submitting: bool },
    Deleting,
}

impl fmt::Display for RowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowState::Viewing => "viewing",
            RowState::Editing { submitting: false } => "editing",
            RowState::Editing { submitting: true } => "saving",
            RowState::Deleting => "deleting",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    CancelEdit,
    Update,
    Delete,
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowAction::Edit => "edit",
            RowAction::CancelEdit => "cancel editing",
            RowAction::Update => "update",
            RowAction::Delete => "delete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowTransitionError {
    #[error("agent {0} is not in the roster")]
    UnknownAgent(AgentId),

    #[error("cannot {action} agent {id} while {state}")]
    NotAllowed {
        id: AgentId,
        state: RowState,
        action: RowAction,
    },
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Read-only copy of the roster handed to consumers.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub agents: Vec<Agent>,
    /// Banner message from the last failed operation
    pub error: Option<String>,
    /// True until the first refetch has completed
    pub loading: bool,
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Rows not in `Viewing`; absent means `Viewing`
    rows: HashMap<AgentId, RowState>,
}

impl Default for RosterSnapshot {
    fn default() -> Self {
        RosterSnapshot {
            agents: Vec::new(),
            error: None,
            loading: true,
            last_refreshed: None,
            rows: HashMap::new(),
        }
    }
}

impl RosterSnapshot {
    pub fn row_state(&self, id: AgentId) -> RowState {
        self.rows.get(&id).copied().unwrap_or(RowState::Viewing)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list was replaced
    Applied,
    /// A newer refetch was issued meanwhile; this answer was dropped
    Stale,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Completed,
    /// Mutation refused or not delivered; the message is also in the banner
    Failed(String),
}

impl MutationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, MutationOutcome::Completed)
    }
}

// ============================================================================
// ROSTER
// ============================================================================

#[derive(Debug, Default)]
struct RosterState {
    snapshot: RosterSnapshot,
    /// Sequence number of the most recently issued refetch
    issued: u64,
}

pub struct Roster<C> {
    collection: Arc<C>,
    state: Arc<Mutex<RosterState>>,
}

impl<C> Clone for Roster<C> {
    fn clone(&self) -> Self {
        Roster {
            collection: Arc::clone(&self.collection),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C: RemoteCollection> Roster<C> {
    pub fn new(collection: C) -> Self {
        Self::from_arc(Arc::new(collection))
    }

    pub fn from_arc(collection: Arc<C>) -> Self {
        Roster {
            collection,
            state: Arc::new(Mutex::new(RosterState::default())),
        }
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.with_state(|s| s.snapshot.clone())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut RosterState) -> R) -> R {
        // A panic elsewhere must not take the roster down with it
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn set_error(&self, message: Option<String>) {
        self.with_state(|s| s.snapshot.error = message);
    }

    // ------------------------------------------------------------------------
    // Refetch
    // ------------------------------------------------------------------------

    /// Replace the list with the service's current one.
    ///
    /// On failure the displayed list is kept and the banner is set.
    pub async fn refresh(&self) -> RefreshOutcome {
        let seq = self.with_state(|s| {
            s.issued += 1;
            s.issued
        });

        let result = self.collection.list().await;

        self.with_state(|s| {
            if seq != s.issued {
                warn!(seq, latest = s.issued, "Discarding stale roster refetch");
                return RefreshOutcome::Stale;
            }

            s.snapshot.loading = false;
            match result {
                Ok(agents) => {
                    info!(seq, count = agents.len(), "Roster refreshed");
                    // Rows that left the collection take their flags with them
                    s.snapshot
                        .rows
                        .retain(|id, _| agents.iter().any(|a| a.id == *id));
                    s.snapshot.agents = agents;
                    s.snapshot.error = None;
                    s.snapshot.last_refreshed = Some(Utc::now());
                    RefreshOutcome::Applied
                }
                Err(e) => {
                    error!(seq, error = %e, "Roster refetch failed");
                    let message = format!("Failed to fetch agents: {}", e);
                    s.snapshot.error = Some(message.clone());
                    RefreshOutcome::Failed(message)
                }
            }
        })
    }

    // ------------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------------

    pub async fn create(&self, agent: NewAgent) -> MutationOutcome {
        self.set_error(None);

        match self.collection.create(&agent).await {
            Ok(created) => {
                info!(id = %created.id, name = %created.name, "Agent created");
                self.refresh().await;
                MutationOutcome::Completed
            }
            Err(CollectionError::Validation(fields)) => {
                warn!(%fields, "Agent rejected by remote validation");
                self.fail(format!("Validation error: {}", fields))
            }
            Err(e) => {
                error!(error = %e, "Agent create failed");
                self.fail(format!("Failed to create agent: {}", e))
            }
        }
    }

    fn fail(&self, message: String) -> MutationOutcome {
        self.set_error(Some(message.clone()));
        MutationOutcome::Failed(message)
    }

    // ------------------------------------------------------------------------
    // Row transitions
    // ------------------------------------------------------------------------

    fn transition(
        &self,
        id: AgentId,
        action: RowAction,
        next: impl FnOnce(RowState) -> Option<RowState>,
    ) -> Result<(), RowTransitionError> {
        self.with_state(|s| {
            if s.snapshot.agent(id).is_none() {
                return Err(RowTransitionError::UnknownAgent(id));
            }
            let state = s.snapshot.row_state(id);
            match next(state) {
                Some(new_state) => {
                    put_row(&mut s.snapshot.rows, id, new_state);
                    Ok(())
                }
                None => Err(RowTransitionError::NotAllowed { id, state, action }),
            }
        })
    }

    pub fn begin_edit(&self, id: AgentId) -> Result<(), RowTransitionError> {
        self.transition(id, RowAction::Edit, |state| match state {
            RowState::Viewing => Some(RowState::Editing { submitting: false }),
            _ => None,
        })
    }

    /// Leave editing without saving. Not allowed while an update is in flight.
    pub fn cancel_edit(&self, id: AgentId) -> Result<(), RowTransitionError> {
        self.transition(id, RowAction::CancelEdit, |state| match state {
            RowState::Editing { submitting: false } => Some(RowState::Viewing),
            _ => None,
        })
    }

    // ------------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------------

    /// Save a compensation change for a row in `Editing`.
    ///
    /// Success returns the row to `Viewing`; failure keeps it in `Editing`
    /// with the in-flight flag cleared.
    pub async fn update(
        &self,
        id: AgentId,
        change: CompensationUpdate,
    ) -> Result<MutationOutcome, RowTransitionError> {
        self.transition(id, RowAction::Update, |state| match state {
            RowState::Editing { submitting: false } => Some(RowState::Editing { submitting: true }),
            _ => None,
        })?;
        let mut guard = RowGuard::new(self, id, RowState::Editing { submitting: false });

        self.set_error(None);

        match self.collection.update(id, &change).await {
            Ok(updated) => {
                info!(id = %id, compensation = %updated.compensation, "Agent compensation updated");
                guard.settle_to(RowState::Viewing);
                self.refresh().await;
                Ok(MutationOutcome::Completed)
            }
            Err(e) => {
                error!(id = %id, error = %e, "Agent update failed");
                Ok(self.fail(format!("Failed to update agent: {}", e.server_message())))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------------

    /// Delete a row in `Viewing`. Confirmation is the caller's job.
    pub async fn delete(&self, id: AgentId) -> Result<MutationOutcome, RowTransitionError> {
        self.transition(id, RowAction::Delete, |state| match state {
            RowState::Viewing => Some(RowState::Deleting),
            _ => None,
        })?;
        let _guard = RowGuard::new(self, id, RowState::Viewing);

        self.set_error(None);

        match self.collection.delete(id).await {
            Ok(()) => {
                info!(id = %id, "Agent deleted");
                self.refresh().await;
                Ok(MutationOutcome::Completed)
            }
            Err(e) => {
                error!(id = %id, error = %e, "Agent delete failed");
                Ok(self.fail(format!("Failed to delete agent: {}", e.server_message())))
            }
        }
    }
}

fn put_row(rows: &mut HashMap<AgentId, RowState>, id: AgentId, state: RowState) {
    match state {
        RowState::Viewing => {
            rows.remove(&id);
        }
        other => {
            rows.insert(id, other);
        }
    }
}

/// Resets a row's transient state when the owning task ends, whether it
/// returns, fails, or is dropped mid-flight. A row that is no longer in the
/// roster is cleared instead.
struct RowGuard<'a, C> {
    roster: &'a Roster<C>,
    id: AgentId,
    settle: RowState,
}

impl<'a, C> RowGuard<'a, C> {
    fn new(roster: &'a Roster<C>, id: AgentId, settle: RowState) -> Self {
        RowGuard { roster, id, settle }
    }

    fn settle_to(&mut self, state: RowState) {
        self.settle = state;
    }
}

impl<C> Drop for RowGuard<'_, C> {
    fn drop(&mut self) {
        let mut state = self
            .roster
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let settle = if state.snapshot.agent(self.id).is_some() {
            self.settle
        } else {
            RowState::Viewing
        };
        put_row(&mut state.snapshot.rows, self.id, settle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Serves whatever list the test puts in it
    #[derive(Default)]
    struct ListOnly(Mutex<Vec<Agent>>);

    impl ListOnly {
        fn set(&self, ids: &[u64]) {
            *self.0.lock().unwrap() = ids
                .iter()
                .map(|id| {
                    NewAgent {
                        name: format!("Agent {}", id),
                        category: "Tabby".to_string(),
                        tenure: 1,
                        compensation: "10".to_string(),
                    }
                    .with_id(AgentId(*id))
                })
                .collect();
        }
    }

    #[async_trait]
    impl RemoteCollection for ListOnly {
        async fn list(&self) -> Result<Vec<Agent>, CollectionError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn get(&self, _id: AgentId) -> Result<Agent, CollectionError> {
            Err(CollectionError::NotFound)
        }

        async fn create(&self, _agent: &NewAgent) -> Result<Agent, CollectionError> {
            Err(CollectionError::NotFound)
        }

        async fn update(
            &self,
            _id: AgentId,
            _change: &CompensationUpdate,
        ) -> Result<Agent, CollectionError> {
            Err(CollectionError::NotFound)
        }

        async fn delete(&self, _id: AgentId) -> Result<(), CollectionError> {
            Err(CollectionError::NotFound)
        }
    }

    fn rows_of(roster: &Roster<ListOnly>) -> HashMap<AgentId, RowState> {
        roster.with_state(|s| s.snapshot.rows.clone())
    }

    #[tokio::test]
    async fn test_refresh_drops_flags_of_removed_rows() {
        let collection = Arc::new(ListOnly::default());
        collection.set(&[1, 2]);
        let roster = Roster::from_arc(Arc::clone(&collection));
        roster.refresh().await;

        roster.begin_edit(AgentId(1)).unwrap();
        roster.begin_edit(AgentId(2)).unwrap();

        // agent 2 vanished remotely while being edited
        collection.set(&[1]);
        roster.refresh().await;

        let rows = rows_of(&roster);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows.get(&AgentId(1)),
            Some(&RowState::Editing { submitting: false })
        );
        assert_eq!(
            roster.cancel_edit(AgentId(2)),
            Err(RowTransitionError::UnknownAgent(AgentId(2)))
        );
    }

    #[tokio::test]
    async fn test_guard_does_not_restore_removed_row() {
        let collection = Arc::new(ListOnly::default());
        collection.set(&[4]);
        let roster = Roster::from_arc(Arc::clone(&collection));
        roster.refresh().await;
        roster.begin_edit(AgentId(4)).unwrap();

        {
            let settle = RowState::Editing { submitting: false };
            let _guard = RowGuard::new(&roster, AgentId(4), settle);
            collection.set(&[]);
            roster.refresh().await;
        }

        assert!(rows_of(&roster).is_empty());
    }

    #[test]
    fn test_row_state_labels() {
        assert_eq!(RowState::Viewing.to_string(), "viewing");
        assert_eq!(RowState::Editing { submitting: true }.to_string(), "saving");
        assert_eq!(RowState::Deleting.to_string(), "deleting");
    }

    #[test]
    fn test_transition_error_message() {
        let err = RowTransitionError::NotAllowed {
            id: AgentId(3),
            state: RowState::Editing { submitting: false },
            action: RowAction::Delete,
        };
        assert_eq!(err.to_string(), "cannot delete agent 3 while editing");
    }

    #[test]
    fn test_put_row_viewing_removes_entry() {
        let mut rows = HashMap::new();
        put_row(&mut rows, AgentId(1), RowState::Deleting);
        assert_eq!(rows.get(&AgentId(1)), Some(&RowState::Deleting));

        put_row(&mut rows, AgentId(1), RowState::Viewing);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_snapshot_defaults_to_loading() {
        let snapshot = RosterSnapshot::default();
        assert!(snapshot.loading);
        assert_eq!(snapshot.row_state(AgentId(9)), RowState::Viewing);
    }
}
