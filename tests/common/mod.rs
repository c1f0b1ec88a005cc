#![allow(dead_code)]

use async_trait::async_trait;
use roster_admin::entities::{Agent, AgentId, CompensationUpdate, NewAgent};
use roster_admin::remote::{CollectionError, RemoteCollection};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// In-memory collection with scripted failures and gates that hold a call
/// until the test releases it.
#[derive(Default)]
pub struct ScriptedCollection {
    agents: Mutex<Vec<Agent>>,
    next_id: Mutex<u64>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<&'static str, VecDeque<CollectionError>>>,
    gates: Mutex<HashMap<&'static str, VecDeque<oneshot::Receiver<()>>>>,
    waiting: AtomicUsize,
}

impl ScriptedCollection {
    pub fn new() -> Self {
        let collection = ScriptedCollection::default();
        *collection.next_id.lock().unwrap() = 1;
        collection
    }

    pub fn with_agents(agents: Vec<NewAgent>) -> Self {
        let collection = Self::new();
        for agent in agents {
            collection.insert(agent);
        }
        collection
    }

    /// Add an agent directly, bypassing the call log
    pub fn insert(&self, agent: NewAgent) -> Agent {
        let mut next_id = self.next_id.lock().unwrap();
        let agent = agent.with_id(AgentId(*next_id));
        *next_id += 1;
        self.agents.lock().unwrap().push(agent.clone());
        agent
    }

    pub fn stored(&self) -> Vec<Agent> {
        self.agents.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make the next `op` call fail with `err`
    pub fn fail_next(&self, op: &'static str, err: CollectionError) {
        self.failures
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(err);
    }

    /// Hold the next `op` call until the returned sender fires (or drops)
    pub fn hold_next(&self, op: &'static str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().entry(op).or_default().push_back(rx);
        tx
    }

    /// Calls currently parked on a gate
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted_failure(&self, op: &'static str) -> Option<CollectionError> {
        self.failures
            .lock()
            .unwrap()
            .get_mut(op)
            .and_then(|queue| queue.pop_front())
    }

    async fn pass_gate(&self, op: &'static str) {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(op)
            .and_then(|queue| queue.pop_front());
        if let Some(gate) = gate {
            self.waiting.fetch_add(1, Ordering::SeqCst);
            let _ = gate.await;
            self.waiting.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl RemoteCollection for ScriptedCollection {
    async fn list(&self) -> Result<Vec<Agent>, CollectionError> {
        self.record("list".to_string());
        // Read before the gate so a held call answers with old data
        let result = match self.scripted_failure("list") {
            Some(err) => Err(err),
            None => Ok(self.stored()),
        };
        self.pass_gate("list").await;
        result
    }

    async fn get(&self, id: AgentId) -> Result<Agent, CollectionError> {
        self.record(format!("get {}", id));
        self.stored()
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(CollectionError::NotFound)
    }

    async fn create(&self, agent: &NewAgent) -> Result<Agent, CollectionError> {
        self.record(format!("create {}", agent.name));
        self.pass_gate("create").await;
        if let Some(err) = self.scripted_failure("create") {
            return Err(err);
        }
        Ok(self.insert(agent.clone()))
    }

    async fn update(
        &self,
        id: AgentId,
        change: &CompensationUpdate,
    ) -> Result<Agent, CollectionError> {
        self.record(format!("update {} {}", id, change.compensation));
        self.pass_gate("update").await;
        if let Some(err) = self.scripted_failure("update") {
            return Err(err);
        }
        let mut agents = self.agents.lock().unwrap();
        let agent = agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CollectionError::NotFound)?;
        agent.compensation = change.compensation.clone();
        Ok(agent.clone())
    }

    async fn delete(&self, id: AgentId) -> Result<(), CollectionError> {
        self.record(format!("delete {}", id));
        self.pass_gate("delete").await;
        if let Some(err) = self.scripted_failure("delete") {
            return Err(err);
        }
        let mut agents = self.agents.lock().unwrap();
        let before = agents.len();
        agents.retain(|a| a.id != id);
        if agents.len() == before {
            return Err(CollectionError::NotFound);
        }
        Ok(())
    }
}

pub fn new_agent(name: &str, compensation: &str) -> NewAgent {
    NewAgent {
        name: name.to_string(),
        category: "Tabby".to_string(),
        tenure: 2,
        compensation: compensation.to_string(),
    }
}
