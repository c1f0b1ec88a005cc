// Entity Models
// The roster holds a single entity kind. Identity is assigned remotely.

pub mod agent;

pub use agent::{Agent, AgentId, CompensationUpdate, NewAgent, MAX_CATEGORY_LEN, MAX_NAME_LEN};
