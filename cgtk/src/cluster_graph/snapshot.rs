use serde_json;
use errors::Result;

/// Serializable description of the graph structure, for external renderers.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GraphSnapshot {
    /// cluster ids
    pub nodes: Vec<String>,
    pub edges: Vec<SnapshotEdge>
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SnapshotEdge {
    pub source: String,
    pub target: String,
    pub sepset: Vec<String>
}

impl SnapshotEdge {
    /// Label of the sepset node drawn between the two clusters
    pub fn label(&self) -> String {
        self.sepset.join(",")
    }
}

impl GraphSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Fired after every message pass, so observers can follow (or animate) the message passing.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MessagePassEvent<'a> {
    pub sender_id: &'a str,
    pub receiver_id: &'a str,
    /// gain of the message that was just passed
    pub information_gain: f64,
    /// largest gain among all paths after the pass
    pub max_next_information_gain: f64,
    pub num_messages_passed: usize
}
