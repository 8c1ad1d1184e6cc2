/*
    core_crush - CRUSH-inspired node distribution layer

    Wraps a set of named storage delegates and routes every key to one of
    them through a deterministic placement function. Sits in front of the
    pipeline, substituting "select node, then delegate" for direct storage
    access. Implements the Storage capability itself, so a distributor can be
    composed under a KeyValueStore or nested under another distributor.

    Deliberately out of scope, and documented rather than fixed: no
    replication, no rebalancing, no health checks. After a node is removed,
    keys that lived on it silently reroute to whichever node the placement
    now selects, which may hold stale or no data for that key.
*/

pub mod placement;

#[cfg(test)]
pub mod tests;

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::core_plugin::{Plugin, PluginDescriptor, Storage, StoreError, StoreResult};

/// Routes keys across a set of named storage nodes.
///
/// Availability transitions only through [`add_nodes`](Self::add_nodes) and
/// [`remove_node`](Self::remove_node); there is no automatic recovery.
/// Initial state: no nodes.
#[derive(Default)]
pub struct NodeDistributor {
    /// Node id → storage delegate
    nodes: HashMap<String, Box<dyn Storage>>,
    /// Currently available node ids, in stable order
    available: BTreeSet<String>,
}

impl NodeDistributor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a distributor and register `nodes` in one step.
    pub async fn with_nodes(nodes: Vec<(String, Box<dyn Storage>)>) -> StoreResult<Self> {
        let mut distributor = Self::new();
        distributor.add_nodes(nodes).await?;
        Ok(distributor)
    }

    /// Register storage nodes and mark them available.
    ///
    /// Each delegate's `initialize` is awaited before the node becomes
    /// available. Ids already present are ignored, not overwritten.
    pub async fn add_nodes(&mut self, nodes: Vec<(String, Box<dyn Storage>)>) -> StoreResult<()> {
        let mut added = 0usize;
        for (node_id, delegate) in nodes {
            if self.nodes.contains_key(&node_id) {
                continue;
            }
            delegate.initialize().await?;
            self.nodes.insert(node_id.clone(), delegate);
            self.available.insert(node_id);
            added += 1;
        }
        debug!(added, total = self.nodes.len(), "added storage nodes");
        Ok(())
    }

    /// Unconditionally evict a node from the table and the available set.
    ///
    /// No data migrates: keys previously routed to this node become
    /// unreachable through this distributor.
    pub fn remove_node(&mut self, node_id: &str) {
        self.available.remove(node_id);
        self.nodes.remove(node_id);
        debug!(node_id, remaining = self.nodes.len(), "removed storage node");
    }

    /// Deterministically select the node responsible for `key`.
    ///
    /// Same key + same available node set always selects the same node.
    pub fn select_node(&self, key: &str) -> StoreResult<&str> {
        placement::select(key, self.available.iter().map(String::as_str))
            .ok_or(StoreError::NoAvailableNodes)
    }

    /// Ids of currently available nodes, in stable order.
    pub fn available_nodes(&self) -> Vec<String> {
        self.available.iter().cloned().collect()
    }

    fn route(&self, key: &str) -> StoreResult<&dyn Storage> {
        let node_id = self.select_node(key)?;
        // Invariant: every available id has a table entry
        self.nodes
            .get(node_id)
            .map(|node| node.as_ref())
            .ok_or(StoreError::NoAvailableNodes)
    }
}

#[async_trait]
impl Plugin for NodeDistributor {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("crush", Value::Null)
    }
}

#[async_trait]
impl Storage for NodeDistributor {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.route(key)?.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.route(key)?.set(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.route(key)?.delete(key).await
    }

    /// Aggregate listing across every available node, sorted and deduped.
    async fn list(&self) -> StoreResult<Vec<String>> {
        let mut keys = BTreeSet::new();
        for node_id in &self.available {
            if let Some(node) = self.nodes.get(node_id) {
                keys.extend(node.list().await?);
            }
        }
        Ok(keys.into_iter().collect())
    }
}
