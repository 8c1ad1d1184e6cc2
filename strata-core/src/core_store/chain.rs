/*
    chain.rs - Ordered, reversible transformer chain

    Forward transforms fold in list order on write; reverse transforms fold
    over the reversed list on read. Each transformer's reverse only undoes its
    own transform, so a compress-then-encrypt chain must be unwound
    decrypt-then-decompress: last applied, first undone. The chain does not
    detect out-of-order application; the composer holds that invariant by
    fixing the chain at store construction.
*/

use crate::core_plugin::{StoreResult, Transformer};

/// Ordered sequence of transformer stages, fixed at store construction.
pub struct TransformerChain {
    stages: Vec<Box<dyn Transformer>>,
}

impl TransformerChain {
    pub fn new(stages: Vec<Box<dyn Transformer>>) -> Self {
        TransformerChain { stages }
    }

    /// An empty chain: forward and reverse are the identity.
    pub fn empty() -> Self {
        TransformerChain { stages: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Initialize every stage, in list order.
    pub async fn initialize(&self) -> StoreResult<()> {
        for stage in &self.stages {
            stage.initialize().await?;
        }
        Ok(())
    }

    /// Apply forward transforms in list order (stage 1..N).
    ///
    /// If stage k fails, the effects of stages 1..k-1 on the in-memory buffer
    /// are discarded with the buffer; nothing has been persisted yet.
    pub async fn forward(&self, mut data: Vec<u8>) -> StoreResult<Vec<u8>> {
        for stage in &self.stages {
            data = stage.transform(data).await?;
        }
        Ok(data)
    }

    /// Apply reverse transforms in reverse list order (stage N..1).
    pub async fn reverse(&self, mut data: Vec<u8>) -> StoreResult<Vec<u8>> {
        for stage in self.stages.iter().rev() {
            data = stage.reverse(data).await?;
        }
        Ok(data)
    }
}
