use super::graph_state::{GraphState, SharedGraphState};
use crate::domain_port::{StorageTx, TxManager};
use tokio::sync::MutexGuard;

pub struct MemTxManager {
    state: SharedGraphState,
}

impl MemTxManager {
    pub fn new(state: SharedGraphState) -> Self {
        MemTxManager { state }
    }
}

#[async_trait::async_trait]
impl TxManager for MemTxManager {
    async fn begin<'t>(&'t self) -> anyhow::Result<Box<dyn StorageTx<'t> + 't>> {
        let guard = self.state.lock().await;
        let work = guard.clone();
        Ok(Box::new(MemTx { guard, work }))
    }
}

/// Holds the global lock for the life of the unit of work. Repos write to
/// the working copy; only commit publishes it, so dropping the tx on an
/// error path is a rollback.
pub struct MemTx<'t> {
    guard: MutexGuard<'t, GraphState>,
    work: GraphState,
}

impl<'t> MemTx<'t> {
    pub fn state(&mut self) -> &mut GraphState {
        &mut self.work
    }
}

#[async_trait::async_trait]
impl<'t> StorageTx<'t> for MemTx<'t> {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let MemTx { mut guard, work } = *self;
        *guard = work;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}
