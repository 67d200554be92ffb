//! Observable store and the parser → store session adapter

use crate::action::StoreAction;
use crate::reducer::reduce;
use crate::state::StoreState;
use artifex_parser::{Diagnostic, ParseResult, ParserConfig, StreamingParser};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle to one store
///
/// Every dispatch runs the reducer under the channel's lock, so receivers
/// only ever see whole actions applied. Actions that change nothing do not
/// notify.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    tx: Arc<watch::Sender<StoreState>>,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStore {
    /// Create new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(StoreState::default())
    }

    /// Create store starting from `state`
    #[must_use]
    pub fn with_state(state: StoreState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    /// Apply one action; returns whether the state changed
    pub fn dispatch(&self, action: StoreAction) -> bool {
        let kind = action.kind();
        let changed = self.tx.send_if_modified(|state| {
            let next = reduce(state, action);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
        tracing::trace!(action = kind, changed, "dispatched");
        changed
    }

    /// Apply several actions as one change
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = StoreAction>) -> bool {
        self.tx.send_if_modified(|state| {
            let next = actions
                .into_iter()
                .fold(state.clone(), |acc, action| reduce(&acc, action));
            if next == *state {
                return false;
            }
            *state = next;
            true
        })
    }

    /// Upsert every artifact of a parse result in one change
    pub fn apply_parse_result(&self, result: &ParseResult) -> bool {
        self.dispatch_all(result.artifacts.iter().cloned().map(StoreAction::Add))
    }

    /// Receiver notified after each state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }

    /// Clone of the current state
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.tx.borrow().clone()
    }
}

/// One stream's parser bound to a store
///
/// Created when a response starts streaming and consumed by
/// [`StreamSession::finish`] when it ends.
#[derive(Debug)]
pub struct StreamSession {
    parser: StreamingParser,
    store: ArtifactStore,
}

impl StreamSession {
    /// Create new session with the default parser configuration
    #[must_use]
    pub fn new(store: ArtifactStore) -> Self {
        Self::with_config(store, ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(store: ArtifactStore, config: ParserConfig) -> Self {
        Self {
            parser: StreamingParser::with_config(config),
            store,
        }
    }

    /// Feed the next chunk and publish the result
    pub fn push(&mut self, chunk: &str) -> ParseResult {
        let result = self.parser.append(chunk);
        self.store.apply_parse_result(&result);
        result
    }

    /// End the stream, publish the final result and drop the parser
    ///
    /// Returns the final result with every diagnostic the parser recorded.
    pub fn finish(mut self) -> (ParseResult, Vec<Diagnostic>) {
        let result = self.parser.finalize();
        self.store.apply_parse_result(&result);
        tracing::debug!(
            artifacts = result.artifacts.len(),
            complete = result.is_complete,
            "stream session finished"
        );
        (result, self.parser.diagnostics().to_vec())
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    #[inline]
    #[must_use]
    pub fn parser(&self) -> &StreamingParser {
        &self.parser
    }
}
