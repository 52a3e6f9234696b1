//! Streaming classification of provider records.
//!
//! Classification stays pure; this module only moves records in and
//! results out:
//!
//! - [`start`] - spawns a background task classifying a channel of records
//! - [`classify_stream`] - classifies any [`Stream`] of records in order
//!
//! # Example
//!
//! ```ignore
//! use tx_semantics::{classify::Classifier, feed};
//! use tokio::sync::mpsc;
//!
//! let (tx, source) = mpsc::channel(16);
//! let (mut rx, handle) = feed::start(Classifier::default(), source);
//!
//! for raw in history {
//!     tx.send(raw).await?;
//! }
//! drop(tx);
//!
//! while let Some(processed) = rx.recv().await {
//!     println!("{}: {}", processed.signature(), processed.summary());
//! }
//! let classified = handle.await?;
//! ```

use futures::{Stream, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

use crate::{
    classify::{Classifier, FeeClassifier, ProcessedTransaction},
    types::raw::RawTransaction,
};

/// Default channel buffer size.
const DEFAULT_CHANNEL_SIZE: usize = 100;

/// Receiver for classified transactions.
pub struct ProcessedReceiver {
    inner: mpsc::Receiver<ProcessedTransaction>,
}

impl ProcessedReceiver {
    pub(crate) fn new(inner: mpsc::Receiver<ProcessedTransaction>) -> Self {
        Self { inner }
    }

    /// Receives the next classified transaction, or `None` once the source
    /// is drained and the task has finished.
    pub async fn recv(&mut self) -> Option<ProcessedTransaction> {
        self.inner.recv().await
    }
}

/// Start classifying records from `source` on a background task.
///
/// Results arrive in source order. The task ends when `source` is closed or
/// the returned receiver is dropped; its handle yields the number of
/// transactions delivered.
pub fn start<F>(
    classifier: Classifier<F>,
    source: mpsc::Receiver<RawTransaction>,
) -> (ProcessedReceiver, JoinHandle<usize>)
where
    F: FeeClassifier + Send + 'static,
{
    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_SIZE);
    let handle = tokio::spawn(async move { run_feed(classifier, source, tx).await });
    (ProcessedReceiver::new(rx), handle)
}

async fn run_feed<F: FeeClassifier>(
    classifier: Classifier<F>,
    mut source: mpsc::Receiver<RawTransaction>,
    tx: mpsc::Sender<ProcessedTransaction>,
) -> usize {
    let mut delivered = 0;

    while let Some(raw) = source.recv().await {
        // Pure processing - no async
        let processed = classifier.classify_raw(&raw);

        if tx.send(processed).await.is_err() {
            debug!(delivered, "Feed receiver dropped, stopping");
            break;
        }
        delivered += 1;
    }

    info!(delivered, "Feed finished");
    delivered
}

/// Classifies every record of `stream`, preserving order.
pub fn classify_stream<'c, F, S>(
    classifier: &'c Classifier<F>,
    stream: S,
) -> impl Stream<Item = ProcessedTransaction> + 'c
where
    F: FeeClassifier + 'c,
    S: Stream<Item = RawTransaction> + 'c,
{
    stream.map(move |raw| classifier.classify_raw(&raw))
}
