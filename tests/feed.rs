use fastnum::udec128;
use futures::{StreamExt, stream};
use tokio::sync::mpsc;
use tx_semantics::{
    classify::Classifier,
    feed,
    testing::RawTransactionBuilder,
    types::{AssetId, raw::RawTransaction},
};

fn classifier() -> Classifier {
    Classifier::default()
}

fn swap(signature: &str) -> RawTransaction {
    RawTransactionBuilder::new("P", signature)
        .fee(5000)
        .token("USDC", "P", "DEX", udec128!(10))
        .native("DEX", "P", 1_000_000_000)
        .build()
}

/// Classifies a channel of records on a background task, in order, and
/// reports how many were delivered once the source closes.
#[tokio::test]
async fn test_feed_classifies_in_order() {
    let (tx, source) = mpsc::channel(4);
    let (mut rx, handle) = feed::start(classifier(), source);

    let producer = tokio::spawn(async move {
        for i in 0..10 {
            tx.send(swap(&format!("sig{i}"))).await.unwrap();
        }
    });

    let mut signatures = Vec::new();
    while let Some(processed) = rx.recv().await {
        assert_eq!(processed.swap_pairs().len(), 1);
        assert_eq!(
            processed.primary_incoming().map(|p| &p.asset),
            Some(&AssetId::Native)
        );
        signatures.push(processed.signature().to_string());
    }

    producer.await.unwrap();
    assert_eq!(handle.await.unwrap(), 10);
    let expected: Vec<_> = (0..10).map(|i| format!("sig{i}")).collect();
    assert_eq!(signatures, expected);
}

/// Dropping the receiver stops the feed without draining the source.
#[tokio::test]
async fn test_feed_stops_when_receiver_dropped() {
    let (tx, source) = mpsc::channel(16);
    let (mut rx, handle) = feed::start(classifier(), source);

    tx.send(swap("first")).await.unwrap();
    assert_eq!(rx.recv().await.unwrap().signature(), "first");
    drop(rx);

    tx.send(swap("second")).await.unwrap();
    let delivered = handle.await.unwrap();
    assert_eq!(delivered, 1);
}

#[tokio::test]
async fn test_feed_with_empty_source() {
    let (tx, source) = mpsc::channel(1);
    drop(tx);
    let (mut rx, handle) = feed::start(classifier(), source);

    assert!(rx.recv().await.is_none());
    assert_eq!(handle.await.unwrap(), 0);
}

#[test]
fn test_classify_stream() {
    let classifier = classifier();
    let records = stream::iter(vec![
        swap("a"),
        RawTransactionBuilder::new("P", "b")
            .native("P", "FRIEND", 250_000_000)
            .build(),
    ]);

    let processed: Vec<_> =
        tokio_test::block_on(feed::classify_stream(&classifier, records).collect());

    assert_eq!(processed.len(), 2);
    assert!(processed[0].is_swap());
    assert_eq!(processed[0].network_fee(), udec128!(0.000005));
    assert_eq!(processed[1].summary().to_string(), "sent 0.25 native");
}
