//! Integration tests for the talk indexer pipeline.
//!
//! These tests use the real processor, poller, and reindexer but mock the
//! talk source, search index, and queue transport.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use talk_indexer::consumer::{PollerConfig, QueuePoller};
use talk_indexer::processor::{DispatchOutcome, TalkProcessor};
use talk_indexer::reindex::{ReindexSummary, Reindexer};
use talk_indexer::upstream::{TalkSource, UpstreamError};
use talk_indexer_queue::{MessageAttributes, QueueError, QueueMessage, QueueProvider};
use talk_indexer_repository::{SearchIndexError, SearchIndexProvider};
use talk_indexer_shared::{TalkDocument, TalkRecord};

// Mock talk source backed by in-memory records.
struct MockTalkSource {
    talks: HashMap<String, TalkRecord>,
    conferences: HashMap<String, Result<Vec<Value>, UpstreamError>>,
    fetch_count: AtomicUsize,
}

impl MockTalkSource {
    fn new() -> Self {
        Self {
            talks: HashMap::new(),
            conferences: HashMap::new(),
            fetch_count: AtomicUsize::new(0),
        }
    }

    fn with_talk(mut self, raw: Value) -> Self {
        let record: TalkRecord = serde_json::from_value(raw).unwrap();
        self.talks.insert(record.id.clone(), record);
        self
    }

    fn with_conference(mut self, id: &str, talks: Vec<Value>) -> Self {
        self.conferences.insert(id.to_string(), Ok(talks));
        self
    }

    fn with_failing_conference(mut self, id: &str) -> Self {
        self.conferences.insert(
            id.to_string(),
            Err(UpstreamError::status(503, "conference unavailable")),
        );
        self
    }

    fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TalkSource for MockTalkSource {
    async fn fetch_talk(&self, talk_id: &str) -> Result<TalkRecord, UpstreamError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.talks
            .get(talk_id)
            .cloned()
            .ok_or_else(|| UpstreamError::status(404, "no such talk"))
    }

    async fn fetch_conference_talks(
        &self,
        conference_id: &str,
    ) -> Result<Vec<Value>, UpstreamError> {
        self.conferences
            .get(conference_id)
            .cloned()
            .unwrap_or_else(|| Err(UpstreamError::status(404, "no such conference")))
    }
}

// Mock search provider recording every write.
struct MockSearchProvider {
    indexed: Mutex<Vec<(String, TalkDocument)>>,
    updated: Mutex<Vec<(String, Map<String, Value>)>>,
    failing_talk_ids: Vec<String>,
}

impl MockSearchProvider {
    fn new() -> Self {
        Self {
            indexed: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            failing_talk_ids: Vec::new(),
        }
    }

    fn failing_for(talk_ids: &[&str]) -> Self {
        Self {
            failing_talk_ids: talk_ids.iter().map(|id| id.to_string()).collect(),
            ..Self::new()
        }
    }

    fn indexed(&self) -> Vec<(String, TalkDocument)> {
        self.indexed.lock().unwrap().clone()
    }

    fn updated(&self) -> Vec<(String, Map<String, Value>)> {
        self.updated.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndexProvider for MockSearchProvider {
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn index_document(
        &self,
        talk_id: &str,
        document: &TalkDocument,
    ) -> Result<(), SearchIndexError> {
        if self.failing_talk_ids.iter().any(|id| id == talk_id) {
            return Err(SearchIndexError::index("write rejected"));
        }
        self.indexed
            .lock()
            .unwrap()
            .push((talk_id.to_string(), document.clone()));
        Ok(())
    }

    async fn update_document(
        &self,
        talk_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), SearchIndexError> {
        self.updated
            .lock()
            .unwrap()
            .push((talk_id.to_string(), fields.clone()));
        Ok(())
    }
}

// Mock queue feeding preloaded batches and recording deletions.
struct MockQueueProvider {
    batches: Mutex<VecDeque<Vec<QueueMessage>>>,
    deleted: Mutex<Vec<String>>,
}

impl MockQueueProvider {
    fn with_batch(messages: Vec<QueueMessage>) -> Self {
        let mut batches = VecDeque::new();
        batches.push_back(messages);
        Self {
            batches: Mutex::new(batches),
            deleted: Mutex::new(Vec::new()),
        }
    }

    fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueProvider for MockQueueProvider {
    async fn send_message(
        &self,
        _body: &str,
        _attributes: &MessageAttributes,
    ) -> Result<(), QueueError> {
        Ok(())
    }

    async fn receive_messages(
        &self,
        _max_messages: i32,
        _wait_time_seconds: i32,
    ) -> Result<Vec<QueueMessage>, QueueError> {
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn delete_message(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.deleted.lock().unwrap().push(receipt_handle.to_string());
        Ok(())
    }
}

fn talk_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "conferenceid": "conf-1",
        "status": "SUBMITTED",
        "data": {
            "title": {"value": title}
        },
        "speakers": []
    })
}

fn message(receipt: &str, body: &str) -> QueueMessage {
    QueueMessage {
        message_id: format!("mid-{}", receipt),
        receipt_handle: receipt.to_string(),
        body: body.to_string(),
        attributes: MessageAttributes::new("talk.created", "e-1"),
    }
}

fn processor_with(
    source: Arc<MockTalkSource>,
    search: Arc<MockSearchProvider>,
) -> TalkProcessor {
    TalkProcessor::new(source, search)
}

#[tokio::test]
async fn created_event_fetches_and_indexes() {
    let source = Arc::new(MockTalkSource::new().with_talk(talk_json("t1", "A Talk")));
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source.clone(), search.clone());

    let outcome = processor
        .process(r#"{"eventType":"talk.created","entityId":"t1"}"#)
        .await;

    assert_eq!(outcome, DispatchOutcome::Ack);
    assert_eq!(source.fetches(), 1);

    let indexed = search.indexed();
    assert_eq!(indexed.len(), 1);
    assert_eq!(indexed[0].0, "t1");
    assert_eq!(indexed[0].1.title.as_deref(), Some("A Talk"));
    assert!(search.updated().is_empty());
}

#[tokio::test]
async fn unpublished_event_only_patches_status() {
    let source = Arc::new(MockTalkSource::new().with_talk(talk_json("t1", "A Talk")));
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source.clone(), search.clone());

    let outcome = processor
        .process(r#"{"eventType":"talk.unpublished","entityId":"t1"}"#)
        .await;

    assert_eq!(outcome, DispatchOutcome::Ack);
    // The patch path never touches the upstream or the full-document write.
    assert_eq!(source.fetches(), 0);
    assert!(search.indexed().is_empty());

    let updated = search.updated();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].0, "t1");
    assert_eq!(updated[0].1.get("status"), Some(&json!("DRAFT")));
    assert_eq!(updated[0].1.len(), 1);
}

#[tokio::test]
async fn unrecognized_event_acks_without_side_effects() {
    let source = Arc::new(MockTalkSource::new().with_talk(talk_json("t1", "A Talk")));
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source.clone(), search.clone());

    let outcome = processor
        .process(r#"{"eventType":"talk.rejected","entityId":"t1"}"#)
        .await;

    assert_eq!(outcome, DispatchOutcome::Ack);
    assert_eq!(source.fetches(), 0);
    assert!(search.indexed().is_empty());
    assert!(search.updated().is_empty());
}

#[tokio::test]
async fn malformed_body_is_left_for_redelivery() {
    let source = Arc::new(MockTalkSource::new());
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source.clone(), search.clone());

    for body in [
        "not json",
        r#"{"entityId":"t1"}"#,
        r#"{"eventType":"talk.created"}"#,
        r#"{"eventType":17,"entityId":"t1"}"#,
    ] {
        let outcome = processor.process(body).await;
        assert!(matches!(outcome, DispatchOutcome::Retry(_)), "body: {}", body);
    }

    assert_eq!(source.fetches(), 0);
    assert!(search.indexed().is_empty());
}

#[tokio::test]
async fn upstream_failure_is_left_for_redelivery() {
    let source = Arc::new(MockTalkSource::new());
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source, search.clone());

    let outcome = processor
        .process(r#"{"eventType":"talk.updated","entityId":"missing"}"#)
        .await;

    assert!(matches!(outcome, DispatchOutcome::Retry(_)));
    assert!(search.indexed().is_empty());
}

#[tokio::test]
async fn index_write_failure_is_left_for_redelivery() {
    let source = Arc::new(MockTalkSource::new().with_talk(talk_json("t1", "A Talk")));
    let search = Arc::new(MockSearchProvider::failing_for(&["t1"]));
    let processor = processor_with(source, search);

    let outcome = processor
        .process(r#"{"eventType":"talk.published","entityId":"t1"}"#)
        .await;

    assert!(matches!(outcome, DispatchOutcome::Retry(_)));
}

#[tokio::test]
async fn indexing_twice_produces_identical_documents() {
    let source = Arc::new(MockTalkSource::new().with_talk(talk_json("t1", "A Talk")));
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source, search.clone());

    processor.index_talk("t1").await.unwrap();
    processor.index_talk("t1").await.unwrap();

    let indexed = search.indexed();
    assert_eq!(indexed.len(), 2);
    assert_eq!(indexed[0].0, indexed[1].0);

    // Identical up to the transform timestamp.
    let mut first = indexed[0].1.clone();
    let mut second = indexed[1].1.clone();
    second.indexed_at = first.indexed_at;
    first.indexed_at = second.indexed_at;
    assert_eq!(first, second);
}

#[tokio::test]
async fn poller_deletes_acked_messages_only() {
    let source = Arc::new(MockTalkSource::new().with_talk(talk_json("t1", "A Talk")));
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source, search);

    let queue = Arc::new(MockQueueProvider::with_batch(vec![
        message("rh-1", r#"{"eventType":"talk.created","entityId":"t1"}"#),
        // Upstream has no such talk: processing fails, message stays queued.
        message("rh-2", r#"{"eventType":"talk.created","entityId":"t2"}"#),
        // Unknown event type: acknowledged without side effects.
        message("rh-3", r#"{"eventType":"talk.rejected","entityId":"t1"}"#),
    ]));

    let poller = QueuePoller::new(queue.clone(), processor, PollerConfig::default());
    poller.poll_once().await.unwrap();

    let deleted = queue.deleted();
    assert_eq!(deleted, vec!["rh-1".to_string(), "rh-3".to_string()]);
}

#[tokio::test]
async fn reindex_tolerates_partial_failure() {
    // C1 has three talks, one of which fails to index; C2 cannot be fetched.
    let source = Arc::new(
        MockTalkSource::new()
            .with_conference(
                "C1",
                vec![
                    talk_json("t1", "First"),
                    talk_json("t2", "Second"),
                    talk_json("t3", "Third"),
                ],
            )
            .with_failing_conference("C2"),
    );
    let search = Arc::new(MockSearchProvider::failing_for(&["t2"]));
    let processor = processor_with(source.clone(), search.clone());
    let reindexer = Reindexer::new(source, processor);

    let summary = reindexer
        .reindex_conferences(&["C1".to_string(), "C2".to_string()])
        .await;

    assert_eq!(
        summary,
        ReindexSummary {
            talks_indexed: 2,
            talk_failures: 1,
            conference_failures: 1,
        }
    );

    let indexed = search.indexed();
    assert_eq!(indexed.len(), 2);
    assert_eq!(indexed[0].0, "t1");
    assert_eq!(indexed[1].0, "t3");
}

#[tokio::test]
async fn reindex_counts_undecodable_talks_as_failures() {
    let source = Arc::new(MockTalkSource::new().with_conference(
        "C1",
        vec![talk_json("t1", "First"), json!({"status": "no id here"})],
    ));
    let search = Arc::new(MockSearchProvider::new());
    let processor = processor_with(source.clone(), search.clone());
    let reindexer = Reindexer::new(source, processor);

    let summary = reindexer.reindex_conferences(&["C1".to_string()]).await;

    assert_eq!(summary.talks_indexed, 1);
    assert_eq!(summary.talk_failures, 1);
    assert_eq!(summary.conference_failures, 0);
}
