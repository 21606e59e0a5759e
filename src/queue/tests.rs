use super::*;
use crate::common::Logger;
use crate::common::multihash::SHA2_256;
use crate::common::tests::CaptureLog;
use crate::operation::parse_deactivate_operation;
use crate::protocol::Protocol;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

fn info(n: usize) -> OperationInfo {
    OperationInfo::new(format!("operation-{}", n).into_bytes(), &format!("suffix-{}", n))
}

/// Deterministic queue double: records every call and replays scripted results,
/// falling back to defaults once a script runs dry.
#[derive(Debug, Default)]
struct FakeOperationQueue {
    calls: Mutex<Vec<(String, u64)>>,
    added: Mutex<Vec<OperationInfo>>,
    add_returns: Mutex<VecDeque<Result<u64, String>>>,
    remove_returns: Mutex<VecDeque<Option<(u64, u64)>>>,
    peek_returns: Mutex<VecDeque<Vec<QueuedOperation>>>,
    len_returns: Mutex<VecDeque<usize>>,
}

impl FakeOperationQueue {
    fn record(&self, call: &str, arg: u64) {
        self.calls.lock().unwrap().push((call.to_string(), arg));
    }

    fn calls(&self) -> Vec<(String, u64)> {self.calls.lock().unwrap().clone()}

    fn call_count(&self, call: &str) -> usize {
        self.calls().iter().filter(|(c, _)| c == call).count()
    }

    fn invocations(&self) -> HashMap<String, Vec<u64>> {
        let mut invocations: HashMap<String, Vec<u64>> = HashMap::new();
        for (call, arg) in self.calls() {
            invocations.entry(call).or_default().push(arg);
        }
        invocations
    }
}

impl OperationQueue for FakeOperationQueue {
    fn add(&self, info: OperationInfo) -> Result<u64, Error> {
        self.record("add", 0);
        self.added.lock().unwrap().push(info);
        match self.add_returns.lock().unwrap().pop_front() {
            Some(Ok(sequence)) => Ok(sequence),
            Some(Err(msg)) => Err(Error::err("FakeOperationQueue.add", &msg)),
            None => Ok(0)
        }
    }

    fn remove(&self, upto: u64) -> Result<Option<(u64, u64)>, Error> {
        self.record("remove", upto);
        Ok(self.remove_returns.lock().unwrap().pop_front().flatten())
    }

    fn peek(&self, count: usize) -> Result<Vec<QueuedOperation>, Error> {
        self.record("peek", count as u64);
        Ok(self.peek_returns.lock().unwrap().pop_front().unwrap_or_default())
    }

    fn len(&self) -> Result<usize, Error> {
        self.record("len", 0);
        Ok(self.len_returns.lock().unwrap().pop_front().unwrap_or_default())
    }
}

#[test]
fn add_assigns_increasing_sequence_numbers() {
    let queue = MemoryQueue::new();
    assert!(queue.is_empty().unwrap());
    assert_eq!(queue.add(info(1)).unwrap(), 1);
    assert_eq!(queue.add(info(2)).unwrap(), 2);
    assert_eq!(queue.add(info(3)).unwrap(), 3);
    assert_eq!(queue.len().unwrap(), 3);

    queue.remove(3).unwrap();
    assert_eq!(queue.add(info(4)).unwrap(), 4);
}

#[test]
fn peek_does_not_mutate() {
    let queue = MemoryQueue::new();
    for n in 1..=3 {queue.add(info(n)).unwrap();}

    let head = queue.peek(2).unwrap();
    assert_eq!(head.iter().map(|q| q.sequence).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(head[0].info, info(1));
    assert_eq!(queue.len().unwrap(), 3);

    assert_eq!(queue.peek(10).unwrap().len(), 3);
    assert!(queue.peek(0).unwrap().is_empty());
}

#[test]
fn remove_reports_actual_range() {
    let queue = MemoryQueue::new();
    for n in 1..=5 {queue.add(info(n)).unwrap();}

    assert_eq!(queue.remove(2).unwrap(), Some((1, 2)));
    assert_eq!(queue.len().unwrap(), 3);
    // Same or smaller bound is a no-op.
    assert_eq!(queue.remove(2).unwrap(), None);
    assert_eq!(queue.remove(1).unwrap(), None);
    assert_eq!(queue.len().unwrap(), 3);

    assert_eq!(queue.remove(100).unwrap(), Some((3, 5)));
    assert!(queue.is_empty().unwrap());
    assert_eq!(queue.remove(100).unwrap(), None);
}

#[test]
fn clones_share_entries() {
    let queue = MemoryQueue::new();
    let other = queue.clone();
    queue.add(info(1)).unwrap();
    assert_eq!(other.len().unwrap(), 1);
    assert_eq!(other.add(info(2)).unwrap(), 2);
}

#[test]
fn operation_info_from_parsed_operation() {
    let request = serde_json::to_vec(&serde_json::json!({
        "type": "deactivate",
        "didSuffix": "suffix",
        "revealValue": "reveal",
        "signedData": crate::operation::CompactJws::new(
            crate::operation::JwsHeader::new("ES256K"),
            br#"{"didSuffix":"suffix","recoveryKey":{"kty":"EC","crv":"secp256k1","x":"x","y":"y"}}"#.to_vec(),
            b"sig".to_vec()
        ).to_compact().unwrap()
    })).unwrap();
    let operation = parse_deactivate_operation(&request, &Protocol::default()).unwrap();
    let info = OperationInfo::from_operation(&operation, SHA2_256).unwrap();
    assert_eq!(info.data, request);
    assert_eq!(info.unique_suffix, "suffix");
}

#[test]
fn memory_queue_logs_through_injected_sink() {
    let sink = Arc::new(CaptureLog::default());
    let queue = MemoryQueue::with_logger(Logger::with_sink("sidetree-core-queue", sink.clone()));
    queue.add(info(1)).unwrap();
    queue.remove(1).unwrap();
    let lines = sink.lines.lock().unwrap();
    assert_eq!(*lines, vec![
        "DEBUG sidetree-core-queue: queued operation 1 for suffix-1".to_string(),
        "DEBUG sidetree-core-queue: removed operations 1 through 1".to_string(),
    ]);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_adds_get_unique_sequences() {
    let queue = MemoryQueue::new();
    let mut handles = Vec::new();
    for task in 0..8 {
        let queue = queue.clone();
        handles.push(tokio::spawn(async move {
            let mut sequences = Vec::new();
            for n in 0..50 {
                sequences.push(queue.add(info(task * 100 + n)).unwrap());
            }
            sequences
        }));
    }
    let mut all = Vec::new();
    for handle in handles {
        let sequences = handle.await.unwrap();
        // Per-caller order is strictly increasing.
        assert!(sequences.windows(2).all(|w| w[0] < w[1]));
        all.extend(sequences);
    }
    all.sort();
    assert_eq!(all, (1..=400).collect::<Vec<u64>>());

    let head = queue.peek(400).unwrap();
    assert!(head.windows(2).all(|w| w[0].sequence + 1 == w[1].sequence));
}

#[tokio::test(flavor = "multi_thread")]
async fn readers_never_see_torn_state() {
    let queue = MemoryQueue::new();
    let writer = {
        let queue = queue.clone();
        tokio::spawn(async move {
            for n in 0..200 {
                queue.add(info(n)).unwrap();
                if n % 10 == 9 {
                    queue.remove(n as u64 - 4).unwrap();
                }
            }
        })
    };
    let reader = {
        let queue = queue.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                let head = queue.peek(usize::MAX).unwrap();
                assert!(head.windows(2).all(|w| w[0].sequence + 1 == w[1].sequence));
                tokio::task::yield_now().await;
            }
        })
    };
    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(queue.len().unwrap(), 5);
}

#[test]
fn cutter_waits_for_a_full_batch() {
    let queue = Arc::new(MemoryQueue::new());
    let cutter = BatchCutter::new(queue.clone(), 3);
    for n in 1..=2 {cutter.add_operation(info(n)).unwrap();}

    assert!(cutter.cut(false).unwrap().is_empty());
    let forced = cutter.cut(true).unwrap();
    assert_eq!(forced.len(), 2);

    cutter.add_operation(info(3)).unwrap();
    cutter.add_operation(info(4)).unwrap();
    let batch = cutter.cut(false).unwrap();
    assert_eq!(batch.iter().map(|q| q.sequence).collect::<Vec<_>>(), vec![1, 2, 3]);

    assert_eq!(cutter.commit(&batch).unwrap(), Some((1, 3)));
    assert_eq!(cutter.pending().unwrap(), 1);
    assert_eq!(queue.peek(1).unwrap()[0].sequence, 4);
    assert_eq!(cutter.commit(&[]).unwrap(), None);
}

#[test]
fn cutter_uses_queue_contract_only() {
    let fake = Arc::new(FakeOperationQueue::default());
    let batch = vec![
        QueuedOperation{sequence: 7, info: info(7)},
        QueuedOperation{sequence: 8, info: info(8)},
    ];
    fake.len_returns.lock().unwrap().extend([0, 5]);
    fake.peek_returns.lock().unwrap().push_back(batch.clone());
    fake.remove_returns.lock().unwrap().push_back(Some((7, 8)));

    let cutter = BatchCutter::new(fake.clone(), 2);
    assert!(cutter.cut(true).unwrap().is_empty());
    assert_eq!(fake.call_count("peek"), 0);

    assert_eq!(cutter.cut(false).unwrap(), batch);
    assert_eq!(cutter.commit(&batch).unwrap(), Some((7, 8)));

    assert_eq!(fake.calls(), vec![
        ("len".to_string(), 0),
        ("len".to_string(), 0),
        ("peek".to_string(), 2),
        ("remove".to_string(), 8),
    ]);
    assert_eq!(fake.invocations()["remove"], vec![8]);
}

#[test]
fn cutter_propagates_queue_errors() {
    let fake = Arc::new(FakeOperationQueue::default());
    fake.add_returns.lock().unwrap().extend([Ok(1), Err("full".to_string())]);
    let cutter = BatchCutter::new(fake.clone(), 10);

    assert_eq!(cutter.add_operation(info(1)).unwrap(), 1);
    let err = cutter.add_operation(info(2)).unwrap_err();
    assert_eq!(err.to_string(), "Error FakeOperationQueue.add: full");
    assert_eq!(fake.added.lock().unwrap().len(), 2);
}
