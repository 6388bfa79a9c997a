use crate::table::TopKTable;
use crate::{Error, GroupRanker, Record, Result};
use ahash::AHashMap;
use parking_lot::Mutex;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// Records handed to a worker in one batch.
const CHUNK_SIZE: usize = 8192;

/// Ranks a record stream by sharding it across worker threads.
///
/// The stream is drained in bounded chunks and dealt round-robin to
/// `workers` threads, each owning a private [`GroupRanker`]. When its
/// shard ends, a worker merges its finalized table into a shared
/// accumulator; the mutex serializes those merges, so no category's
/// bounded structure is ever mutated concurrently. Because the merge is
/// associative and commutative, the result matches direct single-pass
/// ranking for any sharding.
///
/// The first source or worker error aborts the run. With `workers == 1`
/// this degenerates to the sequential path with no threads spawned.
pub fn rank_sharded<I>(records: I, k: usize, workers: usize) -> Result<TopKTable>
where
    I: IntoIterator<Item = Result<Record>>,
{
    if workers == 0 {
        return Err(Error::InvalidConfig(
            "worker count must be at least 1".to_string(),
        ));
    }
    if workers == 1 {
        let mut ranker = GroupRanker::new(k)?;
        for record in records {
            ranker.push(record?)?;
        }
        return Ok(ranker.finalize());
    }

    let merged = Arc::new(Mutex::new(TopKTable::new(k)?));
    let mut senders = Vec::with_capacity(workers);
    let mut handles = Vec::with_capacity(workers);

    for worker_id in 0..workers {
        let (tx, rx) = mpsc::channel::<Vec<Record>>();
        let merged = merged.clone();
        let handle = thread::Builder::new()
            .name(format!("rank-worker-{}", worker_id))
            .spawn(move || -> Result<()> {
                let mut ranker = GroupRanker::new(k)?;
                while let Ok(chunk) = rx.recv() {
                    ranker.feed(chunk)?;
                }
                let local = ranker.finalize();
                let mut guard = merged.lock();
                let prev = std::mem::replace(&mut *guard, TopKTable::from_groups(k, AHashMap::new()));
                *guard = prev.merge(local)?;
                Ok(())
            })?;
        senders.push(tx);
        handles.push(handle);
    }

    let mut source_err = None;
    let mut chunk = Vec::with_capacity(CHUNK_SIZE);
    let mut next = 0usize;
    for record in records {
        match record {
            Ok(record) => {
                chunk.push(record);
                if chunk.len() == CHUNK_SIZE {
                    let full = std::mem::replace(&mut chunk, Vec::with_capacity(CHUNK_SIZE));
                    if senders[next].send(full).is_err() {
                        // Receiver gone: the worker failed and its error
                        // surfaces at join below.
                        break;
                    }
                    next = (next + 1) % workers;
                }
            }
            Err(e) => {
                source_err = Some(e);
                break;
            }
        }
    }
    if source_err.is_none() && !chunk.is_empty() {
        let _ = senders[next].send(chunk);
    }
    drop(senders);

    let mut worker_err = None;
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if worker_err.is_none() {
                    worker_err = Some(e);
                }
            }
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
    if let Some(e) = source_err {
        return Err(e);
    }
    if let Some(e) = worker_err {
        return Err(e);
    }

    let table = match Arc::try_unwrap(merged) {
        Ok(mutex) => mutex.into_inner(),
        // All workers joined, but stay safe if a clone lingers.
        Err(arc) => arc.lock().clone(),
    };
    Ok(table)
}
