use std::sync::LazyLock;

use parking_lot::Mutex;
use parking_lot::MutexGuard;

/// Serializes tests that share a resource.
///
/// Tests that spawn child processes take the `process` bucket: executing a
/// script that another thread has just written can fail with `ETXTBSY` while a
/// concurrently forked child still holds the write descriptor.
#[must_use]
pub fn prevent_concurrency(bucket: &str) -> MutexGuard<'static, ()> {
    for (name, mutex) in BUCKETS.iter() {
        if name == &bucket {
            return mutex.lock();
        }
    }
    panic!("no such concurrency bucket: {:?}", bucket);
}

static BUCKETS: LazyLock<Vec<(&'static str, Mutex<()>)>> =
    LazyLock::new(|| vec![("process", Mutex::new(()))]);
