use std::sync::Arc;

use idxheap::IndexedMinHeap;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

const JOBS: usize = 8;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Job id -> deadline in milliseconds; smallest deadline runs first.
    let queue = Arc::new(Mutex::new(IndexedMinHeap::new(JOBS)));

    queue
        .lock()
        .await
        .insert_all((0..JOBS).map(|job| (job, 100 + 50 * job as u64)))?;

    let escalator = {
        let queue = queue.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(5)).await;
            let mut queue = queue.lock().await;
            for job in [6, 7] {
                if queue.change_priority(job, 10)? {
                    println!("[Escalate] job {} -> deadline 10ms", job);
                }
            }
            anyhow::Ok(())
        })
    };

    sleep(Duration::from_millis(10)).await;
    escalator.await??;

    loop {
        let next = {
            let mut queue = queue.lock().await;
            if queue.is_empty() {
                break;
            }
            queue.extract_min_entry()?
        };
        let (job, deadline) = next;
        println!("[Run] job {} (deadline {}ms)", job, deadline);
        sleep(Duration::from_millis(1)).await;
    }

    Ok(())
}
