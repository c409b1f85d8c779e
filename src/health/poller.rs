//! Recurring health poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::{HealthProbe, HealthSnapshot};

/// Polls a [`HealthProbe`] on a fixed interval, starting immediately.
///
/// Only one request is outstanding at a time: a tick that fires while the
/// previous request is still in flight is skipped. Failures are logged and
/// the schedule carries on. Successful snapshots are sent to the receiver in
/// the order they completed.
#[derive(Debug)]
pub struct HealthPoller<P> {
    probe: Arc<P>,
    interval: Duration,
    in_flight: Arc<AtomicBool>,
}

impl<P: HealthProbe> HealthPoller<P> {
    pub fn new(probe: P, interval: Duration) -> Self {
        Self {
            probe: Arc::new(probe),
            interval,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start polling. The task ends once `tx`'s receiver is dropped.
    pub fn spawn(self, tx: mpsc::Sender<HealthSnapshot>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    debug!("health receiver dropped, stopping poller");
                    break;
                }
                if self.in_flight.swap(true, Ordering::AcqRel) {
                    debug!("health request still in flight, skipping tick");
                    continue;
                }

                let guard = InFlight(self.in_flight.clone());
                let probe = self.probe.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let _guard = guard;
                    match probe.fetch_health().await {
                        Ok(snapshot) => {
                            let _ = tx.send(snapshot).await;
                        }
                        Err(e) => warn!("health check failed: {}", e),
                    }
                });
            }
        })
    }
}

/// Clears the in-flight flag when the request task finishes, even on panic.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthError;
    use crate::health::PacketStats;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    fn snapshot(received: u64) -> HealthSnapshot {
        HealthSnapshot {
            uptime: 1.0,
            stats: PacketStats {
                packets_received: received,
                ..PacketStats::default()
            },
            status: None,
            signals_count: None,
        }
    }

    /// Fails on the calls listed in `fail_on`, sleeps `delay` per call.
    #[derive(Default)]
    struct FakeProbe {
        calls: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
        delay: Duration,
        fail_on: Vec<usize>,
    }

    #[async_trait]
    impl HealthProbe for FakeProbe {
        async fn fetch_health(&self) -> Result<HealthSnapshot, HealthError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);

            tokio::time::sleep(self.delay).await;

            self.active.fetch_sub(1, Ordering::SeqCst);
            if self.fail_on.contains(&call) {
                Err(HealthError::Connection("refused".to_string()))
            } else {
                Ok(snapshot(call as u64))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_immediately() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = HealthPoller::new(FakeProbe::default(), Duration::from_secs(1)).spawn(tx);

        let first = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("first poll should not wait for the interval")
            .unwrap();
        assert_eq!(first.stats.packets_received, 0);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_stop_schedule() {
        let probe = FakeProbe {
            fail_on: vec![0, 1],
            ..FakeProbe::default()
        };
        let (tx, mut rx) = mpsc::channel(8);
        let handle = HealthPoller::new(probe, Duration::from_secs(1)).spawn(tx);

        // Calls 0 and 1 fail; call 2 is the first snapshot delivered.
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.stats.packets_received, 2);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_requests_never_overlap() {
        let probe = Arc::new(FakeProbe {
            delay: Duration::from_millis(2_500),
            ..FakeProbe::default()
        });
        let poller = HealthPoller {
            probe: probe.clone(),
            interval: Duration::from_secs(1),
            in_flight: Arc::new(AtomicBool::new(false)),
        };
        let (tx, mut rx) = mpsc::channel(8);
        let handle = poller.spawn(tx);

        tokio::time::sleep(Duration::from_millis(6_100)).await;
        handle.abort();

        assert_eq!(probe.max_active.load(Ordering::SeqCst), 1);
        let calls = probe.calls.load(Ordering::SeqCst);
        assert!((2..=3).contains(&calls), "calls = {calls}");

        let mut received = Vec::new();
        while let Ok(s) = rx.try_recv() {
            received.push(s.stats.packets_received);
        }
        assert!(received.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(8);
        let handle = HealthPoller::new(FakeProbe::default(), Duration::from_secs(1)).spawn(tx);
        drop(rx);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("poller should exit")
            .unwrap();
    }
}
