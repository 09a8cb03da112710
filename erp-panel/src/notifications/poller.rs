use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::center::NotificationCenter;

/// Periodic unread-count refresh.
///
/// The first refresh runs immediately. The task holds only a weak
/// reference, so it ends on its own once the center is dropped. Dropping
/// the poller stops it.
#[derive(Debug)]
pub struct Poller {
    task: JoinHandle<()>,
}

impl Poller {
    /// Start polling. Returns `None` for a zero interval, without a token
    /// or outside a runtime.
    pub fn start(center: &NotificationCenter, every: Duration) -> Option<Self> {
        if every.is_zero() {
            log::warn!("zero poll interval, unread count polling disabled");
            return None;
        }
        if !center.is_authenticated() {
            log::info!("no API token, unread count polling disabled");
            return None;
        }
        let Ok(handle) = Handle::try_current() else {
            log::warn!("no async runtime, unread count polling disabled");
            return None;
        };

        let weak = center.downgrade();
        let task = handle.spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(center) = NotificationCenter::from_weak(&weak) else {
                    log::debug!("notification center dropped, polling stopped");
                    break;
                };
                center.refresh_count().await;
            }
        });
        log::info!("polling unread notifications every {}s", every.as_secs());
        Some(Self { task })
    }

    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
