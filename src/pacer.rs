use tokio::time::{self, Duration, Instant};
use tracing::trace;

/// Hands out one permit per `interval`, counted from the moment the previous
/// permit was released.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_release: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Pacer {
        Pacer {
            interval,
            last_release: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the next request may start. The first permit is immediate.
    pub async fn acquire(&mut self) {
        if let Some(last_release) = self.last_release {
            let next = last_release + self.interval;
            if next > Instant::now() {
                trace!("Waiting {:?} before next request", next - Instant::now());
                time::sleep_until(next).await;
            }
        }
    }

    pub fn release(&mut self) {
        self.last_release = Some(Instant::now());
    }
}
