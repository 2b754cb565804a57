use std::time::Duration;

/// Cosmetic pause before results are shown. Evaluation itself never waits on it.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    delay: Duration,
}

impl SimulatedLatency {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::debug!("Simulating {} ms of processing", self.delay.as_millis());
        tokio::time::sleep(self.delay).await;
    }
}
