/*!
 * Page lifecycle controller.
 *
 * Drives the navigation state machine from a signal stream:
 * - every scheduling signal (re)starts the settle delay, so a burst of DOM
 *   mutations during a route change results in one evaluation
 * - mutation signals only count when the location actually changed
 * - an evaluation applies cache invalidation in the same turn as the state
 *   change, then dispatches the lifecycle message on a separate task
 */

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use log::{debug, warn};
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::navigation::{LifecycleEvent, NavigationMachine, NavigationState};
use crate::signals::{LocationProvider, NavigationSignal, SignalSource};
use crate::sinks::{MessageChannel, VideoCache};

/// Lifecycle controller for one page
#[derive(Debug)]
pub struct LifecycleController {
    machine: NavigationMachine,
    location: Arc<dyn LocationProvider>,
    cache: Arc<dyn VideoCache>,
    channel: Arc<dyn MessageChannel>,
    settle_delay: Duration,
    last_mutation_href: Option<String>,
    in_flight: JoinSet<()>,
}

impl LifecycleController {
    pub fn new(
        machine: NavigationMachine,
        location: Arc<dyn LocationProvider>,
        cache: Arc<dyn VideoCache>,
        channel: Arc<dyn MessageChannel>,
        settle_delay: Duration,
    ) -> Self {
        LifecycleController {
            machine,
            location,
            cache,
            channel,
            settle_delay,
            last_mutation_href: None,
            in_flight: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        self.machine.state()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Whether `signal` should (re)start the settle delay
    pub fn should_schedule(&mut self, signal: NavigationSignal) -> bool {
        match signal {
            NavigationSignal::Mutation => {
                let href = self.location.href();
                if self.last_mutation_href.as_deref() == Some(href.as_str()) {
                    return false;
                }
                self.last_mutation_href = Some(href);
                true
            }
            NavigationSignal::HistoryPop | NavigationSignal::SpaNavigation => true,
        }
    }

    /// Evaluate the current location now.
    ///
    /// Must be called from within a tokio runtime when it can emit an event.
    pub fn evaluate(&mut self) -> Option<LifecycleEvent> {
        let href = self.location.href();
        let transition = self.machine.observe_href(&href);

        if transition.clear_cache {
            self.cache.clear();
        }

        if let Some(event) = &transition.event {
            self.dispatch(event.clone());
        }

        transition.event
    }

    fn dispatch(&mut self, event: LifecycleEvent) {
        // Reap finished deliveries
        while self.in_flight.try_join_next().is_some() {}

        let message = event.into_message(chrono::Utc::now().timestamp_millis());
        let channel = Arc::clone(&self.channel);

        self.in_flight.spawn(async move {
            if let Err(e) = channel.send(message).await {
                warn!("Failed to send lifecycle message: {}", e);
            }
        });
    }

    /// Wait for lifecycle messages still being delivered
    pub async fn drain(&mut self) {
        while self.in_flight.join_next().await.is_some() {}
    }

    /// Evaluate once, then follow `source` until it ends.
    ///
    /// An evaluation still pending when the stream ends runs after its delay.
    pub async fn run<S: SignalSource>(&mut self, source: &mut S) {
        self.evaluate();
        self.last_mutation_href = Some(self.location.href());

        let mut signals = source.subscribe();
        let settle = tokio::time::sleep(self.settle_delay);
        tokio::pin!(settle);
        let mut pending = false;

        loop {
            tokio::select! {
                signal = signals.next() => match signal {
                    Some(signal) => {
                        if self.should_schedule(signal) {
                            debug!("{:?} signal, re-evaluating in {:?}", signal, self.settle_delay);
                            settle.as_mut().reset(Instant::now() + self.settle_delay);
                            pending = true;
                        }
                    }
                    None => break,
                },
                _ = &mut settle, if pending => {
                    pending = false;
                    self.evaluate();
                }
            }
        }

        if pending {
            settle.await;
            self.evaluate();
        }

        self.drain().await;
        debug!("Navigation signal stream ended");
    }
}
