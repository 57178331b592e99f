use crate::data_sync::{
    chain_client::{ChainClient, HttpChainClient},
    config::MonitorConfig,
    pairs_config::default_pairs,
    sources::{AggregatorSource, PoolSource},
};
use crate::errors::MonitorError;
use crate::logic::{PairChecker, ReportRow, TradingPair};
use crate::utils::{Reporter, TableReporter};
use eyre::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Single-flight guard and terminal stop flag of the monitor.
#[derive(Debug, Default)]
pub struct MonitorState {
    running: AtomicBool,
    stopped: AtomicBool,
}

impl MonitorState {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Claim the guard. `None` when a tick is already in flight.
    fn try_begin(&self) -> Option<RunningGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunningGuard { running: &self.running })
    }

    /// One-way. Returns whether this call performed the transition.
    fn stop(&self) -> bool {
        !self.stopped.swap(true, Ordering::AcqRel)
    }
}

/// Clears the running flag on drop, including when a tick future is dropped mid-flight.
struct RunningGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Every pair was checked and this many rows were rendered.
    Reported(usize),
    /// Another tick was in flight; nothing was done.
    Skipped,
    /// A previous tick failed; monitoring is over until restart.
    Halted,
}

/// Polls every configured pair on a fixed cadence and reports the rows.
///
/// The first failing tick stops the monitor for good. There are no retries and no
/// partial reports.
pub struct PriceMonitor {
    checker: PairChecker,
    pairs: Vec<TradingPair>,
    reporter: Arc<dyn Reporter>,
    state: MonitorState,
}

impl PriceMonitor {
    pub fn new(checker: PairChecker, pairs: Vec<TradingPair>, reporter: Arc<dyn Reporter>) -> Self {
        Self { checker, pairs, reporter, state: MonitorState::default() }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn pairs(&self) -> &[TradingPair] {
        &self.pairs
    }

    /// Run one pass over all pairs, unless a pass is in flight or the monitor is stopped.
    pub async fn tick(&self) -> Result<TickOutcome, MonitorError> {
        if self.state.is_stopped() {
            return Ok(TickOutcome::Halted);
        }
        let Some(_guard) = self.state.try_begin() else {
            warn!("Previous price check still running, dropping tick");
            return Ok(TickOutcome::Skipped);
        };
        // a failing tick may have finished between the two checks
        if self.state.is_stopped() {
            return Ok(TickOutcome::Halted);
        }

        info!("Checking prices...");
        let start_time = Instant::now();

        match self.check_all().await {
            Ok(rows) => {
                self.reporter.render(&rows);
                debug!("Checked {} pairs in {:?}", rows.len(), start_time.elapsed());
                Ok(TickOutcome::Reported(rows.len()))
            }
            Err(e) => {
                // stop before the guard drops so no tick can slip in between
                if self.state.stop() {
                    error!("Price check failed, monitoring stopped: {}", e);
                }
                Err(e)
            }
        }
    }

    async fn check_all(&self) -> Result<Vec<ReportRow>, MonitorError> {
        let mut rows = Vec::with_capacity(self.pairs.len());
        for pair in &self.pairs {
            rows.push(self.checker.check(pair).await?);
        }
        Ok(rows)
    }

    /// Spawn the periodic timer. The first tick fires one `interval` after start.
    ///
    /// The task ends when a tick fails and yields that error; missed ticks are dropped.
    pub fn start(self: Arc<Self>, interval: Duration) -> JoinHandle<Result<(), MonitorError>> {
        tokio::spawn(async move {
            info!("Monitoring {} pairs every {:?}", self.pairs.len(), interval);

            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                match self.tick().await? {
                    TickOutcome::Halted => return Ok(()),
                    TickOutcome::Reported(_) | TickOutcome::Skipped => {}
                }
            }
        })
    }
}

/// Builder wiring the monitor to a node over HTTP
pub struct PriceMonitorBuilder {
    config: Option<MonitorConfig>,
    pairs: Option<Vec<TradingPair>>,
    client: Option<Arc<dyn ChainClient>>,
    reporter: Option<Arc<dyn Reporter>>,
}

impl PriceMonitorBuilder {
    pub fn new() -> Self {
        Self { config: None, pairs: None, client: None, reporter: None }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_pairs(mut self, pairs: Vec<TradingPair>) -> Self {
        self.pairs = Some(pairs);
        self
    }

    pub fn with_client(mut self, client: Arc<dyn ChainClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> Result<PriceMonitor> {
        let config = match self.config {
            Some(config) => config,
            None => MonitorConfig::from_env()?,
        };

        let client = match self.client {
            Some(client) => client,
            None => Arc::new(HttpChainClient::new(config.rpc_http_url.clone(), config.http_timeout())?),
        };

        let checker = PairChecker::new(
            Arc::new(PoolSource::new(client.clone(), config.factory_address)),
            Arc::new(AggregatorSource::new(client, config.aggregator_address)),
            config.timezone()?,
        );

        let pairs = self.pairs.unwrap_or_else(default_pairs);
        let reporter = self.reporter.unwrap_or_else(|| Arc::new(TableReporter));

        info!("Price monitor configured with {} pairs against {}", pairs.len(), config.rpc_http_url);
        Ok(PriceMonitor::new(checker, pairs, reporter))
    }
}

impl Default for PriceMonitorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
