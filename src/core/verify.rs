use crate::core::networks::NetworkSet;
use crate::domain::model::ResolutionOutcome;
use crate::domain::ports::Resolver;
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::lookup_host;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

const PROGRESS_EVERY: usize = 1000;

/// Resolver backed by the operating system's stub resolver.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        let addrs = lookup_host((host, 0u16)).await?;
        let mut ips: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
        ips.sort();
        ips.dedup();
        Ok(ips)
    }
}

/// Resolve every deferred domain once and test its addresses against the
/// reference networks. A semaphore caps in-flight resolutions at
/// `max_workers`; each task carries its own timeout. Failures and timeouts
/// downgrade that one domain to unmatched and never abort the batch.
/// Returns only after every submitted domain has an outcome.
pub async fn verify<R: Resolver>(
    deferred: impl IntoIterator<Item = String>,
    networks: Arc<NetworkSet>,
    resolver: Arc<R>,
    max_workers: usize,
    task_timeout: Duration,
) -> Vec<ResolutionOutcome> {
    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut tasks = JoinSet::new();
    let mut total = 0usize;

    for domain in deferred {
        total += 1;
        let semaphore = Arc::clone(&semaphore);
        let networks = Arc::clone(&networks);
        let resolver = Arc::clone(&resolver);
        tasks.spawn(async move {
            // The semaphore is never closed; a failed acquire must still not
            // let the task run unpermitted.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return ResolutionOutcome {
                    domain,
                    addresses: Vec::new(),
                    matched: false,
                };
            };
            let addresses = match tokio::time::timeout(task_timeout, resolver.resolve(&domain))
                .await
            {
                Ok(Ok(ips)) => ips,
                Ok(Err(err)) => {
                    debug!("resolution failed for {}: {}", domain, err);
                    Vec::new()
                }
                Err(_) => {
                    debug!("resolution timed out for {}", domain);
                    Vec::new()
                }
            };
            let matched = addresses.iter().any(|ip| networks.contains(*ip));
            ResolutionOutcome {
                domain,
                addresses,
                matched,
            }
        });
    }

    let mut outcomes = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => {
                outcomes.push(outcome);
                if outcomes.len() % PROGRESS_EVERY == 0 {
                    info!("resolved {}/{} deferred domains", outcomes.len(), total);
                }
            }
            // A panicking task only loses its own domain's outcome.
            Err(err) => warn!("resolution task aborted: {}", err),
        }
    }

    outcomes
}
