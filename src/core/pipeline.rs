use crate::core::classify::{self, RuleSet};
use crate::core::networks::NetworkSet;
use crate::core::verify::{self, SystemResolver};
use crate::core::{extract, report};
use crate::domain::model::{FilterOutcome, FilterSummary, RankedDomains};
use crate::domain::ports::{ConfigProvider, Pipeline, Resolver, Storage};
use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct SievePipeline<S, C, R> {
    storage: S,
    config: C,
    resolver: Arc<R>,
    rules: RuleSet,
}

impl<S: Storage, C: ConfigProvider> SievePipeline<S, C, SystemResolver> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_resolver(storage, config, SystemResolver)
    }
}

impl<S: Storage, C: ConfigProvider, R: Resolver> SievePipeline<S, C, R> {
    /// Inject a resolver so tests can hold the DNS oracle fixed.
    pub fn with_resolver(storage: S, config: C, resolver: R) -> Self {
        Self {
            storage,
            config,
            resolver: Arc::new(resolver),
            rules: RuleSet::saudi(),
        }
    }

    /// Missing or unreadable network file degrades to an empty set; the
    /// records file is the only input whose absence is fatal.
    async fn load_networks(&self) -> NetworkSet {
        let Some(path) = self.config.network_path() else {
            return NetworkSet::default();
        };

        match self.storage.read_file(path).await {
            Ok(data) => {
                let set = NetworkSet::load(data.as_slice());
                if set.skipped_lines > 0 {
                    warn!("skipped {} malformed network lines", set.skipped_lines);
                }
                info!("loaded {} reference networks", set.len());
                set
            }
            Err(err) => {
                warn!(
                    "reference network file unavailable ({}); DNS verification will be skipped",
                    err
                );
                NetworkSet::default()
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: Resolver> Pipeline for SievePipeline<S, C, R> {
    async fn extract(&self) -> Result<RankedDomains> {
        let data = self.storage.read_file(self.config.records_path()).await?;
        let ranked = extract::read_ranked_domains(data.as_slice())?;
        if ranked.skipped_rows > 0 {
            warn!("skipped {} malformed input rows", ranked.skipped_rows);
        }
        Ok(ranked)
    }

    async fn transform(&self, ranked: RankedDomains) -> Result<FilterOutcome> {
        let total_input = ranked.ranks.len();
        let mut classified = classify::partition(&ranked.ranks, &self.rules);

        info!("target TLD domains: {}", classified.tld.len());
        info!("known first-party: {}", classified.known.len());
        info!("keyword matches: {}", classified.keyword.len());
        info!("globally excluded: {}", classified.excluded.len());
        info!("deferred to DNS check: {}", classified.deferred.len());

        let mut dns_verified: BTreeSet<String> = BTreeSet::new();
        if self.config.resolve_dns() {
            let networks = self.load_networks().await;
            if networks.is_empty() {
                warn!("no reference networks loaded; skipping DNS verification");
            } else {
                info!("resolving {} deferred domains", classified.deferred.len());
                let outcomes = verify::verify(
                    classified.deferred.iter().cloned().collect::<Vec<_>>(),
                    Arc::new(networks),
                    Arc::clone(&self.resolver),
                    self.config.max_workers(),
                    Duration::from_secs(self.config.timeout_secs()),
                )
                .await;
                dns_verified = outcomes
                    .into_iter()
                    .filter(|outcome| outcome.matched)
                    .map(|outcome| outcome.domain)
                    .collect();
                info!("DNS-verified: {}", dns_verified.len());
            }
        }

        let summary = FilterSummary {
            total_input,
            skipped_rows: ranked.skipped_rows,
            tld: classified.tld.len(),
            known: classified.known.len(),
            keyword: classified.keyword.len(),
            dns_verified: dns_verified.len(),
            excluded: classified.excluded.len(),
            deferred: classified.deferred.len(),
        };

        let mut domains = BTreeSet::new();
        domains.append(&mut classified.tld);
        domains.append(&mut classified.known);
        domains.append(&mut classified.keyword);
        domains.append(&mut dns_verified);

        Ok(FilterOutcome { domains, summary })
    }

    async fn load(&self, outcome: FilterOutcome) -> Result<String> {
        info!("retained {} domains", outcome.domains.len());

        match self.config.output_path() {
            Some(path) => {
                let rendered = report::render(&outcome.summary, &outcome.domains);
                self.storage.write_file(path, rendered.as_bytes()).await?;
                Ok(path.to_string())
            }
            None => {
                let body = report::render_body(&outcome.domains);
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(body.as_bytes())?;
                Ok("stdout".to_string())
            }
        }
    }
}
