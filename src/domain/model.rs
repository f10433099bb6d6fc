use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;

/// One row of the traffic-ranking input: an origin string and its rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub origin: String,
    pub rank: u32,
}

/// Hostnames mapped to the best (lowest) rank observed for each of them.
#[derive(Debug, Default)]
pub struct RankedDomains {
    pub ranks: HashMap<String, u32>,
    pub skipped_rows: u64,
}

/// Classification tier a domain lands in. Exactly one per domain,
/// assigned in the fixed precedence order the classifier evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    TldMatch,
    GlobalExcluded,
    KnownFirstParty,
    KeywordMatch,
    DnsVerified,
    Unresolved,
}

/// Registrable domains bucketed by classifier tier.
#[derive(Debug, Default)]
pub struct ClassifiedSet {
    pub tld: BTreeSet<String>,
    pub known: BTreeSet<String>,
    pub keyword: BTreeSet<String>,
    pub excluded: BTreeSet<String>,
    pub deferred: BTreeSet<String>,
}

/// Per-domain result of one DNS verification attempt.
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    pub domain: String,
    pub addresses: Vec<IpAddr>,
    pub matched: bool,
}

/// Provenance counts for the report header and the diagnostic summary.
#[derive(Debug, Clone, Default)]
pub struct FilterSummary {
    pub total_input: usize,
    pub skipped_rows: u64,
    pub tld: usize,
    pub known: usize,
    pub keyword: usize,
    pub dns_verified: usize,
    pub excluded: usize,
    pub deferred: usize,
}

/// Result of the transform phase, consumed by load.
#[derive(Debug)]
pub struct FilterOutcome {
    pub domains: BTreeSet<String>,
    pub summary: FilterSummary,
}
