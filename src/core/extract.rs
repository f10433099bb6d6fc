use crate::core::classify::RuleSet;
use crate::domain::model::{RankedDomains, TrafficRecord};
use crate::utils::error::Result;
use std::io::Read;
use url::Url;

/// Pull the hostname out of an origin cell. Accepts full URLs or bare
/// hostnames, lowercases the result and strips a single leading `www.` label.
pub fn extract_hostname(origin: &str) -> Option<String> {
    let trimmed = origin.trim();
    if trimmed.is_empty() {
        return None;
    }

    let host = match Url::parse(trimmed) {
        Ok(url) => url.host_str().map(str::to_string),
        // Bare hostname, possibly with a trailing path or port.
        Err(_) => trimmed.split(['/', ':']).next().map(str::to_string),
    }?;

    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Collapse a hostname to its owner-level (registrable) name.
///
/// Recognized target sub-TLDs and a small allow-list of compound suffixes
/// collapse to three labels; everything else falls back to the last two.
/// Compound suffixes outside the allow-list will over-truncate; that matches
/// the upstream list this tool feeds.
pub fn registrable_domain(hostname: &str, rules: &RuleSet) -> String {
    let parts: Vec<&str> = hostname.split('.').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return hostname.to_string();
    }

    if parts[parts.len() - 1] == rules.target_tld
        && parts.len() >= 3
        && rules.sub_tlds.contains(parts[parts.len() - 2])
    {
        return parts[parts.len() - 3..].join(".");
    }

    if parts.len() >= 3 {
        let suffix = parts[parts.len() - 2..].join(".");
        if rules.compound_suffixes.contains(suffix.as_str()) {
            return parts[parts.len() - 3..].join(".");
        }
    }

    parts[parts.len() - 2..].join(".")
}

/// Fold (origin, rank) rows into hostname -> best rank. The header row is
/// skipped; rows with fewer than two fields or a non-integer rank are
/// counted and dropped without aborting the batch.
pub fn read_ranked_domains<R: Read>(input: R) -> Result<RankedDomains> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut out = RankedDomains::default();
    for row in reader.records() {
        let record = match row {
            Ok(record) => record,
            Err(_) => {
                out.skipped_rows += 1;
                continue;
            }
        };

        let origin = record.get(0).unwrap_or_default();
        let rank = record.get(1).and_then(|r| r.trim().parse::<u32>().ok());
        let Some(rank) = rank else {
            out.skipped_rows += 1;
            continue;
        };

        let record = TrafficRecord {
            origin: origin.to_string(),
            rank,
        };
        let Some(host) = extract_hostname(&record.origin) else {
            out.skipped_rows += 1;
            continue;
        };

        let best = out.ranks.entry(host).or_insert(record.rank);
        if record.rank < *best {
            *best = record.rank;
        }
    }

    Ok(out)
}
