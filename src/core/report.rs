use crate::domain::model::FilterSummary;
use chrono::Utc;
use std::collections::BTreeSet;

/// Full report: `#` provenance header, blank separator, sorted body.
pub fn render(summary: &FilterSummary, domains: &BTreeSet<String>) -> String {
    let mut out = String::new();
    out.push_str("# Country-affiliated domain allow-list\n");
    out.push_str(&format!(
        "# Generated: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "# Filtered from {} input domains ({} malformed rows skipped)\n",
        summary.total_input, summary.skipped_rows
    ));
    out.push_str(&format!(
        "# TLD: {} | known first-party: {} | keyword: {} | DNS-verified: {}\n",
        summary.tld, summary.known, summary.keyword, summary.dns_verified
    ));
    out.push('\n');
    out.push_str(&render_body(domains));
    out
}

/// One domain per line, ascending order, no blanks. This is the stdout form.
pub fn render_body(domains: &BTreeSet<String>) -> String {
    let mut body = String::with_capacity(domains.len() * 16);
    for domain in domains {
        body.push_str(domain);
        body.push('\n');
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (FilterSummary, BTreeSet<String>) {
        let summary = FilterSummary {
            total_input: 4,
            skipped_rows: 1,
            tld: 1,
            known: 1,
            keyword: 0,
            dns_verified: 0,
            excluded: 1,
            deferred: 1,
        };
        let domains: BTreeSet<String> = ["noon.com", "example.sa"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        (summary, domains)
    }

    #[test]
    fn test_body_is_sorted_with_no_blanks() {
        let (_, domains) = sample();
        assert_eq!(render_body(&domains), "example.sa\nnoon.com\n");
    }

    #[test]
    fn test_header_then_blank_line_then_body() {
        let (summary, domains) = sample();
        let report = render(&summary, &domains);

        let (header, body) = report.split_once("\n\n").unwrap();
        assert!(header.lines().all(|line| line.starts_with('#')));
        assert!(header.contains("Filtered from 4 input domains (1 malformed rows skipped)"));
        assert!(header.contains("TLD: 1 | known first-party: 1 | keyword: 0 | DNS-verified: 0"));
        assert_eq!(body, "example.sa\nnoon.com\n");
    }
}
