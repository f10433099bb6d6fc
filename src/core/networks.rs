use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::io::{BufRead, BufReader, Read};
use std::net::IpAddr;

/// Reference CIDR blocks, kept as separate address-family pools.
/// Immutable after load; shared read-only across verifier tasks.
#[derive(Debug, Clone, Default)]
pub struct NetworkSet {
    v4: Vec<Ipv4Net>,
    v6: Vec<Ipv6Net>,
    pub skipped_lines: u64,
}

impl NetworkSet {
    /// One CIDR per line. Blank lines and `#` comments are ignored;
    /// malformed entries are counted and skipped, never fatal.
    pub fn load<R: Read>(input: R) -> Self {
        let mut set = Self::default();

        for line in BufReader::new(input).lines() {
            let Ok(line) = line else {
                set.skipped_lines += 1;
                continue;
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_network(line) {
                Some(IpNet::V4(net)) => set.v4.push(net),
                Some(IpNet::V6(net)) => set.v6.push(net),
                None => set.skipped_lines += 1,
            }
        }

        set
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    /// Family-isolated membership: v4 addresses are only tested against the
    /// v4 pool and v6 addresses against the v6 pool.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => self.v4.iter().any(|net| net.contains(&v4)),
            IpAddr::V6(v6) => self.v6.iter().any(|net| net.contains(&v6)),
        }
    }
}

fn parse_network(s: &str) -> Option<IpNet> {
    if let Ok(net) = s.parse::<IpNet>() {
        // Normalize host bits instead of rejecting them.
        return Some(net.trunc());
    }
    // A bare address stands for a host-length prefix.
    s.parse::<IpAddr>().ok().map(IpNet::from)
}
