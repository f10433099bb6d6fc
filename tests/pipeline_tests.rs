use async_trait::async_trait;
use geosift::{CliConfig, FilterEngine, LocalStorage, Resolver, SievePipeline};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::Path;
use tempfile::TempDir;

const RECORDS: &str = "origin,rank\n\
                       https://example.sa,1\n\
                       https://google.com,2\n\
                       https://noon.com,3\n\
                       https://randomsite123.net,50000\n";

struct FakeResolver {
    answers: HashMap<String, Vec<IpAddr>>,
}

impl FakeResolver {
    fn new(entries: &[(&str, &str)]) -> Self {
        let mut answers = HashMap::new();
        for (host, ip) in entries {
            answers
                .entry(host.to_string())
                .or_insert_with(Vec::new)
                .push(ip.parse().unwrap());
        }
        Self { answers }
    }
}

#[async_trait]
impl Resolver for FakeResolver {
    async fn resolve(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        Ok(self.answers.get(host).cloned().unwrap_or_default())
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

fn config(records: String, output: String) -> CliConfig {
    CliConfig {
        records,
        ip_file: None,
        output: Some(output),
        resolve_dns: false,
        max_workers: 4,
        timeout_secs: 5,
        verbose: false,
    }
}

fn read_body(path: &str) -> Vec<String> {
    let contents = std::fs::read_to_string(path).unwrap();
    let (header, body) = contents.split_once("\n\n").unwrap();
    assert!(header.lines().all(|line| line.starts_with('#')));
    body.lines().map(str::to_string).collect()
}

#[tokio::test]
async fn test_static_tiers_without_dns() {
    let temp_dir = TempDir::new().unwrap();
    let records = write_file(&temp_dir, "crux.csv", RECORDS);
    let output = temp_dir.path().join("sa.txt").to_str().unwrap().to_string();

    let engine = FilterEngine::new(SievePipeline::new(
        LocalStorage::new(),
        config(records, output.clone()),
    ));
    let destination = engine.run().await.unwrap();

    assert_eq!(destination, output);
    // google.com is excluded, randomsite123.net stays unverified.
    assert_eq!(read_body(&output), vec!["example.sa", "noon.com"]);
}

#[tokio::test]
async fn test_dns_verification_promotes_deferred_domain() {
    let temp_dir = TempDir::new().unwrap();
    let records = write_file(&temp_dir, "crux.csv", RECORDS);
    let networks = write_file(&temp_dir, "sa-cidr.txt", "# delegated ranges\n5.0.0.0/8\n");
    let output = temp_dir.path().join("sa.txt").to_str().unwrap().to_string();

    let mut config = config(records, output.clone());
    config.ip_file = Some(networks);
    config.resolve_dns = true;

    let resolver = FakeResolver::new(&[("randomsite123.net", "5.1.2.3")]);
    let engine = FilterEngine::new(SievePipeline::with_resolver(
        LocalStorage::new(),
        config,
        resolver,
    ));
    engine.run().await.unwrap();

    assert_eq!(
        read_body(&output),
        vec!["example.sa", "noon.com", "randomsite123.net"]
    );
}

#[tokio::test]
async fn test_unmatched_resolution_stays_out_of_output() {
    let temp_dir = TempDir::new().unwrap();
    let records = write_file(&temp_dir, "crux.csv", RECORDS);
    let networks = write_file(&temp_dir, "sa-cidr.txt", "5.0.0.0/8\n");
    let output = temp_dir.path().join("sa.txt").to_str().unwrap().to_string();

    let mut config = config(records, output.clone());
    config.ip_file = Some(networks);
    config.resolve_dns = true;

    // Resolves outside the reference ranges.
    let resolver = FakeResolver::new(&[("randomsite123.net", "9.9.9.9")]);
    let engine = FilterEngine::new(SievePipeline::with_resolver(
        LocalStorage::new(),
        config,
        resolver,
    ));
    engine.run().await.unwrap();

    assert_eq!(read_body(&output), vec!["example.sa", "noon.com"]);
}

#[tokio::test]
async fn test_malformed_rows_are_skipped_and_reported() {
    let temp_dir = TempDir::new().unwrap();
    let records = write_file(
        &temp_dir,
        "crux.csv",
        "origin,rank\n\
         https://example.sa,1\n\
         \"not-a-url\",\n\
         https://noon.com,3\n",
    );
    let output = temp_dir.path().join("sa.txt").to_str().unwrap().to_string();

    let engine = FilterEngine::new(SievePipeline::new(
        LocalStorage::new(),
        config(records, output.clone()),
    ));
    engine.run().await.unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.contains("(1 malformed rows skipped)"));
    assert_eq!(read_body(&output), vec!["example.sa", "noon.com"]);
}

#[tokio::test]
async fn test_idempotent_given_fixed_oracle() {
    let temp_dir = TempDir::new().unwrap();
    let records = write_file(&temp_dir, "crux.csv", RECORDS);
    let networks = write_file(&temp_dir, "sa-cidr.txt", "5.0.0.0/8\n");

    let mut bodies = Vec::new();
    for run in 0..2 {
        let output = temp_dir
            .path()
            .join(format!("sa-{}.txt", run))
            .to_str()
            .unwrap()
            .to_string();
        let mut config = config(records.clone(), output.clone());
        config.ip_file = Some(networks.clone());
        config.resolve_dns = true;

        let resolver = FakeResolver::new(&[("randomsite123.net", "5.1.2.3")]);
        let engine = FilterEngine::new(SievePipeline::with_resolver(
            LocalStorage::new(),
            config,
            resolver,
        ));
        engine.run().await.unwrap();
        bodies.push(read_body(&output));
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_no_output_path_writes_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let records = write_file(&temp_dir, "crux.csv", RECORDS);

    let mut config = config(records, String::new());
    config.output = None;

    let engine = FilterEngine::new(SievePipeline::new(LocalStorage::new(), config));
    let destination = engine.run().await.unwrap();

    assert_eq!(destination, "stdout");
    assert!(temp_dir
        .path()
        .read_dir()
        .unwrap()
        .all(|entry| entry.unwrap().file_name() == "crux.csv"));
}

#[tokio::test]
async fn test_missing_records_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir
        .path()
        .join("no-such.csv")
        .to_str()
        .unwrap()
        .to_string();
    let output = temp_dir.path().join("sa.txt").to_str().unwrap().to_string();

    let engine = FilterEngine::new(SievePipeline::new(
        LocalStorage::new(),
        config(missing, output.clone()),
    ));
    assert!(engine.run().await.is_err());
    assert!(!Path::new(&output).exists());
}

#[tokio::test]
async fn test_missing_network_file_degrades_gracefully() {
    let temp_dir = TempDir::new().unwrap();
    let records = write_file(&temp_dir, "crux.csv", RECORDS);
    let output = temp_dir.path().join("sa.txt").to_str().unwrap().to_string();

    let mut config = config(records, output.clone());
    config.ip_file = Some(
        temp_dir
            .path()
            .join("no-such-cidr.txt")
            .to_str()
            .unwrap()
            .to_string(),
    );
    config.resolve_dns = true;

    let resolver = FakeResolver::new(&[("randomsite123.net", "5.1.2.3")]);
    let engine = FilterEngine::new(SievePipeline::with_resolver(
        LocalStorage::new(),
        config,
        resolver,
    ));
    engine.run().await.unwrap();

    // Verification is skipped entirely when no networks load.
    assert_eq!(read_body(&output), vec!["example.sa", "noon.com"]);
}
