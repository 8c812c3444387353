use std::sync::Mutex;

use reportseal_core::canonical::{DatasetFetcher, MapFetcher};
use reportseal_core::Result;

pub const REF_1: &str = "https://storage.example.com/jobs/JOB123/cumulative.csv";
pub const REF_2: &str = "https://storage.example.com/jobs/JOB123/particles.csv";
pub const REF_3: &str = "https://storage.example.com/jobs/JOB123/rejections.csv";

/// Build report JSON text with the given `results` dataset fields
#[allow(dead_code)]
pub fn report_json(job_id: &str, datasets: &[(&str, &str)]) -> String {
    let results: Vec<String> = datasets
        .iter()
        .map(|(field, url)| format!("    \"{}\": \"{}\"", field, url))
        .collect();
    format!(
        "{{\n  \"jobId\": \"{}\",\n  \"productName\": \"GRAIN_ANALYSIS\",\n  \"username\": \"operator01\",\n  \"results\": {{\n{}\n  }}\n}}\n",
        job_id,
        results.join(",\n")
    )
}

/// The two-dataset fetcher used by the JOB123 scenario
#[allow(dead_code)]
pub fn scenario_fetcher() -> MapFetcher {
    MapFetcher::new()
        .with(REF_1, "a,b\n1,2")
        .with(REF_2, "c,d\n3,4")
}

/// Fetcher that records the order references were requested in
#[allow(dead_code)]
pub struct RecordingFetcher {
    inner: MapFetcher,
    pub calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingFetcher {
    pub fn new(inner: MapFetcher) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl DatasetFetcher for RecordingFetcher {
    fn fetch(&self, reference: &str) -> Result<String> {
        self.calls.lock().unwrap().push(reference.to_string());
        self.inner.fetch(reference)
    }
}
