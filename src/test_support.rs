//! Fixtures shared by unit tests.
use crate::remote::RemoteStore;
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(path, contents.as_bytes()).expect("write file");
}

/// Lay out `dists/<name>/current` and, optionally, the local `dist.json`.
pub fn seed_dist(root: &Path, name: &str, version: &str, local_doc: Option<&str>) {
    write_file(
        &root.join("dists").join(name).join("current"),
        &format!("{version}\n"),
    );
    if let Some(doc) = local_doc {
        write_file(
            &root
                .join("releases")
                .join(name)
                .join(version)
                .join("dist.json"),
            doc,
        );
    }
}

/// In-memory remote store that records every key it is asked for.
#[derive(Default)]
pub struct RecordingStore {
    documents: BTreeMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl RecordingStore {
    pub fn with_document(mut self, key: &str, body: &str) -> Self {
        self.documents.insert(key.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl RemoteStore for RecordingStore {
    fn cat(&self, key: &str) -> Result<String> {
        self.requests.borrow_mut().push(key.to_string());
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("no link named {key:?} under the namespace root"))
    }

    fn describe(&self) -> String {
        "recording store".to_string()
    }
}
