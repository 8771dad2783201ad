//! Shared test infrastructure for integration tests.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// A throwaway project tree (`dists/`, `releases/`, `site/data/`).
pub struct ProjectFixture {
    temp_dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(&path, contents.as_bytes()).expect("write file");
    }

    /// Add a distribution with its `current` pointer and optional local `dist.json`.
    pub fn dist(&self, name: &str, version: &str, local_doc: Option<&str>) {
        self.write(&format!("dists/{name}/current"), &format!("{version}\n"));
        if let Some(doc) = local_doc {
            self.write(&format!("releases/{name}/{version}/dist.json"), doc);
        }
    }

    pub fn opt_out(&self, name: &str) {
        self.write(&format!("dists/{name}/no-site"), "");
    }

    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.root()
            .join("site/data/releases")
            .join(name)
            .join("data.json")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root().join("site/data/siteroot.json")
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        serde_json::from_str(&self.read(path)).expect("parse output JSON")
    }

    /// Run `dist-site <subcommand> --root <fixture> <extra...>` with a clean remote env.
    pub fn run(&self, subcommand: &str, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dist-site"))
            .arg(subcommand)
            .arg("--root")
            .arg(self.root())
            .args(extra)
            .env_remove("DIST_ROOT")
            .env_remove("IPFS_API")
            .env_remove("IPFS_GATEWAY")
            .env("RUST_LOG", "debug")
            .output()
            .expect("run dist-site")
    }
}

/// Minimal HTTP server answering a single request with `body`.
///
/// The request line (`GET /path HTTP/1.1`) is sent back on the returned channel.
pub fn serve_once(status: &str, body: &str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        if reader.read_line(&mut request_line).is_err() {
            return;
        }
        loop {
            let mut header = String::new();
            match reader.read_line(&mut header) {
                Ok(0) | Err(_) => break,
                Ok(_) if header == "\r\n" => break,
                Ok(_) => {}
            }
        }
        let _ = tx.send(request_line.trim_end().to_string());
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });
    (format!("http://{addr}"), rx)
}

/// HTTP server that accepts one connection and never answers it.
///
/// The connection stays open for `hold` so clients hit their own timeout.
pub fn serve_unresponsive(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        thread::sleep(hold);
        drop(stream);
    });
    format!("http://{addr}")
}
