//! Shared fixtures for integration testing.
//!
//! Builds a small CSV data root in a temp dir and serves it on an ephemeral
//! port.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use company_data_api::config::ServiceConfig;
use company_data_api::{ApiServer, DataStore, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Companies written by [`write_fixture`].
pub const COMPANY_COUNT: usize = 30;

/// Identifier of the n-th fixture company, 1-based.
pub fn duns(n: usize) -> String {
    format!("{:09}", 100_000_000 + n)
}

fn write(root: &Path, category: &str, id: &str, contents: &str) {
    let dir = root.join(category);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{id}.csv")), contents).unwrap();
}

/// Write the fixture data root.
///
/// - Odd companies are in Sydney and Private, even ones in Melbourne and
///   Publicly Unlisted
/// - Every company is classified `5411`; multiples of three also `7372`
/// - Statements cover 2023 and 2024
/// - `cash_flow_statement/` is absent entirely
/// - One malformed people file (a row wider than its header) and one orphan
///   balance sheet are present
pub fn write_fixture(root: &Path) {
    for n in 1..=COMPANY_COUNT {
        let id = duns(n);
        let (city, company_type) = if n % 2 == 1 {
            ("Sydney, NSW 2000", "Private")
        } else {
            ("Melbourne, VIC 3000", "Publicly Unlisted")
        };

        write(
            root,
            "company_info",
            &id,
            &format!(
                "field,value\n\
                 Physical Address,\"{n} Example St, {city}\"\n\
                 Telephone Number,02 9000 {n:04}\n\
                 Company Type,{company_type}\n"
            ),
        );

        let mut industries = String::from("duns,industry_code,industry_description,is_primary\n");
        industries.push_str(&format!("{id},5411,Legal Services,1\n"));
        if n % 3 == 0 {
            industries.push_str(&format!("{id},7372,Software Publishers,0\n"));
        }
        industries.push_str(&format!("{id},nan,,0\n"));
        write(root, "industries", &id, &industries);

        write(
            root,
            "balance_sheet",
            &id,
            &format!(
                "duns,year,line_item,value\n\
                 {id},2023,Total Assets,{a}\n\
                 {id},2024.0,Total Assets,{b}\n",
                a = n * 1000,
                b = n * 1100,
            ),
        );
        write(
            root,
            "income_statement",
            &id,
            &format!(
                "duns,year,line_item,value\n\
                 {id},2023,Revenue,{a}\n\
                 {id},2024,Revenue,{b}\n",
                a = n * 500,
                b = n * 550,
            ),
        );

        if n <= 10 {
            write(
                root,
                "people",
                &id,
                &format!("duns,person_name,title\n{id},Person {n},Director\n"),
            );
            write(
                root,
                "operations",
                &id,
                &format!("duns,description\n{id},None\n"),
            );
        }
    }

    write(
        root,
        "people",
        "999999998",
        "duns,person_name,title\n999999998,Too,Many,Cells\n",
    );
    write(
        root,
        "balance_sheet",
        "999999997",
        "duns,year,line_item,value\n999999997,2024,Total Assets,1\n",
    );
}

/// A running API server over the fixture data.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<DataStore>,
    shutdown: Shutdown,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Serve the fixture data root on `127.0.0.1:0`.
pub async fn start_server() -> TestServer {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    start_server_with(dir).await
}

/// Serve an arbitrary data root.
pub async fn start_server_with(dir: TempDir) -> TestServer {
    let mut config = ServiceConfig::default();
    config.data.root = dir.path().to_path_buf();

    let store = Arc::new(DataStore::load(dir.path()));
    let server = ApiServer::new(config, store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer {
        base_url: format!("http://{addr}"),
        store,
        shutdown,
        _dir: dir,
    }
}
