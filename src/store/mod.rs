//! In-memory company data store.
//!
//! # Data Flow
//! ```text
//! data root
//!     → loader.rs (one directory per category, one CSV per company)
//!     → DataStoreBuilder (collects parsed resources)
//!     → DataStore (immutable, shared via Arc)
//!     → query layer (read-only lookups)
//! ```
//!
//! # Design Decisions
//! - Populated once at startup; there is no mutation API on `DataStore`
//! - Company info is the primary collection: a company exists iff it has info
//! - Collections are ordered maps so identifier order is lexicographic

pub mod category;
pub mod loader;
pub mod records;

use std::collections::BTreeMap;
use std::path::Path;

pub use category::{Category, Profile, Statement};
pub use loader::LoadError;
pub use records::{CompanyInfo, Record};

type RecordSet = BTreeMap<String, Vec<Record>>;

/// Read-only snapshot of every category, keyed by company identifier.
#[derive(Debug, Default)]
pub struct DataStore {
    companies: BTreeMap<String, CompanyInfo>,
    records: BTreeMap<Category, RecordSet>,
}

impl DataStore {
    /// Load every category from `root`.
    ///
    /// Never fails: missing directories and malformed files are logged and
    /// skipped, leaving the affected entries absent.
    pub fn load(root: &Path) -> Self {
        tracing::info!(root = %root.display(), "Loading company data");

        let mut builder = DataStoreBuilder::default();
        for category in Category::ALL {
            let loaded = loader::load_category(root, category, &mut builder);
            tracing::info!(category = %category, companies = loaded, "Category loaded");
        }

        let store = builder.build();
        tracing::info!(companies = store.company_count(), "Data loading complete");
        store
    }

    pub fn builder() -> DataStoreBuilder {
        DataStoreBuilder::default()
    }

    /// Every known company identifier, in lexicographic order.
    pub fn get_identifiers(&self) -> Vec<&str> {
        self.companies.keys().map(String::as_str).collect()
    }

    /// Whether `id` names a company with info loaded.
    pub fn exists(&self, id: &str) -> bool {
        self.companies.contains_key(id)
    }

    pub fn company(&self, id: &str) -> Option<&CompanyInfo> {
        self.companies.get(id)
    }

    /// Companies with their info, in identifier order.
    pub fn companies(&self) -> impl Iterator<Item = (&str, &CompanyInfo)> {
        self.companies.iter().map(|(id, info)| (id.as_str(), info))
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    /// Records of `id` in `category`; empty when the company has none.
    pub fn records(&self, category: Category, id: &str) -> &[Record] {
        self.records
            .get(&category)
            .and_then(|set| set.get(id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `id` has a resource loaded for `category`.
    pub fn has_records(&self, category: Category, id: &str) -> bool {
        match category {
            Category::CompanyInfo => self.exists(id),
            other => self
                .records
                .get(&other)
                .is_some_and(|set| set.contains_key(id)),
        }
    }

    /// Every company's records for `category`, in identifier order.
    pub fn category_records(&self, category: Category) -> impl Iterator<Item = (&str, &[Record])> {
        self.records
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter())
            .map(|(id, records)| (id.as_str(), records.as_slice()))
    }

    /// Number of companies loaded for `category`.
    pub fn category_len(&self, category: Category) -> usize {
        match category {
            Category::CompanyInfo => self.companies.len(),
            other => self.records.get(&other).map_or(0, BTreeMap::len),
        }
    }
}

/// Collects resources before freezing them into a [`DataStore`].
#[derive(Debug, Default)]
pub struct DataStoreBuilder {
    store: DataStore,
}

impl DataStoreBuilder {
    pub fn insert_company(&mut self, id: impl Into<String>, info: CompanyInfo) {
        self.store.companies.insert(id.into(), info);
    }

    /// Insert the record sequence of one company. Company info goes through
    /// [`insert_company`](Self::insert_company) instead.
    pub fn insert_records(&mut self, category: Category, id: impl Into<String>, records: Vec<Record>) {
        if category == Category::CompanyInfo {
            tracing::debug!("Ignoring record rows for the company info category");
            return;
        }
        self.store
            .records
            .entry(category)
            .or_default()
            .insert(id.into(), records);
    }

    pub fn company(mut self, id: impl Into<String>, info: CompanyInfo) -> Self {
        self.insert_company(id, info);
        self
    }

    pub fn records(mut self, category: Category, id: impl Into<String>, records: Vec<Record>) -> Self {
        self.insert_records(category, id, records);
        self
    }

    pub fn build(self) -> DataStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identifiers_are_lexicographic() {
        let store = DataStore::builder()
            .company("300", CompanyInfo::new())
            .company("100", CompanyInfo::new())
            .company("200", CompanyInfo::new())
            .build();

        assert_eq!(store.get_identifiers(), vec!["100", "200", "300"]);
    }

    #[test]
    fn test_exists_only_checks_company_info() {
        let store = DataStore::builder()
            .company("1", CompanyInfo::new())
            .records(Category::People, "2", vec![Record::new()])
            .build();

        assert!(store.exists("1"));
        assert!(!store.exists("2"));
        assert!(store.has_records(Category::People, "2"));
    }

    #[test]
    fn test_missing_records_are_empty() {
        let store = DataStore::builder().company("1", CompanyInfo::new()).build();

        assert!(store.records(Category::BalanceSheet, "1").is_empty());
        assert_eq!(store.category_len(Category::BalanceSheet), 0);
        assert_eq!(store.category_len(Category::CompanyInfo), 1);
    }

    #[test]
    fn test_load_from_directory_tree() {
        let tmp = TempDir::new().unwrap();
        let info_dir = tmp.path().join("company_info");
        let bs_dir = tmp.path().join("balance_sheet");
        fs::create_dir_all(&info_dir).unwrap();
        fs::create_dir_all(&bs_dir).unwrap();
        fs::write(info_dir.join("42.csv"), "field,value\nCompany Type,Private\n").unwrap();
        fs::write(
            bs_dir.join("42.csv"),
            "duns,line_item,year,value\n42,Total Assets,2024,$1\n",
        )
        .unwrap();

        let store = DataStore::load(tmp.path());

        assert_eq!(store.company_count(), 1);
        assert_eq!(store.company("42").and_then(CompanyInfo::company_type), Some("Private"));
        assert_eq!(store.records(Category::BalanceSheet, "42").len(), 1);
        assert_eq!(store.category_len(Category::People), 0);
    }
}
