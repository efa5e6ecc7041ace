//! Industry classification aggregation.
//!
//! # Design Decisions
//! - Codes and descriptions are normalized before comparison: null, blank and
//!   `nan`-style placeholders all become `""`, and empty codes are dropped
//! - `company_count` counts classification records, so a company listing the
//!   same code twice contributes two
//! - Ordering is count descending, then code ascending, so pages are stable

use std::collections::HashMap;

use serde::Serialize;

use crate::query::Page;
use crate::store::{Category, DataStore, Record};

const CODE_COLUMN: &str = "industry_code";
const DESCRIPTION_COLUMN: &str = "industry_description";

/// One aggregated industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustrySummary {
    pub industry_code: String,
    pub industry_description: String,
    pub company_count: usize,
}

/// A page of industries plus the number of distinct codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryPage {
    pub total_industries: usize,
    pub industries: Vec<IndustrySummary>,
}

/// Normalized industry code of a classification record.
pub fn industry_code(record: &Record) -> String {
    record.get_text(CODE_COLUMN)
}

/// Aggregate every company's classifications by industry code.
pub fn aggregate_industries(store: &DataStore) -> Vec<IndustrySummary> {
    let mut by_code: HashMap<String, IndustrySummary> = HashMap::new();

    for (_, records) in store.category_records(Category::Industries) {
        for record in records {
            let code = industry_code(record);
            if code.is_empty() {
                continue;
            }
            by_code
                .entry(code)
                .or_insert_with_key(|code| IndustrySummary {
                    industry_code: code.clone(),
                    industry_description: record.get_text(DESCRIPTION_COLUMN),
                    company_count: 0,
                })
                .company_count += 1;
        }
    }

    let mut industries: Vec<_> = by_code.into_values().collect();
    industries.sort_by(|a, b| {
        b.company_count
            .cmp(&a.company_count)
            .then_with(|| a.industry_code.cmp(&b.industry_code))
    });
    industries
}

/// Page through aggregated industries.
pub fn list_industries(store: &DataStore, page: Page) -> IndustryPage {
    let industries = aggregate_industries(store);
    IndustryPage {
        total_industries: industries.len(),
        industries: page.slice(industries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CompanyInfo;
    use serde_json::Value;

    fn classification(code: impl Into<Value>, description: impl Into<Value>) -> Record {
        Record::new()
            .with("duns", "x")
            .with(CODE_COLUMN, code)
            .with(DESCRIPTION_COLUMN, description)
            .with("is_primary", 0)
    }

    fn sample_store() -> DataStore {
        DataStore::builder()
            .company("1", CompanyInfo::new())
            .company("2", CompanyInfo::new())
            .company("3", CompanyInfo::new())
            .records(
                Category::Industries,
                "1",
                vec![
                    classification("7389", "Business Services"),
                    classification("1311", "Crude Petroleum"),
                ],
            )
            .records(
                Category::Industries,
                "2",
                vec![
                    classification("7389", "Business Services, NEC"),
                    classification(Value::Null, "Unknown"),
                    classification("nan", Value::Null),
                ],
            )
            .records(
                Category::Industries,
                "3",
                vec![classification("0100", Value::Null), classification("0100", Value::Null)],
            )
            .build()
    }

    #[test]
    fn test_counts_sorted_descending_with_code_tiebreak() {
        let store = sample_store();
        let page = list_industries(&store, Page::default());

        let codes: Vec<_> = page.industries.iter().map(|i| i.industry_code.as_str()).collect();
        assert_eq!(codes, vec!["0100", "7389", "1311"]);

        let counts: Vec<_> = page.industries.iter().map(|i| i.company_count).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_duplicate_records_count_twice() {
        let store = sample_store();
        let industries = aggregate_industries(&store);
        let agriculture = industries.iter().find(|i| i.industry_code == "0100").unwrap();

        assert_eq!(agriculture.company_count, 2);
        assert_eq!(agriculture.industry_description, "");
    }

    #[test]
    fn test_missing_codes_are_excluded() {
        let store = sample_store();
        let page = list_industries(&store, Page::default());

        assert_eq!(page.total_industries, 3);
        assert!(page
            .industries
            .iter()
            .all(|i| !i.industry_code.is_empty() && i.industry_code != "nan"));
    }

    #[test]
    fn test_first_description_wins() {
        let store = sample_store();
        let industries = aggregate_industries(&store);
        let services = industries.iter().find(|i| i.industry_code == "7389").unwrap();

        assert_eq!(services.industry_description, "Business Services");
    }

    #[test]
    fn test_pagination_keeps_total() {
        let store = sample_store();
        let page = list_industries(&store, Page::new(1, 1));

        assert_eq!(page.total_industries, 3);
        assert_eq!(page.industries.len(), 1);
        assert_eq!(page.industries[0].industry_code, "7389");
    }
}
