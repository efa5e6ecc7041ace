//! Company lookup, listing and search.

use serde::Serialize;

use crate::query::industries::industry_code;
use crate::query::{ensure_exists, Page, QueryError, QueryResult};
use crate::store::{Category, CompanyInfo, DataStore, Profile, Record};

/// List-view projection of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySummary<'a> {
    pub duns: &'a str,
    pub address: Option<&'a str>,
    pub telephone: Option<&'a str>,
    pub company_type: Option<&'a str>,
}

impl<'a> CompanySummary<'a> {
    fn new(duns: &'a str, info: &'a CompanyInfo) -> Self {
        Self {
            duns,
            address: info.address(),
            telephone: info.telephone(),
            company_type: info.company_type(),
        }
    }
}

/// One page of companies plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyPage<'a> {
    pub total: usize,
    pub companies: Vec<CompanySummary<'a>>,
}

/// Search predicates, combined with AND. Absent or empty ones match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub company_type: Option<String>,
    pub industry_code: Option<String>,
}

impl SearchFilter {
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn company_type(mut self, company_type: impl Into<String>) -> Self {
        self.company_type = Some(company_type.into());
        self
    }

    pub fn industry_code(mut self, code: impl Into<String>) -> Self {
        self.industry_code = Some(code.into());
        self
    }
}

/// Returns the predicate value when it is present and non-empty.
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Info mapping of a company.
pub fn company_info<'a>(store: &'a DataStore, id: &str) -> QueryResult<&'a CompanyInfo> {
    store
        .company(id)
        .ok_or_else(|| QueryError::CompanyNotFound(id.to_string()))
}

/// Page through all companies in identifier order.
pub fn list_companies(store: &DataStore, page: Page) -> CompanyPage<'_> {
    CompanyPage {
        total: store.company_count(),
        companies: page.slice(store.companies().map(|(id, info)| CompanySummary::new(id, info))),
    }
}

/// Filter companies by address text, company type and industry code.
pub fn search_companies<'a>(store: &'a DataStore, filter: &SearchFilter, page: Page) -> CompanyPage<'a> {
    let needle = active(&filter.query).map(str::to_lowercase);
    let company_type = active(&filter.company_type);
    let industry = active(&filter.industry_code);

    let matches: Vec<_> = store
        .companies()
        .filter(|(_, info)| match &needle {
            Some(needle) => info
                .address()
                .is_some_and(|address| address.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .filter(|(_, info)| company_type.map_or(true, |t| info.company_type() == Some(t)))
        .filter(|(id, _)| {
            industry.map_or(true, |code| {
                store
                    .records(Category::Industries, id)
                    .iter()
                    .any(|record| industry_code(record) == code)
            })
        })
        .map(|(id, info)| CompanySummary::new(id, info))
        .collect();

    tracing::debug!(matched = matches.len(), ?filter, "Company search evaluated");

    CompanyPage {
        total: matches.len(),
        companies: page.slice(matches),
    }
}

/// Industries, people or operations records of a company.
///
/// A company with no records in the category yields an empty slice.
pub fn profile_records<'a>(store: &'a DataStore, id: &str, profile: Profile) -> QueryResult<&'a [Record]> {
    ensure_exists(store, id)?;
    Ok(store.records(profile.category(), id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(address: &str, company_type: &str) -> CompanyInfo {
        CompanyInfo::new()
            .with("Physical Address", address)
            .with("Telephone Number", "02 1234 5678")
            .with("Company Type", company_type)
    }

    fn industry(code: &str) -> Record {
        Record::new()
            .with("industry_code", code)
            .with("industry_description", "Some Industry")
            .with("is_primary", 1)
    }

    fn sample_store() -> DataStore {
        DataStore::builder()
            .company("100", info("1 George St, Sydney, NSW", "Private"))
            .company("200", info("5 Collins St, Melbourne, VIC", "Publicly Unlisted"))
            .company("300", info("9 Pitt St, SYDNEY, NSW", "Publicly Unlisted"))
            .company("400", CompanyInfo::new().with("Company Type", "Private"))
            .records(Category::Industries, "100", vec![industry("7389")])
            .records(Category::Industries, "300", vec![industry("1311"), industry("7389")])
            .records(Category::People, "200", vec![Record::new().with("person_name", "Jane")])
            .build()
    }

    #[test]
    fn test_company_info_not_found() {
        let store = sample_store();
        assert_eq!(
            company_info(&store, "999999999"),
            Err(QueryError::CompanyNotFound("999999999".into()))
        );
        assert_eq!(company_info(&store, "100").unwrap().company_type(), Some("Private"));
    }

    #[test]
    fn test_list_companies_pages_are_disjoint() {
        let store = sample_store();
        let first = list_companies(&store, Page::new(2, 0));
        let second = list_companies(&store, Page::new(2, 2));

        assert_eq!(first.total, 4);
        assert_eq!(second.total, 4);
        let first_ids: Vec<_> = first.companies.iter().map(|c| c.duns).collect();
        let second_ids: Vec<_> = second.companies.iter().map(|c| c.duns).collect();
        assert_eq!(first_ids, vec!["100", "200"]);
        assert_eq!(second_ids, vec!["300", "400"]);
    }

    #[test]
    fn test_list_companies_projects_summary_fields() {
        let store = sample_store();
        let page = list_companies(&store, Page::default());

        assert_eq!(page.companies[0].address, Some("1 George St, Sydney, NSW"));
        assert_eq!(page.companies[0].telephone, Some("02 1234 5678"));
        assert_eq!(page.companies[3].address, None);
    }

    #[test]
    fn test_list_companies_offset_past_end() {
        let store = sample_store();
        let page = list_companies(&store, Page::new(10, 1000));
        assert_eq!(page.total, 4);
        assert!(page.companies.is_empty());
    }

    #[test]
    fn test_search_query_is_case_insensitive() {
        let store = sample_store();
        for query in ["sydney", "SYDNEY", "Sydney"] {
            let page = search_companies(&store, &SearchFilter::default().query(query), Page::default());
            assert_eq!(page.total, 2, "query {query}");
        }
    }

    #[test]
    fn test_search_empty_query_matches_everything() {
        let store = sample_store();
        let page = search_companies(&store, &SearchFilter::default().query(""), Page::default());
        assert_eq!(page.total, list_companies(&store, Page::default()).total);
    }

    #[test]
    fn test_search_company_type_is_exact() {
        let store = sample_store();
        let page = search_companies(&store, &SearchFilter::default().company_type("Private"), Page::default());
        assert_eq!(page.total, 2);
        assert!(page.companies.iter().all(|c| c.company_type == Some("Private")));

        let page = search_companies(&store, &SearchFilter::default().company_type("private"), Page::default());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_search_filters_combine_with_and() {
        let store = sample_store();
        let filter = SearchFilter::default()
            .query("sydney")
            .company_type("Publicly Unlisted")
            .industry_code("7389");
        let page = search_companies(&store, &filter, Page::default());

        assert_eq!(page.total, 1);
        assert_eq!(page.companies[0].duns, "300");
    }

    #[test]
    fn test_search_paginates_filtered_result() {
        let store = sample_store();
        let filter = SearchFilter::default().industry_code("7389");
        let page = search_companies(&store, &filter, Page::new(1, 1));

        assert_eq!(page.total, 2);
        assert_eq!(page.companies.len(), 1);
        assert_eq!(page.companies[0].duns, "300");
    }

    #[test]
    fn test_search_no_results() {
        let store = sample_store();
        let page = search_companies(&store, &SearchFilter::default().query("xxxxnonexistentxxx"), Page::default());
        assert_eq!(page.total, 0);
        assert!(page.companies.is_empty());
    }

    #[test]
    fn test_profile_records_empty_vs_not_found() {
        let store = sample_store();

        assert_eq!(profile_records(&store, "200", Profile::People).unwrap().len(), 1);
        assert!(profile_records(&store, "100", Profile::Operations).unwrap().is_empty());
        assert!(profile_records(&store, "555", Profile::People).is_err());
    }
}
