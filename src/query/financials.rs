//! Financial statement queries.

use serde::Serialize;

use crate::query::{ensure_exists, QueryResult};
use crate::store::{DataStore, Record, Statement};

/// All three statements of a company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary<'a> {
    pub balance_sheet: Vec<&'a Record>,
    pub income_statement: Vec<&'a Record>,
    pub cash_flow: Vec<&'a Record>,
}

/// Rows matching `year`; all rows when no year is given.
///
/// Rows without an integral `year` never match an active filter.
fn filter_year(records: &[Record], year: Option<i64>) -> Vec<&Record> {
    records
        .iter()
        .filter(|record| year.map_or(true, |y| record.year() == Some(y)))
        .collect()
}

/// Rows of one statement, optionally restricted to a year.
pub fn statement<'a>(
    store: &'a DataStore,
    id: &str,
    kind: Statement,
    year: Option<i64>,
) -> QueryResult<Vec<&'a Record>> {
    ensure_exists(store, id)?;
    Ok(filter_year(store.records(kind.category(), id), year))
}

/// Every statement of a company, each filtered to `year` independently.
pub fn financial_summary<'a>(store: &'a DataStore, id: &str, year: Option<i64>) -> QueryResult<FinancialSummary<'a>> {
    ensure_exists(store, id)?;
    let rows = |kind: Statement| filter_year(store.records(kind.category(), id), year);

    Ok(FinancialSummary {
        balance_sheet: rows(Statement::BalanceSheet),
        income_statement: rows(Statement::IncomeStatement),
        cash_flow: rows(Statement::CashFlow),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryError;
    use crate::store::{Category, CompanyInfo};

    fn row(line_item: &str, year: Option<i64>, value: &str) -> Record {
        let record = Record::new().with("duns", "1").with("line_item", line_item);
        let record = match year {
            Some(y) => record.with("year", y),
            None => record.with("year", serde_json::Value::Null),
        };
        record.with("value", value)
    }

    fn sample_store() -> DataStore {
        DataStore::builder()
            .company("1", CompanyInfo::new())
            .company("2", CompanyInfo::new())
            .records(
                Category::BalanceSheet,
                "1",
                vec![
                    row("Total Assets ($000s)", Some(2024), "$56,136"),
                    row("Total Assets ($000s)", Some(2023), "$50,002"),
                    row("Notes", None, "n/a"),
                ],
            )
            .records(Category::IncomeStatement, "1", vec![row("Revenue", Some(2023), "$9")])
            .records(Category::CashFlow, "1", vec![row("Net Cash", Some(2024), "$3")])
            .build()
    }

    #[test]
    fn test_statement_without_year_returns_all_rows() {
        let store = sample_store();
        let rows = statement(&store, "1", Statement::BalanceSheet, None).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_statement_year_filter_excludes_rows_without_year() {
        let store = sample_store();
        let rows = statement(&store, "1", Statement::BalanceSheet, Some(2024)).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_text("value"), "$56,136");
    }

    #[test]
    fn test_statement_year_without_data_is_empty() {
        let store = sample_store();
        assert!(statement(&store, "1", Statement::BalanceSheet, Some(1900)).unwrap().is_empty());
        assert!(statement(&store, "2", Statement::CashFlow, None).unwrap().is_empty());
    }

    #[test]
    fn test_statement_unknown_company() {
        let store = sample_store();
        assert_eq!(
            statement(&store, "999", Statement::IncomeStatement, None),
            Err(QueryError::CompanyNotFound("999".into()))
        );
    }

    #[test]
    fn test_summary_filters_each_statement() {
        let store = sample_store();
        let summary = financial_summary(&store, "1", Some(2024)).unwrap();

        assert_eq!(summary.balance_sheet.len(), 1);
        assert!(summary.income_statement.is_empty());
        assert_eq!(summary.cash_flow.len(), 1);
    }
}
