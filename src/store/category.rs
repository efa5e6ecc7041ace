//! Data categories and their on-disk layout.

use std::fmt;

/// One of the seven per-company data categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    CompanyInfo,
    BalanceSheet,
    IncomeStatement,
    CashFlow,
    Industries,
    People,
    Operations,
}

impl Category {
    /// All categories in load order. Company info comes first.
    pub const ALL: [Category; 7] = [
        Category::CompanyInfo,
        Category::BalanceSheet,
        Category::IncomeStatement,
        Category::CashFlow,
        Category::Industries,
        Category::People,
        Category::Operations,
    ];

    /// Directory name under the data root holding `<duns>.csv` files.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::CompanyInfo => "company_info",
            Category::BalanceSheet => "balance_sheet",
            Category::IncomeStatement => "income_statement",
            Category::CashFlow => "cash_flow_statement",
            Category::Industries => "industries",
            Category::People => "people",
            Category::Operations => "operations",
        }
    }

    /// Key used for this category in the `/health` data source counts.
    pub fn health_key(self) -> &'static str {
        match self {
            Category::CompanyInfo => "company_info",
            Category::BalanceSheet => "balance_sheets",
            Category::IncomeStatement => "income_statements",
            Category::CashFlow => "cash_flows",
            Category::Industries => "industries",
            Category::People => "people",
            Category::Operations => "operations",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Financial statement kinds. Each maps onto a record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statement {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl Statement {
    pub const ALL: [Statement; 3] = [
        Statement::BalanceSheet,
        Statement::IncomeStatement,
        Statement::CashFlow,
    ];

    pub fn category(self) -> Category {
        match self {
            Statement::BalanceSheet => Category::BalanceSheet,
            Statement::IncomeStatement => Category::IncomeStatement,
            Statement::CashFlow => Category::CashFlow,
        }
    }

    /// Value of `statement_type` in statement responses.
    pub fn statement_type(self) -> &'static str {
        match self {
            Statement::BalanceSheet => "balance_sheet",
            Statement::IncomeStatement => "income_statement",
            Statement::CashFlow => "cash_flow",
        }
    }
}

/// Non-financial per-company collections served as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Industries,
    People,
    Operations,
}

impl Profile {
    pub fn category(self) -> Category {
        match self {
            Profile::Industries => Category::Industries,
            Profile::People => Category::People,
            Profile::Operations => Category::Operations,
        }
    }

    /// Name of the collection field in the response body.
    pub fn field_name(self) -> &'static str {
        match self {
            Profile::Industries => "industries",
            Profile::People => "people",
            Profile::Operations => "operations",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_info_loads_first() {
        assert_eq!(Category::ALL[0], Category::CompanyInfo);
    }

    #[test]
    fn test_cash_flow_directory_differs_from_statement_type() {
        assert_eq!(Statement::CashFlow.category().dir_name(), "cash_flow_statement");
        assert_eq!(Statement::CashFlow.statement_type(), "cash_flow");
    }
}
