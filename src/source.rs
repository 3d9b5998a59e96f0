// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where records come from.
//!
//! [`RecordSource`] is the fetch/create contract the list views consume: given
//! a page, a limit, a search term and a type filter it returns one page of
//! records and the total count. [`MemorySource`] answers it from memory and
//! [`JsonFileSource`] keeps a `MemorySource` in sync with a JSON data file.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::engine::pagination::paginate;
use crate::engine::search::contains_ignore_case;
use crate::engine::state::KindFilter;
use crate::error::{Error, Result};
use crate::models::{Category, Investment, NewInvestment, NewTransaction, Transaction};
use crate::utils::{parse_date, parse_decimal};

pub const MAX_TEXT_LEN: usize = 255;
/// Largest amount accepted on create, import and load.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;
/// Largest rate, in percent of the reference index.
pub const MAX_RATE: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    pub page: usize,
    pub limit: NonZeroUsize,
    pub search: String,
    pub kind: KindFilter,
}

impl TransactionQuery {
    /// Every record on one page.
    pub fn everything() -> Self {
        Self {
            page: 1,
            limit: NonZeroUsize::MAX,
            search: String::new(),
            kind: KindFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentQuery {
    pub page: usize,
    pub limit: NonZeroUsize,
    pub search: String,
}

impl InvestmentQuery {
    pub fn everything() -> Self {
        Self {
            page: 1,
            limit: NonZeroUsize::MAX,
            search: String::new(),
        }
    }
}

pub trait RecordSource {
    fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<PaginatedResponse<Transaction>>;

    fn fetch_investments(&self, query: &InvestmentQuery) -> Result<PaginatedResponse<Investment>>;

    fn create_transaction(&mut self, fields: NewTransaction) -> Result<Transaction>;

    fn create_investment(&mut self, fields: NewInvestment) -> Result<Investment>;

    fn categories(&self) -> Result<Vec<Category>>;
}

/// Layout of the JSON data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Dataset,
}

impl MemorySource {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.data.transactions
    }

    pub fn investments(&self) -> &[Investment] {
        &self.data.investments
    }

    /// Appends transactions read from a CSV with the header
    /// `date,type,description,amount,category`. Rows are validated like
    /// [`RecordSource::create_transaction`]; nothing is added if any row fails.
    pub fn import_transactions_csv(&mut self, path: &Path) -> Result<usize> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut staged = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let rec = result?;
            let field = |idx: usize, name: &'static str| {
                rec.get(idx)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| Error::validation(name, format!("missing on row {}", row + 1)))
            };
            let fields = NewTransaction {
                date: parse_date(field(0, "date")?)?,
                kind: field(1, "type")?.parse()?,
                description: field(2, "description")?.to_string(),
                amount: parse_decimal(field(3, "amount")?)?,
                category_id: rec
                    .get(4)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            };
            validate_transaction(&fields)?;
            staged.push(fields);
        }

        let count = staged.len();
        for fields in staged {
            let id = self.next_id("txn", self.data.transactions.len());
            self.data.transactions.push(build_transaction(id, fields));
        }
        info!("imported {} transactions from {}", count, path.display());
        Ok(count)
    }

    fn next_id(&self, prefix: &str, len: usize) -> String {
        let taken = |id: &str| {
            self.data.transactions.iter().any(|t| t.id == id)
                || self.data.investments.iter().any(|i| i.id == id)
        };
        let mut n = len + 1;
        loop {
            let id = format!("{prefix}-{n}");
            if !taken(&id) {
                return id;
            }
            n += 1;
        }
    }
}

// Newest first, the way the list endpoints return them.
fn newest_first<T: Clone>(records: &[T], date: impl Fn(&T) -> NaiveDate) -> Vec<T> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| date(b).cmp(&date(a)));
    out
}

fn page_of<T: Clone>(records: Vec<T>, page: usize, limit: NonZeroUsize) -> PaginatedResponse<T> {
    let page = paginate(&records, page, limit);
    PaginatedResponse {
        pagination: Pagination {
            page: page.page,
            limit: page.page_size,
            total: page.total_items,
            total_pages: page.total_pages,
        },
        data: page.items,
    }
}

fn validate_text(field: &'static str, value: &str) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(Error::validation(field, "must not be empty"));
    }
    if len > MAX_TEXT_LEN {
        return Err(Error::validation(
            field,
            format!("must be at most {MAX_TEXT_LEN} characters"),
        ));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation("amount", "must be greater than zero"));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(Error::validation(
            "amount",
            format!("must be at most {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

fn validate_rate(rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO {
        return Err(Error::validation("rate", "must not be negative"));
    }
    if rate > Decimal::from(MAX_RATE) {
        return Err(Error::validation("rate", format!("must be at most {MAX_RATE}")));
    }
    Ok(())
}

fn validate_transaction(fields: &NewTransaction) -> Result<()> {
    validate_text("description", &fields.description)?;
    validate_amount(fields.amount)
}

fn validate_investment(fields: &NewInvestment) -> Result<()> {
    validate_text("name", &fields.name)?;
    validate_amount(fields.amount)?;
    validate_rate(fields.rate)
}

// Stored records go through the same numeric limits as new ones.
fn check_loaded(data: &Dataset) -> Result<()> {
    let out_of_range = |id: &str, err: Error| match err {
        Error::Validation { field, message } => Error::Validation {
            field,
            message: format!("{message} (record {id})"),
        },
        other => other,
    };
    for tx in &data.transactions {
        validate_amount(tx.amount).map_err(|e| out_of_range(&tx.id, e))?;
    }
    for inv in &data.investments {
        validate_amount(inv.amount).map_err(|e| out_of_range(&inv.id, e))?;
        validate_rate(inv.rate).map_err(|e| out_of_range(&inv.id, e))?;
    }
    Ok(())
}

fn build_transaction(id: String, fields: NewTransaction) -> Transaction {
    Transaction {
        id,
        kind: fields.kind,
        description: fields.description.trim().to_string(),
        amount: fields.amount,
        date: fields.date,
        category_id: fields.category_id,
    }
}

impl RecordSource for MemorySource {
    fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<PaginatedResponse<Transaction>> {
        let needle = query.search.to_lowercase();
        let matching: Vec<Transaction> = self
            .data
            .transactions
            .iter()
            .filter(|t| query.kind.contains(t.kind))
            .filter(|t| needle.is_empty() || contains_ignore_case(&t.description, &needle))
            .cloned()
            .collect();
        debug!(
            "fetch transactions page={} limit={} matched={}",
            query.page,
            query.limit,
            matching.len()
        );
        Ok(page_of(newest_first(&matching, |t| t.date), query.page, query.limit))
    }

    fn fetch_investments(&self, query: &InvestmentQuery) -> Result<PaginatedResponse<Investment>> {
        let needle = query.search.to_lowercase();
        let matching: Vec<Investment> = self
            .data
            .investments
            .iter()
            .filter(|i| needle.is_empty() || contains_ignore_case(&i.name, &needle))
            .cloned()
            .collect();
        debug!(
            "fetch investments page={} limit={} matched={}",
            query.page,
            query.limit,
            matching.len()
        );
        Ok(page_of(newest_first(&matching, |i| i.date), query.page, query.limit))
    }

    fn create_transaction(&mut self, fields: NewTransaction) -> Result<Transaction> {
        validate_transaction(&fields)?;
        let id = self.next_id("txn", self.data.transactions.len());
        let tx = build_transaction(id, fields);
        self.data.transactions.push(tx.clone());
        info!("recorded {} {} '{}'", tx.kind, tx.amount, tx.description);
        Ok(tx)
    }

    fn create_investment(&mut self, fields: NewInvestment) -> Result<Investment> {
        validate_investment(&fields)?;
        let monthly_return = Investment::estimated_monthly_return(fields.amount, fields.rate)
            .ok_or_else(|| Error::validation("amount", "too large to estimate a monthly return"))?;
        let id = self.next_id("inv", self.data.investments.len());
        let inv = Investment {
            id,
            name: fields.name.trim().to_string(),
            monthly_return,
            amount: fields.amount,
            rate: fields.rate,
            date: fields.date,
            category: fields.category,
        };
        self.data.investments.push(inv.clone());
        info!("recorded investment {} '{}'", inv.amount, inv.name);
        Ok(inv)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.data.categories.clone())
    }
}

/// A [`MemorySource`] loaded from, and written back to, a JSON file.
#[derive(Debug)]
pub struct JsonFileSource {
    path: PathBuf,
    inner: MemorySource,
}

impl JsonFileSource {
    /// Opens `path`; a missing file is an empty data set.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let data: Dataset = serde_json::from_str(&raw)?;
            check_loaded(&data)?;
            data
        } else {
            debug!("data file {} not found, starting empty", path.display());
            Dataset::default()
        };
        Ok(Self {
            path,
            inner: MemorySource::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn memory(&self) -> &MemorySource {
        &self.inner
    }

    /// Writes the data set to a temporary file next to the data file and
    /// renames it into place, so a failed write leaves the old file intact.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                dir.to_path_buf()
            }
            None => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, self.inner.dataset())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!("wrote {}", self.path.display());
        Ok(())
    }

    pub fn import_transactions_csv(&mut self, csv_path: &Path) -> Result<usize> {
        let count = self.inner.import_transactions_csv(csv_path)?;
        self.save()?;
        Ok(count)
    }
}

impl RecordSource for JsonFileSource {
    fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<PaginatedResponse<Transaction>> {
        self.inner.fetch_transactions(query)
    }

    fn fetch_investments(&self, query: &InvestmentQuery) -> Result<PaginatedResponse<Investment>> {
        self.inner.fetch_investments(query)
    }

    fn create_transaction(&mut self, fields: NewTransaction) -> Result<Transaction> {
        let tx = self.inner.create_transaction(fields)?;
        self.save()?;
        Ok(tx)
    }

    fn create_investment(&mut self, fields: NewInvestment) -> Result<Investment> {
        let inv = self.inner.create_investment(fields)?;
        self.save()?;
        Ok(inv)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        self.inner.categories()
    }
}

/// Fetches every transaction through the paged contract.
pub fn all_transactions(source: &dyn RecordSource) -> Result<Vec<Transaction>> {
    Ok(source.fetch_transactions(&TransactionQuery::everything())?.data)
}

pub fn all_investments(source: &dyn RecordSource) -> Result<Vec<Investment>> {
    Ok(source.fetch_investments(&InvestmentQuery::everything())?.data)
}

/// Category name for `id`, falling back to the id itself.
pub fn category_label<'a>(categories: &'a [Category], id: &'a str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or(id, |c| c.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn new_tx(
        kind: TransactionKind,
        description: &str,
        amount: &str,
        date: &str,
    ) -> NewTransaction {
        NewTransaction {
            kind,
            description: description.into(),
            amount: Decimal::from_str(amount).unwrap(),
            date: parse_date(date).unwrap(),
            category_id: None,
        }
    }

    fn seeded() -> MemorySource {
        let mut src = MemorySource::default();
        src.create_transaction(new_tx(TransactionKind::Income, "Salary", "8500", "2024-12-15"))
            .unwrap();
        src.create_transaction(new_tx(TransactionKind::Expense, "Rent", "2200", "2024-12-14"))
            .unwrap();
        src.create_transaction(new_tx(TransactionKind::Expense, "Uber", "45", "2024-12-16"))
            .unwrap();
        src
    }

    #[test]
    fn fetch_returns_newest_first_with_totals() {
        let src = seeded();
        let got = src
            .fetch_transactions(&TransactionQuery {
                page: 1,
                limit: NonZeroUsize::new(2).unwrap(),
                search: String::new(),
                kind: KindFilter::All,
            })
            .unwrap();
        let names: Vec<&str> = got.data.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, ["Uber", "Salary"]);
        assert_eq!(
            got.pagination,
            Pagination {
                page: 1,
                limit: 2,
                total: 3,
                total_pages: 2
            }
        );
    }

    #[test]
    fn fetch_applies_type_and_search() {
        let src = seeded();
        let got = src
            .fetch_transactions(&TransactionQuery {
                search: "r".into(),
                kind: KindFilter::Only(TransactionKind::Expense),
                ..TransactionQuery::everything()
            })
            .unwrap();
        let names: Vec<&str> = got.data.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, ["Uber", "Rent"]);
    }

    #[test]
    fn create_rejects_invalid_fields() {
        let mut src = MemorySource::default();
        let err = src
            .create_transaction(new_tx(TransactionKind::Income, "  ", "10", "2024-12-01"))
            .unwrap_err();
        assert_eq!(err.to_string(), "description: must not be empty");
        let err = src
            .create_transaction(new_tx(TransactionKind::Income, "Gift", "0", "2024-12-01"))
            .unwrap_err();
        assert_eq!(err.to_string(), "amount: must be greater than zero");
        let err = src
            .create_investment(NewInvestment {
                name: "CDB".into(),
                amount: Decimal::from(100),
                rate: Decimal::from(-1),
                date: parse_date("2024-12-01").unwrap(),
                category: None,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "rate: must not be negative");
        assert!(src.transactions().is_empty());
    }

    #[test]
    fn create_investment_computes_monthly_return() {
        let mut src = MemorySource::default();
        let inv = src
            .create_investment(NewInvestment {
                name: "Tesouro Selic".into(),
                amount: Decimal::from(12000),
                rate: Decimal::from(100),
                date: parse_date("2024-12-01").unwrap(),
                category: Some("Tesouro".into()),
            })
            .unwrap();
        assert_eq!(inv.id, "inv-1");
        assert_eq!(inv.monthly_return, Decimal::from(1000));
    }

    #[test]
    fn ids_stay_unique() {
        let mut data = Dataset::default();
        let mut src = MemorySource::default();
        let first = src
            .create_transaction(new_tx(TransactionKind::Income, "A", "1", "2024-12-01"))
            .unwrap();
        data.transactions.push(Transaction {
            id: "txn-2".into(),
            ..first
        });
        let mut src = MemorySource::new(data);
        let next = src
            .create_transaction(new_tx(TransactionKind::Income, "B", "1", "2024-12-01"))
            .unwrap();
        assert_eq!(next.id, "txn-3");
    }

    fn new_inv(amount: Decimal, rate: i64) -> NewInvestment {
        NewInvestment {
            name: "CDB".into(),
            amount,
            rate: Decimal::from(rate),
            date: parse_date("2024-12-01").unwrap(),
            category: None,
        }
    }

    #[test]
    fn oversized_amounts_and_rates_are_rejected_not_overflowed() {
        let mut src = MemorySource::default();
        let err = src.create_investment(new_inv(Decimal::MAX, 200)).unwrap_err();
        assert_eq!(err.to_string(), "amount: must be at most 1000000000000");
        let err = src
            .create_investment(new_inv(Decimal::from(1000), MAX_RATE + 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "rate: must be at most 10000");
        let ok = src
            .create_investment(new_inv(Decimal::from(MAX_AMOUNT), MAX_RATE))
            .unwrap();
        let expected = Decimal::from(MAX_AMOUNT) * Decimal::ONE_HUNDRED / Decimal::from(12);
        assert_eq!(ok.monthly_return, expected);

        let mut tx = new_tx(TransactionKind::Income, "Lottery", "1", "2024-12-01");
        tx.amount = Decimal::MAX;
        assert!(src.create_transaction(tx).is_err());
    }

    #[test]
    fn loading_rejects_out_of_range_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let data = Dataset {
            transactions: vec![Transaction {
                id: "txn-9".into(),
                kind: TransactionKind::Income,
                description: "Corrupt".into(),
                amount: Decimal::MAX,
                date: parse_date("2024-12-01").unwrap(),
                category_id: None,
            }],
            ..Dataset::default()
        };
        fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();
        let err = JsonFileSource::open(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "amount: must be at most 1000000000000 (record txn-9)"
        );
    }

    #[test]
    fn save_replaces_the_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{}").unwrap();
        let mut store = JsonFileSource::open(&path).unwrap();
        store
            .create_transaction(new_tx(TransactionKind::Income, "Salary", "10", "2024-12-01"))
            .unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["records.json"]);
        let reopened = JsonFileSource::open(&path).unwrap();
        assert_eq!(reopened.memory().transactions().len(), 1);
    }
}
