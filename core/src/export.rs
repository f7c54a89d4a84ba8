//! CSV export with fixed, stable column schemas.
//!
//! Column names and ordering are the compatibility contract for
//! downstream consumers; change them only with a schema version bump.
//! Blanked optional fields render as empty cells; monetary cells always
//! carry two decimals.

use crate::{
    catalog::Customer,
    error::GenResult,
    pipeline::Dataset,
    summary::SummaryRecord,
    synthesizer::Transaction,
};
use std::io::Write;
use std::path::Path;

pub const CUSTOMER_COLUMNS: [&str; 22] = [
    "customer_id",
    "country",
    "currency",
    "account_number",
    "iban",
    "account_name",
    "product",
    "account_type",
    "available_balance",
    "booked_balance",
    "value_dated_balance",
    "bank_name",
    "bank_bic",
    "bank_country",
    "status",
    "credit_limit",
    "registration_number",
    "dob",
    "nationality",
    "residence_country",
    "occupation",
    "gender",
];

pub const TRANSACTION_COLUMNS: [&str; 20] = [
    "customer_id",
    "transaction_id",
    "currency",
    "transaction_date",
    "value_date",
    "payment_date",
    "booking_date",
    "type_description",
    "transaction_type",
    "narrative",
    "status",
    "counterparty_name",
    "counterparty_country",
    "business_type",
    "amount",
    "card_number",
    "message",
    "own_message",
    "parent_invoice_ref",
    "is_fraud",
];

pub const SUMMARY_COLUMNS: [&str; 11] = [
    "customer_id",
    "total_volume",
    "avg_amount",
    "max_amount",
    "min_amount",
    "transaction_count",
    "last_transaction_date",
    "available_balance",
    "credit_limit",
    "country",
    "currency",
];

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn write_customers<W: Write>(writer: W, customers: &[Customer]) -> GenResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(CUSTOMER_COLUMNS)?;
    for c in customers {
        w.write_record([
            c.customer_id.as_str(),
            c.country.as_str(),
            c.currency.as_str(),
            c.account_number.as_str(),
            c.iban.as_str(),
            c.account_name.as_str(),
            c.product.as_str(),
            c.account_type.as_str(),
            money(c.available_balance).as_str(),
            money(c.booked_balance).as_str(),
            money(c.value_dated_balance).as_str(),
            c.bank_name.as_str(),
            c.bank_bic.as_str(),
            c.bank_country.as_str(),
            c.status.as_str(),
            money(c.credit_limit).as_str(),
            c.registration_number.as_str(),
            c.dob.format(DATE_FORMAT).to_string().as_str(),
            c.nationality.as_str(),
            c.residence_country.as_str(),
            c.occupation.as_str(),
            c.gender.as_str(),
        ])?;
    }
    flush(w)
}

pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> GenResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(TRANSACTION_COLUMNS)?;
    for t in transactions {
        w.write_record([
            t.customer_id.as_str(),
            t.transaction_id.as_str(),
            t.currency.as_str(),
            t.transaction_date.format(DATETIME_FORMAT).to_string().as_str(),
            t.value_date.format(DATETIME_FORMAT).to_string().as_str(),
            t.payment_date.format(DATETIME_FORMAT).to_string().as_str(),
            t.booking_date.format(DATETIME_FORMAT).to_string().as_str(),
            t.kind.description(),
            t.kind.code(),
            t.narrative.as_deref().unwrap_or(""),
            t.status.as_str(),
            t.counterparty_name.as_deref().unwrap_or(""),
            t.counterparty_country.as_str(),
            t.business_type.as_deref().unwrap_or(""),
            money(t.amount).as_str(),
            t.kind.card_number().unwrap_or(""),
            t.kind.message().unwrap_or(""),
            t.kind.own_message().unwrap_or(""),
            t.parent_invoice_ref.as_deref().unwrap_or(""),
            if t.is_fraud { "1" } else { "0" },
        ])?;
    }
    flush(w)
}

pub fn write_summaries<W: Write>(writer: W, summaries: &[SummaryRecord]) -> GenResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(SUMMARY_COLUMNS)?;
    for s in summaries {
        w.write_record([
            s.customer_id.as_str(),
            money(s.total_volume).as_str(),
            money(s.avg_amount).as_str(),
            money(s.max_amount).as_str(),
            money(s.min_amount).as_str(),
            s.transaction_count.to_string().as_str(),
            s.last_transaction_date.format(DATETIME_FORMAT).to_string().as_str(),
            money(s.available_balance).as_str(),
            money(s.credit_limit).as_str(),
            s.country.as_str(),
            s.currency.as_str(),
        ])?;
    }
    flush(w)
}

/// Render one table to an in-memory CSV string. Used by tests and by
/// callers that post-process the output.
pub fn customers_csv(customers: &[Customer]) -> GenResult<String> {
    let mut buffer = Vec::new();
    write_customers(&mut buffer, customers)?;
    Ok(string_from_utf8(buffer))
}

pub fn transactions_csv(transactions: &[Transaction]) -> GenResult<String> {
    let mut buffer = Vec::new();
    write_transactions(&mut buffer, transactions)?;
    Ok(string_from_utf8(buffer))
}

pub fn summaries_csv(summaries: &[SummaryRecord]) -> GenResult<String> {
    let mut buffer = Vec::new();
    write_summaries(&mut buffer, summaries)?;
    Ok(string_from_utf8(buffer))
}

/// Write the three tables of a run into `dir` with the canonical file
/// names: customers.csv, transactions.csv, summary_statistics.csv.
pub fn write_dataset(dataset: &Dataset, dir: &Path) -> GenResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| anyhow::anyhow!("Cannot create {}: {e}", dir.display()))?;
    write_customers(create(dir, "customers.csv")?, &dataset.customers)?;
    write_transactions(create(dir, "transactions.csv")?, &dataset.transactions)?;
    write_summaries(create(dir, "summary_statistics.csv")?, &dataset.summaries)?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> GenResult<std::fs::File> {
    let path = dir.join(name);
    std::fs::File::create(&path)
        .map_err(|e| anyhow::anyhow!("Cannot create {}: {e}", path.display()).into())
}

fn flush<W: Write>(mut w: csv::Writer<W>) -> GenResult<()> {
    w.flush()
        .map_err(|e| anyhow::anyhow!("CSV flush failed: {e}").into())
}

fn string_from_utf8(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("CSV output is always UTF-8")
}
