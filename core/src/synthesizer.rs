//! Base transaction synthesizer.
//!
//! Draws transactions against the entity catalog: one owning customer,
//! one archetype, an amount bounded by the owner's credit limit, and
//! four chronologically ordered dates built by a chained random walk;
//! the ordering invariant holds by construction, never by post-hoc
//! sorting.

use crate::{
    catalog::Customer,
    error::{GenError, GenResult},
    name_generator::NameGenerator,
    rng::StageRng,
    types::{round2, CustomerId, TransactionId},
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Counterparty countries for ordinary trade. Risk-flagged countries
/// are reserved for the structuring pattern.
pub const TRADE_COUNTRIES: [&str; 8] = ["SE", "NO", "FI", "DK", "NL", "DE", "US", "GB"];

/// Originating business lines.
pub const BUSINESS_TYPES: [&str; 5] =
    ["Textile", "Electronics", "Shipping", "Agriculture", "Consulting"];

/// Smallest base transaction amount.
pub const MIN_AMOUNT: f64 = 10.0;

/// Each date in the pipeline may lag its predecessor by at most this
/// many days.
pub const MAX_DATE_STEP_DAYS: u64 = 2;

/// A transaction's behavioral archetype, with the fields that only
/// exist for that archetype carried on the variant itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Card { card_number: String },
    MobileTransfer { message: String, own_message: String },
    DirectDebit,
    Wire,
    Deposit,
}

impl TransactionKind {
    /// Draw an archetype uniformly and fill its conditional fields.
    pub fn draw(rng: &mut StageRng) -> Self {
        match rng.next_u64_below(5) {
            0 => Self::Card {
                card_number: draw_card_number(rng),
            },
            1 => Self::mobile_transfer(),
            2 => Self::DirectDebit,
            3 => Self::Wire,
            _ => Self::Deposit,
        }
    }

    /// The mobile-transfer shape with its fixed message pair. Also used
    /// by the fraud injector when a pattern coerces the archetype.
    pub fn mobile_transfer() -> Self {
        Self::MobileTransfer {
            message: "Membership payment".to_string(),
            own_message: "Sports club 2025".to_string(),
        }
    }

    /// Machine-readable archetype code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Card { .. } => "card",
            Self::MobileTransfer { .. } => "swish",
            Self::DirectDebit => "autogiro",
            Self::Wire => "transfer",
            Self::Deposit => "deposit",
        }
    }

    /// Human-readable statement label.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Card { .. } => "Kortköp",
            Self::MobileTransfer { .. } => "Swish",
            Self::DirectDebit => "Autogiro",
            Self::Wire => "Överföring",
            Self::Deposit => "Insättning",
        }
    }

    /// Narrative template applied to the counterparty.
    pub fn narrative(&self, counterparty: &str) -> String {
        match self {
            Self::Card { .. } => format!("Card payment at {counterparty}"),
            Self::MobileTransfer { .. } => format!("Swish payment to {counterparty}"),
            Self::DirectDebit => format!("Direct debit to {counterparty}"),
            Self::Wire => format!("Transfer to {counterparty}"),
            Self::Deposit => format!("Deposit from {counterparty}"),
        }
    }

    pub fn card_number(&self) -> Option<&str> {
        match self {
            Self::Card { card_number } => Some(card_number),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::MobileTransfer { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn own_message(&self) -> Option<&str> {
        match self {
            Self::MobileTransfer { own_message, .. } => Some(own_message),
            _ => None,
        }
    }
}

fn draw_card_number(rng: &mut StageRng) -> String {
    let groups: Vec<String> = (0..4)
        .map(|_| format!("{}", 1000 + rng.next_u64_below(9000)))
        .collect();
    groups.join(" ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub customer_id: CustomerId,
    /// Inherited from the owning customer.
    pub currency: String,
    pub transaction_date: NaiveDateTime,
    pub value_date: NaiveDateTime,
    pub payment_date: NaiveDateTime,
    pub booking_date: NaiveDateTime,
    pub kind: TransactionKind,
    pub narrative: Option<String>,
    pub counterparty_name: Option<String>,
    pub counterparty_country: String,
    pub business_type: Option<String>,
    pub amount: f64,
    pub status: String,
    /// Shared reference linking the parts of one structuring group.
    pub parent_invoice_ref: Option<String>,
    pub is_fraud: bool,
}

/// Four dates in non-decreasing order: a uniform start inside the
/// campaign window, then each successor at most `MAX_DATE_STEP_DAYS`
/// whole days later.
pub fn chained_dates(
    window_start: NaiveDate,
    window_end: NaiveDate,
    rng: &mut StageRng,
) -> (NaiveDateTime, NaiveDateTime, NaiveDateTime, NaiveDateTime) {
    let start = window_start.and_time(NaiveTime::MIN);
    let span_seconds = (window_end.and_time(NaiveTime::MIN) - start).num_seconds();
    let transaction_date = start + Duration::seconds(rng.next_u64_below(span_seconds as u64 + 1) as i64);

    let mut step = |prev: NaiveDateTime| {
        prev + Duration::days(rng.next_u64_below(MAX_DATE_STEP_DAYS + 1) as i64)
    };
    let value_date = step(transaction_date);
    let payment_date = step(value_date);
    let booking_date = step(payment_date);
    (transaction_date, value_date, payment_date, booking_date)
}

/// Generate `count` base transactions against the catalog. Every record
/// is labeled non-fraud here; only the injector assigns label 1.
pub fn generate_transactions(
    customers: &[Customer],
    count: usize,
    window_start: NaiveDate,
    window_end: NaiveDate,
    rng: &mut StageRng,
) -> GenResult<Vec<Transaction>> {
    if customers.is_empty() {
        return Err(GenError::EmptyCatalog);
    }

    let mut transactions = Vec::with_capacity(count);
    for _ in 0..count {
        let customer = rng.pick(customers);
        let kind = TransactionKind::draw(rng);
        let counterparty = NameGenerator::company(rng);
        let amount = round2(rng.uniform(MIN_AMOUNT, customer.credit_limit));
        let (transaction_date, value_date, payment_date, booking_date) =
            chained_dates(window_start, window_end, rng);
        let counterparty_country = (*rng.pick(&TRADE_COUNTRIES)).to_string();
        let business_type = (*rng.pick(&BUSINESS_TYPES)).to_string();

        transactions.push(Transaction {
            transaction_id: rng.next_uuid().to_string(),
            customer_id: customer.customer_id.clone(),
            currency: customer.currency.clone(),
            transaction_date,
            value_date,
            payment_date,
            booking_date,
            narrative: Some(kind.narrative(&counterparty)),
            counterparty_name: Some(counterparty),
            counterparty_country,
            business_type: Some(business_type),
            amount,
            status: "billed".to_string(),
            parent_invoice_ref: None,
            is_fraud: false,
            kind,
        });
    }

    log::info!("synthesizer: generated {} base transactions", transactions.len());
    Ok(transactions)
}
