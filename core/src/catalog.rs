//! Entity catalog: the fixed universe of customers and accounts.
//!
//! Leaf stage: depends on nothing but the configuration and its own
//! RNG stream. Every downstream stage samples from the catalog it
//! produces; nothing mutates a customer after creation.

use crate::{
    error::{GenError, GenResult},
    name_generator::NameGenerator,
    rng::StageRng,
    types::{round2, CustomerId},
};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fixed non-sanctioned country universe. Currency is a deterministic
/// lookup from this table; it is never sampled independently.
pub const COUNTRIES: [&str; 5] = ["SE", "NO", "FI", "DK", "NL"];

pub const PRODUCTS: [&str; 3] = ["PERSONKONTO", "SPARKONTO", "STUDENTKONTO"];
pub const ACCOUNT_TYPES: [&str; 2] = ["Current", "Savings"];
pub const OCCUPATIONS: [&str; 10] = [
    "Engineer", "Doctor", "Teacher", "Consultant", "Cashier",
    "Artist", "Driver", "Student", "Analyst", "Nurse",
];
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

pub const BANK_NAME: &str = "Nordea";
pub const BANK_BIC: &str = "NDEASESS";

const BBAN_LOW: u64 = 40_000_000_000;
const BBAN_SPAN: u64 = 10_000_000_000;

const MIN_AGE_YEARS: i64 = 18;
const MAX_AGE_YEARS: i64 = 75;

/// Currency for a catalog country. Returns None for countries outside
/// the fixed universe.
pub fn currency_for(country: &str) -> Option<&'static str> {
    match country {
        "SE" => Some("SEK"),
        "NO" => Some("NOK"),
        "FI" => Some("EUR"),
        "DK" => Some("DKK"),
        "NL" => Some("EUR"),
        _ => None,
    }
}

/// Derive the international account form from the domestic base number.
/// Pure function of the base: the pair must stay internally consistent,
/// so this is the only place the IBAN representation is computed.
pub fn derive_iban(bban: u64) -> String {
    let low_digits = bban % BBAN_SPAN;
    format!("SE80{}", 3_000_000_000u64 + low_digits)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub country: String,
    pub currency: String,
    /// Domestic account number (BBAN).
    pub account_number: String,
    /// International form, derived from the BBAN's low-order digits.
    pub iban: String,
    pub account_name: String,
    pub product: String,
    pub account_type: String,
    pub available_balance: f64,
    pub booked_balance: f64,
    /// Invariant: never above `available_balance`.
    pub value_dated_balance: f64,
    pub bank_name: String,
    pub bank_bic: String,
    pub bank_country: String,
    pub status: String,
    pub credit_limit: f64,
    pub registration_number: String,
    pub dob: NaiveDate,
    pub nationality: String,
    pub residence_country: String,
    pub occupation: String,
    pub gender: String,
}

/// Produce the ordered catalog of `n` customers. Identifiers are formed
/// from the ordinal position, so the catalog is stable across runs with
/// the same seed.
pub fn generate_customers(
    n: usize,
    window_start: NaiveDate,
    rng: &mut StageRng,
) -> GenResult<Vec<Customer>> {
    if n == 0 {
        return Err(GenError::InvalidCount {
            field: "num_customers",
            value: 0,
        });
    }

    let mut customers = Vec::with_capacity(n);
    for i in 0..n {
        let customer_id = format!("CUST{i:05}");
        let country = (*rng.pick(&COUNTRIES)).to_string();
        let currency = currency_for(&country)
            .expect("catalog country is always in the currency table")
            .to_string();

        let bban = BBAN_LOW + rng.next_u64_below(BBAN_SPAN);
        let iban = derive_iban(bban);

        let account_name = NameGenerator::person(rng);
        let product = (*rng.pick(&PRODUCTS)).to_string();
        let account_type = (*rng.pick(&ACCOUNT_TYPES)).to_string();

        let balance = round2(rng.uniform(500.0, 150_000.0));
        let value_dated_balance = round2(balance * rng.uniform(0.5, 1.0));
        let credit_limit = round2(rng.uniform(500.0, 20_000.0));

        let bank_country = (*rng.pick(&COUNTRIES)).to_string();

        let age_days = MIN_AGE_YEARS * 365
            + rng.next_u64_below(((MAX_AGE_YEARS - MIN_AGE_YEARS) * 365) as u64) as i64;
        let dob = window_start - Duration::days(age_days);
        let registration_number = format!(
            "{:02}{:02}{:02}-{:04}",
            dob.year() % 100,
            dob.month(),
            dob.day(),
            rng.next_u64_below(10_000),
        );

        let residence_country = (*rng.pick(&COUNTRIES)).to_string();
        let occupation = (*rng.pick(&OCCUPATIONS)).to_string();
        let gender = (*rng.pick(&GENDERS)).to_string();

        customers.push(Customer {
            customer_id,
            nationality: country.clone(),
            country,
            currency,
            account_number: bban.to_string(),
            iban,
            account_name,
            product,
            account_type,
            available_balance: balance,
            booked_balance: balance,
            value_dated_balance,
            bank_name: BANK_NAME.to_string(),
            bank_bic: BANK_BIC.to_string(),
            bank_country,
            status: "OPEN".to_string(),
            credit_limit,
            registration_number,
            dob,
            residence_country,
            occupation,
            gender,
        });
    }

    log::info!("catalog: generated {} customers", customers.len());
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StageSlot};

    fn window_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    }

    #[test]
    fn zero_customers_is_a_configuration_error() {
        let mut rng = RngBank::new(1).for_stage(StageSlot::Customer);
        let err = generate_customers(0, window_start(), &mut rng).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn iban_is_a_pure_function_of_the_bban() {
        assert_eq!(derive_iban(49_999_999_999), derive_iban(49_999_999_999));
        assert_eq!(derive_iban(41_234_567_890), "SE804234567890");
        // Same low-order digits, same international form.
        assert_eq!(derive_iban(40_000_000_007), "SE803000000007");
    }

    #[test]
    fn customers_have_consistent_identity_fields() {
        let mut rng = RngBank::new(99).for_stage(StageSlot::Customer);
        let customers = generate_customers(200, window_start(), &mut rng).unwrap();
        assert_eq!(customers.len(), 200);
        assert_eq!(customers[0].customer_id, "CUST00000");
        assert_eq!(customers[199].customer_id, "CUST00199");

        for c in &customers {
            assert_eq!(
                c.currency,
                currency_for(&c.country).unwrap(),
                "currency must be the lookup of {}",
                c.country
            );
            assert_eq!(c.iban, derive_iban(c.account_number.parse().unwrap()));
            assert_eq!(c.nationality, c.country);
            assert!(c.credit_limit >= 500.0 && c.credit_limit < 20_000.01);
            assert!(c.available_balance > 0.0);
            assert!(
                c.value_dated_balance <= c.available_balance,
                "value-dated balance {} above available {}",
                c.value_dated_balance,
                c.available_balance
            );
        }
    }

    #[test]
    fn dob_respects_age_bounds() {
        let mut rng = RngBank::new(5).for_stage(StageSlot::Customer);
        let customers = generate_customers(100, window_start(), &mut rng).unwrap();
        for c in &customers {
            let age_days = (window_start() - c.dob).num_days();
            assert!(
                (18 * 365..=75 * 365).contains(&age_days),
                "age out of bounds: {age_days} days"
            );
        }
    }
}
