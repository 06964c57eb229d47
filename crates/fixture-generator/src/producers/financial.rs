//! Financial records (invoices, member fees, loan and utility payments).

use crate::distribution::{Distribution, DistributionError};
use crate::engine::{EntityProducer, ProduceError};
use crate::rng::SeededRng;
use crate::swedish;
use chrono::NaiveDate;
use fixture_core::{EntityValidator, FieldValue, FixtureRow, IntoRow, ValidationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of financial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    SupplierInvoice,
    MemberFee,
    LoanPayment,
    UtilityBill,
}

impl RecordKind {
    /// Lowercase label used at the persistence boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SupplierInvoice => "supplier_invoice",
            Self::MemberFee => "member_fee",
            Self::LoanPayment => "loan_payment",
            Self::UtilityBill => "utility_bill",
        }
    }

    /// Typical amount band for this kind, SEK.
    fn amount_range(&self) -> (i64, i64) {
        match self {
            Self::SupplierInvoice => (1_500, 120_000),
            Self::MemberFee => (2_500, 9_500),
            Self::LoanPayment => (15_000, 400_000),
            Self::UtilityBill => (800, 45_000),
        }
    }

    /// BAS-style account code pool for this kind.
    fn account_codes(&self) -> &'static [&'static str] {
        match self {
            Self::SupplierInvoice => &["4110", "4210", "6072"],
            Self::MemberFee => &["3011", "3012"],
            Self::LoanPayment => &["2350", "8410"],
            Self::UtilityBill => &["5020", "5140", "5170"],
        }
    }
}

/// A bookkeeping entry for a cooperative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: String,
    pub kind: RecordKind,
    /// OCR payment reference with length and check digits.
    pub ocr_reference: String,
    pub counterparty: String,
    pub counterparty_bankgiro: String,
    /// Amount in SEK, two decimal places.
    pub amount: Decimal,
    pub accounting_date: NaiveDate,
    /// BAS chart-of-accounts code.
    pub account_code: String,
    pub description: String,
}

/// Produces financial records from a caller-declared kind distribution.
pub struct FinancialRecordGenerator {
    kinds: Distribution<RecordKind>,
}

impl FinancialRecordGenerator {
    /// Build a generator with an explicit kind distribution.
    pub fn new(kinds: Distribution<RecordKind>) -> Self {
        Self { kinds }
    }

    /// A ledger-like default mix: mostly member fees and supplier invoices.
    pub fn ledger_default() -> Self {
        let kinds = Distribution::new(vec![
            (RecordKind::MemberFee, 0.45),
            (RecordKind::SupplierInvoice, 0.3),
            (RecordKind::UtilityBill, 0.2),
            (RecordKind::LoanPayment, 0.05),
        ])
        .expect("static weights sum to 1.0");
        Self::new(kinds)
    }

    /// Replace the kind distribution.
    pub fn with_kind_distribution(
        mut self,
        entries: Vec<(RecordKind, f64)>,
    ) -> Result<Self, DistributionError> {
        self.kinds = Distribution::new(entries)?;
        Ok(self)
    }
}

impl EntityProducer for FinancialRecordGenerator {
    type Entity = FinancialRecord;

    fn produce(&self, rng: &mut SeededRng, _index: u64) -> Result<FinancialRecord, ProduceError> {
        let kind = *self.kinds.sample(rng);

        let (min, max) = kind.amount_range();
        // Whole kronor plus öre, kept exact in the decimal.
        let kronor = rng.random_int(min, max);
        let ore = rng.random_int(0, 99);
        let amount = Decimal::new(kronor * 100 + ore, 2);

        let year = rng.random_int(2022, 2025) as i32;
        let month = rng.random_int(1, 12) as u32;
        let day = rng.random_int(1, 28) as u32;
        let accounting_date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ProduceError::new(format!("invalid date {year}-{month}-{day}")))?;

        let counterparty = *rng.random_choice(swedish::COUNTERPARTIES);
        let account_code = *rng.random_choice(kind.account_codes());

        Ok(FinancialRecord {
            id: rng.next_id(),
            kind,
            ocr_reference: swedish::ocr_reference(rng),
            counterparty: counterparty.to_string(),
            counterparty_bankgiro: swedish::bankgiro(rng),
            amount,
            accounting_date,
            account_code: account_code.to_string(),
            description: format!("{} {}", counterparty, kind.as_str().replace('_', " ")),
        })
    }

    fn kind(&self) -> &'static str {
        "financial_record"
    }

    fn unique_key(&self, entity: &FinancialRecord) -> Option<String> {
        Some(entity.ocr_reference.clone())
    }
}

/// Business rules for financial records.
pub struct FinancialValidator;

impl EntityValidator<FinancialRecord> for FinancialValidator {
    fn validate(&self, entity: &FinancialRecord) -> ValidationResult {
        let mut report = ValidationResult::ok();

        if !swedish::luhn_valid(&entity.ocr_reference) {
            report.push_error(format!(
                "OCR reference '{}' fails the checksum",
                entity.ocr_reference
            ));
        }
        if !swedish::luhn_valid(&entity.counterparty_bankgiro) {
            report.push_error(format!(
                "bankgiro '{}' fails the checksum",
                entity.counterparty_bankgiro
            ));
        }
        if entity.amount <= Decimal::ZERO {
            report.push_error(format!("amount {} is not positive", entity.amount));
        }
        if entity.account_code.len() != 4
            || !entity.account_code.chars().all(|c| c.is_ascii_digit())
        {
            report.push_error(format!(
                "account code '{}' is not a four-digit BAS code",
                entity.account_code
            ));
        }
        if entity.counterparty.trim().is_empty() {
            report.push_error("counterparty is empty");
        }

        let (min, max) = entity.kind.amount_range();
        let amount_kronor = entity.amount.trunc();
        if amount_kronor < Decimal::new(min, 0) || amount_kronor > Decimal::new(max, 0) {
            report.push_warning(format!(
                "amount {} outside the typical {} band",
                entity.amount,
                entity.kind.as_str()
            ));
        }

        report
    }

    fn sanitize(&self, mut entity: FinancialRecord) -> FinancialRecord {
        entity.counterparty = entity.counterparty.trim().to_string();
        entity.description = entity.description.trim().to_string();
        entity.amount = entity.amount.round_dp(2);
        entity
    }
}

impl IntoRow for FinancialRecord {
    fn into_row(&self, index: u64) -> FixtureRow {
        FixtureRow::new(index)
            .with("id", FieldValue::Text(self.id.clone()))
            .with("kind", FieldValue::Text(self.kind.as_str().to_string()))
            .with(
                "ocr_reference",
                FieldValue::Text(self.ocr_reference.clone()),
            )
            .with("counterparty", FieldValue::Text(self.counterparty.clone()))
            .with(
                "counterparty_bankgiro",
                FieldValue::Text(self.counterparty_bankgiro.clone()),
            )
            .with("amount", FieldValue::Decimal(self.amount))
            .with("accounting_date", FieldValue::Date(self.accounting_date))
            .with("account_code", FieldValue::Text(self.account_code.clone()))
            .with("description", FieldValue::Text(self.description.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produce_n(generator: &FinancialRecordGenerator, seed: &str, n: u64) -> Vec<FinancialRecord> {
        let mut rng = SeededRng::new(seed);
        (0..n)
            .map(|i| generator.produce(&mut rng, i).unwrap())
            .collect()
    }

    #[test]
    fn test_deterministic_production() {
        let generator = FinancialRecordGenerator::ledger_default();
        assert_eq!(
            produce_n(&generator, "det", 40),
            produce_n(&generator, "det", 40)
        );
    }

    #[test]
    fn test_produced_records_pass_validation() {
        let generator = FinancialRecordGenerator::ledger_default();
        let validator = FinancialValidator;
        for record in produce_n(&generator, "valid", 100) {
            let report = validator.validate(&record);
            assert!(report.is_valid, "rejected {record:?}: {:?}", report.errors);
        }
    }

    #[test]
    fn test_single_kind_distribution() {
        let generator = FinancialRecordGenerator::ledger_default()
            .with_kind_distribution(vec![(RecordKind::MemberFee, 1.0)])
            .unwrap();

        for record in produce_n(&generator, "fees", 100) {
            assert_eq!(record.kind, RecordKind::MemberFee);
            let (min, max) = RecordKind::MemberFee.amount_range();
            let kronor = record.amount.trunc();
            assert!(kronor >= Decimal::new(min, 0) && kronor <= Decimal::new(max, 0));
        }
    }

    #[test]
    fn test_amounts_have_two_decimals() {
        let generator = FinancialRecordGenerator::ledger_default();
        for record in produce_n(&generator, "ore", 50) {
            assert_eq!(record.amount.scale(), 2);
            assert!(record.amount > Decimal::ZERO);
        }
    }

    #[test]
    fn test_account_code_matches_kind_pool() {
        let generator = FinancialRecordGenerator::ledger_default();
        for record in produce_n(&generator, "bas", 100) {
            assert!(record
                .kind
                .account_codes()
                .contains(&record.account_code.as_str()));
        }
    }
}
