//! Housing cooperative (bostadsrättsförening) records.

use crate::distribution::{Distribution, DistributionError};
use crate::engine::{EntityProducer, ProduceError};
use crate::rng::SeededRng;
use crate::swedish;
use fixture_core::{EntityValidator, FieldValue, FixtureRow, IntoRow, ValidationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Size class of a cooperative, by apartment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Inclusive apartment-count band for this class.
    pub fn apartment_range(&self) -> (u32, u32) {
        match self {
            Self::Small => (8, 24),
            Self::Medium => (25, 80),
            Self::Large => (81, 250),
        }
    }

    /// Lowercase label used at the persistence boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Age class of a cooperative, by construction year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeClass {
    /// Built before 1950.
    Pre1950,
    /// Miljonprogrammet era, 1950-1975.
    MillionProgram,
    /// 1976-2005.
    Modern,
    /// 2006 and later.
    New,
}

impl AgeClass {
    /// Inclusive construction-year band for this class.
    pub fn year_range(&self) -> (i32, i32) {
        match self {
            Self::Pre1950 => (1900, 1949),
            Self::MillionProgram => (1950, 1975),
            Self::Modern => (1976, 2005),
            Self::New => (2006, 2023),
        }
    }

    /// Lowercase label used at the persistence boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pre1950 => "pre_1950",
            Self::MillionProgram => "million_program",
            Self::Modern => "modern",
            Self::New => "new",
        }
    }
}

/// Nested economy configuration carried by every cooperative.
///
/// Strongly typed through the domain model; serialized to JSON only at the
/// persistence boundary. The fields below are the documented minimal key
/// set; every generated config contains all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooperativeConfig {
    /// Month the fiscal year starts (1-12).
    pub fiscal_year_start_month: u8,

    /// Day of month member fees fall due (1-28).
    pub payment_due_day: u8,

    /// Late-fee interest, percent per year.
    pub late_fee_percent: f64,

    /// Whether the cooperative runs an apartment queue (kösystem).
    pub queue_enabled: bool,
}

/// A housing cooperative record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cooperative {
    pub id: String,
    pub name: String,
    pub org_number: String,
    pub city: String,
    pub postal_code: String,
    pub size_class: SizeClass,
    pub age_class: AgeClass,
    pub construction_year: i32,
    pub apartment_count: u32,
    pub total_area_sqm: f64,
    /// Annual fee per square meter, SEK.
    pub fee_per_sqm: Decimal,
    pub bankgiro: String,
    pub config: CooperativeConfig,
}

/// Typical per-apartment area band, square meters. Cross-field
/// plausibility is best effort; the validator only warns outside it.
const AREA_PER_UNIT_MIN: f64 = 45.0;
const AREA_PER_UNIT_MAX: f64 = 110.0;

/// Produces cooperative records from caller-declared distributions.
pub struct CooperativeGenerator {
    size: Distribution<SizeClass>,
    age: Distribution<AgeClass>,
    locale: Distribution<&'static str>,
}

impl CooperativeGenerator {
    /// Build a generator from explicit distributions; weights per dimension
    /// must sum to 1.0 (enforced by [`Distribution::new`]).
    pub fn new(
        size: Distribution<SizeClass>,
        age: Distribution<AgeClass>,
        locale: Distribution<&'static str>,
    ) -> Self {
        Self { size, age, locale }
    }

    /// A generator with distributions resembling the Swedish BRF stock:
    /// mostly small and medium cooperatives, a miljonprogrammet-heavy age
    /// mix, and locales uniform over the larger cities.
    pub fn brf_default() -> Self {
        let size = Distribution::new(vec![
            (SizeClass::Small, 0.5),
            (SizeClass::Medium, 0.35),
            (SizeClass::Large, 0.15),
        ])
        .expect("static weights sum to 1.0");
        let age = Distribution::new(vec![
            (AgeClass::Pre1950, 0.2),
            (AgeClass::MillionProgram, 0.35),
            (AgeClass::Modern, 0.3),
            (AgeClass::New, 0.15),
        ])
        .expect("static weights sum to 1.0");
        let locale =
            Distribution::uniform(swedish::CITIES.to_vec()).expect("city pool is non-empty");
        Self::new(size, age, locale)
    }

    /// Replace the size distribution.
    pub fn with_size_distribution(
        mut self,
        entries: Vec<(SizeClass, f64)>,
    ) -> Result<Self, DistributionError> {
        self.size = Distribution::new(entries)?;
        Ok(self)
    }

    /// Replace the age distribution.
    pub fn with_age_distribution(
        mut self,
        entries: Vec<(AgeClass, f64)>,
    ) -> Result<Self, DistributionError> {
        self.age = Distribution::new(entries)?;
        Ok(self)
    }
}

impl EntityProducer for CooperativeGenerator {
    type Entity = Cooperative;

    fn produce(&self, rng: &mut SeededRng, index: u64) -> Result<Cooperative, ProduceError> {
        let size_class = *self.size.sample(rng);
        let age_class = *self.age.sample(rng);
        let city = *self.locale.sample(rng);

        let (apt_min, apt_max) = size_class.apartment_range();
        let apartment_count = rng.random_int(apt_min as i64, apt_max as i64) as u32;

        let (year_min, year_max) = age_class.year_range();
        let construction_year = rng.random_int(year_min as i64, year_max as i64) as i32;

        let area_per_unit =
            AREA_PER_UNIT_MIN + rng.next_float() * (AREA_PER_UNIT_MAX - AREA_PER_UNIT_MIN);
        let total_area_sqm = (apartment_count as f64 * area_per_unit * 10.0).round() / 10.0;

        // Annual fee per sqm, SEK. Older stock trends higher.
        let base_fee = match age_class {
            AgeClass::Pre1950 | AgeClass::MillionProgram => (680, 980),
            AgeClass::Modern => (600, 860),
            AgeClass::New => (550, 780),
        };
        let fee_per_sqm = Decimal::new(rng.random_int(base_fee.0, base_fee.1), 0);

        let word = *rng.random_choice(swedish::BRF_NAME_WORDS);
        let name = if index % 7 == 0 {
            // Occasional numbered names, as in real registries.
            format!("Brf {} {}", word, rng.random_int(1, 9))
        } else {
            format!("Brf {word}")
        };

        let config = CooperativeConfig {
            fiscal_year_start_month: *rng.random_choice(&[1u8, 5, 7, 9]),
            payment_due_day: rng.random_int(25, 28) as u8,
            late_fee_percent: *rng.random_choice(&[8.0, 10.0, 12.0]),
            queue_enabled: rng.random_bool(0.3),
        };

        Ok(Cooperative {
            id: rng.next_id(),
            name,
            org_number: swedish::organisationsnummer(rng),
            city: city.to_string(),
            postal_code: swedish::postnummer(rng),
            size_class,
            age_class,
            construction_year,
            apartment_count,
            total_area_sqm,
            fee_per_sqm,
            bankgiro: swedish::bankgiro(rng),
            config,
        })
    }

    fn kind(&self) -> &'static str {
        "cooperative"
    }

    fn unique_key(&self, entity: &Cooperative) -> Option<String> {
        Some(entity.org_number.clone())
    }
}

/// Business rules for cooperative records.
pub struct CooperativeValidator;

impl EntityValidator<Cooperative> for CooperativeValidator {
    fn validate(&self, entity: &Cooperative) -> ValidationResult {
        let mut report = ValidationResult::ok();

        if entity.name.trim().is_empty() {
            report.push_error("name is empty");
        } else if !entity.name.trim().starts_with("Brf ") {
            report.push_warning("name does not carry the Brf prefix");
        }

        if entity.org_number.len() != 11 || !swedish::luhn_valid(&entity.org_number) {
            report.push_error(format!(
                "org number '{}' fails the checksum",
                entity.org_number
            ));
        }

        let postal_ok = entity.postal_code.len() == 6
            && entity.postal_code.as_bytes()[3] == b' '
            && entity
                .postal_code
                .chars()
                .filter(|c| *c != ' ')
                .all(|c| c.is_ascii_digit());
        if !postal_ok && entity.postal_code.chars().filter(|c| c.is_ascii_digit()).count() != 5 {
            report.push_error(format!(
                "postal code '{}' is not five digits",
                entity.postal_code
            ));
        }

        let (apt_min, apt_max) = entity.size_class.apartment_range();
        if !(apt_min..=apt_max).contains(&entity.apartment_count) {
            report.push_error(format!(
                "apartment count {} outside the {} band {}-{}",
                entity.apartment_count,
                entity.size_class.as_str(),
                apt_min,
                apt_max
            ));
        }

        if entity.apartment_count > 0 {
            let per_unit = entity.total_area_sqm / entity.apartment_count as f64;
            if !(30.0..=150.0).contains(&per_unit) {
                report.push_warning(format!(
                    "area per unit {per_unit:.1} sqm outside the typical band"
                ));
            }
        }

        if !(1..=12).contains(&entity.config.fiscal_year_start_month) {
            report.push_error("fiscal year start month outside 1-12");
        }
        if !(1..=28).contains(&entity.config.payment_due_day) {
            report.push_error("payment due day outside 1-28");
        }

        report
    }

    fn sanitize(&self, mut entity: Cooperative) -> Cooperative {
        entity.name = entity.name.trim().to_string();
        entity.city = entity.city.trim().to_string();

        // Normalize "NNNNN" to "NNN NN".
        let digits: String = entity
            .postal_code
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.len() == 5 {
            entity.postal_code = format!("{} {}", &digits[..3], &digits[3..]);
        }

        entity.config.late_fee_percent = entity.config.late_fee_percent.clamp(0.0, 24.0);
        entity
    }
}

impl IntoRow for Cooperative {
    fn into_row(&self, index: u64) -> FixtureRow {
        FixtureRow::new(index)
            .with("id", FieldValue::Text(self.id.clone()))
            .with("name", FieldValue::Text(self.name.clone()))
            .with("org_number", FieldValue::Text(self.org_number.clone()))
            .with("city", FieldValue::Text(self.city.clone()))
            .with("postal_code", FieldValue::Text(self.postal_code.clone()))
            .with(
                "size_class",
                FieldValue::Text(self.size_class.as_str().to_string()),
            )
            .with(
                "age_class",
                FieldValue::Text(self.age_class.as_str().to_string()),
            )
            .with(
                "construction_year",
                FieldValue::Int32(self.construction_year),
            )
            .with(
                "apartment_count",
                FieldValue::Int32(self.apartment_count as i32),
            )
            .with("total_area_sqm", FieldValue::Float64(self.total_area_sqm))
            .with("fee_per_sqm", FieldValue::Decimal(self.fee_per_sqm))
            .with("bankgiro", FieldValue::Text(self.bankgiro.clone()))
            .with(
                "config",
                FieldValue::Json(
                    serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null),
                ),
            )
    }
}
