//! Cooperative member records.

use crate::engine::{EntityProducer, ProduceError};
use crate::rng::SeededRng;
use crate::swedish;
use chrono::NaiveDate;
use fixture_core::{EntityValidator, FieldValue, FixtureRow, IntoRow, ValidationResult};
use serde::{Deserialize, Serialize};

/// A member of a housing cooperative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub personnummer: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Lägenhetsnummer of the member's apartment.
    pub apartment_number: String,
    pub move_in_date: NaiveDate,
    pub is_board_member: bool,
}

/// Produces member records.
pub struct MemberGenerator {
    board_probability: f64,
}

impl Default for MemberGenerator {
    fn default() -> Self {
        // Roughly one board seat per ten members.
        Self {
            board_probability: 0.1,
        }
    }
}

impl MemberGenerator {
    /// Override the probability a member sits on the styrelse.
    pub fn with_board_probability(mut self, probability: f64) -> Self {
        self.board_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl EntityProducer for MemberGenerator {
    type Entity = Member;

    fn produce(&self, rng: &mut SeededRng, index: u64) -> Result<Member, ProduceError> {
        let first_name = *rng.random_choice(swedish::FIRST_NAMES);
        let last_name = *rng.random_choice(swedish::LAST_NAMES);
        let email = format!(
            "{}.{}{}@example.se",
            swedish::ascii_fold(first_name),
            swedish::ascii_fold(last_name),
            index
        );

        let floor = rng.random_int(0, 7) as u32;
        let position = rng.random_int(1, 4) as u32;

        let year = rng.random_int(1992, 2024) as i32;
        let month = rng.random_int(1, 12) as u32;
        let day = rng.random_int(1, 28) as u32;
        let move_in_date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ProduceError::new(format!("invalid date {year}-{month}-{day}")))?;

        Ok(Member {
            id: rng.next_id(),
            personnummer: swedish::personnummer(rng),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            apartment_number: swedish::lagenhetsnummer(floor, position),
            move_in_date,
            is_board_member: rng.random_bool(self.board_probability),
        })
    }

    fn kind(&self) -> &'static str {
        "member"
    }

    fn unique_key(&self, entity: &Member) -> Option<String> {
        Some(entity.personnummer.clone())
    }
}

/// Business rules for member records.
pub struct MemberValidator;

impl EntityValidator<Member> for MemberValidator {
    fn validate(&self, entity: &Member) -> ValidationResult {
        let mut report = ValidationResult::ok();

        if entity.first_name.trim().is_empty() || entity.last_name.trim().is_empty() {
            report.push_error("member name is empty");
        }

        if entity.personnummer.len() != 11 || !swedish::luhn_valid(&entity.personnummer) {
            report.push_error(format!(
                "personnummer '{}' fails the checksum",
                entity.personnummer
            ));
        }

        if !entity.email.contains('@') {
            report.push_error(format!("email '{}' has no @", entity.email));
        }

        if entity.apartment_number.len() != 4
            || !entity.apartment_number.chars().all(|c| c.is_ascii_digit())
        {
            report.push_warning(format!(
                "apartment number '{}' is not a four-digit lägenhetsnummer",
                entity.apartment_number
            ));
        }

        report
    }

    fn sanitize(&self, mut entity: Member) -> Member {
        entity.first_name = entity.first_name.trim().to_string();
        entity.last_name = entity.last_name.trim().to_string();
        entity.email = entity.email.trim().to_lowercase();
        entity
    }
}

impl IntoRow for Member {
    fn into_row(&self, index: u64) -> FixtureRow {
        FixtureRow::new(index)
            .with("id", FieldValue::Text(self.id.clone()))
            .with("personnummer", FieldValue::Text(self.personnummer.clone()))
            .with("first_name", FieldValue::Text(self.first_name.clone()))
            .with("last_name", FieldValue::Text(self.last_name.clone()))
            .with("email", FieldValue::Text(self.email.clone()))
            .with(
                "apartment_number",
                FieldValue::Text(self.apartment_number.clone()),
            )
            .with("move_in_date", FieldValue::Date(self.move_in_date))
            .with("is_board_member", FieldValue::Bool(self.is_board_member))
    }
}
