//! Apartment (bostadsrätt) records.

use crate::engine::{EntityProducer, ProduceError};
use crate::rng::SeededRng;
use crate::swedish;
use fixture_core::{EntityValidator, FieldValue, FixtureRow, IntoRow, ValidationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An apartment within a cooperative building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: String,
    /// Building letter within the cooperative.
    pub building: String,
    /// Lägenhetsnummer per the Lantmäteriet convention.
    pub apartment_number: String,
    pub floor: i32,
    /// Room count in Swedish half-room notation (1.0, 1.5, 2.0, ...).
    pub rooms: f64,
    pub area_sqm: f64,
    /// Monthly fee (avgift), SEK.
    pub monthly_fee: Decimal,
    /// Ownership share of the cooperative, percent.
    pub share_percent: f64,
}

/// Produces apartment records.
#[derive(Default)]
pub struct ApartmentGenerator;

const ROOM_CHOICES: &[f64] = &[1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0];

impl EntityProducer for ApartmentGenerator {
    type Entity = Apartment;

    fn produce(&self, rng: &mut SeededRng, _index: u64) -> Result<Apartment, ProduceError> {
        let building = *rng.random_choice(&["A", "B", "C", "D", "E", "F"]);
        let floor = rng.random_int(0, 9);
        let position = rng.random_int(1, 6);

        let rooms = *rng.random_choice(ROOM_CHOICES);
        // Area tracks the room count with some spread.
        let base_area = 14.0 + rooms * 16.0;
        let area_sqm = ((base_area + rng.next_float() * 14.0) * 10.0).round() / 10.0;

        // Avgift roughly 55-75 SEK per sqm and month.
        let fee_per_sqm = rng.random_int(55, 75);
        let monthly_fee = Decimal::new((area_sqm * fee_per_sqm as f64).round() as i64, 0);

        let share_percent = ((0.2 + rng.next_float() * 2.3) * 1000.0).round() / 1000.0;

        Ok(Apartment {
            id: rng.next_id(),
            building: building.to_string(),
            apartment_number: swedish::lagenhetsnummer(floor as u32, position as u32),
            floor: floor as i32,
            rooms,
            area_sqm,
            monthly_fee,
            share_percent,
        })
    }

    fn kind(&self) -> &'static str {
        "apartment"
    }

    fn unique_key(&self, entity: &Apartment) -> Option<String> {
        Some(format!("{}-{}", entity.building, entity.apartment_number))
    }
}

/// Business rules for apartment records.
pub struct ApartmentValidator;

impl EntityValidator<Apartment> for ApartmentValidator {
    fn validate(&self, entity: &Apartment) -> ValidationResult {
        let mut report = ValidationResult::ok();

        if entity.building.trim().is_empty() {
            report.push_error("building is empty");
        }
        if !ROOM_CHOICES.contains(&entity.rooms) {
            report.push_error(format!("room count {} is not a half-room step", entity.rooms));
        }
        if entity.area_sqm < 10.0 || entity.area_sqm > 250.0 {
            report.push_error(format!("area {} sqm outside 10-250", entity.area_sqm));
        }
        if entity.monthly_fee.is_sign_negative() {
            report.push_error("monthly fee is negative");
        }
        if !(0.0..=10.0).contains(&entity.share_percent) {
            report.push_warning(format!(
                "ownership share {}% outside the typical band",
                entity.share_percent
            ));
        }

        report
    }

    fn sanitize(&self, mut entity: Apartment) -> Apartment {
        entity.building = entity.building.trim().to_uppercase();
        entity
    }
}

impl IntoRow for Apartment {
    fn into_row(&self, index: u64) -> FixtureRow {
        FixtureRow::new(index)
            .with("id", FieldValue::Text(self.id.clone()))
            .with("building", FieldValue::Text(self.building.clone()))
            .with(
                "apartment_number",
                FieldValue::Text(self.apartment_number.clone()),
            )
            .with("floor", FieldValue::Int32(self.floor))
            .with("rooms", FieldValue::Float64(self.rooms))
            .with("area_sqm", FieldValue::Float64(self.area_sqm))
            .with("monthly_fee", FieldValue::Decimal(self.monthly_fee))
            .with("share_percent", FieldValue::Float64(self.share_percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produce_n(seed: &str, n: u64) -> Vec<Apartment> {
        let generator = ApartmentGenerator;
        let mut rng = SeededRng::new(seed);
        (0..n)
            .map(|i| generator.produce(&mut rng, i).unwrap())
            .collect()
    }

    #[test]
    fn test_deterministic_production() {
        assert_eq!(produce_n("det", 40), produce_n("det", 40));
    }

    #[test]
    fn test_produced_apartments_pass_validation() {
        let validator = ApartmentValidator;
        for apartment in produce_n("valid", 100) {
            let report = validator.validate(&apartment);
            assert!(
                report.is_valid,
                "rejected {apartment:?}: {:?}",
                report.errors
            );
        }
    }

    #[test]
    fn test_area_tracks_rooms() {
        for apartment in produce_n("area", 100) {
            let floor_area = 14.0 + apartment.rooms * 16.0;
            assert!(apartment.area_sqm >= floor_area - 0.1);
            assert!(apartment.area_sqm <= floor_area + 14.1);
        }
    }

    #[test]
    fn test_unique_key_combines_building_and_number() {
        let generator = ApartmentGenerator;
        let apartment = produce_n("key", 1).remove(0);
        let key = generator.unique_key(&apartment).unwrap();
        assert!(key.starts_with(&apartment.building));
        assert!(key.ends_with(&apartment.apartment_number));
    }
}
