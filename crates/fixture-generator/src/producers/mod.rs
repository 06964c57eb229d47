//! Domain producers for BRF fixture entities.
//!
//! Each module pairs an entity type with its [`crate::EntityProducer`]
//! implementation and an [`fixture_core::EntityValidator`]. Producers draw
//! every value from the engine's [`crate::SeededRng`] and the caller's
//! declared distributions, so runs are exactly reproducible.

pub mod apartment;
pub mod cooperative;
pub mod financial;
pub mod member;

pub use apartment::{Apartment, ApartmentGenerator, ApartmentValidator};
pub use cooperative::{
    AgeClass, Cooperative, CooperativeConfig, CooperativeGenerator, CooperativeValidator,
    SizeClass,
};
pub use financial::{FinancialRecord, FinancialRecordGenerator, FinancialValidator, RecordKind};
pub use member::{Member, MemberGenerator, MemberValidator};
