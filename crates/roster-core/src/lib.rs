//! Core types for the Roster people widget.
//!
//! This crate has no browser dependency:
//! - The person model and list building: [`Person`], [`people_from_json`]
//! - Row markup: [`PersonRow`]
//! - Form validation: [`validate_username`]

mod error;
mod person;
mod row;
mod validation;

pub use error::{PersonError, ValidationError, INVALID_USERNAME_MESSAGE};
pub use person::{
    people_from_json, people_from_value, BodyEncoding, NewPerson, Person, PersonId, PersonRecord,
};
pub use row::{escape_html, row_element_id, PersonRow, DELETE_LABEL, ROW_ID_PREFIX};
pub use validation::{validate_username, ValidationResult};
