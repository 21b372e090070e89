//! Interactive wizard that authors OpenAPI fragments as YAML: models,
//! request/response schemas and path operations.
//!
//! The heart is [`model::Property`] and its recursive reader
//! [`Property::read_all`](model::Property::read_all), which asks the
//! [`prompt::Prompter`] for one field at a time and applies the gates in
//! [`policy`]. The [`builder`]s wrap it into whole documents and write them
//! with [`emit`].

pub mod browse;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;
pub mod model;
pub mod policy;
pub mod property;
pub mod prompt;
pub mod reference;
pub mod validate;

pub use catalog::{HttpMethod, Kind, Mode};
pub use config::Config;
pub use error::{Result, WizardError};
pub use model::Property;
