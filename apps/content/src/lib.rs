//! Portfolio content model shared by the API server and the admin client.
//!
//! Every admin-editable section of the portfolio is a [`Resource`]: either an
//! ordered collection or a singleton document. Writes always carry the whole
//! resource, so validation here works on complete payloads.

pub mod models;
pub mod resource;
pub mod secret;

pub use models::{
    About, AboutRole, Achievement, Certification, ContactInfo, Education, Experience, Project,
    Service, Skill, SkillGroup,
};
pub use resource::{
    validate_collection, validate_singleton, Resource, ResourceKind, ValidationError,
};
pub use secret::secrets_match;
