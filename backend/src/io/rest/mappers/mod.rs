//! Mappers between the public DTOs in `shared` and the domain types.

pub mod analytics_mapper;
pub mod injection_mapper;
pub mod side_effect_mapper;
