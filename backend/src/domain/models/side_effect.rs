//! Domain model for a logged side-effect observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One side-effect record as it exists in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideEffect {
    /// Calendar date; None when the stored value could not be read as a date
    pub date: Option<NaiveDate>,
    /// Free-text description of the symptoms
    pub notes: String,
    /// Person the record belongs to; None means the row predates per-person tracking
    pub user: Option<String>,
}

impl SideEffect {
    /// Whether this record should show up for the given user filter.
    /// Records without a user belong to everyone.
    pub fn belongs_to(&self, user: Option<&str>) -> bool {
        match user {
            None => true,
            Some(user) => self.user.as_deref().map_or(true, |record_user| record_user == user),
        }
    }
}
