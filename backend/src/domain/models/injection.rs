//! Domain model for a logged injection.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::UNITS_PER_MG;

/// Body site an injection was administered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectionSite {
    /// No site was recorded
    Unspecified,
    Abdomen,
    Thigh,
    UpperArm,
    Other,
}

impl InjectionSite {
    /// Label as it appears in stored rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            InjectionSite::Unspecified => "",
            InjectionSite::Abdomen => "Abdomen",
            InjectionSite::Thigh => "Thigh",
            InjectionSite::UpperArm => "Upper Arm",
            InjectionSite::Other => "Other",
        }
    }

    /// Read a stored label leniently; anything unrecognized becomes `Other`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            InjectionSite::Unspecified
        } else if label.eq_ignore_ascii_case("abdomen") {
            InjectionSite::Abdomen
        } else if label.eq_ignore_ascii_case("thigh") {
            InjectionSite::Thigh
        } else if label.eq_ignore_ascii_case("upper arm") {
            InjectionSite::UpperArm
        } else {
            InjectionSite::Other
        }
    }

    /// Strict parse used when validating a submitted form.
    pub fn parse_strict(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            Some(InjectionSite::Unspecified)
        } else if label.eq_ignore_ascii_case("abdomen") {
            Some(InjectionSite::Abdomen)
        } else if label.eq_ignore_ascii_case("thigh") {
            Some(InjectionSite::Thigh)
        } else if label.eq_ignore_ascii_case("upper arm") {
            Some(InjectionSite::UpperArm)
        } else if label.eq_ignore_ascii_case("other") {
            Some(InjectionSite::Other)
        } else {
            None
        }
    }
}

/// One injection record as it exists in storage.
///
/// Every value-carrying field is optional: stored rows can be missing or
/// unreadable per field, and a bad field never discards the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injection {
    /// Calendar date; None when the stored value could not be read as a date
    pub date: Option<NaiveDate>,
    /// Time of day; None when not recorded
    pub time: Option<NaiveTime>,
    /// Dose in milligrams; None when missing or unreadable
    pub dosage_mg: Option<f64>,
    /// Body weight in pounds; None when missing or unreadable
    pub weight_lbs: Option<f64>,
    pub site: InjectionSite,
    pub notes: String,
    /// Person the record belongs to; None means the row predates per-person tracking
    pub user: Option<String>,
}

impl Injection {
    /// Dose expressed in pen dial units (1 mg = 8 units).
    pub fn dose_units(&self) -> Option<f64> {
        self.dosage_mg.map(|mg| mg * UNITS_PER_MG)
    }

    /// Whether this record should show up for the given user filter.
    /// Records without a user belong to everyone.
    pub fn belongs_to(&self, user: Option<&str>) -> bool {
        match user {
            None => true,
            Some(user) => self.user.as_deref().map_or(true, |record_user| record_user == user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_label_round_trip() {
        for site in [
            InjectionSite::Unspecified,
            InjectionSite::Abdomen,
            InjectionSite::Thigh,
            InjectionSite::UpperArm,
            InjectionSite::Other,
        ] {
            assert_eq!(InjectionSite::from_label(site.as_str()), site);
        }
    }

    #[test]
    fn test_unknown_site_label_becomes_other() {
        assert_eq!(InjectionSite::from_label("forearm"), InjectionSite::Other);
        assert_eq!(InjectionSite::parse_strict("forearm"), None);
    }

    #[test]
    fn test_site_labels_are_case_insensitive() {
        assert_eq!(InjectionSite::from_label("upper arm"), InjectionSite::UpperArm);
        assert_eq!(InjectionSite::parse_strict("THIGH"), Some(InjectionSite::Thigh));
    }

    #[test]
    fn test_dose_units_conversion() {
        let injection = Injection {
            date: None,
            time: None,
            dosage_mg: Some(2.5),
            weight_lbs: None,
            site: InjectionSite::Unspecified,
            notes: String::new(),
            user: None,
        };
        assert_eq!(injection.dose_units(), Some(20.0));
    }

    #[test]
    fn test_record_without_user_belongs_to_everyone() {
        let mut injection = Injection {
            date: None,
            time: None,
            dosage_mg: None,
            weight_lbs: None,
            site: InjectionSite::Unspecified,
            notes: String::new(),
            user: None,
        };
        assert!(injection.belongs_to(None));
        assert!(injection.belongs_to(Some("James")));

        injection.user = Some("Shannon".to_string());
        assert!(injection.belongs_to(None));
        assert!(injection.belongs_to(Some("Shannon")));
        assert!(!injection.belongs_to(Some("James")));
    }
}
