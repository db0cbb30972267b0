use crate::domain::commands::injections::LogInjectionCommand;
use crate::domain::models::injection::{
    Injection as DomainInjection, InjectionSite as DomainInjectionSite,
};
use shared::{
    Injection as SharedInjection, InjectionSite as SharedInjectionSite, LogInjectionRequest,
};

pub struct InjectionMapper;

impl InjectionMapper {
    pub fn to_command(request: LogInjectionRequest) -> LogInjectionCommand {
        LogInjectionCommand {
            date: request.date,
            time: request.time,
            dosage_mg: request.dosage_mg,
            weight_lbs: request.weight_lbs,
            site: request.site,
            notes: request.notes,
            user: request.user,
        }
    }

    pub fn to_dto(domain: DomainInjection) -> SharedInjection {
        SharedInjection {
            date: domain.date.map(|date| date.format("%Y-%m-%d").to_string()),
            time: domain.time.map(|time| time.format("%H:%M:%S").to_string()),
            dosage_mg: domain.dosage_mg,
            dose_units: domain.dose_units(),
            weight_lbs: domain.weight_lbs,
            site: Self::to_dto_site(domain.site),
            notes: domain.notes,
            user: domain.user,
        }
    }

    fn to_dto_site(site: DomainInjectionSite) -> SharedInjectionSite {
        match site {
            DomainInjectionSite::Unspecified => SharedInjectionSite::Unspecified,
            DomainInjectionSite::Abdomen => SharedInjectionSite::Abdomen,
            DomainInjectionSite::Thigh => SharedInjectionSite::Thigh,
            DomainInjectionSite::UpperArm => SharedInjectionSite::UpperArm,
            DomainInjectionSite::Other => SharedInjectionSite::Other,
        }
    }
}
