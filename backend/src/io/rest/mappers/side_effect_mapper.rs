use crate::domain::commands::side_effects::LogSideEffectCommand;
use crate::domain::models::side_effect::SideEffect as DomainSideEffect;
use shared::{LogSideEffectRequest, SideEffect as SharedSideEffect};

pub struct SideEffectMapper;

impl SideEffectMapper {
    pub fn to_command(request: LogSideEffectRequest) -> LogSideEffectCommand {
        LogSideEffectCommand {
            date: request.date,
            notes: request.notes,
            user: request.user,
        }
    }

    pub fn to_dto(domain: DomainSideEffect) -> SharedSideEffect {
        SharedSideEffect {
            date: domain.date.map(|date| date.format("%Y-%m-%d").to_string()),
            notes: domain.notes,
            user: domain.user,
        }
    }
}
