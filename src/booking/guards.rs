// Copyright (c) 2025 - Cowboy AI, Inc.
//! Role Guards
//!
//! Pure predicates deciding who may do what. The services call these before
//! touching storage, so every permission rule lives in one place.

use crate::domain::{AgentProfile, Appointment, CalendarId, Role};

/// May `actor` create a booking on `calendar`?
///
/// The shared calendar is writable by everyone. Coordinators are otherwise
/// restricted to their own team; admins and regular agents may book on any
/// team calendar.
pub fn can_book(actor: &AgentProfile, calendar: &CalendarId, shared: &CalendarId) -> bool {
    if calendar == shared {
        return true;
    }
    match actor.role {
        Role::Coordinator => actor.team == *calendar,
        _ => true,
    }
}

/// Liaison bookings on the shared calendar go through delegate capture
pub fn requires_delegate_capture(actor: &AgentProfile, calendar: &CalendarId, shared: &CalendarId) -> bool {
    actor.role == Role::Liaison && calendar == shared
}

/// Only the booking agent may cancel their appointment
pub fn can_cancel(actor: &AgentProfile, appointment: &Appointment) -> bool {
    appointment.agent_name == actor.name
}

/// May `actor` toggle the confirmation flag on `appointment`?
///
/// The owner always can. Admins can everywhere; the liaison manages
/// confirmations on the shared calendar regardless of owner.
pub fn can_toggle_confirmation(
    actor: &AgentProfile,
    appointment: &Appointment,
    calendar: &CalendarId,
    shared: &CalendarId,
) -> bool {
    appointment.agent_name == actor.name
        || actor.role == Role::Admin
        || (actor.role == Role::Liaison && calendar == shared)
}

/// May `actor` step the duty rotation with the override arrows?
pub fn can_override_rotation(actor: &AgentProfile) -> bool {
    matches!(actor.role, Role::Admin | Role::Coordinator)
}

/// May `actor` pause and resume the duty rotation?
pub fn can_toggle_pause(actor: &AgentProfile) -> bool {
    actor.role == Role::Coordinator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgentName, SlotTime};
    use chrono::Utc;
    use test_case::test_case;

    fn profile(name: &str, team: &str, role: Role) -> AgentProfile {
        AgentProfile {
            name: AgentName::new(name),
            team: CalendarId::new(team),
            color: "#808080".to_string(),
            role,
            secret: String::new(),
        }
    }

    fn appointment(owner: &str) -> Appointment {
        Appointment {
            agent_name: AgentName::new(owner),
            color: "#808080".to_string(),
            time: SlotTime::hm(9, 30),
            is_confirmed: false,
            created_at: Utc::now(),
            selected_agent: None,
            client_name: None,
        }
    }

    fn shared() -> CalendarId {
        CalendarId::new("SHARED_CREDIT")
    }

    #[test_case(Role::Agent, "Cristina", true; "agent books on other teams")]
    #[test_case(Role::Admin, "Cristina", true; "admin books anywhere")]
    #[test_case(Role::Coordinator, "Andreea", true; "coordinator books on own team")]
    #[test_case(Role::Coordinator, "Cristina", false; "coordinator blocked on other teams")]
    fn booking_permissions(role: Role, calendar: &str, expected: bool) {
        let actor = profile("X", "Andreea", role);
        assert_eq!(
            can_book(&actor, &CalendarId::new(calendar), &shared()),
            expected
        );
    }

    #[test]
    fn shared_calendar_is_open_to_everyone() {
        for role in [Role::Agent, Role::Coordinator, Role::Liaison, Role::Admin] {
            let actor = profile("X", "Andreea", role);
            assert!(can_book(&actor, &shared(), &shared()));
        }
    }

    #[test]
    fn liaison_capture_applies_only_on_shared() {
        let liaison = profile("Catalina", "Cristina", Role::Liaison);
        assert!(requires_delegate_capture(&liaison, &shared(), &shared()));
        assert!(!requires_delegate_capture(
            &liaison,
            &CalendarId::new("Cristina"),
            &shared()
        ));
        let agent = profile("Dida", "Cristina", Role::Agent);
        assert!(!requires_delegate_capture(&agent, &shared(), &shared()));
    }

    #[test]
    fn only_the_owner_cancels() {
        let owner = profile("Dida", "Cristina", Role::Agent);
        let admin = profile("Alin", "Cristina", Role::Admin);
        let appt = appointment("Dida");
        assert!(can_cancel(&owner, &appt));
        assert!(!can_cancel(&admin, &appt));
    }

    #[test]
    fn confirmation_rights() {
        let appt = appointment("Dida");
        let team = CalendarId::new("Cristina");

        let owner = profile("Dida", "Cristina", Role::Agent);
        let other = profile("Florin", "Cristina", Role::Agent);
        let admin = profile("Alin", "Cristina", Role::Admin);
        let liaison = profile("Catalina", "Cristina", Role::Liaison);

        assert!(can_toggle_confirmation(&owner, &appt, &team, &shared()));
        assert!(!can_toggle_confirmation(&other, &appt, &team, &shared()));
        assert!(can_toggle_confirmation(&admin, &appt, &team, &shared()));
        // liaison only on the shared calendar
        assert!(!can_toggle_confirmation(&liaison, &appt, &team, &shared()));
        assert!(can_toggle_confirmation(&liaison, &appt, &shared(), &shared()));
    }

    #[test]
    fn rotation_controls() {
        let coordinator = profile("Claudiu", "Andreea", Role::Coordinator);
        let admin = profile("Alin", "Andreea", Role::Admin);
        let agent = profile("Dida", "Cristina", Role::Agent);

        assert!(can_override_rotation(&coordinator));
        assert!(can_override_rotation(&admin));
        assert!(!can_override_rotation(&agent));

        assert!(can_toggle_pause(&coordinator));
        assert!(!can_toggle_pause(&admin));
        assert!(!can_toggle_pause(&agent));
    }
}
