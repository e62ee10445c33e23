// Copyright (c) 2025 - Cowboy AI, Inc.
//! Board Configuration
//!
//! Static configuration for one office: the bookable calendars, the slot
//! grid, and the duty rotation. Defaults describe the production office;
//! tests build smaller configs by hand.

use crate::domain::{AgentName, AgentProfile, CalendarId, Role, Roster, SlotTime};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// First working day of the duty rotation
const ROTATION_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("rotation epoch is a valid date"),
};

/// Agents cycling through office service duty, in rotation order
const SERVICE_AGENTS: &[&str] = &[
    "Scarlat",
    "Cristina",
    "Dida",
    "Mihaela",
    "Catalina",
    "George",
    "Andreea",
    "Cosmina",
    "Florin",
    "Valentina P",
    "Larisa",
    "Voicu",
];

/// Agents in the teambuilding pot
const TEAMBUILDING_PARTICIPANTS: &[&str] = &[
    "Claudiu",
    "Voicu",
    "Cosmina",
    "Cristina",
    "Andreea",
    "George",
    "Florin",
    "Mihaela",
    "Scarlat",
    "Catalina",
    "Adriana",
    "Andrei",
    "Niki",
    "Valentina P",
    "Alin M",
];

/// The production roster: (name, team, color, role, secret)
const ROSTER: &[(&str, &str, &str, Role, &str)] = &[
    ("Andreea", "Andreea", "#FFA500", Role::Agent, "motivatie25"),
    ("Claudiu", "Andreea", "#008000", Role::Coordinator, "perseverenta25"),
    ("Cosmina", "Andreea", "#FFC107", Role::Agent, "ambitie25"),
    ("Monica", "Andreea", "#8E44AD", Role::Agent, "floare12"),
    ("Valentina", "Andreea", "#F39C12", Role::Agent, "soare27"),
    ("Cristina", "Cristina", "#FF69B4", Role::Agent, "piatra34"),
    ("Florin", "Cristina", "#1E90FF", Role::Agent, "mar07"),
    ("Larisa", "Cristina", "#20B2AA", Role::Agent, "larisaPass"),
    ("Voicu", "Cristina", "#3498DB", Role::Agent, "cerul22"),
    ("Sorina", "Cristina", "#E67E22", Role::Agent, "carte19"),
    ("Adriana", "Cristina", "#2ECC71", Role::Agent, "nor05"),
    ("Dida", "Cristina", "#A569BD", Role::Agent, "nuc08"),
    ("Catalina", "Cristina", "#D35400", Role::Liaison, "catalinaPass"),
    ("Scarlat", "Scarlat", "#2C3E50", Role::Agent, "munte17"),
    ("Mihaela", "Scarlat", "#C0392B", Role::Agent, "ploaie14"),
    ("Andrei", "Scarlat", "#7F8C8D", Role::Agent, "luna30"),
    ("Niki", "Scarlat", "#16A085", Role::Agent, "frunza09"),
    ("George", "Scarlat", "#8E44AD", Role::Agent, "georgePass"),
    ("Alin", "Admin", "#000000", Role::Admin, "sefulabani"),
];

/// Duty rotation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    /// First working day of the cycle; the first agent in the sequence is
    /// on duty that day
    pub epoch: NaiveDate,

    pub sequence: Vec<AgentName>,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            epoch: ROTATION_EPOCH,
            sequence: SERVICE_AGENTS.iter().map(|a| AgentName::new(*a)).collect(),
        }
    }
}

/// Bookable slot grid, shared by every calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotGridConfig {
    pub start: SlotTime,

    /// Last bookable slot, inclusive
    pub end: SlotTime,

    pub interval_minutes: u32,
}

impl SlotGridConfig {
    /// All bookable slot times, start through end inclusive
    pub fn slots(&self) -> Vec<SlotTime> {
        let mut slots = Vec::new();
        let mut cursor = Some(self.start);
        while let Some(time) = cursor {
            if time > self.end {
                break;
            }
            slots.push(time);
            cursor = time.advanced_by(self.interval_minutes);
        }
        slots
    }
}

impl Default for SlotGridConfig {
    fn default() -> Self {
        Self {
            start: SlotTime::hm(9, 30),
            end: SlotTime::hm(16, 0),
            interval_minutes: 30,
        }
    }
}

/// Full board configuration for one office
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Per-team calendars
    pub team_calendars: Vec<CalendarId>,

    /// The shared calendar everyone may book on
    pub shared_calendar: CalendarId,

    /// Display name of the shared calendar
    pub shared_calendar_name: String,

    /// Selection id of the duty-roster view; never a booking target
    pub duty_view_id: String,

    pub rotation: RotationConfig,

    pub slot_grid: SlotGridConfig,

    pub roster: Roster,

    /// Agents tracked by the teambuilding contribution ledger
    pub teambuilding_participants: Vec<AgentName>,
}

impl BoardConfig {
    /// Every calendar holding appointment documents
    pub fn all_calendars(&self) -> Vec<CalendarId> {
        let mut calendars = self.team_calendars.clone();
        calendars.push(self.shared_calendar.clone());
        calendars
    }

    /// Is `id` a calendar appointments can be booked on?
    pub fn is_bookable(&self, id: &CalendarId) -> bool {
        *id == self.shared_calendar || self.team_calendars.contains(id)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            team_calendars: vec![
                CalendarId::new("Andreea"),
                CalendarId::new("Cristina"),
                CalendarId::new("Scarlat"),
            ],
            shared_calendar: CalendarId::new("SHARED_CREDIT"),
            shared_calendar_name: "Stergere birou de credit".to_string(),
            duty_view_id: "AGENT_SERVICIU".to_string(),
            rotation: RotationConfig::default(),
            slot_grid: SlotGridConfig::default(),
            roster: Roster::new(ROSTER.iter().map(|(name, team, color, role, secret)| {
                AgentProfile {
                    name: AgentName::new(*name),
                    team: CalendarId::new(*team),
                    color: color.to_string(),
                    role: *role,
                    secret: secret.to_string(),
                }
            })),
            teambuilding_participants: TEAMBUILDING_PARTICIPANTS
                .iter()
                .map(|a| AgentName::new(*a))
                .collect(),
        }
    }
}
