// Copyright (c) 2025 - Cowboy AI, Inc.
//! Agent Identity, Roles, and Roster
//!
//! The roster is static at runtime: agents are provisioned by an external
//! collaborator and never created or destroyed through this crate. Login is a
//! plain name + secret comparison; hardening is out of scope.

use crate::domain::calendar::CalendarId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Display-unique agent identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentName(String);

impl AgentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Role of an agent on the board
///
/// Roles gate state-machine transitions (see `booking::guards`) and the
/// rotation override/pause controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular booking agent attached to one team calendar
    Agent,

    /// Restricted to booking on their own team and the shared calendar, but
    /// holds the rotation pause toggle and override arrows
    Coordinator,

    /// Books on behalf of other agents on the shared calendar (delegate
    /// capture) and manages confirmations there
    Liaison,

    /// Sees every calendar and manages confirmations and rotation overrides
    Admin,
}

/// Roster entry for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: AgentName,

    /// Team affiliation: one of the fixed calendar ids
    pub team: CalendarId,

    /// Display color used for booked slots (CSS hex string)
    pub color: String,

    pub role: Role,

    /// Authentication secret, compared verbatim at login
    pub secret: String,
}

impl AgentProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Login failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    #[error("wrong secret for agent: {0}")]
    WrongSecret(String),
}

/// Static agent roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    agents: BTreeMap<AgentName, AgentProfile>,
}

impl Roster {
    pub fn new(profiles: impl IntoIterator<Item = AgentProfile>) -> Self {
        Self {
            agents: profiles
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
        }
    }

    pub fn get(&self, name: &AgentName) -> Option<&AgentProfile> {
        self.agents.get(name)
    }

    /// All agent names, in stable order (dropdown source)
    pub fn names(&self) -> impl Iterator<Item = &AgentName> {
        self.agents.keys()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Verify a login attempt against the roster
    pub fn verify(&self, name: &AgentName, secret: &str) -> Result<&AgentProfile, LoginError> {
        let profile = self
            .agents
            .get(name)
            .ok_or_else(|| LoginError::UnknownAgent(name.to_string()))?;
        if profile.secret != secret {
            return Err(LoginError::WrongSecret(name.to_string()));
        }
        Ok(profile)
    }
}
