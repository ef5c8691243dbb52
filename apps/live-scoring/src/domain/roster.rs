//! Team sheets supplied by the roster provider.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub type PlayerId = u32;

/// Which of the two sides in a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Team1 => 0,
            Side::Team2 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Batsman,
    Bowler,
    AllRounder,
    Wicketkeeper,
}

impl Role {
    /// Only bowlers and all-rounders are offered the ball.
    pub fn can_bowl(self) -> bool {
        matches!(self, Role::Bowler | Role::AllRounder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batting_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowling_style: Option<String>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            batting_style: None,
            bowling_style: None,
        }
    }
}

/// A side's name and its ordered playing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub name: String,
    pub players: Vec<Player>,
}

impl TeamSheet {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn bowlers(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.role.can_bowl())
    }

    /// A sheet needs a name, two openers, and unique player ids.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidRoster,
                "Team name must not be blank",
            ));
        }
        if self.players.len() < 2 {
            return Err(DomainError::validation(
                ValidationKind::InvalidRoster,
                format!("{} needs at least two players", self.name),
            ));
        }
        let mut ids = HashSet::with_capacity(self.players.len());
        for p in &self.players {
            if !ids.insert(p.id) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidRoster,
                    format!("{} lists player id {} twice", self.name, p.id),
                ));
            }
        }
        Ok(())
    }
}
