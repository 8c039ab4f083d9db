use std::fmt;

use thiserror::Error;

/// Kind of reference record a lookup failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Opportunity,
    Platform,
    User,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Opportunity => write!(f, "Opportunity"),
            Entity::Platform => write!(f, "Platform"),
            Entity::User => write!(f, "User"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum YieldError {
    #[error("{0} not found: {1}")]
    NotFound(Entity, String),
}

impl YieldError {
    pub fn opportunity_not_found(id: impl Into<String>) -> Self {
        YieldError::NotFound(Entity::Opportunity, id.into())
    }

    pub fn platform_not_found(id: impl Into<String>) -> Self {
        YieldError::NotFound(Entity::Platform, id.into())
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        YieldError::NotFound(Entity::User, id.into())
    }
}

pub type YieldResult<T> = Result<T, YieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = YieldError::opportunity_not_found("nope");
        assert_eq!(err.to_string(), "Opportunity not found: nope");

        let err = YieldError::platform_not_found("ghost");
        assert_eq!(err.to_string(), "Platform not found: ghost");
    }
}
