use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductionType {
    Broadway,
    Touring,
    Regional,
}

impl ProductionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broadway => "broadway",
            Self::Touring => "touring",
            Self::Regional => "regional",
        }
    }
}

impl FromStr for ProductionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "broadway" => Ok(Self::Broadway),
            "touring" => Ok(Self::Touring),
            "regional" => Ok(Self::Regional),
            other => Err(format!("Unknown production type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductionStatus {
    Active,
    Upcoming,
    Completed,
}

impl ProductionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for ProductionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            other => Err(format!("Unknown production status: {}", other)),
        }
    }
}

/// Seat availability of a single performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Available,
    SoldOut,
    Limited,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::SoldOut => "sold-out",
            Self::Limited => "limited",
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "sold-out" => Ok(Self::SoldOut),
            "limited" => Ok(Self::Limited),
            other => Err(format!("Unknown availability: {}", other)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(ProductionType, ProductionStatus, Availability);
