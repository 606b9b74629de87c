use std::fmt;
use strum_macros::EnumIter;

/// Coarse mission stage derived from the altitude history.
///
/// The derived `Ord` follows declaration order; a session only ever moves
/// forward through it.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, EnumIter)]
pub enum FlightPhase {
    PreLaunch,
    Ascending,
    Stratosphere,
    Descending,
}

impl From<&str> for FlightPhase {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "ascending" => FlightPhase::Ascending,
            "stratosphere" => FlightPhase::Stratosphere,
            "descending" => FlightPhase::Descending,
            _ => FlightPhase::PreLaunch, // TODO: conversion error should be logged
        }
    }
}

impl From<FlightPhase> for &'static str {
    fn from(value: FlightPhase) -> Self {
        match value {
            FlightPhase::PreLaunch => "pre-launch",
            FlightPhase::Ascending => "ascending",
            FlightPhase::Stratosphere => "stratosphere",
            FlightPhase::Descending => "descending",
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", <&'static str>::from(*self))
    }
}
