//! Hoekeenheden en conversies tussen graden, gon en radialen.
//!
//! Intern rekent de engine uitsluitend in radialen; conversie gebeurt alleen
//! op de invoer- en weergavegrens.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::Serialize;

use super::number;

/// Weergave-eenheid voor hoeken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degree,
    Gon,
    Radian,
}

impl AngleUnit {
    /// Zoekt de eenheid op aan de hand van de naam uit de invoerlaag.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "degree" | "degrees" => Some(Self::Degree),
            "gon" => Some(Self::Gon),
            "radian" | "radians" | "rad" => Some(Self::Radian),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Gon => "gon",
            Self::Radian => "radian",
        }
    }

    /// Converteert een waarde in deze eenheid naar radialen.
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degree => degrees_to_radians(value),
            Self::Gon => gon_to_radians(value),
            Self::Radian => value,
        }
    }

    /// Converteert een waarde in radialen terug naar deze eenheid.
    #[must_use]
    pub fn from_radians(self, value: f64) -> f64 {
        match self {
            Self::Degree => radians_to_degrees(value),
            Self::Gon => radians_to_gon(value),
            Self::Radian => value,
        }
    }

    fn suffix(self, latex: bool) -> &'static str {
        match (self, latex) {
            (Self::Degree, false) => "\u{b0}",
            (Self::Degree, true) => "^{\\circ}",
            (Self::Gon, false) => " gon",
            (Self::Gon, true) => "\\text{ gon}",
            (Self::Radian, false) => " rad",
            (Self::Radian, true) => "\\text{ rad}",
        }
    }
}

#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    PI * degrees / 180.0
}

#[must_use]
pub fn gon_to_radians(gon: f64) -> f64 {
    PI * gon / 200.0
}

#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    180.0 * radians / PI
}

#[must_use]
pub fn radians_to_gon(radians: f64) -> f64 {
    200.0 * radians / PI
}

/// Converteert van de eenheid naar radialen; `None` ("onbekend") blijft `None`.
#[must_use]
pub fn convert(value: Option<f64>, unit: AngleUnit) -> Option<f64> {
    value.map(|v| unit.to_radians(v))
}

/// Converteert van radialen terug naar de eenheid; `None` blijft `None`.
#[must_use]
pub fn convert_back(value: Option<f64>, unit: AngleUnit) -> Option<f64> {
    value.map(|v| unit.from_radians(v))
}

/// Formatteert een radiaalwaarde in de weergave-eenheid, inclusief suffix.
///
/// Met `latex` wordt de suffixvorm gebruikt die in de vergelijkingsweergave
/// ingebed kan worden.
#[must_use]
pub fn format_angle(radians: f64, unit: AngleUnit, decimals: usize, latex: bool) -> String {
    let converted = unit.from_radians(radians);
    format!("{}{}", number::format(converted, decimals), unit.suffix(latex))
}

#[must_use]
pub fn is_acute(radians: f64) -> bool {
    radians < FRAC_PI_2
}

#[must_use]
pub fn is_obtuse(radians: f64) -> bool {
    radians > FRAC_PI_2
}
