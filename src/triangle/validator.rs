//! Validatie van de ruwe invoer en van het opgeloste resultaat.

use serde::Serialize;
use thiserror::Error;

use super::{Triangle, Var, solver};

/// Absolute tolerantie (radialen) voor de consistentiecontrole na het
/// oplossen.
pub const SOLUTION_TOLERANCE: f64 = 0.01;

/// Foutcategorieën; de weergavetekst is de melding voor de invoerlaag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("er moeten 3 waarden opgegeven worden; vul 3 van de invoervelden in")]
    NotEnoughInputs,
    #[error("er mogen maar 3 waarden opgegeven worden; laat de overige invoervelden leeg")]
    TooManyInputs,
    #[error("ten minste één zijde moet opgegeven worden")]
    NoSidesGiven,
    #[error("alleen getallen groter dan nul zijn geldig als zijde")]
    InvalidSide,
    #[error("alleen getallen groter dan nul en kleiner dan de gestrekte hoek zijn geldig als hoek")]
    InvalidAngle,
    #[error("de opgegeven waarden vormen geen geldige driehoek")]
    InconsistentTriangle,
}

/// Geldigheid per naamplaats; `None` betekent "niet opgegeven".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotFlags {
    pub a: Option<bool>,
    pub b: Option<bool>,
    pub c: Option<bool>,
}

impl SlotFlags {
    #[must_use]
    pub fn get(self, var: Var) -> Option<bool> {
        match var {
            Var::A => self.a,
            Var::B => self.b,
            Var::C => self.c,
        }
    }

    fn set(&mut self, var: Var, valid: bool) {
        match var {
            Var::A => self.a = Some(valid),
            Var::B => self.b = Some(valid),
            Var::C => self.c = Some(valid),
        }
    }
}

/// Verzameld validatieresultaat; geldig zolang er geen meldingen zijn.
///
/// Het resultaat is gegevensvorm, geen fouttoestand: de aanroeper vertakt op
/// [`ValidationResult::is_valid`] in plaats van op een fout.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    sides: SlotFlags,
    angles: SlotFlags,
    valid_sides: usize,
    valid_angles: usize,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// De meldingen in de volgorde waarin ze optraden.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn side_flags(&self) -> SlotFlags {
        self.sides
    }

    #[must_use]
    pub fn angle_flags(&self) -> SlotFlags {
        self.angles
    }

    #[must_use]
    pub fn valid_sides(&self) -> usize {
        self.valid_sides
    }

    #[must_use]
    pub fn valid_angles(&self) -> usize {
        self.valid_angles
    }

    fn total(&self) -> usize {
        self.valid_sides + self.valid_angles
    }

    /// Voegt een melding toe; direct opeenvolgende duplicaten worden
    /// onderdrukt zodat de invoerlaag één melding per categorie toont.
    fn raise(&mut self, error: ValidationError) {
        if self.errors.last() != Some(&error) {
            self.errors.push(error);
        }
    }
}

/// Controleert de ruwe invoer: geldigheid per plaats en daarna het aantal
/// bekende waarden (precies drie, waarvan minstens één zijde).
#[must_use]
pub fn validate_inputs(triangle: &Triangle) -> ValidationResult {
    let mut result = ValidationResult::default();

    for var in Var::ALL {
        if let Some(value) = triangle.side_value(var) {
            if side_is_valid(value) {
                result.valid_sides += 1;
                result.sides.set(var, true);
            } else {
                result.sides.set(var, false);
                result.raise(ValidationError::InvalidSide);
            }
        }
        if let Some(value) = triangle.angle_value(var) {
            if angle_is_valid(value) {
                result.valid_angles += 1;
                result.angles.set(var, true);
            } else {
                result.angles.set(var, false);
                result.raise(ValidationError::InvalidAngle);
            }
        }
    }

    if result.is_valid() {
        if result.total() < 3 {
            result.raise(ValidationError::NotEnoughInputs);
        } else if result.total() > 3 {
            result.raise(ValidationError::TooManyInputs);
        } else if result.valid_sides < 1 {
            // Drie hoeken leggen een driehoek alleen op gelijkvormigheid vast.
            result.raise(ValidationError::NoSidesGiven);
        }
    }

    result
}

/// Controleert na het oplossen of de waarden samen een echte driehoek vormen.
///
/// Elke hoek wordt onafhankelijk uit de uiteindelijke zijden herleid; de
/// eerste plaats buiten de tolerantie breekt de controle af. Niet-eindige
/// tussenwaarden gelden als mislukte controle.
#[must_use]
pub fn validate_solution(triangle: &Triangle) -> ValidationResult {
    let mut result = ValidationResult::default();

    for var in Var::ALL {
        let side = triangle.side_value(var).unwrap_or(f64::NAN);
        let stored = triangle.angle_value(var).unwrap_or(f64::NAN);
        let derived = solver::angle_by_sides(triangle, var);

        let consistent = side_is_valid(side)
            && angle_is_valid(stored)
            && derived.is_finite()
            && (derived - stored).abs() <= SOLUTION_TOLERANCE;
        if !consistent {
            result.raise(ValidationError::InconsistentTriangle);
            break;
        }
    }

    result
}

/// Een zijde is geldig als ze eindig en strikt positief is.
#[must_use]
pub fn side_is_valid(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Een hoek is geldig als ze eindig is en strikt tussen nul en π ligt.
#[must_use]
pub fn angle_is_valid(value: f64) -> bool {
    side_is_valid(value) && value < std::f64::consts::PI
}
