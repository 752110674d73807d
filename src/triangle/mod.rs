//! Het driehoeksrecord: zijden, hoeken, afgeleide maten en het
//! vergelijkingenlogboek van één driehoek in oplossing.

pub mod drawing;
pub mod solver;
pub mod step;
pub mod validator;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::parse::angle::{self, AngleUnit};
use crate::parse::number;

use step::Step;

/// Standaard aantal decimalen voor weergave.
pub const DEFAULT_PRECISION: usize = 2;

/// De drie naamplaatsen van een driehoek, in vaste basisvolgorde `a, b, c`.
///
/// Zijde `a` ligt tegenover hoek `A`; alle lussen in de solver volgen de
/// basisvolgorde zodat ook de detectievolgorde van het ambigue geval vastligt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    A,
    B,
    C,
}

impl Var {
    /// Vaste iteratievolgorde.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// De twee overige plaatsen, in basisvolgorde zonder `self`.
    #[must_use]
    pub fn rest(self) -> [Self; 2] {
        match self {
            Self::A => [Self::B, Self::C],
            Self::B => [Self::A, Self::C],
            Self::C => [Self::A, Self::B],
        }
    }

    /// Kleine-lettersymbool zoals gebruikt in vergelijkingen en invoernamen.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            "c" => Some(Self::C),
            _ => None,
        }
    }
}

/// Soort meetwaarde; accessors dispatchen hierop met een uitputtende match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Side,
    Angle,
    Altitude,
    Median,
    Bisector,
}

/// Drie optionele waarden, één per naamplaats.
#[derive(Debug, Clone, Copy, Default)]
struct Slots {
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
}

impl Slots {
    fn get(self, var: Var) -> Option<f64> {
        match var {
            Var::A => self.a,
            Var::B => self.b,
            Var::C => self.c,
        }
    }

    fn set(&mut self, var: Var, value: Option<f64>) {
        match var {
            Var::A => self.a = value,
            Var::B => self.b = value,
            Var::C => self.c = value,
        }
    }

    fn known(self) -> usize {
        usize::from(self.a.is_some()) + usize::from(self.b.is_some()) + usize::from(self.c.is_some())
    }
}

/// Eén driehoek in oplossing.
///
/// Hoeken worden altijd in radialen opgeslagen; de weergave-eenheid geldt
/// alleen op de invoer- en uitvoergrens. Na het oplossen verwijst
/// [`Triangle::alternative`] in het ambigue geval naar de tweede oplossing;
/// beide exemplaren zijn onafhankelijk eigendom van hun houder en verwijzen
/// zonder gedeeld eigendom naar elkaar terug.
#[derive(Debug)]
pub struct Triangle {
    sides: Slots,
    angles: Slots,
    altitudes: Slots,
    medians: Slots,
    bisectors: Slots,
    unit: AngleUnit,
    precision: usize,
    steps: Vec<Step>,
    alternative: Option<Rc<RefCell<Triangle>>>,
    origin: Option<Weak<RefCell<Triangle>>>,
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            sides: Slots::default(),
            angles: Slots::default(),
            altitudes: Slots::default(),
            medians: Slots::default(),
            bisectors: Slots::default(),
            unit: AngleUnit::default(),
            precision: DEFAULT_PRECISION,
            steps: Vec::new(),
            alternative: None,
            origin: None,
        }
    }
}

impl Triangle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: AngleUnit) {
        self.unit = unit;
    }

    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Past alleen de weergave aan; waarden worden niet opnieuw berekend.
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
    }

    /// Zet een zijde vanuit tekstinvoer; geeft de opgeslagen waarde terug.
    pub fn set_side(&mut self, var: Var, text: &str) -> Option<f64> {
        let value = number::parse(text);
        self.sides.set(var, value);
        value
    }

    /// Zet een zijde met een reeds numerieke waarde.
    pub fn set_side_value(&mut self, var: Var, value: f64) {
        self.sides.set(var, Some(value));
    }

    /// Zet een hoek vanuit tekstinvoer in de weergave-eenheid; slaat de
    /// radiaalwaarde op en geeft die terug.
    pub fn set_angle(&mut self, var: Var, text: &str) -> Option<f64> {
        let radians = angle::convert(number::parse(text), self.unit);
        self.angles.set(var, radians);
        radians
    }

    /// Zet een hoek met een reeds bekende radiaalwaarde.
    pub fn set_angle_value(&mut self, var: Var, radians: f64) {
        self.angles.set(var, Some(radians));
    }

    #[must_use]
    pub fn side_value(&self, var: Var) -> Option<f64> {
        self.sides.get(var)
    }

    #[must_use]
    pub fn angle_value(&self, var: Var) -> Option<f64> {
        self.angles.get(var)
    }

    /// Ruwe waarde van een meetsoort, `None` zolang die onbekend is.
    #[must_use]
    pub fn value(&self, kind: Measurement, var: Var) -> Option<f64> {
        match kind {
            Measurement::Side => self.sides.get(var),
            Measurement::Angle => self.angles.get(var),
            Measurement::Altitude => self.altitudes.get(var),
            Measurement::Median => self.medians.get(var),
            Measurement::Bisector => self.bisectors.get(var),
        }
    }

    /// Geformatteerde waarde op de ingestelde precisie; hoeken in de
    /// weergave-eenheid, onbekende waarden als `NaN`.
    #[must_use]
    pub fn display(&self, kind: Measurement, var: Var) -> String {
        match kind {
            Measurement::Angle => self.format_angle(var, false),
            Measurement::Side | Measurement::Altitude | Measurement::Median | Measurement::Bisector => {
                number::format(self.value(kind, var).unwrap_or(f64::NAN), self.precision)
            }
        }
    }

    #[must_use]
    pub fn side(&self, var: Var) -> String {
        self.display(Measurement::Side, var)
    }

    #[must_use]
    pub fn angle(&self, var: Var) -> String {
        self.display(Measurement::Angle, var)
    }

    #[must_use]
    pub fn altitude(&self, var: Var) -> String {
        self.display(Measurement::Altitude, var)
    }

    #[must_use]
    pub fn median(&self, var: Var) -> String {
        self.display(Measurement::Median, var)
    }

    #[must_use]
    pub fn bisector(&self, var: Var) -> String {
        self.display(Measurement::Bisector, var)
    }

    /// Oppervlakte `a·b·sin(C)/2`; alleen zinvol na een geslaagde oplossing.
    #[must_use]
    pub fn area_value(&self) -> f64 {
        let a = self.sides.get(Var::A).unwrap_or(f64::NAN);
        let b = self.sides.get(Var::B).unwrap_or(f64::NAN);
        let gamma = self.angles.get(Var::C).unwrap_or(f64::NAN);
        a * b * gamma.sin() / 2.0
    }

    #[must_use]
    pub fn area(&self) -> String {
        number::format(self.area_value(), self.precision)
    }

    /// Omtrek als som van de drie zijden.
    #[must_use]
    pub fn circumference_value(&self) -> f64 {
        Var::ALL
            .into_iter()
            .map(|var| self.sides.get(var).unwrap_or(f64::NAN))
            .sum()
    }

    #[must_use]
    pub fn circumference(&self) -> String {
        number::format(self.circumference_value(), self.precision)
    }

    #[must_use]
    pub fn known_sides(&self) -> usize {
        self.sides.known()
    }

    #[must_use]
    pub fn known_angles(&self) -> usize {
        self.angles.known()
    }

    /// De uitgevoerde afleidingsstappen, in volgorde van uitvoering.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Alle stappen als één uitgelijnd LaTeX-blok.
    #[must_use]
    pub fn format_equations(&self) -> String {
        let rows: Vec<String> = self.steps.iter().map(|step| step.render(self)).collect();
        format!("\\begin{{align*}}{}\\end{{align*}}", rows.join("\\\\"))
    }

    /// De tweede oplossing uit het ambigue geval, indien aanwezig.
    #[must_use]
    pub fn alternative(&self) -> Option<Rc<RefCell<Triangle>>> {
        self.alternative.clone()
    }

    /// De oorsprongsdriehoek waarvan dit exemplaar het alternatief is.
    ///
    /// Levert `None` zodra de oorsprong is opgeruimd; de verwijzing is bewust
    /// niet-bezittend.
    #[must_use]
    pub fn origin(&self) -> Option<Rc<RefCell<Triangle>>> {
        self.origin.as_ref().and_then(Weak::upgrade)
    }

    fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Kopie van de invoerwaarden als startpunt voor het alternatieve
    /// exemplaar; het logboek en de afgeleide maten beginnen leeg.
    fn clone_as_alternative(&self) -> Triangle {
        Triangle {
            sides: self.sides,
            angles: self.angles,
            unit: self.unit,
            precision: self.precision,
            ..Triangle::default()
        }
    }

    fn format_angle(&self, var: Var, latex: bool) -> String {
        angle::format_angle(
            self.angles.get(var).unwrap_or(f64::NAN),
            self.unit,
            self.precision,
            latex,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use crate::parse::angle::AngleUnit;

    use super::{Measurement, Triangle, Var};

    #[test]
    fn rest_keeps_the_base_order() {
        assert_eq!(Var::A.rest(), [Var::B, Var::C]);
        assert_eq!(Var::B.rest(), [Var::A, Var::C]);
        assert_eq!(Var::C.rest(), [Var::A, Var::B]);
    }

    #[test]
    fn side_setter_parses_free_text() {
        let mut t = Triangle::new();
        assert_eq!(t.set_side(Var::A, "3,5"), Some(3.5));
        assert_eq!(t.side_value(Var::A), Some(3.5));
        assert_eq!(t.known_sides(), 1);
    }

    #[test]
    fn angle_setter_stores_radians() {
        let mut t = Triangle::new();
        let stored = t.set_angle(Var::B, "90").expect("hoek geparsed");
        assert!((stored - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(t.angle(Var::B), "90.00\u{b0}");
    }

    #[test]
    fn empty_setter_clears_the_slot() {
        let mut t = Triangle::new();
        t.set_side(Var::C, "4");
        assert_eq!(t.set_side(Var::C, ""), None);
        assert_eq!(t.known_sides(), 0);
    }

    #[test]
    fn unknown_slots_format_as_nan() {
        let t = Triangle::new();
        assert_eq!(t.side(Var::A), "NaN");
        assert_eq!(t.area(), "NaN");
        assert_eq!(t.circumference(), "NaN");
    }

    #[test]
    fn display_dispatches_on_measurement_kind() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 3.0);
        t.set_angle_value(Var::A, FRAC_PI_2);
        assert_eq!(t.display(Measurement::Side, Var::A), "3.00");
        assert_eq!(t.display(Measurement::Angle, Var::A), "90.00\u{b0}");
        assert_eq!(t.display(Measurement::Median, Var::A), "NaN");
    }

    #[test]
    fn precision_changes_re_render_only() {
        let mut t = Triangle::new();
        t.set_side_value(Var::B, 2.0);
        t.set_precision(4);
        assert_eq!(t.side(Var::B), "2.0000");
        t.set_precision(0);
        assert_eq!(t.side(Var::B), "2");
    }

    #[test]
    fn gon_unit_applies_at_the_boundary() {
        let mut t = Triangle::new();
        t.set_unit(AngleUnit::Gon);
        let stored = t.set_angle(Var::A, "100").expect("hoek geparsed");
        assert!((stored - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(t.angle(Var::A), "100.00 gon");
    }
}
