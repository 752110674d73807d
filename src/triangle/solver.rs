//! Oplossingsmachine: vult onbekende zijden en hoeken in, herkent het
//! ambigue geval en berekent daarna de afgeleide maten.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use crate::parse::angle;

use super::step::Step;
use super::validator::{self, ValidationResult};
use super::{Triangle, Var};

/// Valideert de invoer, lost de driehoek op en controleert het resultaat.
///
/// De driehoek wordt ter plekke gevuld; elke afleiding voegt één stap aan het
/// logboek toe. De `Rc` is nodig om in het ambigue geval de niet-bezittende
/// terugverwijzing vanuit het alternatieve exemplaar te kunnen leggen.
pub fn calculate(triangle: &Rc<RefCell<Triangle>>) -> ValidationResult {
    let mut t = triangle.borrow_mut();

    let validation = validator::validate_inputs(&t);
    if !validation.is_valid() {
        return validation;
    }

    log::debug!("oplossen met {} bekende zijden", t.known_sides());
    match t.known_sides() {
        3 => solve_three_angles(&mut t),
        2 => solve_two_angles(&mut t, triangle),
        1 => solve_two_sides(&mut t),
        _ => {} // door validate_inputs uitgesloten
    }

    finish(&mut t)
}

/// Consistentiecontrole plus afgeleide maten; ook gebruikt om het
/// alternatieve exemplaar af te ronden.
fn finish(t: &mut Triangle) -> ValidationResult {
    let validation = validator::validate_solution(t);
    if validation.is_valid() {
        derive_measurements(t);
    }
    validation
}

/// Herleidt de hoek tegenover `target` uit de drie zijden (cosinusregel).
///
/// Buiten het acos-domein (driehoeksongelijkheid geschonden) is het resultaat
/// NaN; de consistentiecontrole vangt dat op.
#[must_use]
pub fn angle_by_sides(t: &Triangle, target: Var) -> f64 {
    let [r1, r2] = target.rest();
    let (opposite, s1, s2) = (side(t, target), side(t, r1), side(t, r2));
    ((square(s1) + square(s2) - square(opposite)) / (2.0 * s1 * s2)).acos()
}

/// Drie zijden bekend: alle nog onbekende hoeken via de cosinusregel.
fn solve_three_angles(t: &mut Triangle) {
    for var in Var::ALL {
        if t.angles.get(var).is_none() {
            let value = angle_by_sides(t, var);
            t.angles.set(var, Some(value));
            t.push_step(Step::CosineAngle { target: var });
        }
    }
}

/// Twee zijden en één hoek bekend.
///
/// Staat de bekende hoek tegenover de onbekende zijde, dan is dit het
/// eenduidige zijde-hoek-zijde-geval; staat ze tegenover een bekende zijde,
/// dan volgt de sinusregel met de ambigue-gevalcontrole.
fn solve_two_angles(t: &mut Triangle, origin: &Rc<RefCell<Triangle>>) {
    for var in Var::ALL {
        if t.angles.get(var).is_none() {
            continue;
        }

        if t.sides.get(var).is_none() {
            let [r1, r2] = var.rest();
            let (s1, s2) = (side(t, r1), side(t, r2));
            let value =
                (square(s1) + square(s2) - 2.0 * s1 * s2 * angle_of(t, var).cos()).sqrt();
            t.sides.set(var, Some(value));
            t.push_step(Step::CosineSide { target: var });
            solve_three_angles(t);
            return;
        }

        for other in var.rest() {
            if t.sides.get(other).is_none() {
                continue;
            }

            let value = (angle_of(t, var).sin() * side(t, other) / side(t, var)).asin();
            t.angles.set(other, Some(value));
            t.push_step(Step::SineAngle { known: var, target: other });

            if is_ambiguous(t, var, other) {
                log::debug!("ambigu geval op zijde {}", other.symbol());
                build_alternative(t, origin, var, other);
            }

            solve_two_sides(t);
            return;
        }
        return;
    }
}

/// Eén zijde (en twee hoeken) bekend: eerst de laatste hoek, dan de
/// ontbrekende zijden via de sinusregel ten opzichte van de bekende zijde.
fn solve_two_sides(t: &mut Triangle) {
    solve_last_angle(t);

    for var in Var::ALL {
        if t.sides.get(var).is_none() {
            continue;
        }
        for other in var.rest() {
            if t.sides.get(other).is_none() {
                let value = angle_of(t, other).sin() * side(t, var) / angle_of(t, var).sin();
                t.sides.set(other, Some(value));
                t.push_step(Step::SineSide { known: var, target: other });
            }
        }
        return;
    }
}

fn solve_last_angle(t: &mut Triangle) {
    for var in Var::ALL {
        if t.angles.get(var).is_none() {
            let [r1, r2] = var.rest();
            t.angles.set(var, Some(PI - angle_of(t, r1) - angle_of(t, r2)));
            t.push_step(Step::AngleSum { target: var });
            return;
        }
    }
}

/// Ambigu geval van de sinusregel: de bekende hoek is scherp en de
/// tegenoverliggende zijde is korter dan de andere bekende zijde maar langer
/// dan haar projectie.
fn is_ambiguous(t: &Triangle, known: Var, other: Var) -> bool {
    angle::is_acute(angle_of(t, known))
        && side(t, known) < side(t, other)
        && side(t, known) > side(t, other) * angle_of(t, known).sin()
}

/// Kloont de invoer, zet de supplementhoek en lost het alternatieve exemplaar
/// volledig op voordat de kruisverwijzingen gelegd worden.
fn build_alternative(t: &mut Triangle, origin: &Rc<RefCell<Triangle>>, known: Var, target: Var) {
    let mut alt = t.clone_as_alternative();
    alt.angles.set(target, Some(PI - angle_of(t, target)));
    alt.push_step(Step::SupplementAngle { known, target });

    solve_two_sides(&mut alt);
    let _ = finish(&mut alt);

    alt.origin = Some(Rc::downgrade(origin));
    t.alternative = Some(Rc::new(RefCell::new(alt)));
}

/// Hoogtelijnen, zwaartelijnen en bissectrices; elk vereist alle zes de
/// primaire waarden.
fn derive_measurements(t: &mut Triangle) {
    for var in Var::ALL {
        let [r1, r2] = var.rest();
        t.altitudes.set(var, Some(angle_of(t, r1).sin() * side(t, r2)));
    }
    for var in Var::ALL {
        let [r1, r2] = var.rest();
        let value = ((2.0 * square(side(t, r1)) + 2.0 * square(side(t, r2))
            - square(side(t, var)))
            / 4.0)
            .sqrt();
        t.medians.set(var, Some(value));
    }
    for var in Var::ALL {
        let [r1, r2] = var.rest();
        let value = angle_of(t, r1).sin() * side(t, r2)
            / (angle_of(t, r2) + angle_of(t, var) / 2.0).sin();
        t.bisectors.set(var, Some(value));
    }
}

fn side(t: &Triangle, var: Var) -> f64 {
    t.sides.get(var).unwrap_or(f64::NAN)
}

fn angle_of(t: &Triangle, var: Var) -> f64 {
    t.angles.get(var).unwrap_or(f64::NAN)
}

fn square(value: f64) -> f64 {
    value * value
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::f64::consts::{FRAC_PI_2, PI};
    use std::rc::Rc;

    use crate::parse::angle::degrees_to_radians;

    use super::super::step::Step;
    use super::super::validator::{self, ValidationError};
    use super::super::{Measurement, Triangle, Var};
    use super::{ValidationResult, calculate};

    fn solve(t: Triangle) -> (Rc<RefCell<Triangle>>, ValidationResult) {
        let rc = Rc::new(RefCell::new(t));
        let validation = calculate(&rc);
        (rc, validation)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "verwacht {expected}, kreeg {actual}"
        );
    }

    #[test]
    fn three_sides_give_all_angles() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 3.0);
        t.set_side_value(Var::B, 4.0);
        t.set_side_value(Var::C, 5.0);

        let (rc, validation) = solve(t);
        assert!(validation.is_valid());

        let t = rc.borrow();
        assert_close(t.angle_value(Var::C).unwrap(), FRAC_PI_2);
        let sum: f64 = Var::ALL
            .into_iter()
            .map(|var| t.angle_value(var).unwrap())
            .sum();
        assert_close(sum, PI);
        assert_eq!(t.steps().len(), 3);
        assert!(t.alternative().is_none());
    }

    #[test]
    fn angle_sum_holds_for_many_side_triples() {
        for [a, b, c] in [
            [2.0, 3.0, 4.0],
            [5.0, 5.0, 5.0],
            [10.0, 7.0, 5.0],
            [0.6, 0.7, 0.8],
        ] {
            let mut t = Triangle::new();
            t.set_side_value(Var::A, a);
            t.set_side_value(Var::B, b);
            t.set_side_value(Var::C, c);

            let (rc, validation) = solve(t);
            assert!(validation.is_valid(), "zijden {a}, {b}, {c}");
            let t = rc.borrow();
            let sum: f64 = Var::ALL
                .into_iter()
                .map(|var| t.angle_value(var).unwrap())
                .sum();
            assert_close(sum, PI);
        }
    }

    #[test]
    fn side_angle_side_resolves_the_enclosed_side() {
        let mut t = Triangle::new();
        t.set_side_value(Var::B, 4.0);
        t.set_side_value(Var::C, 5.0);
        t.set_angle_value(Var::A, degrees_to_radians(60.0));

        let (rc, validation) = solve(t);
        assert!(validation.is_valid());

        let t = rc.borrow();
        assert_close(t.side_value(Var::A).unwrap(), 21f64.sqrt());
        assert_eq!(t.steps()[0], Step::CosineSide { target: Var::A });
        assert!(t.alternative().is_none());
    }

    #[test]
    fn one_side_and_two_angles_complete_the_triangle() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 10.0);
        t.set_angle_value(Var::A, degrees_to_radians(30.0));
        t.set_angle_value(Var::B, degrees_to_radians(40.0));

        let (rc, validation) = solve(t);
        assert!(validation.is_valid());

        let t = rc.borrow();
        assert_close(t.angle_value(Var::C).unwrap(), degrees_to_radians(110.0));
        assert_close(t.side_value(Var::B).unwrap(), 12.855_752_2);
        assert_close(t.side_value(Var::C).unwrap(), 18.793_852_4);
        assert_eq!(t.steps().len(), 3);
        assert_eq!(t.steps()[0], Step::AngleSum { target: Var::C });
    }

    #[test]
    fn ambiguous_case_links_a_second_solution() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 7.0);
        t.set_side_value(Var::B, 10.0);
        t.set_angle_value(Var::A, degrees_to_radians(35.0));

        let (rc, validation) = solve(t);
        assert!(validation.is_valid());

        let t = rc.borrow();
        assert_eq!(
            t.steps()[0],
            Step::SineAngle { known: Var::A, target: Var::B }
        );

        let alternative = t.alternative().expect("alternatieve oplossing aanwezig");
        let alt = alternative.borrow();

        // Beide hoeken B vullen elkaar aan tot de gestrekte hoek.
        let b = t.angle_value(Var::B).unwrap();
        let b_alt = alt.angle_value(Var::B).unwrap();
        assert_close(b + b_alt, PI);

        // Beide exemplaren zijn op zichzelf geldige driehoeken met maten.
        assert!(validator::validate_solution(&t).is_valid());
        assert!(validator::validate_solution(&alt).is_valid());
        assert!(alt.value(Measurement::Altitude, Var::A).is_some());

        // Het alternatief begint zijn eigen logboek bij de supplementstap.
        assert_eq!(
            alt.steps()[0],
            Step::SupplementAngle { known: Var::A, target: Var::B }
        );

        // Terugverwijzing zonder gedeeld eigendom.
        let origin = alt.origin().expect("terugverwijzing aanwezig");
        assert!(Rc::ptr_eq(&origin, &rc));
    }

    #[test]
    fn alternative_survives_dropping_the_origin() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 7.0);
        t.set_side_value(Var::B, 10.0);
        t.set_angle_value(Var::A, degrees_to_radians(35.0));

        let (rc, _) = solve(t);
        let alternative = rc.borrow().alternative().expect("alternatief aanwezig");
        drop(rc);

        assert!(alternative.borrow().origin().is_none());
        assert!(validator::validate_solution(&alternative.borrow()).is_valid());
    }

    #[test]
    fn no_alternative_when_the_known_side_is_not_shorter() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 12.0);
        t.set_side_value(Var::B, 10.0);
        t.set_angle_value(Var::A, degrees_to_radians(35.0));

        let (rc, validation) = solve(t);
        assert!(validation.is_valid());
        assert!(rc.borrow().alternative().is_none());
    }

    #[test]
    fn no_alternative_for_an_obtuse_known_angle() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 12.0);
        t.set_side_value(Var::B, 10.0);
        t.set_angle_value(Var::A, degrees_to_radians(120.0));

        let (rc, validation) = solve(t);
        assert!(validation.is_valid());
        assert!(rc.borrow().alternative().is_none());
    }

    #[test]
    fn inconsistent_sides_fail_after_solving() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 1.0);
        t.set_side_value(Var::B, 1.0);
        t.set_side_value(Var::C, 10.0);

        let (rc, validation) = solve(t);
        assert_eq!(validation.errors(), &[ValidationError::InconsistentTriangle]);

        // Zonder geldige oplossing blijven de afgeleide maten onbekend.
        let t = rc.borrow();
        assert!(t.value(Measurement::Altitude, Var::A).is_none());
        assert!(t.value(Measurement::Median, Var::B).is_none());
    }

    #[test]
    fn derived_measurements_for_the_right_triangle() {
        let mut t = Triangle::new();
        t.set_side_value(Var::A, 3.0);
        t.set_side_value(Var::B, 4.0);
        t.set_side_value(Var::C, 5.0);

        let (rc, validation) = solve(t);
        assert!(validation.is_valid());

        let t = rc.borrow();
        assert_close(t.value(Measurement::Altitude, Var::A).unwrap(), 4.0);
        assert_close(t.value(Measurement::Altitude, Var::B).unwrap(), 3.0);
        assert_close(t.value(Measurement::Altitude, Var::C).unwrap(), 2.4);
        assert_close(t.value(Measurement::Median, Var::C).unwrap(), 2.5);
        assert_close(t.value(Measurement::Median, Var::A).unwrap(), 73f64.sqrt() / 2.0);
        assert_close(t.value(Measurement::Bisector, Var::A).unwrap(), 4.216_370_2);
    }
}
