//! Gestructureerde afleidingsstappen en hun LaTeX-projectie.
//!
//! Een stap slaat alleen de gebruikte identiteit en haar operanden op; de
//! weergave is een pure projectie over de actuele waarden, eenheid en
//! precisie van de driehoek. Daardoor rendert het logboek na een
//! precisie-aanpassing opnieuw zonder herberekening.

use std::f64::consts::PI;
use std::sync::LazyLock;

use regex::Regex;

use crate::parse::angle;

use super::{Triangle, Var};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$@][123]").expect("geldige reguliere expressie"));

const COSINE_ANGLE: &str =
    "@1=\\cos^{-1}\\left(\\frac{$2^2+$3^2-$1^2}{2\\cdot $2\\cdot $3}\\right)";
const COSINE_SIDE: &str = "$1=\\sqrt{$2^2+$3^2-2\\cdot $2\\cdot $3\\cdot \\cos(@1)}";
const SINE_ANGLE: &str = "@2=\\sin^{-1}\\left(\\frac{\\sin(@1)\\cdot $2}{$1}\\right)";
const SINE_ANGLE_TAIL: &str = "-\\sin^{-1}\\left(\\frac{\\sin(@1)\\cdot $2}{$1}\\right)";
const SINE_SIDE: &str = "$2=\\frac{\\sin(@2)\\cdot $1}{\\sin(@1)}";

/// Eén afleidingsstap: de gebruikte identiteit plus haar operanden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Cosinusregel voor een hoek, uit drie bekende zijden.
    CosineAngle { target: Var },
    /// Cosinusregel voor een zijde, uit twee zijden en de ingesloten hoek.
    CosineSide { target: Var },
    /// Sinusregel voor de hoek tegenover een bekende zijde.
    SineAngle { known: Var, target: Var },
    /// Supplement van de sinusregelhoek; de eerste stap van het alternatieve
    /// exemplaar in het ambigue geval.
    SupplementAngle { known: Var, target: Var },
    /// Hoekensom: de laatste hoek uit π minus de twee bekende.
    AngleSum { target: Var },
    /// Sinusregel voor een ontbrekende zijde.
    SineSide { known: Var, target: Var },
}

impl Step {
    /// Rendert de stap als uitgelijnde LaTeX-rij.
    ///
    /// De rij leest `&symbolisch = numerieke expressie = numeriek resultaat`:
    /// de numerieke kant wordt om haar eigen `=` gedraaid zodat het resultaat
    /// achteraan staat.
    #[must_use]
    pub fn render(self, triangle: &Triangle) -> String {
        let (template, vars) = self.expand(triangle);
        render_template(&template, vars, triangle)
    }

    fn expand(self, triangle: &Triangle) -> (String, [Var; 3]) {
        match self {
            Self::CosineAngle { target } => {
                let [r1, r2] = target.rest();
                (COSINE_ANGLE.to_owned(), [target, r1, r2])
            }
            Self::CosineSide { target } => {
                let [r1, r2] = target.rest();
                (COSINE_SIDE.to_owned(), [target, r1, r2])
            }
            Self::SineAngle { known, target } => (SINE_ANGLE.to_owned(), [known, target, target]),
            Self::SupplementAngle { known, target } => {
                let pi = straight_angle(triangle);
                (["@2=", &pi, SINE_ANGLE_TAIL].concat(), [known, target, target])
            }
            Self::AngleSum { target } => {
                let [r1, r2] = target.rest();
                let pi = straight_angle(triangle);
                (["@1=", &pi, "-@2-@3"].concat(), [target, r1, r2])
            }
            Self::SineSide { known, target } => (SINE_SIDE.to_owned(), [known, target, target]),
        }
    }
}

/// π geformatteerd in de weergave-eenheid van de driehoek.
fn straight_angle(triangle: &Triangle) -> String {
    angle::format_angle(PI, triangle.unit(), triangle.precision(), true)
}

fn render_template(template: &str, vars: [Var; 3], triangle: &Triangle) -> String {
    let mut symbols = String::new();
    let mut values = String::new();
    let mut cursor = 0;

    for found in PLACEHOLDER.find_iter(template) {
        let before = &template[cursor..found.start()];
        symbols.push_str(before);
        values.push_str(before);

        let marker = found.as_str().as_bytes();
        let var = vars[usize::from(marker[1] - b'1')];
        if marker[0] == b'@' {
            symbols.push(var.symbol().to_ascii_uppercase());
            values.push_str(&triangle.format_angle(var, true));
        } else {
            symbols.push(var.symbol());
            values.push_str(&triangle.side(var));
        }

        cursor = found.end();
    }
    symbols.push_str(&template[cursor..]);
    values.push_str(&template[cursor..]);

    let swapped = match values.split_once('=') {
        Some((result, expression)) => [expression, "=", result].concat(),
        None => values,
    };

    ["&", &symbols, "=", &swapped].concat()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::super::{Triangle, Var, solver};

    fn solved_right_triangle() -> Rc<RefCell<Triangle>> {
        let mut t = Triangle::new();
        t.set_side(Var::A, "3");
        t.set_side(Var::B, "4");
        t.set_side(Var::C, "5");
        let rc = Rc::new(RefCell::new(t));
        assert!(solver::calculate(&rc).is_valid());
        rc
    }

    #[test]
    fn cosine_rule_step_renders_with_swapped_numeric_side() {
        let rc = solved_right_triangle();
        let t = rc.borrow();
        let first = t.steps()[0].render(&t);

        assert!(first.starts_with("&A=\\cos^{-1}"));
        assert!(first.contains("\\frac{b^2+c^2-a^2}{2\\cdot b\\cdot c}"));
        assert!(first.contains("\\frac{4.00^2+5.00^2-3.00^2}{2\\cdot 4.00\\cdot 5.00}"));
        assert!(first.ends_with("=36.87^{\\circ}"));
    }

    #[test]
    fn equation_block_is_wrapped_in_align() {
        let rc = solved_right_triangle();
        let t = rc.borrow();
        let block = t.format_equations();

        assert!(block.starts_with("\\begin{align*}&"));
        assert!(block.ends_with("\\end{align*}"));
        assert_eq!(block.matches("\\\\").count(), t.steps().len() - 1);
    }

    #[test]
    fn rendering_follows_precision_changes() {
        let rc = solved_right_triangle();
        let mut t = rc.borrow_mut();
        t.set_precision(0);
        let first = t.steps()[0].render(&t);

        assert!(first.contains("{4^2+5^2-3^2}"));
        assert!(first.ends_with("=37^{\\circ}"));
    }

    #[test]
    fn angle_sum_step_embeds_pi_in_display_units() {
        let mut t = Triangle::new();
        t.set_side(Var::A, "10");
        t.set_angle(Var::A, "30");
        t.set_angle(Var::B, "40");
        let rc = Rc::new(RefCell::new(t));
        assert!(solver::calculate(&rc).is_valid());

        let t = rc.borrow();
        let row = t.steps()[0].render(&t);
        assert!(row.starts_with("&C=180.00^{\\circ}-A-B="));
        assert!(row.ends_with("=110.00^{\\circ}"));
    }
}
