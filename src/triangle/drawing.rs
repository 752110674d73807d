//! Plaatsing van een opgeloste driehoek op een tekenoppervlak.
//!
//! Het tekenen zelf (lijnen, labels, stijl) is aan de weergavelaag; hier
//! worden alleen de hoekpuntcoördinaten en de oppervlakafmetingen bepaald.

use serde::Serialize;

use crate::parse::angle;

use super::{Measurement, Triangle, Var};

/// Tweedimensionaal punt in oppervlakcoördinaten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

/// Hoekpuntcoördinaten plus de uiteindelijke afmetingen van het oppervlak
/// (inclusief marge aan beide kanten).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawingLayout {
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
    pub width: f64,
    pub height: f64,
}

/// Rekent de hoekpunten van een volledig opgeloste driehoek om naar
/// oppervlakcoördinaten.
///
/// A ligt in de oorsprong en C op de horizontale as op afstand `b`; B volgt
/// uit de hoogtelijn op zijde `b` en haar horizontale voet. Bij een stompe
/// hoek A wordt B gespiegeld en alles naar rechts geschoven tot de kleinste
/// x-coördinaat nul is. Daarna wordt uniform geschaald tot de grootste van
/// breedte en hoogte het gevraagde oppervlak vult, verticaal omgeklapt
/// (rekenkundig "omhoog" is op het oppervlak "omlaag") en de marge opgeteld.
#[must_use]
pub fn layout(triangle: &Triangle, canvas_size: f64, padding: f64) -> DrawingLayout {
    let side_b = triangle.side_value(Var::B).unwrap_or(f64::NAN);
    let side_c = triangle.side_value(Var::C).unwrap_or(f64::NAN);
    let altitude_b = triangle
        .value(Measurement::Altitude, Var::B)
        .unwrap_or(f64::NAN);
    let angle_a = triangle.angle_value(Var::A).unwrap_or(f64::NAN);

    let mut a = Point2::default();
    let mut b = Point2 {
        x: (square(side_c) - square(altitude_b)).sqrt(),
        y: altitude_b,
    };
    let mut c = Point2 { x: side_b, y: 0.0 };

    if angle::is_obtuse(angle_a) {
        b.x = -b.x;
        let distance = -b.x;
        a.x += distance;
        b.x += distance;
        c.x += distance;
    }

    let width = (c.x - b.x).max(b.x).max(c.x);
    let height = b.y;
    let scale = canvas_size / width.max(height);
    for point in [&mut a, &mut b, &mut c] {
        point.x *= scale;
        point.y *= scale;
    }

    let canvas_height = b.y;
    for point in [&mut a, &mut b, &mut c] {
        point.y = canvas_height - point.y;
        point.x += padding;
        point.y += padding;
    }

    DrawingLayout {
        a,
        b,
        c,
        width: canvas_size + padding * 2.0,
        height: canvas_height + padding * 2.0,
    }
}

fn square(value: f64) -> f64 {
    value * value
}
