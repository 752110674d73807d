//! Parsen, afronden en formatteren van vrije numerieke invoer.

use std::sync::LazyLock;

use regex::Regex;

static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.,]+").expect("geldige reguliere expressie"));

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("geldige reguliere expressie"));

/// Converteert vrije tekstinvoer naar een getal.
///
/// Alles behalve cijfers, punten en komma's wordt verwijderd en de laatste
/// scheidingstekengroep geldt als decimaalteken, zodat zowel `1.234,56` als
/// `1,234.56` werkt. Lege invoer levert `None` ("onbekend") op; invoer zonder
/// bruikbare cijfers levert een waarde op die de validatie afwijst (nul of
/// niet-eindig), geen leeg veld.
#[must_use]
pub fn parse(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    let digits = NOISE.replace_all(text, "");
    let mut groups: Vec<String> = SEPARATOR.split(&digits).map(str::to_owned).collect();
    if groups.len() > 1 {
        if let Some(last) = groups.pop() {
            groups.push(format!(".{last}"));
        }
    }

    let joined = groups.concat();
    match joined.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) if joined.is_empty() => Some(0.0),
        Err(_) => Some(f64::NAN),
    }
}

/// Rondt af op het gegeven aantal decimalen, halven omhoog.
#[must_use]
pub fn round(value: f64, decimals: usize) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier).round() / multiplier
}

/// Formatteert met precies `decimals` decimalen, aangevuld met nullen.
#[must_use]
pub fn format(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, round(value, decimals))
}
