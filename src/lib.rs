#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod parse;
pub mod triangle;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

use parse::angle::AngleUnit;
use triangle::drawing::{self, DrawingLayout};
use triangle::solver;
use triangle::validator::{SlotFlags, ValidationResult};
use triangle::{DEFAULT_PRECISION, Measurement, Triangle, Var};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Validatie-export voor de invoerlaag: geldigheid, meldingen en
/// per-veldvlaggen om foute invoervelden te markeren.
#[derive(Debug, Serialize)]
struct ValidationExport {
    valid: bool,
    messages: Vec<String>,
    sides: SlotFlags,
    angles: SlotFlags,
}

impl ValidationExport {
    fn new(validation: &ValidationResult) -> Self {
        Self {
            valid: validation.is_valid(),
            messages: validation.messages(),
            sides: validation.side_flags(),
            angles: validation.angle_flags(),
        }
    }
}

#[derive(Debug, Serialize)]
struct VariableExport {
    a: String,
    b: String,
    c: String,
}

/// Volledige geformatteerde uitlezing van één opgeloste driehoek.
#[derive(Debug, Serialize)]
struct ResultExport {
    unit: AngleUnit,
    precision: usize,
    sides: VariableExport,
    angles: VariableExport,
    altitudes: VariableExport,
    medians: VariableExport,
    bisectors: VariableExport,
    area: String,
    circumference: String,
    has_alternative: bool,
}

/// Public entry point for consumers.
///
/// De engine bewaart de zes ruwe invoerteksten, bouwt daar bij
/// [`Engine::calculate`] een verse [`Triangle`] uit en stelt daarna de
/// geformatteerde resultaten, het vergelijkingenlogboek en de
/// tekencoördinaten beschikbaar aan de paginalaag.
#[wasm_bindgen]
pub struct Engine {
    inputs: BTreeMap<String, String>,
    unit: AngleUnit,
    precision: usize,
    triangle: Option<Rc<RefCell<Triangle>>>,
    validation: Option<ValidationResult>,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            inputs: BTreeMap::new(),
            unit: AngleUnit::default(),
            precision: DEFAULT_PRECISION,
            triangle: None,
            validation: None,
        }
    }

    /// Slaat de ruwe tekstinvoer voor een zijde op; lege tekst wist het veld.
    #[wasm_bindgen]
    pub fn set_side(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        match Var::from_name(name) {
            Some(var) => {
                self.store(input_key("side", var), value);
                Ok(())
            }
            None => Err(js_error(&format!("onbekende zijde `{name}`"))),
        }
    }

    /// Slaat de ruwe tekstinvoer voor een hoek op; lege tekst wist het veld.
    #[wasm_bindgen]
    pub fn set_angle(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        match Var::from_name(name) {
            Some(var) => {
                self.store(input_key("angle", var), value);
                Ok(())
            }
            None => Err(js_error(&format!("onbekende hoek `{name}`"))),
        }
    }

    /// Stelt de hoekeenheid in voor de volgende berekeningen.
    #[wasm_bindgen]
    pub fn set_angle_unit(&mut self, unit: &str) -> Result<(), JsValue> {
        match AngleUnit::from_name(unit) {
            Some(unit) => {
                self.unit = unit;
                Ok(())
            }
            None => Err(js_error(&format!("onbekende hoekeenheid `{unit}`"))),
        }
    }

    /// Past de weergaveprecisie aan; bestaande resultaten en het logboek
    /// renderen opnieuw zonder herberekening.
    #[wasm_bindgen]
    pub fn set_precision(&mut self, decimals: u32) {
        self.precision = decimals as usize;
        if let Some(triangle) = self.triangle.as_ref() {
            triangle.borrow_mut().set_precision(self.precision);
            let alternative = triangle.borrow().alternative();
            if let Some(alternative) = alternative {
                alternative.borrow_mut().set_precision(self.precision);
            }
        }
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn precision(&self) -> u32 {
        u32::try_from(self.precision).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn angle_unit(&self) -> String {
        self.unit.name().to_owned()
    }

    /// Bouwt een driehoek uit de ruwe invoer, lost die op en exporteert het
    /// validatieresultaat.
    #[wasm_bindgen]
    pub fn calculate(&mut self) -> Result<JsValue, JsValue> {
        let validation = self.run_calculate();
        to_export(&ValidationExport::new(&validation))
    }

    /// Exporteert het validatieresultaat van de laatste berekening opnieuw.
    #[wasm_bindgen]
    pub fn get_validation(&self) -> Result<JsValue, JsValue> {
        match self.validation.as_ref() {
            Some(validation) => to_export(&ValidationExport::new(validation)),
            None => Err(js_error("er is nog geen berekening uitgevoerd")),
        }
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation
            .as_ref()
            .is_some_and(ValidationResult::is_valid)
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn has_alternative(&self) -> bool {
        self.triangle
            .as_ref()
            .is_some_and(|triangle| triangle.borrow().alternative().is_some())
    }

    /// Exporteert alle geformatteerde resultaatwaarden van de gevraagde
    /// oplossing.
    #[wasm_bindgen]
    pub fn get_result(&self, alternative: bool) -> Result<JsValue, JsValue> {
        let triangle = self.selected(alternative).map_err(|err| js_error(&err))?;
        let export = result_export(&triangle.borrow());
        to_export(&export)
    }

    /// Het vergelijkingenlogboek als uitgelijnd LaTeX-blok.
    #[wasm_bindgen]
    pub fn get_equations(&self, alternative: bool) -> Result<String, JsValue> {
        let triangle = self.selected(alternative).map_err(|err| js_error(&err))?;
        let equations = triangle.borrow().format_equations();
        Ok(equations)
    }

    /// Hoekpuntcoördinaten en afmetingen voor het tekenoppervlak.
    #[wasm_bindgen]
    pub fn get_drawing(
        &self,
        canvas_size: f64,
        padding: f64,
        alternative: bool,
    ) -> Result<JsValue, JsValue> {
        let layout = self
            .drawing_layout(canvas_size, padding, alternative)
            .map_err(|err| js_error(&err))?;
        to_export(&layout)
    }

    /// De ruwe invoerparen zoals opgegeven, voor URL-persistentie door de
    /// paginalaag.
    #[wasm_bindgen]
    pub fn get_inputs(&self) -> Result<JsValue, JsValue> {
        to_export(&self.inputs)
    }
}

impl Engine {
    /// Kern van [`Engine::calculate`], los van de wasm-grens.
    pub fn run_calculate(&mut self) -> ValidationResult {
        debug_log!("berekening gestart met {} invoerwaarden", self.inputs.len());

        let triangle = Rc::new(RefCell::new(self.build_triangle()));
        let validation = solver::calculate(&triangle);

        self.triangle = Some(triangle);
        self.validation = Some(validation.clone());
        validation
    }

    /// De actuele driehoek, voor rlib-consumenten.
    #[must_use]
    pub fn triangle(&self) -> Option<Rc<RefCell<Triangle>>> {
        self.triangle.clone()
    }

    /// Kern van [`Engine::get_drawing`], los van de wasm-grens.
    pub fn drawing_layout(
        &self,
        canvas_size: f64,
        padding: f64,
        alternative: bool,
    ) -> Result<DrawingLayout, String> {
        let triangle = self.selected(alternative)?;
        let layout = drawing::layout(&triangle.borrow(), canvas_size, padding);
        Ok(layout)
    }

    #[must_use]
    pub fn raw_inputs(&self) -> &BTreeMap<String, String> {
        &self.inputs
    }

    fn selected(&self, alternative: bool) -> Result<Rc<RefCell<Triangle>>, String> {
        let triangle = self
            .triangle
            .as_ref()
            .ok_or_else(|| "er is nog geen berekening uitgevoerd".to_owned())?;
        if !self.is_valid() {
            return Err("de laatste berekening is ongeldig".to_owned());
        }

        if alternative {
            triangle
                .borrow()
                .alternative()
                .ok_or_else(|| "deze berekening heeft geen alternatieve oplossing".to_owned())
        } else {
            Ok(Rc::clone(triangle))
        }
    }

    fn store(&mut self, key: String, value: &str) {
        if value.is_empty() {
            self.inputs.remove(&key);
        } else {
            self.inputs.insert(key, value.to_owned());
        }
    }

    fn build_triangle(&self) -> Triangle {
        let mut triangle = Triangle::new();
        triangle.set_unit(self.unit);
        triangle.set_precision(self.precision);

        for var in Var::ALL {
            if let Some(raw) = self.inputs.get(&input_key("side", var)) {
                triangle.set_side(var, raw);
            }
            if let Some(raw) = self.inputs.get(&input_key("angle", var)) {
                triangle.set_angle(var, raw);
            }
        }

        triangle
    }
}

fn input_key(kind: &str, var: Var) -> String {
    format!("{kind}_{}", var.symbol())
}

fn result_export(triangle: &Triangle) -> ResultExport {
    ResultExport {
        unit: triangle.unit(),
        precision: triangle.precision(),
        sides: variable_export(triangle, Measurement::Side),
        angles: variable_export(triangle, Measurement::Angle),
        altitudes: variable_export(triangle, Measurement::Altitude),
        medians: variable_export(triangle, Measurement::Median),
        bisectors: variable_export(triangle, Measurement::Bisector),
        area: triangle.area(),
        circumference: triangle.circumference(),
        has_alternative: triangle.alternative().is_some(),
    }
}

fn variable_export(triangle: &Triangle, kind: Measurement) -> VariableExport {
    VariableExport {
        a: triangle.display(kind, Var::A),
        b: triangle.display(kind, Var::B),
        c: triangle.display(kind, Var::C),
    }
}

fn to_export<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
