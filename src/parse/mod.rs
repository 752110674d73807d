//! Invoerconversie: vrije numerieke tekst en hoekeenheden.

pub mod angle;
pub mod number;
