use jangbu_core::error::JangbuError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), JangbuError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
