use listas_core::error::ListasError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ListasError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
