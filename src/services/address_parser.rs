//! Parser de direcciones en formato libre
//! 
//! Convierte una línea "Calle, Número, [Barrio,] Ciudad[, Estado[, CEP]]"
//! en una `StructuredAddress`. Función pura, sin I/O.

use thiserror::Error;

use crate::models::StructuredAddress;

/// Mínimo de segmentos no vacíos: calle, número y ciudad
pub const MIN_SEGMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("insufficient segments in \"{input}\": found {found}, expected at least 3 (e.g. \"Rua X, 22, Cidade Z\")")]
    InsufficientSegments { input: String, found: usize },

    #[error("missing required address field '{0}'")]
    MissingField(&'static str),
}

/// Parsear una línea de dirección separada por comas
pub fn parse(raw: &str) -> Result<StructuredAddress, ParseError> {
    let segments: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() < MIN_SEGMENTS {
        return Err(ParseError::InsufficientSegments {
            input: raw.to_string(),
            found: segments.len(),
        });
    }

    let field = |index: usize| segments.get(index).map(|s| s.to_string()).unwrap_or_default();

    let mut address = StructuredAddress {
        street: field(0),
        house_number: field(1),
        ..Default::default()
    };

    if segments.len() == MIN_SEGMENTS {
        address.city = field(2);
    } else {
        address.neighborhood = field(2);
        address.city = field(3);
        address.state = field(4);
        address.postal_code = field(5);
    }

    Ok(address)
}

/// Comprobar una dirección que llegó ya estructurada
pub fn ensure_complete(address: &StructuredAddress) -> Result<StructuredAddress, ParseError> {
    let address = address.trimmed();
    if address.street.is_empty() {
        return Err(ParseError::MissingField("street"));
    }
    if address.house_number.is_empty() {
        return Err(ParseError::MissingField("house_number"));
    }
    if address.city.is_empty() {
        return Err(ParseError::MissingField("city"));
    }
    Ok(address)
}
