use serde::{Deserialize, Serialize};

/// Dirección estructurada lista para la búsqueda en el geocodificador.
///
/// `street`, `house_number` y `city` nunca están vacíos después de un parseo
/// correcto. `country` vacío significa "usar el país configurado en el gateway".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
    pub street: String,
    pub house_number: String,
    #[serde(default)]
    pub neighborhood: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
}

impl StructuredAddress {
    /// Término "street" tal como lo espera el proveedor: calle + número
    pub fn street_term(&self) -> String {
        format!("{} {}", self.street, self.house_number)
    }

    /// Descripción legible de lo que se buscó, para mensajes de error
    pub fn describe(&self) -> String {
        let mut description = format!("{}, {}, {}", self.street, self.house_number, self.city);
        if !self.neighborhood.is_empty() {
            description.push_str(&format!(", neighbourhood {}", self.neighborhood));
        }
        if !self.postal_code.is_empty() {
            description.push_str(&format!(", postal code {}", self.postal_code));
        }
        description
    }

    /// Copia con todos los campos recortados
    pub fn trimmed(&self) -> Self {
        Self {
            street: self.street.trim().to_string(),
            house_number: self.house_number.trim().to_string(),
            neighborhood: self.neighborhood.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            country: self.country.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_term_joins_street_and_number() {
        let address = StructuredAddress {
            street: "Rua das Borboletas".to_string(),
            house_number: "22".to_string(),
            city: "Santos".to_string(),
            ..Default::default()
        };
        assert_eq!(address.street_term(), "Rua das Borboletas 22");
    }

    #[test]
    fn test_describe_includes_optional_fields_only_when_present() {
        let mut address = StructuredAddress {
            street: "Rua X".to_string(),
            house_number: "123".to_string(),
            city: "Cidade Z".to_string(),
            ..Default::default()
        };
        assert_eq!(address.describe(), "Rua X, 123, Cidade Z");

        address.neighborhood = "Bairro Y".to_string();
        address.postal_code = "11015-010".to_string();
        assert_eq!(
            address.describe(),
            "Rua X, 123, Cidade Z, neighbourhood Bairro Y, postal code 11015-010"
        );
    }
}
