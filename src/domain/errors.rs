use thiserror::Error;

/// Reasons a raw quote request is rejected by the normalizer.
///
/// Item indices are 1-based so they can be shown to a human as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No data received")]
    MissingBody,
    #[error("Field '{0}' is required")]
    MissingField(&'static str),
    #[error("At least one item is required")]
    MissingItems,
    #[error("Item {0} has an invalid '{1}'")]
    InvalidItem(usize, &'static str),
    #[error("Field '{0}' is not a valid amount")]
    InvalidField(&'static str),
}

impl ValidationError {
    /// Stable machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingBody => "missing_body",
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::MissingItems => "missing_items",
            ValidationError::InvalidItem(..) => "invalid_item",
            ValidationError::InvalidField(_) => "invalid_field",
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize document: {0}")]
    Serialization(String),
    #[error("Renderer failed: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_item_message_names_index_and_field() {
        let err = ValidationError::InvalidItem(3, "prix_unitaire");
        assert_eq!(err.to_string(), "Item 3 has an invalid 'prix_unitaire'");
        assert_eq!(err.kind(), "invalid_item");
    }

    #[test]
    fn missing_field_message() {
        let err = ValidationError::MissingField("client_nom");
        assert_eq!(err.to_string(), "Field 'client_nom' is required");
        assert_eq!(err.kind(), "missing_field");
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            ValidationError::MissingBody.kind(),
            ValidationError::MissingField("x").kind(),
            ValidationError::MissingItems.kind(),
            ValidationError::InvalidItem(1, "x").kind(),
            ValidationError::InvalidField("x").kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
