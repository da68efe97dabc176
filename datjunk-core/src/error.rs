/// Errors raised while interpreting catalog header vocabulary.
///
/// Reconciliation itself never fails; these only surface when a codec or
/// settings file hands the core a token it does not recognise.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown {field} value: {value}")]
    UnknownToken { field: &'static str, value: String },

    #[error("Unknown item type: {0}")]
    UnknownItemKind(String),
}

impl CoreError {
    pub fn unknown_token(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownToken {
            field,
            value: value.into(),
        }
    }
}
