use validator::Validate;

/// Synchronize municipalities from the record source at `source`
#[derive(Debug, Clone, Validate)]
pub struct SyncCommand {
    #[validate(length(min = 1, message = "is required"))]
    pub source: String,
}

impl SyncCommand {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
        }
    }
}
