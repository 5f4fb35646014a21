/// Startup configuration errors. Reported before any window is created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarnessError {
    #[error("no example named '{0}' is registered")]
    UnknownExample(String),

    #[error("no examples are registered")]
    EmptyRegistry,

    #[error("-name requires an example name")]
    MissingName,

    #[error("example name '{0}' is not valid Unicode")]
    NonUnicodeName(String),
}
