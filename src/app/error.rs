use thiserror::Error;

#[derive(Error, Debug)]
pub enum TributaryError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    #[error("Key not found: {key} in namespace {namespace}")]
    KeyNotFound { namespace: String, key: String },

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Search response error: {0}")]
    Search(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        #[source]
        source: Box<TributaryError>,
    },
}

impl TributaryError {
    /// Strip any contextual labels and return the underlying failure.
    pub fn root(&self) -> &TributaryError {
        match self {
            TributaryError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), TributaryError::KeyNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, TributaryError>;

/// Attach a short operation label to an error on its way up.
pub trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T, E: Into<TributaryError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|e| TributaryError::Context {
            context,
            source: Box::new(e.into()),
        })
    }
}
