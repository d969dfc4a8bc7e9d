use thiserror::Error;

/// Pipeline error taxonomy.
///
/// `Config` covers invalid parameters and missing credentials and is raised
/// before any collaborator is touched. `Corpus` covers data problems found
/// while assembling the document set. Collaborator failures (embedding calls,
/// collection creation) stay `anyhow` at the trait seams and abort only the
/// strategy that hit them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("corpus error: {0}")]
    Corpus(String),
}

pub type Result<T> = std::result::Result<T, Error>;
