//! Resolution errors
//!
//! Every failure aborts the whole pipeline. The error carries the stage it
//! happened in so callers can report it without inspecting partial state.

use std::fmt;

use thiserror::Error;

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    FetchGateway,
    ResolveToken,
    FetchListing,
    Parse,
    Classify,
    Rank,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "input validation",
            Stage::FetchGateway => "initial URL",
            Stage::ResolveToken => "token resolution",
            Stage::FetchListing => "download page",
            Stage::Parse => "page parsing",
            Stage::Classify => "link classification",
            Stage::Rank => "link ranking",
        };
        f.write_str(name)
    }
}

/// Failure of a single fetch, before the pipeline attaches a stage.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unexpected status {0}")]
    Status(u16),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Pipeline errors
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid URL format: {0}")]
    MalformedInput(String),

    #[error("failed to fetch {stage} (status: {status})")]
    Network { stage: Stage, status: u16 },

    #[error("failed to fetch {stage}: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not find the tokenized URL")]
    TokenNotFound,

    #[error("no valid download links found after filtering")]
    NoLinksFound,
}

impl ResolveError {
    /// Attach the fetch stage to a fetch failure.
    pub(crate) fn from_fetch(stage: Stage, err: FetchError) -> Self {
        match err {
            FetchError::Status(status) => ResolveError::Network { stage, status },
            FetchError::Transport(source) => ResolveError::Transport { stage, source },
        }
    }

    /// Stage the pipeline was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            ResolveError::MalformedInput(_) => Stage::Validate,
            ResolveError::Network { stage, .. } | ResolveError::Transport { stage, .. } => *stage,
            ResolveError::TokenNotFound => Stage::ResolveToken,
            ResolveError::NoLinksFound => Stage::Classify,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_message_names_stage_and_status() {
        let err = ResolveError::from_fetch(Stage::FetchGateway, FetchError::Status(404));
        assert_eq!(err.to_string(), "failed to fetch initial URL (status: 404)");
        assert_eq!(err.stage(), Stage::FetchGateway);
    }

    #[test]
    fn listing_failure_reports_download_page() {
        let err = ResolveError::from_fetch(Stage::FetchListing, FetchError::Status(503));
        assert_eq!(err.to_string(), "failed to fetch download page (status: 503)");
    }

    #[test]
    fn stages_of_terminal_errors() {
        assert_eq!(ResolveError::TokenNotFound.stage(), Stage::ResolveToken);
        assert_eq!(ResolveError::NoLinksFound.stage(), Stage::Classify);
        assert_eq!(
            ResolveError::MalformedInput("nope".into()).stage(),
            Stage::Validate
        );
    }

    #[test]
    fn stage_names_read_as_log_fields() {
        assert_eq!(Stage::Parse.to_string(), "page parsing");
        assert_eq!(Stage::Classify.to_string(), "link classification");
        assert_eq!(Stage::Rank.to_string(), "link ranking");
    }
}
