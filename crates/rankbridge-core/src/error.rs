use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("unknown rank: {0}")]
    UnknownRank(String),

    #[error("invalid member id: {0}")]
    InvalidMemberId(String),

    #[error("rank role not found upstream: {0}")]
    RoleNotFound(String),

    #[error("member not found upstream: {0}")]
    MemberNotFound(String),

    #[error("upstream platform error: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, RankError>;
