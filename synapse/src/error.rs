use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynapseError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("synapse api error: {0}")]
    Api(String),
    #[error("graphql error: {0}")]
    GraphQl(String),
    #[error("no bridge quote for {0}")]
    NoQuote(String),
    #[error("bad amount: {0}")]
    Amount(String),
    #[error("origin and destination chain are both {0}")]
    SameChain(u64),
}
