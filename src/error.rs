#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error("illegal base64 data in {field}: {source}")]
    Decode {
        field: String,
        #[source]
        source: base64::DecodeError
    },
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(u64),
    #[error("{0} is not computed with the latest supported hash algorithm")]
    HashAlgorithmMismatch(String),
    #[error("duplicate public key id: {0}")]
    DuplicateKeyId(String),
    #[error("invalid key type: {0}")]
    InvalidKeyType(String),
    #[error("{0}")]
    InvalidUsage(String),
    #[error("operation byte size {0} exceeds protocol max operation byte size {1}")]
    OperationTooLarge(usize, usize),

    #[error("Could not parse type ({0}) from: {1}")]
    Parse(String, String),
    #[error("Invalid {0}: {1}")]
    Invalid(String, String),
    #[error("Error {0}: {1}")]
    Error(String, String),
}

impl Error {
    pub fn decode(field: &str, source: base64::DecodeError) -> Self {
        Error::Decode{field: field.to_string(), source}
    }
    pub fn invalid(ctx: &str, err: &str) -> Self {
        Error::Invalid(ctx.to_string(), err.to_string())
    }
    pub fn usage(err: &str) -> Self {Error::InvalidUsage(err.to_string())}
    pub fn mismatch(field: &str) -> Self {Error::HashAlgorithmMismatch(field.to_string())}
    pub fn parse(r#type: &str, data: &str) -> Self {Error::Parse(r#type.to_string(), data.to_string())}
    pub fn err(ctx: &str, err: &str) -> Self {Error::Error(ctx.to_string(), err.to_string())}
}
