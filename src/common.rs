use super::Error;

pub mod canonicalizer;
pub mod logger;
pub mod multihash;

pub use canonicalizer::canonicalize;
pub use logger::Logger;
pub use multihash::{HashAlgorithm, Multihash};


use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::prelude::{Engine as _, BASE64_URL_SAFE_NO_PAD, BASE64_URL_SAFE};

const BASE64_URL_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
);

/// Text encodings used on the wire. Sidetree payloads are unpadded base64url, but
/// decoding tolerates padded input from older clients.
pub enum Convert {
    Base64Url,
    Base64UrlPadded
}

impl Convert {
    pub fn encode(&self, data: &[u8]) -> String {
        match &self {
            Convert::Base64Url => BASE64_URL_SAFE_NO_PAD.encode(data),
            Convert::Base64UrlPadded => BASE64_URL_SAFE.encode(data)
        }
    }

    pub fn decode(&self, input: &str) -> Result<Vec<u8>, base64::DecodeError> {
        match &self {
            Convert::Base64Url => BASE64_URL_LENIENT.decode(input),
            Convert::Base64UrlPadded => BASE64_URL_SAFE.decode(input)
        }
    }

    /// Decodes `input`, attributing a failure to the named wire field.
    pub fn decode_field(&self, field: &str, input: &str) -> Result<Vec<u8>, Error> {
        self.decode(input).map_err(|e| Error::decode(field, e))
    }
}
