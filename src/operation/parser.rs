use super::{
    CompactJws,
    CreateOperation,
    CreateRequest,
    DeactivateOperation,
    DeactivateRequest,
    DeactivateSignedData,
    Error,
    Operation,
    OperationData,
    OperationType,
    RecoverOperation,
    RecoverRequest,
    RecoverSignedData,
    SuffixData,
    UpdateOperation,
    UpdateRequest,
    UpdateSignedData
};

use crate::common::{Convert, Logger};
use crate::common::multihash::{is_computed_using_hash_algorithm, MultihashCode};
use crate::document::validate_jwk;
use crate::protocol::Protocol;

use serde::Deserialize;

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    operation: OperationType
}

/// Parses operation requests against one protocol version.
#[derive(Debug, Clone)]
pub struct OperationParser {
    protocol: Protocol,
    logger: Logger
}

impl OperationParser {
    pub fn new(protocol: Protocol) -> Self {
        OperationParser{protocol, logger: Logger::new("sidetree-core-operation")}
    }

    pub fn with_logger(protocol: Protocol, logger: Logger) -> Self {
        OperationParser{protocol, logger}
    }

    pub fn protocol(&self) -> &Protocol {&self.protocol}

    fn code(&self) -> MultihashCode {self.protocol.hash_algorithm_in_multihash_code}

    fn check_size(&self, request: &[u8]) -> Result<(), Error> {
        if request.len() > self.protocol.max_operation_size {
            return Err(Error::OperationTooLarge(request.len(), self.protocol.max_operation_size));
        }
        Ok(())
    }

    fn check_type(expected: OperationType, actual: OperationType) -> Result<(), Error> {
        if expected != actual {
            return Err(Error::invalid("operation", &format!("expected {} operation, got {}", expected, actual)));
        }
        Ok(())
    }

    /// Reads the request's `type` and hands it to the matching parser.
    pub fn parse(&self, request: &[u8]) -> Result<Operation, Error> {
        self.check_size(request)?;
        let envelope: Envelope = serde_json::from_slice(request)?;
        match envelope.operation {
            OperationType::Create => self.parse_create_operation(request),
            OperationType::Update => self.parse_update_operation(request),
            OperationType::Recover => self.parse_recover_operation(request),
            OperationType::Deactivate => self.parse_deactivate_operation(request),
        }
    }

    pub fn parse_create_operation(&self, request: &[u8]) -> Result<Operation, Error> {
        self.logger.debug(&format!("parsing create operation: {} bytes", request.len()));
        self.check_size(request)?;
        let schema: CreateRequest = serde_json::from_slice(request)?;
        Self::check_type(OperationType::Create, schema.operation)?;

        let suffix_data_bytes = Convert::Base64Url.decode_field("suffixData", &schema.suffix_data)?;
        let operation_data_bytes = Convert::Base64Url.decode_field("delta", &schema.delta)?;

        let suffix_data: SuffixData = serde_json::from_slice(&suffix_data_bytes)?;
        validate_suffix_data(&suffix_data, self.code())?;

        let operation_data: OperationData = serde_json::from_slice(&operation_data_bytes)?;
        validate_operation_data(&operation_data, self.code())?;

        Ok(Operation::Create(CreateOperation{
            operation_buffer: request.to_vec(),
            suffix_data,
            operation_data,
        }))
    }

    pub fn parse_update_operation(&self, request: &[u8]) -> Result<Operation, Error> {
        self.logger.debug(&format!("parsing update operation: {} bytes", request.len()));
        self.check_size(request)?;
        let schema: UpdateRequest = serde_json::from_slice(request)?;
        Self::check_type(OperationType::Update, schema.operation)?;
        validate_did_suffix("update request", &schema.did_suffix, &schema.reveal_value)?;

        let signed_data = CompactJws::parse(&schema.signed_data)?;
        let claims: UpdateSignedData = signed_data.claims()?;
        validate_jwk(claims.update_key.as_ref())?;
        if !is_computed_using_hash_algorithm(&claims.operation_data_hash, self.code()) {
            return Err(Error::mismatch("operation data hash"));
        }

        let operation_data = self.decode_operation_data(&schema.delta)?;

        Ok(Operation::Update(UpdateOperation{
            operation_buffer: request.to_vec(),
            did_suffix: schema.did_suffix,
            reveal_value: schema.reveal_value,
            operation_data,
            signed_data,
            claims,
        }))
    }

    pub fn parse_recover_operation(&self, request: &[u8]) -> Result<Operation, Error> {
        self.logger.debug(&format!("parsing recover operation: {} bytes", request.len()));
        self.check_size(request)?;
        let schema: RecoverRequest = serde_json::from_slice(request)?;
        Self::check_type(OperationType::Recover, schema.operation)?;
        validate_did_suffix("recover request", &schema.did_suffix, &schema.reveal_value)?;

        let signed_data = CompactJws::parse(&schema.signed_data)?;
        let claims: RecoverSignedData = signed_data.claims()?;
        validate_jwk(claims.recovery_key.as_ref())?;
        if !is_computed_using_hash_algorithm(&claims.operation_data_hash, self.code()) {
            return Err(Error::mismatch("operation data hash"));
        }
        if !is_computed_using_hash_algorithm(&claims.next_recovery_commitment_hash, self.code()) {
            return Err(Error::mismatch("next recovery commitment hash"));
        }

        let operation_data = self.decode_operation_data(&schema.delta)?;

        Ok(Operation::Recover(RecoverOperation{
            operation_buffer: request.to_vec(),
            did_suffix: schema.did_suffix,
            reveal_value: schema.reveal_value,
            operation_data,
            signed_data,
            claims,
        }))
    }

    pub fn parse_deactivate_operation(&self, request: &[u8]) -> Result<Operation, Error> {
        self.logger.debug(&format!("parsing deactivate operation: {} bytes", request.len()));
        self.check_size(request)?;
        let schema: DeactivateRequest = serde_json::from_slice(request)?;
        Self::check_type(OperationType::Deactivate, schema.operation)?;
        validate_did_suffix("deactivate request", &schema.did_suffix, &schema.reveal_value)?;

        let signed_data = CompactJws::parse(&schema.signed_data)?;
        let claims: DeactivateSignedData = signed_data.claims()?;
        if claims.did_suffix != schema.did_suffix {
            return Err(Error::invalid("deactivate request", "signed did suffix does not match did suffix"));
        }
        validate_jwk(claims.recovery_key.as_ref())?;

        Ok(Operation::Deactivate(DeactivateOperation{
            operation_buffer: request.to_vec(),
            did_suffix: schema.did_suffix,
            reveal_value: schema.reveal_value,
            signed_data,
            claims,
        }))
    }

    fn decode_operation_data(&self, encoded: &str) -> Result<OperationData, Error> {
        let operation_data: OperationData = serde_json::from_slice(&Convert::Base64Url.decode_field("delta", encoded)?)?;
        validate_operation_data(&operation_data, self.code())?;
        Ok(operation_data)
    }
}

fn validate_did_suffix(ctx: &str, did_suffix: &str, reveal_value: &str) -> Result<(), Error> {
    if did_suffix.is_empty() {
        return Err(Error::invalid(ctx, "missing did suffix"));
    }
    if reveal_value.is_empty() {
        return Err(Error::invalid(ctx, "missing reveal value"));
    }
    Ok(())
}

pub fn validate_suffix_data(suffix_data: &SuffixData, multihash_code: MultihashCode) -> Result<(), Error> {
    if suffix_data.recovery_key.is_empty() {
        return Err(Error::invalid("suffix data", "missing recovery key"));
    }
    if let Some(jwk) = &suffix_data.recovery_key.public_key_jwk {
        validate_jwk(Some(jwk))?;
    }
    if !is_computed_using_hash_algorithm(&suffix_data.operation_data_hash, multihash_code) {
        return Err(Error::mismatch("operation data hash"));
    }
    if !is_computed_using_hash_algorithm(&suffix_data.next_recovery_commitment_hash, multihash_code) {
        return Err(Error::mismatch("next recovery commitment hash"));
    }
    Ok(())
}

pub fn validate_operation_data(operation_data: &OperationData, multihash_code: MultihashCode) -> Result<(), Error> {
    if !is_computed_using_hash_algorithm(&operation_data.next_update_commitment_hash, multihash_code) {
        return Err(Error::mismatch("next update commitment hash"));
    }
    if operation_data.patches.is_empty() {
        return Err(Error::invalid("operation data", "missing operation patch"));
    }
    Ok(())
}

pub fn parse_operation(request: &[u8], protocol: &Protocol) -> Result<Operation, Error> {
    OperationParser::new(protocol.clone()).parse(request)
}

pub fn parse_create_operation(request: &[u8], protocol: &Protocol) -> Result<Operation, Error> {
    OperationParser::new(protocol.clone()).parse_create_operation(request)
}

pub fn parse_update_operation(request: &[u8], protocol: &Protocol) -> Result<Operation, Error> {
    OperationParser::new(protocol.clone()).parse_update_operation(request)
}

pub fn parse_recover_operation(request: &[u8], protocol: &Protocol) -> Result<Operation, Error> {
    OperationParser::new(protocol.clone()).parse_recover_operation(request)
}

pub fn parse_deactivate_operation(request: &[u8], protocol: &Protocol) -> Result<Operation, Error> {
    OperationParser::new(protocol.clone()).parse_deactivate_operation(request)
}
