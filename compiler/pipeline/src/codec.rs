//! Wire codec for the plugin protocol.
//!
//! The host compiler writes one encoded `CodeGeneratorRequest` and reads back one
//! encoded `CodeGeneratorResponse`; both are read and written whole.

use std::io::{Read, Write};

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::Result;

/// Decode a request from its wire bytes
pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

/// Encode a response to its wire bytes
pub fn encode_response(response: &CodeGeneratorResponse) -> Vec<u8> { response.encode_to_vec() }

/// Read `reader` to the end and decode it as a request
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    decode_request(&buf)
}

/// Encode `response` and write it to `writer`, then flush
pub fn write_response<W: Write>(mut writer: W, response: &CodeGeneratorResponse) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PipelineError;

    #[test]
    fn test_decode_request() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".into()],
            parameter: Some("ext=swift".into()),
            ..Default::default()
        };
        let decoded = decode_request(&request.encode_to_vec()).expect("valid request");
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_decode_request_garbage() {
        match decode_request(&[0xff, 0xff, 0xff]) {
            Err(PipelineError::Decode(_)) => {}
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_and_write() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".into()],
            ..Default::default()
        };
        let decoded = read_request(request.encode_to_vec().as_slice()).expect("valid request");
        assert_eq!(decoded.file_to_generate, vec!["a.proto".to_string()]);

        let response = CodeGeneratorResponse { error: Some("boom".into()), ..Default::default() };
        let mut out = Vec::new();
        write_response(&mut out, &response).expect("writing to a Vec cannot fail");
        assert_eq!(CodeGeneratorResponse::decode(out.as_slice()).expect("valid response"), response);
    }
}
