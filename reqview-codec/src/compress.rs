use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::{DeflateDecoder, GzDecoder};
use flate2::write::{DeflateEncoder, GzEncoder};

use crate::CodecError;

pub fn gzip_compress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(input)
        .map_err(|err| CodecError::Compression(err.to_string()))?;
    encoder
        .finish()
        .map_err(|err| CodecError::Compression(err.to_string()))
}

pub fn gzip_decompress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoder = GzDecoder::new(input);
    let mut output = Vec::new();
    decoder
        .read_to_end(&mut output)
        .map_err(|err| CodecError::Compression(err.to_string()))?;
    Ok(output)
}

pub fn deflate_compress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(input)
        .map_err(|err| CodecError::Compression(err.to_string()))?;
    encoder
        .finish()
        .map_err(|err| CodecError::Compression(err.to_string()))
}

pub fn deflate_decompress(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoder = DeflateDecoder::new(input);
    let mut output = Vec::new();
    decoder
        .read_to_end(&mut output)
        .map_err(|err| CodecError::Compression(err.to_string()))?;
    Ok(output)
}

/// Decodes a body according to the first coding listed in a
/// `Content-Encoding` value. `identity` and an empty value pass through.
pub fn decode_content_encoding(body: &[u8], encoding: &str) -> Result<Vec<u8>, CodecError> {
    let encoding = encoding
        .split(',')
        .next()
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();
    match encoding.as_str() {
        "" | "identity" => Ok(body.to_vec()),
        "gzip" | "x-gzip" => gzip_decompress(body),
        "deflate" => deflate_decompress(body),
        other => Err(CodecError::UnsupportedEncoding(other.to_string())),
    }
}
