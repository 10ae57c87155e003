mod compress;
mod encode;
mod error;

pub use compress::{
    decode_content_encoding, deflate_compress, deflate_decompress, gzip_compress, gzip_decompress,
};
pub use encode::{bytes_to_string_lossy, html_escape_str, html_unescape_str, to_display_text};
pub use error::CodecError;
