mod headers;
mod lookup;
mod message;
mod severity;

pub use headers::{HeaderEntry, find_header, format_header_block, parse_header_block};
pub use lookup::{PairLookup, StoredPair};
pub use message::{HttpRequest, HttpResponse};
pub use severity::Severity;
