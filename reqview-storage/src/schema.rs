use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub create_sql: String,
    pub indices: Vec<String>,
}

/// Table layout of one schema version. The version is kept in SQLite's
/// `user_version` pragma; a fresh database reports 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSpec {
    pub version: u32,
    pub tables: Vec<TableSpec>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("database schema version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// What opening a database with a given stored version has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaAction {
    Create,
    UpToDate,
}

pub struct SchemaCatalog;

impl SchemaCatalog {
    pub fn v1() -> SchemaSpec {
        SchemaSpec {
            version: 1,
            tables: vec![
                TableSpec {
                    name: "http_requests".to_string(),
                    create_sql: "CREATE TABLE IF NOT EXISTS http_requests (\
    id INTEGER PRIMARY KEY,\
    method TEXT NOT NULL,\
    uri TEXT NOT NULL,\
    http_version TEXT NOT NULL,\
    request_headers BLOB NOT NULL,\
    request_body BLOB,\
    captured_at TEXT NOT NULL\
)"
                    .to_string(),
                    indices: vec![
                        "CREATE INDEX idx_http_requests_uri ON http_requests(uri)".to_string(),
                        "CREATE INDEX idx_http_requests_captured_at ON http_requests(captured_at)"
                            .to_string(),
                    ],
                },
                TableSpec {
                    name: "http_responses".to_string(),
                    create_sql: "CREATE TABLE IF NOT EXISTS http_responses (\
    id INTEGER PRIMARY KEY,\
    request_id INTEGER NOT NULL REFERENCES http_requests(id),\
    http_version TEXT NOT NULL,\
    status_code INTEGER NOT NULL,\
    reason TEXT,\
    uri TEXT NOT NULL,\
    response_headers BLOB NOT NULL,\
    response_body BLOB,\
    received_at TEXT NOT NULL\
)"
                    .to_string(),
                    indices: vec![
                        "CREATE INDEX idx_http_responses_request_id ON http_responses(request_id)"
                            .to_string(),
                        "CREATE INDEX idx_http_responses_status_code ON http_responses(status_code)"
                            .to_string(),
                    ],
                },
            ],
        }
    }

    pub fn current() -> SchemaSpec {
        Self::v1()
    }

    pub fn plan(stored_version: u32) -> Result<SchemaAction, SchemaError> {
        let supported = Self::current().version;
        match stored_version {
            0 => Ok(SchemaAction::Create),
            found if found == supported => Ok(SchemaAction::UpToDate),
            found => Err(SchemaError::UnsupportedVersion { found, supported }),
        }
    }
}
