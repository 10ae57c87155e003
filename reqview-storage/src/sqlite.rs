use std::path::Path;
use std::sync::Arc;

use reqview_core::{
    HttpRequest, HttpResponse, PairLookup, StoredPair, format_header_block, parse_header_block,
};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};

use crate::schema::{SchemaAction, SchemaCatalog};

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|err| err.to_string())?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|err| err.to_string())?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<(), String> {
        self.conn
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|err| err.to_string())?;
        self.conn
            .pragma_update(None, "synchronous", "NORMAL")
            .map_err(|err| err.to_string())?;

        let stored: u32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|err| err.to_string())?;
        let action = SchemaCatalog::plan(stored).map_err(|err| err.to_string())?;
        if action == SchemaAction::UpToDate {
            return Ok(());
        }

        let schema = SchemaCatalog::current();
        for table in schema.tables {
            self.conn
                .execute(&table.create_sql, [])
                .map_err(|err| err.to_string())?;
            for index in table.indices {
                let index_sql = index.replace("CREATE INDEX", "CREATE INDEX IF NOT EXISTS");
                self.conn
                    .execute(&index_sql, [])
                    .map_err(|err| err.to_string())?;
            }
        }
        self.conn
            .pragma_update(None, "user_version", schema.version)
            .map_err(|err| err.to_string())?;
        Ok(())
    }

    pub fn insert_request(&self, request: &HttpRequest, captured_at: &str) -> Result<i64, String> {
        self.conn
            .execute(
                "INSERT INTO http_requests (
                    method, uri, http_version, request_headers, request_body, captured_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    request.method,
                    request.uri,
                    request.http_version,
                    format_header_block(&request.headers),
                    request.body,
                    captured_at,
                ],
            )
            .map_err(|err| err.to_string())?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_response(
        &self,
        request_id: i64,
        response: &HttpResponse,
        received_at: &str,
    ) -> Result<(), String> {
        self.conn
            .execute(
                "INSERT INTO http_responses (
                    request_id, http_version, status_code, reason, uri,
                    response_headers, response_body, received_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    request_id,
                    response.http_version,
                    response.status_code,
                    response.reason,
                    response.uri,
                    format_header_block(&response.headers),
                    response.body,
                    received_at,
                ],
            )
            .map_err(|err| err.to_string())?;
        Ok(())
    }

    pub fn insert_pair(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        captured_at: &str,
    ) -> Result<i64, String> {
        let request_id = self.insert_request(request, captured_at)?;
        self.insert_response(request_id, response, captured_at)?;
        Ok(request_id)
    }

    /// Every stored response joined with its request. Requests without a
    /// response are not returned.
    pub fn search_by_id(&self, id: i64) -> Result<Vec<StoredPair>, String> {
        let mut statement = self
            .conn
            .prepare(
                "SELECT req.id, req.method, req.uri, req.http_version, req.request_headers, req.request_body,
                        resp.http_version, resp.status_code, resp.reason, resp.uri,
                        resp.response_headers, resp.response_body
                 FROM http_requests req
                 JOIN http_responses resp ON resp.request_id = req.id
                 WHERE req.id = ?1
                 ORDER BY resp.id ASC",
            )
            .map_err(|err| err.to_string())?;
        let rows = statement
            .query_map([id], parse_pair_row)
            .map_err(|err| err.to_string())?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|err| err.to_string())?);
        }
        Ok(results)
    }
}

impl PairLookup for SqliteStore {
    fn find_by_id(&self, id: i64) -> Result<Vec<StoredPair>, String> {
        self.search_by_id(id)
    }
}

fn parse_pair_row(row: &Row<'_>) -> Result<StoredPair, rusqlite::Error> {
    let request_headers: Vec<u8> = row.get(4)?;
    let request_body: Option<Vec<u8>> = row.get(5)?;
    let response_headers: Vec<u8> = row.get(10)?;
    let response_body: Option<Vec<u8>> = row.get(11)?;
    let request = HttpRequest {
        method: row.get(1)?,
        uri: row.get(2)?,
        http_version: row.get(3)?,
        headers: parse_header_block(&request_headers),
        body: request_body.unwrap_or_default(),
    };
    let response = HttpResponse {
        http_version: row.get(6)?,
        status_code: u16::try_from(row.get::<_, i64>(7)?).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(7, Type::Integer, Box::new(err))
        })?,
        reason: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        uri: row.get(9)?,
        headers: parse_header_block(&response_headers),
        body: response_body.unwrap_or_default(),
    };
    Ok(StoredPair {
        id: row.get(0)?,
        request: Arc::new(request),
        response: Arc::new(response),
    })
}
