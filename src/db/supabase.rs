// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Managed backend client with typed operations.
//!
//! Provides high-level operations for:
//! - Tables (PostgREST select / insert / update / delete)
//! - Stored procedures (`/rest/v1/rpc/<name>`)
//! - Storage uploads with public URLs
//!
//! Every call is made on behalf of an operator session so the backend's
//! row-level security sees the agent, not the service.

use crate::db::query::TableQuery;
use crate::error::{AppError, BackendError};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";
const UPLOAD_CACHE_CONTROL: &str = "max-age=3600";

/// Backend client.
#[derive(Clone)]
pub struct SupabaseClient {
    connection: Option<Connection>,
}

#[derive(Clone)]
struct Connection {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Database(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            connection: Some(Connection {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                anon_key: anon_key.to_string(),
            }),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All backend operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { connection: None }
    }

    /// Helper to get the connection or return an error if offline.
    fn get_connection(&self) -> Result<&Connection, AppError> {
        self.connection
            .as_ref()
            .ok_or_else(|| AppError::Database("Backend not connected (offline mode)".to_string()))
    }

    /// Scope calls to an operator's session token.
    pub fn session<'a>(&'a self, access_token: &'a str) -> Session<'a> {
        Session {
            client: self,
            access_token,
        }
    }

    /// Public URL of an object in a public storage bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> Result<String, AppError> {
        let conn = self.get_connection()?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            conn.base_url,
            bucket,
            encode_object_path(path)
        ))
    }
}

/// Backend access on behalf of one authenticated operator.
#[derive(Clone, Copy)]
pub struct Session<'a> {
    client: &'a SupabaseClient,
    access_token: &'a str,
}

impl<'a> Session<'a> {
    /// Start a request against `table`.
    pub fn from(&self, table: &'a str) -> TableRequest<'a> {
        TableRequest {
            session: *self,
            table,
            query: TableQuery::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, AppError> {
        let conn = self.client.get_connection()?;
        Ok(conn
            .http
            .request(method, format!("{}{}", conn.base_url, path))
            .header("apikey", &conn.anon_key)
            .bearer_auth(self.access_token))
    }

    /// Call a stored procedure and decode its result.
    pub async fn rpc<T, A>(&self, function: &str, args: &A) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        A: Serialize + ?Sized,
    {
        tracing::debug!(function, "Calling stored procedure");
        let response = self
            .request(Method::POST, &format!("/rest/v1/rpc/{}", function))?
            .json(args)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_response(response, function).await?;
        parse_body(response, function).await
    }

    /// Call a stored procedure whose result is not needed.
    pub async fn rpc_unit<A>(&self, function: &str, args: &A) -> Result<(), AppError>
    where
        A: Serialize + ?Sized,
    {
        self.rpc::<serde_json::Value, A>(function, args).await?;
        Ok(())
    }

    /// Upload an object and return its public URL.
    ///
    /// Objects are never overwritten; a name collision is a backend error.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let object = encode_object_path(path);
        tracing::debug!(bucket, path = %object, size = bytes.len(), "Uploading object");

        let response = self
            .request(
                Method::POST,
                &format!("/storage/v1/object/{}/{}", bucket, object),
            )?
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(transport_error)?;

        check_response(response, bucket).await?;
        self.client.public_url(bucket, path)
    }
}

/// A pending table request: filters accumulate until a terminal operation.
pub struct TableRequest<'a> {
    session: Session<'a>,
    table: &'a str,
    query: TableQuery,
}

impl<'a> TableRequest<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        self.query = self.query.select(columns);
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.query = self.query.eq(column, value);
        self
    }

    pub fn is_in<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query = self.query.is_in(column, values);
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.query = self.query.order(column, ascending);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.query = self.query.limit(limit);
        self
    }

    fn build(&self, method: Method) -> Result<reqwest::RequestBuilder, AppError> {
        Ok(self
            .session
            .request(method, &format!("/rest/v1/{}", self.table))?
            .query(&self.query.to_params()))
    }

    fn require_filter(&self, operation: &str) -> Result<(), AppError> {
        if self.query.has_filters() {
            Ok(())
        } else {
            Err(AppError::Internal(anyhow::anyhow!(
                "Refusing unfiltered {} on {}",
                operation,
                self.table
            )))
        }
    }

    /// Fetch all matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, AppError> {
        let response = self
            .build(Method::GET)?
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_response(response, self.table).await?;
        parse_body(response, self.table).await
    }

    /// Fetch exactly one row. Zero rows is a `PGRST116` backend error.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T, AppError> {
        let response = self
            .build(Method::GET)?
            .header(reqwest::header::ACCEPT, OBJECT_MEDIA_TYPE)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_response(response, self.table).await?;
        parse_body(response, self.table).await
    }

    /// Insert one row (object body) or many rows (array body).
    pub async fn insert<T, B>(self, body: &B) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .build(Method::POST)?
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_response(response, self.table).await?;
        parse_body(response, self.table).await
    }

    /// Patch the matching rows and return them as updated.
    pub async fn update<T, B>(self, body: &B) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.require_filter("update")?;
        let response = self
            .build(Method::PATCH)?
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_response(response, self.table).await?;
        parse_body(response, self.table).await
    }

    /// Delete the matching rows.
    pub async fn delete(self) -> Result<(), AppError> {
        self.require_filter("delete")?;
        let response = self
            .build(Method::DELETE)?
            .header("Prefer", "return=minimal")
            .send()
            .await
            .map_err(transport_error)?;

        check_response(response, self.table).await?;
        Ok(())
    }
}

/// Error body shared by PostgREST and storage responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::Database(format!("Backend request failed: {}", e))
}

/// Check response status and return the backend's error if not successful.
async fn check_response(
    response: reqwest::Response,
    target: &str,
) -> Result<reqwest::Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let err = parse_error_body(status, &body);

    tracing::warn!(
        target_name = target,
        status,
        code = ?err.code,
        error = %err.message,
        "Backend rejected request"
    );

    Err(AppError::Backend(err))
}

fn parse_error_body(status: u16, body: &str) -> BackendError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => BackendError {
            status,
            code: parsed.code,
            message: parsed
                .message
                .or(parsed.error)
                .unwrap_or_else(|| format!("HTTP {}", status)),
        },
        Err(_) => BackendError {
            status,
            code: None,
            message: if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            },
        },
    }
}

/// Decode a JSON body. An empty body decodes as `null`.
async fn parse_body<T: DeserializeOwned>(
    response: reqwest::Response,
    target: &str,
) -> Result<T, AppError> {
    let text = response.text().await.map_err(transport_error)?;
    let text = if text.trim().is_empty() { "null" } else { &text };

    serde_json::from_str(text).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Unexpected response shape from {}: {}",
            target,
            e
        ))
    })
}

/// Percent-encode each segment of an object path, keeping `/` separators.
fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
