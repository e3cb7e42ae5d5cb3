use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mathcat_core::ops::OperationKind;

use crate::error::ProgressError;

#[derive(Clone, Debug)]
pub struct ProgressConfig {
    pub base_url: String,
}

impl ProgressConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("MATHCAT_API_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        Self { base_url }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Ok,
    NoUser,
    BadPassword,
}

/// The learner-progress backend: per-user proficiency counters, score
/// increments and account calls, keyed by username.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the proficiency counter for one operation.
    ///
    /// Every failure mode (network error, non-OK status, missing or
    /// non-numeric field) collapses to `None` so callers can default the
    /// level silently.
    async fn fetch_proficiency(&self, username: &str, kind: OperationKind) -> Option<f64>;

    /// Increment the per-operation score counter. Best effort, single
    /// attempt; returns whether the server acknowledged.
    async fn report_score(&self, username: &str, kind: OperationKind) -> bool;

    /// Verify credentials.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` when the server cannot be reached or answers
    /// with an error status.
    async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ProgressError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Rejected` when the server refuses the
    /// registration, other variants when it cannot be reached.
    async fn register(
        &self,
        username: &str,
        password: &str,
        age: u8,
    ) -> Result<(), ProgressError>;
}

//
// ─── HTTP CLIENT ───────────────────────────────────────────────────────────────
//

/// HTTP implementation of [`ProgressStore`] against the practice API.
#[derive(Clone)]
pub struct HttpProgressClient {
    client: Client,
    config: ProgressConfig,
}

impl HttpProgressClient {
    #[must_use]
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ProgressConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct UsernameBody<'a> {
    username: &'a str,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    password: &'a str,
    age: u8,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    ok: bool,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    success: bool,
    error: Option<String>,
}

#[async_trait]
impl ProgressStore for HttpProgressClient {
    async fn fetch_proficiency(&self, username: &str, kind: OperationKind) -> Option<f64> {
        let url = self.url(&format!("user/{}-f", kind.as_str()));
        let response = self
            .client
            .get(url)
            .query(&[("username", username)])
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }

        // The field name varies per operation (`multiplication_f`,
        // `percent_f`, ...), so the body is read untyped.
        let body: Value = response.json().await.ok()?;
        if body.get("ok").and_then(Value::as_bool) != Some(true) {
            return None;
        }
        let field = format!("{}_f", kind.as_str());
        let counter = body.get(&field)?.as_f64()?;
        counter.is_finite().then_some(counter)
    }

    async fn report_score(&self, username: &str, kind: OperationKind) -> bool {
        let url = self.url(&format!("score/{}", kind.as_str()));
        match self
            .client
            .post(url)
            .json(&UsernameBody { username })
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ProgressError> {
        let response = self
            .client
            .post(self.url("check-login"))
            .json(&CredentialsBody { username, password })
            .send()
            .await
            .map_err(|_| ProgressError::Unavailable)?;

        if !response.status().is_success() {
            return Err(ProgressError::HttpStatus(response.status()));
        }

        let body: LoginResponse = response.json().await?;
        if body.ok {
            return Ok(LoginOutcome::Ok);
        }
        match body.reason.as_deref() {
            Some("NO_USER") => Ok(LoginOutcome::NoUser),
            _ => Ok(LoginOutcome::BadPassword),
        }
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        age: u8,
    ) -> Result<(), ProgressError> {
        let response = self
            .client
            .post(self.url("register"))
            .json(&RegisterBody {
                username,
                password,
                age,
            })
            .send()
            .await
            .map_err(|_| ProgressError::Unavailable)?;

        let status = response.status();
        let body: Option<RegisterResponse> = response.json().await.ok();
        match body {
            Some(body) if body.success => Ok(()),
            Some(body) => Err(ProgressError::Rejected(
                body.error
                    .unwrap_or_else(|| "registration failed".to_string()),
            )),
            None => Err(ProgressError::HttpStatus(status)),
        }
    }
}

//
// ─── IN-MEMORY DOUBLE ──────────────────────────────────────────────────────────
//

/// In-memory [`ProgressStore`] for tests and offline development.
///
/// Tracks every score call so tests can assert on exactly-once reporting,
/// and can simulate an outage via [`InMemoryProgress::set_available`].
#[derive(Clone, Default)]
pub struct InMemoryProgress {
    counters: Arc<Mutex<HashMap<(String, OperationKind), f64>>>,
    accounts: Arc<Mutex<HashMap<String, String>>>,
    score_calls: Arc<Mutex<Vec<(String, OperationKind)>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_proficiency(&self, username: &str, kind: OperationKind, counter: f64) {
        if let Ok(mut guard) = self.counters.lock() {
            guard.insert((username.to_string(), kind), counter);
        }
    }

    pub fn add_account(&self, username: &str, password: &str) {
        if let Ok(mut guard) = self.accounts.lock() {
            guard.insert(username.to_string(), password.to_string());
        }
    }

    /// Simulate the backend going down (or coming back).
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    #[must_use]
    pub fn score_calls(&self, kind: OperationKind) -> usize {
        self.score_calls
            .lock()
            .map(|calls| calls.iter().filter(|(_, k)| *k == kind).count())
            .unwrap_or(0)
    }

    fn is_down(&self) -> bool {
        self.unavailable.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgress {
    async fn fetch_proficiency(&self, username: &str, kind: OperationKind) -> Option<f64> {
        if self.is_down() {
            return None;
        }
        self.counters
            .lock()
            .ok()?
            .get(&(username.to_string(), kind))
            .copied()
    }

    async fn report_score(&self, username: &str, kind: OperationKind) -> bool {
        if self.is_down() {
            return false;
        }
        let Ok(mut calls) = self.score_calls.lock() else {
            return false;
        };
        calls.push((username.to_string(), kind));
        let count = calls.iter().filter(|(_, k)| *k == kind).count();
        drop(calls);
        if let Ok(mut counters) = self.counters.lock() {
            #[allow(clippy::cast_precision_loss)]
            counters.insert((username.to_string(), kind), count as f64);
        }
        true
    }

    async fn check_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ProgressError> {
        if self.is_down() {
            return Err(ProgressError::Unavailable);
        }
        let guard = self
            .accounts
            .lock()
            .map_err(|_| ProgressError::Unavailable)?;
        match guard.get(username) {
            None => Ok(LoginOutcome::NoUser),
            Some(stored) if stored == password => Ok(LoginOutcome::Ok),
            Some(_) => Ok(LoginOutcome::BadPassword),
        }
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        _age: u8,
    ) -> Result<(), ProgressError> {
        if self.is_down() {
            return Err(ProgressError::Unavailable);
        }
        let mut guard = self
            .accounts
            .lock()
            .map_err(|_| ProgressError::Unavailable)?;
        if guard.contains_key(username) {
            return Err(ProgressError::Rejected("username already taken".into()));
        }
        guard.insert(username.to_string(), password.to_string());
        Ok(())
    }
}
