use axum::{
    extract::{rejection::JsonRejection, Path, State as AxumState},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use slots_execution::{query, state_transition::prepare, Entropy, Memory, SeededEntropy, State};
use slots_types::{
    api::{
        CashOutReceipt, ErrorBody, RollOutcome, RollView, SessionCreated, SessionRequest,
        SessionStatus,
    },
    execution::{Instruction, Output},
    SessionId, SlotsError,
};
use std::{
    collections::HashMap,
    path::Path as FsPath,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info};

mod journal;

pub use journal::{Batch, Journal, JournalError};

type SessionLock = Arc<AsyncMutex<()>>;

/// Local backend for the slot machine.
///
/// Holds every session in memory and optionally mirrors committed changes to
/// a [Journal]. Instructions against one session run one at a time; different
/// sessions proceed in parallel.
pub struct Simulator<E: Entropy = SeededEntropy> {
    entropy: E,
    state: RwLock<Memory>,
    locks: Mutex<HashMap<SessionId, SessionLock>>,
    journal: Option<Arc<Mutex<Journal>>>,
}

impl<E: Entropy> Simulator<E> {
    pub fn new(entropy: E) -> Self {
        Self {
            entropy,
            state: RwLock::new(Memory::default()),
            locks: Mutex::new(HashMap::new()),
            journal: None,
        }
    }

    /// Create a simulator backed by the journal at `path`, replaying whatever
    /// it already holds.
    pub async fn with_journal(
        entropy: E,
        path: impl AsRef<FsPath>,
    ) -> Result<Self, JournalError> {
        let path = path.as_ref().to_path_buf();
        let (journal, batches) = tokio::task::spawn_blocking(move || Journal::open(path))
            .await
            .map_err(|e| JournalError::Io(std::io::Error::other(e)))??;
        let mut state = Memory::default();
        let replayed = batches.len();
        for batch in batches {
            state.apply(batch).await;
        }
        info!(
            path = %journal.path().display(),
            batches = replayed,
            entries = state.len(),
            "journal replayed"
        );

        Ok(Self {
            entropy,
            state: RwLock::new(state),
            locks: Mutex::new(HashMap::new()),
            journal: Some(Arc::new(Mutex::new(journal))),
        })
    }
}

impl<E: Entropy + Sync> Simulator<E> {
    pub async fn create_session(&self) -> Result<SessionCreated, SlotsError> {
        let instruction = Instruction::CreateSession {
            session_id: SessionId::random(),
        };
        match self.submit(instruction).await? {
            Output::SessionCreated(created) => Ok(created),
            other => Err(unexpected_output(other)),
        }
    }

    pub async fn play_roll(&self, session_id: SessionId) -> Result<RollOutcome, SlotsError> {
        match self.submit(Instruction::PlayRoll { session_id }).await? {
            Output::Roll(outcome) => Ok(outcome),
            other => Err(unexpected_output(other)),
        }
    }

    pub async fn cash_out(&self, session_id: SessionId) -> Result<CashOutReceipt, SlotsError> {
        match self.submit(Instruction::CashOut { session_id }).await? {
            Output::CashOut(receipt) => Ok(receipt),
            other => Err(unexpected_output(other)),
        }
    }

    pub async fn status(&self, session_id: SessionId) -> Result<SessionStatus, SlotsError> {
        let state = self.state.read().await;
        query::session_status(&*state, &session_id).await
    }

    pub async fn rolls(&self, session_id: SessionId) -> Result<Vec<RollView>, SlotsError> {
        let state = self.state.read().await;
        let rolls = query::list_rolls(&*state, &session_id).await?;
        Ok(rolls.iter().map(RollView::from).collect())
    }

    /// Stage, journal and apply one instruction while holding its session lock.
    async fn submit(&self, instruction: Instruction) -> Result<Output, SlotsError> {
        let session_id = instruction.session_id();
        let lock = self.session_lock(session_id)?;
        let result = {
            let _guard = lock.lock().await;
            self.commit(&instruction).await
        };
        self.release_session_lock(session_id, lock)?;
        result
    }

    async fn commit(&self, instruction: &Instruction) -> Result<Output, SlotsError> {
        let now = now_ms();
        let (output, changes) = {
            let state = self.state.read().await;
            prepare(&*state, &self.entropy, now, instruction).await?
        };
        let changes = self.record(changes).await?;

        self.state.write().await.apply(changes).await;
        Ok(output)
    }

    /// Append `changes` to the journal on the blocking pool, handing them back
    /// once durable.
    async fn record(&self, changes: Batch) -> Result<Batch, SlotsError> {
        let Some(journal) = self.journal.clone() else {
            return Ok(changes);
        };
        tokio::task::spawn_blocking(move || {
            let mut journal = journal.lock().map_err(|e| {
                error!("journal lock poisoned: {}", e);
                SlotsError::Internal("journal unavailable".to_string())
            })?;
            journal.append(&changes).map_err(|e| {
                error!(error = %e, "failed to append to journal");
                SlotsError::Internal(e.to_string())
            })?;
            Ok::<_, SlotsError>(changes)
        })
        .await
        .map_err(|e| {
            error!(error = %e, "journal task failed");
            SlotsError::Internal(e.to_string())
        })?
    }

    fn lock_table(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, SessionLock>>, SlotsError> {
        self.locks.lock().map_err(|e| {
            error!("session lock table poisoned: {}", e);
            SlotsError::Internal("session locks unavailable".to_string())
        })
    }

    fn session_lock(&self, session_id: SessionId) -> Result<SessionLock, SlotsError> {
        Ok(self.lock_table()?.entry(session_id).or_default().clone())
    }

    /// Drop the table entry once no other request holds or waits on it.
    ///
    /// Handles are only cloned under the table lock, so a count of two (the
    /// table's and ours) means nobody else can be queued behind this one.
    fn release_session_lock(
        &self,
        session_id: SessionId,
        lock: SessionLock,
    ) -> Result<(), SlotsError> {
        let mut table = self.lock_table()?;
        if Arc::strong_count(&lock) == 2 {
            table.remove(&session_id);
        }
        Ok(())
    }

    #[cfg(test)]
    fn tracked_sessions(&self) -> usize {
        self.locks.lock().map(|table| table.len()).unwrap_or_default()
    }
}

fn unexpected_output(output: Output) -> SlotsError {
    SlotsError::Internal(format!("unexpected output: {output:?}"))
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Request rate limit applied per client IP.
#[derive(Clone, Copy, Debug)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

pub struct Api<E: Entropy = SeededEntropy> {
    simulator: Arc<Simulator<E>>,
    rate_limit: Option<RateLimit>,
}

impl<E: Entropy + Send + Sync + 'static> Api<E> {
    pub fn new(simulator: Arc<Simulator<E>>) -> Self {
        Self {
            simulator,
            rate_limit: None,
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn router(&self) -> anyhow::Result<Router> {
        // Configure CORS
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        let router = Router::new()
            .route("/healthz", get(healthz))
            .route("/api/create-session/", post(create_session::<E>))
            .route("/api/roll/", post(roll::<E>))
            .route("/api/cash-out/", post(cash_out::<E>))
            .route("/api/session/:id/", get(status::<E>))
            .route("/api/session/:id/rolls/", get(rolls::<E>))
            .layer(cors);

        // Configure Rate Limiting
        let router = match self.rate_limit {
            Some(RateLimit { per_second, burst }) => {
                let governor_conf = Arc::new(
                    GovernorConfigBuilder::default()
                        .per_second(per_second)
                        .burst_size(burst)
                        .key_extractor(SmartIpKeyExtractor)
                        .finish()
                        .ok_or_else(|| {
                            anyhow::anyhow!("invalid rate limit {per_second}/s burst {burst}")
                        })?,
                );
                router.layer(GovernorLayer {
                    config: governor_conf,
                })
            }
            None => router,
        };

        Ok(router.with_state(self.simulator.clone()))
    }
}

/// [SlotsError] as an HTTP response.
pub struct ApiError(SlotsError);

impl From<SlotsError> for ApiError {
    fn from(err: SlotsError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            SlotsError::SessionNotFound | SlotsError::SessionNotFoundOrInactive => {
                StatusCode::NOT_FOUND
            }
            SlotsError::InsufficientCredits => StatusCode::BAD_REQUEST,
            SlotsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal details stay in the log.
        let body = match &self.0 {
            SlotsError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                ErrorBody {
                    error: "internal error".to_string(),
                    code: self.0.code(),
                }
            }
            err => ErrorBody::from(err),
        };
        (status, Json(body)).into_response()
    }
}

/// Parse a client-supplied identifier; anything malformed is reported as
/// `missing`.
fn parse_session_id(raw: &str, missing: SlotsError) -> Result<SessionId, ApiError> {
    raw.trim().parse().map_err(|_| ApiError(missing))
}

/// Play and cash-out bodies. A body without a usable `session_id` names no
/// session.
fn session_from_body(
    request: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<SessionId, ApiError> {
    match request {
        Ok(Json(request)) => {
            parse_session_id(&request.session_id, SlotsError::SessionNotFoundOrInactive)
        }
        Err(rejection) => {
            debug!(error = %rejection, "rejected session request body");
            Err(ApiError(SlotsError::SessionNotFoundOrInactive))
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn create_session<E: Entropy + Send + Sync + 'static>(
    AxumState(simulator): AxumState<Arc<Simulator<E>>>,
) -> Result<Json<SessionCreated>, ApiError> {
    Ok(Json(simulator.create_session().await?))
}

async fn roll<E: Entropy + Send + Sync + 'static>(
    AxumState(simulator): AxumState<Arc<Simulator<E>>>,
    request: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<RollOutcome>, ApiError> {
    let session_id = session_from_body(request)?;
    Ok(Json(simulator.play_roll(session_id).await?))
}

async fn cash_out<E: Entropy + Send + Sync + 'static>(
    AxumState(simulator): AxumState<Arc<Simulator<E>>>,
    request: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<CashOutReceipt>, ApiError> {
    let session_id = session_from_body(request)?;
    Ok(Json(simulator.cash_out(session_id).await?))
}

async fn status<E: Entropy + Send + Sync + 'static>(
    AxumState(simulator): AxumState<Arc<Simulator<E>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatus>, ApiError> {
    let session_id = parse_session_id(&id, SlotsError::SessionNotFound)?;
    Ok(Json(simulator.status(session_id).await?))
}

async fn rolls<E: Entropy + Send + Sync + 'static>(
    AxumState(simulator): AxumState<Arc<Simulator<E>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RollView>>, ApiError> {
    let session_id = parse_session_id(&id, SlotsError::SessionNotFound)?;
    Ok(Json(simulator.rolls(session_id).await?))
}
