//! FIX session engine.
//!
//! Owns the transport for one session: performs the Logon on open, stamps
//! the standard header onto outgoing messages, answers Test Requests,
//! emits Heartbeats on the configured interval, and records all traffic in
//! the shared [`MessageStore`]. The console core only sees `send`, `close`,
//! and `is_closed`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fixterm_wire::message::sending_time;
use fixterm_wire::tags::{self, msg_type};
use fixterm_wire::{FixCodec, FixConfig, FixMessage, WireError};
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::task::JoinHandle;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use crate::store::{Direction, MessageStore};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session is closed; no further messages can be sent.
    #[error("connection closed")]
    Closed,

    /// Transport I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding failed; indicates a defect, not a transport condition.
    #[error(transparent)]
    Wire(WireError),
}

impl From<WireError> for SessionError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::Io(e) => Self::Io(e),
            other => Self::Wire(other),
        }
    }
}

type BoxedWriter = FramedWrite<Box<dyn AsyncWrite + Send + Unpin>, FixCodec>;

/// A live FIX session.
///
/// Close is idempotent: the first call sends Logout best-effort, shuts the
/// transport down, and stops the background tasks; later calls are no-ops.
pub struct Session {
    config: FixConfig,
    writer: tokio::sync::Mutex<BoxedWriter>,
    store: Arc<MessageStore>,
    next_seq: AtomicU64,
    closed: AtomicBool,
    tasks: parking_lot::Mutex<Vec<JoinHandle<()>>>,
}

impl Session {
    /// Open a session to the counterparty at `addr`.
    pub async fn connect<A: ToSocketAddrs>(
        addr: A,
        config: FixConfig,
        store: Arc<MessageStore>,
    ) -> Result<Arc<Self>, SessionError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (reader, writer) = stream.into_split();
        Self::start(reader, writer, config, store).await
    }

    /// Start a session over an already-established stream pair.
    ///
    /// Sends the Logon and spawns the reader and heartbeat tasks.
    pub async fn start<R, W>(
        reader: R,
        writer: W,
        config: FixConfig,
        store: Arc<MessageStore>,
    ) -> Result<Arc<Self>, SessionError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let codec = FixCodec::new(config.version);
        let framed_read =
            FramedRead::with_capacity(reader, codec.clone(), config.rx_buffer_capacity);
        let mut framed_write: BoxedWriter = FramedWrite::new(Box::new(writer), codec);
        framed_write
            .write_buffer_mut()
            .reserve(config.tx_buffer_capacity);

        let session = Arc::new(Self {
            config,
            writer: tokio::sync::Mutex::new(framed_write),
            store,
            next_seq: AtomicU64::new(1),
            closed: AtomicBool::new(false),
            tasks: parking_lot::Mutex::new(Vec::new()),
        });

        let logon = FixMessage::new()
            .with_field(tags::MSG_TYPE, msg_type::LOGON)
            .with_field(tags::ENCRYPT_METHOD, "0")
            .with_field(tags::HEART_BT_INT, session.config.heart_bt_int.to_string());
        session.write_message(logon).await?;
        info!(
            sender = %session.config.sender_comp_id,
            target = %session.config.target_comp_id,
            "Logon sent"
        );

        let handles = vec![
            tokio::spawn(read_loop(Arc::clone(&session), framed_read)),
            tokio::spawn(heartbeat_loop(Arc::clone(&session))),
        ];
        *session.tasks.lock() = handles;

        Ok(session)
    }

    /// Send an application message. The standard header (MsgSeqNum, comp
    /// IDs, SendingTime) is stamped here; the message must carry MsgType(35).
    pub async fn send(&self, msg: FixMessage) -> Result<(), SessionError> {
        if self.is_closed() {
            return Err(SessionError::Closed);
        }
        self.write_message(msg).await
    }

    /// Whether the session has been closed, by either side.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Close the session. Idempotent; closing twice is a no-op.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("closing session");

        let logout = FixMessage::new().with_field(tags::MSG_TYPE, msg_type::LOGOUT);
        if let Err(e) = self.write_message(logout).await {
            debug!(error = %e, "Logout not delivered");
        }

        {
            let mut writer = self.writer.lock().await;
            let _ = writer.get_mut().shutdown().await;
        }

        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }

    /// Mark the session unusable without the close handshake. Used by the
    /// reader task when the counterparty goes away.
    fn mark_closed(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Stamp the standard header and write one frame.
    async fn write_message(&self, msg: FixMessage) -> Result<(), SessionError> {
        let stamped = self.stamp(msg)?;
        {
            let mut writer = self.writer.lock().await;
            writer.send(stamped.clone()).await?;
        }
        self.store.record(Direction::Outbound, stamped);
        Ok(())
    }

    /// Build the wire form: MsgType first, then the session header, then
    /// the message's own fields. User-supplied copies of session-owned tags
    /// are dropped.
    fn stamp(&self, msg: FixMessage) -> Result<FixMessage, SessionError> {
        let msg_type_value = msg
            .msg_type()
            .ok_or(SessionError::Wire(WireError::MissingField(tags::MSG_TYPE)))?
            .to_string();
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);

        let mut out = FixMessage::new();
        out.push(tags::MSG_TYPE, msg_type_value);
        out.push(tags::MSG_SEQ_NUM, seq.to_string());
        out.push(tags::SENDER_COMP_ID, self.config.sender_comp_id.clone());
        out.push(tags::TARGET_COMP_ID, self.config.target_comp_id.clone());
        out.push(tags::SENDING_TIME, sending_time(Utc::now()));
        for (tag, value) in msg.fields() {
            if *tag == tags::MSG_TYPE || tags::SESSION_TAGS.contains(tag) {
                continue;
            }
            out.push(*tag, value.clone());
        }
        Ok(out)
    }
}

/// Drain inbound frames into the store and answer Test Requests.
async fn read_loop<R>(session: Arc<Session>, mut framed: FramedRead<R, FixCodec>)
where
    R: AsyncRead + Send + Unpin + 'static,
{
    loop {
        match framed.next().await {
            Some(Ok(msg)) => {
                debug!(msg = %msg, "inbound");
                let is_test_request = msg.msg_type() == Some(msg_type::TEST_REQUEST);
                let test_req_id = msg.get(tags::TEST_REQ_ID).map(str::to_string);
                session.store.record(Direction::Inbound, msg);

                if is_test_request {
                    let mut reply =
                        FixMessage::new().with_field(tags::MSG_TYPE, msg_type::HEARTBEAT);
                    if let Some(id) = test_req_id {
                        reply.push(tags::TEST_REQ_ID, id);
                    }
                    if let Err(e) = session.write_message(reply).await {
                        debug!(error = %e, "Test Request reply failed");
                        break;
                    }
                }
            }
            Some(Err(e)) => {
                warn!(error = %e, "transport error");
                break;
            }
            None => {
                info!("counterparty closed the connection");
                break;
            }
        }
    }
    session.mark_closed();
}

/// Emit a Heartbeat every HeartBtInt seconds until the session closes.
async fn heartbeat_loop(session: Arc<Session>) {
    let period = Duration::from_secs(session.config.heart_bt_int.max(1));
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    loop {
        interval.tick().await;
        if session.is_closed() {
            break;
        }
        let heartbeat = FixMessage::new().with_field(tags::MSG_TYPE, msg_type::HEARTBEAT);
        if let Err(e) = session.write_message(heartbeat).await {
            debug!(error = %e, "heartbeat failed");
            break;
        }
    }
}
