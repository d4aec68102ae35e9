//! Echo drivers composed from sockets and the transceiver.
//!
//! - `tcp` — IPv4 stream server and client
//! - `udp` — IPv4 datagram server and client
//! - `local` — Unix stream server and client
//!
//! Every driver stops at the first error. Handles opened before the failure
//! are dropped on the way out, which closes them; success paths close
//! explicitly so close(2) failures are reported.

mod local;
mod tcp;
mod udp;

pub use self::local::{LocalEchoClient, LocalEchoServer};
pub use self::tcp::{TcpEchoClient, TcpEchoServer};
pub use self::udp::{DatagramReply, UdpEchoClient, UdpEchoServer};

use crate::addr::{Domain, Endpoint};
use crate::buffer::Buffer;
use crate::error::Result;
use crate::report::SharedLogger;
use crate::socket::{BoundSocket, ConnectedStream, Listener, RawSocket, Stream};
use crate::transceiver::Transceiver;

/// Pending-connection queue length used by the stream servers.
pub const DEFAULT_BACKLOG: i32 = 4;

/// What a server did before it terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoReport {
	/// The one peer this invocation served.
	pub peer: Endpoint,
	/// Completed receive-then-send round trips.
	pub exchanges: usize,
	/// Total bytes written back to the peer.
	pub bytes_echoed: usize,
}

/// A stream server that is bound and listening but has not accepted yet.
///
/// Splitting bind from serve lets the caller learn the resolved address
/// before the thread blocks in accept.
pub struct StreamEchoServer<D: Domain> {
	listener: Listener<D>,
	addr: D::Addr,
	log: SharedLogger,
	_cleanup: Option<SocketFile>,
}

impl<D: Domain> StreamEchoServer<D> {
	/// Address the server is listening on, with any ephemeral port resolved.
	pub fn local_addr(&self) -> &D::Addr {
		&self.addr
	}

	/// Accepts one client and echoes until it disconnects or an error occurs.
	pub fn serve(self) -> Result<EchoReport> {
		let Self { listener, log, _cleanup, .. } = self;
		let tx = Transceiver::new(&*log);

		log.log_message("Waiting for a client connection...");
		let (client, peer) = listener.accept()?;
		log.log_message(&format!("Client connection from {peer}."));

		let (exchanges, bytes_echoed) = echo_loop(&tx, &client)?;

		client.close()?;
		listener.close()?;
		drop(_cleanup);
		Ok(EchoReport { peer: peer.into(), exchanges, bytes_echoed })
	}

	/// Starts listening on an already bound socket.
	fn listen(
		bound: BoundSocket<D, Stream>,
		addr: D::Addr,
		log: SharedLogger,
		backlog: i32,
		cleanup: Option<SocketFile>,
	) -> Result<Self> {
		log.log_message(&format!("Listening on socket with a backlog of {backlog} pending connections."));
		let listener = bound.listen(backlog)?;
		Ok(Self { listener, addr, log, _cleanup: cleanup })
	}
}

/// Receive, send back what was received, repeat.
///
/// Ends cleanly when either direction reports the peer gone.
fn echo_loop<D: Domain>(tx: &Transceiver<'_>, client: &ConnectedStream<D>) -> Result<(usize, usize)> {
	let mut buf = Buffer::new();
	let mut exchanges = 0;
	let mut bytes = 0;

	loop {
		if tx.receive(client, &mut buf)?.peer_closed {
			break;
		}
		let sent = tx.send(client, buf.filled())?;
		if sent.peer_closed {
			break;
		}
		exchanges += 1;
		bytes += sent.byte_count;
	}
	Ok((exchanges, bytes))
}

/// Connect, send once, receive once, close.
fn stream_exchange<D: Domain>(log: &SharedLogger, target: &D::Addr, message: &[u8]) -> Result<Buffer> {
	let tx = Transceiver::for_client(&**log);
	let socket = RawSocket::<D, Stream>::new()?;

	log.log_message(&format!("Connecting to {target}..."));
	let stream = socket.connect(target)?;
	log.log_message("Connected.");

	// A short write is not continued; the reply covers whatever was sent.
	tx.send(&stream, message)?;

	let mut reply = Buffer::new();
	tx.receive(&stream, &mut reply)?;
	stream.close()?;
	Ok(reply)
}

/// Removes a filesystem socket when the server that created it goes away.
struct SocketFile(std::path::PathBuf);

impl Drop for SocketFile {
	fn drop(&mut self) {
		match std::fs::remove_file(&self.0) {
			Ok(()) => tracing::debug!(path = %self.0.display(), "socket file removed"),
			Err(err) => tracing::debug!(path = %self.0.display(), %err, "socket file not removed"),
		}
	}
}
