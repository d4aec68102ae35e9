use crate::addr::{Unix, UnixAddr};
use crate::buffer::Buffer;
use crate::error::Result;
use crate::report::SharedLogger;
use crate::socket::{RawSocket, Stream};
use super::{DEFAULT_BACKLOG, EchoReport, SocketFile, StreamEchoServer, stream_exchange};

/// Unix-domain stream echo server serving a single client.
pub type LocalEchoServer = StreamEchoServer<Unix>;

impl StreamEchoServer<Unix> {
	/// Binds to a local name and starts listening.
	///
	/// Names starting with `/` are filesystem sockets and the file is removed
	/// once the server is gone; other names use the abstract namespace.
	pub fn bind(log: SharedLogger, name: &str) -> Result<Self> {
		let addr = UnixAddr::from_name(name)?;
		Self::bind_addr(log, addr, DEFAULT_BACKLOG)
	}

	pub fn bind_addr(log: SharedLogger, addr: UnixAddr, backlog: i32) -> Result<Self> {
		log.log_message("Constructing a new local UNIX socket...");
		let socket = RawSocket::<Unix, Stream>::new()?;

		log.log_message(&format!("Binding local socket to name {addr}."));
		let bound = socket.bind(&addr)?;
		let cleanup = addr.fs_path().map(|path| SocketFile(path.to_path_buf()));

		Self::listen(bound, addr, log, backlog, cleanup)
	}

	/// Binds and serves in one call.
	pub fn run(log: SharedLogger, name: &str) -> Result<EchoReport> {
		Self::bind(log, name)?.serve()
	}
}

/// Unix-domain echo client.
pub struct LocalEchoClient {
	log: SharedLogger,
}

impl LocalEchoClient {
	pub fn new(log: SharedLogger) -> Self {
		Self { log }
	}

	/// Connects to the socket called `name`, sends `message`, returns the reply.
	pub fn exchange(&self, name: &str, message: &[u8]) -> Result<Buffer> {
		let target = UnixAddr::from_name(name)?;
		self.exchange_with(&target, message)
	}

	pub fn exchange_with(&self, target: &UnixAddr, message: &[u8]) -> Result<Buffer> {
		self.log.log_message("Constructing a new local UNIX socket...");
		stream_exchange::<Unix>(&self.log, target, message)
	}
}
