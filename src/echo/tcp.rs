use crate::addr::{Ipv4, SocketAddrV4};
use crate::buffer::Buffer;
use crate::error::Result;
use crate::report::SharedLogger;
use crate::socket::{RawSocket, Stream};
use super::{DEFAULT_BACKLOG, StreamEchoServer, stream_exchange};

/// TCP echo server serving a single client.
pub type TcpEchoServer = StreamEchoServer<Ipv4>;

impl StreamEchoServer<Ipv4> {
	/// Binds the wildcard address on `port` (0 = any) and starts listening.
	pub fn bind(log: SharedLogger, port: u16) -> Result<Self> {
		Self::bind_with_backlog(log, port, DEFAULT_BACKLOG)
	}

	pub fn bind_with_backlog(log: SharedLogger, port: u16, backlog: i32) -> Result<Self> {
		log.log_message("Constructing a new TCP socket...");
		let socket = RawSocket::<Ipv4, Stream>::new()?;

		log.log_message(&format!("Binding to port {port}."));
		let bound = socket.bind(&SocketAddrV4::any(port))?;

		let addr = if port == 0 {
			let addr = bound.local_addr()?;
			log.log_message(&format!("Bound to random port {}.", addr.port()));
			addr
		} else {
			SocketAddrV4::any(port)
		};

		Self::listen(bound, addr, log, backlog, None)
	}

	/// Port the server accepts on.
	pub fn port(&self) -> u16 {
		self.local_addr().port()
	}

	/// Binds and serves in one call.
	pub fn run(log: SharedLogger, port: u16) -> Result<super::EchoReport> {
		Self::bind(log, port)?.serve()
	}
}

/// TCP echo client: one message out, one reply back.
pub struct TcpEchoClient {
	log: SharedLogger,
}

impl TcpEchoClient {
	pub fn new(log: SharedLogger) -> Self {
		Self { log }
	}

	/// Connects to `address:port`, sends `message` and returns the reply.
	///
	/// `message` goes out in a single send(2); if the kernel takes only part
	/// of it the remainder is dropped.
	pub fn exchange(&self, address: &str, port: u16, message: &[u8]) -> Result<Buffer> {
		let target = SocketAddrV4::parse(address, port)?;
		self.exchange_with(&target, message)
	}

	pub fn exchange_with(&self, target: &SocketAddrV4, message: &[u8]) -> Result<Buffer> {
		self.log.log_message("Constructing a new TCP socket...");
		stream_exchange::<Ipv4>(&self.log, target, message)
	}
}
