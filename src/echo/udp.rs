use crate::addr::{Ipv4, SocketAddrV4};
use crate::buffer::Buffer;
use crate::error::Result;
use crate::report::SharedLogger;
use crate::socket::{BoundDatagram, Datagram, DatagramIo, RawSocket};
use crate::transceiver::Transceiver;
use super::EchoReport;

/// UDP echo server answering exactly one datagram.
pub struct UdpEchoServer {
	socket: BoundDatagram<Ipv4>,
	addr: SocketAddrV4,
	log: SharedLogger,
}

impl UdpEchoServer {
	/// Binds the wildcard address on `port` (0 = any).
	pub fn bind(log: SharedLogger, port: u16) -> Result<Self> {
		log.log_message("Constructing a new UDP socket...");
		let socket = RawSocket::<Ipv4, Datagram>::new()?;

		log.log_message(&format!("Binding to port {port}."));
		let socket = socket.bind_datagram(&SocketAddrV4::any(port))?;

		let addr = if port == 0 {
			let addr = socket.local_addr()?;
			log.log_message(&format!("Bound to random port {}.", addr.port()));
			addr
		} else {
			SocketAddrV4::any(port)
		};

		Ok(Self { socket, addr, log })
	}

	pub fn local_addr(&self) -> &SocketAddrV4 {
		&self.addr
	}

	pub fn port(&self) -> u16 {
		self.addr.port()
	}

	/// Waits for one datagram and sends its payload back to the sender.
	///
	/// An empty datagram is not echoed.
	pub fn serve(self) -> Result<EchoReport> {
		let tx = Transceiver::new(&*self.log);
		let mut buf = Buffer::new();

		let (received, peer) = tx.receive_from::<Ipv4, _>(&self.socket, &mut buf)?;
		let mut report = EchoReport { peer: peer.into(), exchanges: 0, bytes_echoed: 0 };

		if !received.peer_closed {
			let sent = tx.send_to::<Ipv4, _>(&self.socket, buf.filled(), &peer)?;
			report.exchanges = 1;
			report.bytes_echoed = sent.byte_count;
		}

		self.socket.close()?;
		Ok(report)
	}

	/// Binds and serves in one call.
	pub fn run(log: SharedLogger, port: u16) -> Result<EchoReport> {
		Self::bind(log, port)?.serve()
	}
}

/// Reply captured by a UDP client.
#[derive(Debug, Clone)]
pub struct DatagramReply {
	pub reply: Buffer,
	/// Who the reply came from.
	pub from: SocketAddrV4,
	/// Local address the kernel assigned to the client on its first send.
	pub local: SocketAddrV4,
}

/// UDP echo client: one datagram out, one datagram back.
pub struct UdpEchoClient {
	log: SharedLogger,
}

impl UdpEchoClient {
	pub fn new(log: SharedLogger) -> Self {
		Self { log }
	}

	pub fn exchange(&self, address: &str, port: u16, message: &[u8]) -> Result<DatagramReply> {
		let target = SocketAddrV4::parse(address, port)?;
		self.exchange_with(&target, message)
	}

	pub fn exchange_with(&self, target: &SocketAddrV4, message: &[u8]) -> Result<DatagramReply> {
		let tx = Transceiver::for_client(&*self.log);

		self.log.log_message("Constructing a new UDP socket...");
		let socket = RawSocket::<Ipv4, Datagram>::new()?;

		tx.send_to::<Ipv4, _>(&socket, message, target)?;
		let local = socket.local_addr()?;

		let mut reply = Buffer::new();
		let (_, from) = tx.receive_from::<Ipv4, _>(&socket, &mut reply)?;

		socket.close()?;
		Ok(DatagramReply { reply, from, local })
	}
}
