use crate::addr::Domain;
use crate::buffer::{Buffer, TransferOutcome};
use crate::error::Result;
use crate::report::Logger;
use crate::socket::{ConnectedStream, DatagramIo};

/// Single bounded send/receive over an established handle, with logging.
pub struct Transceiver<'a> {
	log: &'a dyn Logger,
	peer: &'static str,
}

impl<'a> Transceiver<'a> {
	/// Transceiver for the serving side; the peer is a client.
	pub fn new(log: &'a dyn Logger) -> Self {
		Self { log, peer: "Client" }
	}

	/// Transceiver for the connecting side; the peer is a server.
	pub fn for_client(log: &'a dyn Logger) -> Self {
		Self { log, peer: "Server" }
	}

	fn disconnected(&self) {
		self.log.log_message(&format!("{} disconnected.", self.peer));
	}

	/// Blocks until data arrives, the peer disconnects, or the call fails.
	pub fn receive<D: Domain>(&self, stream: &ConnectedStream<D>, buf: &mut Buffer) -> Result<TransferOutcome> {
		self.log.log_message("Receiving from the socket...");
		let n = stream.recv(buf.recv_slot())?;
		buf.set_len(n);

		let outcome = TransferOutcome::from_count(n);
		if outcome.peer_closed {
			self.disconnected();
		} else {
			self.log.log_message(&format!("Received {n} bytes: {}", buf.render()));
		}
		Ok(outcome)
	}

	/// One send(2) of `bytes`; a short write is reported, not continued.
	pub fn send<D: Domain>(&self, stream: &ConnectedStream<D>, bytes: &[u8]) -> Result<TransferOutcome> {
		self.log.log_message("Sending to the socket...");
		let n = stream.send(bytes)?;

		let outcome = TransferOutcome::from_count(n);
		if outcome.peer_closed {
			self.disconnected();
		} else {
			let text = String::from_utf8_lossy(&bytes[..n]);
			self.log.log_message(&format!("Sent {n} bytes: {text}"));
		}
		Ok(outcome)
	}

	/// Receives one datagram of up to the full buffer capacity and its sender.
	pub fn receive_from<D: Domain, S: DatagramIo<D>>(&self, socket: &S, buf: &mut Buffer) -> Result<(TransferOutcome, D::Addr)> {
		self.log.log_message("Receiving from the socket...");
		let (n, from) = socket.recv_from(buf.datagram_slot())?;
		buf.set_len(n);

		self.log.log_message(&format!("Received from {from}."));
		let outcome = TransferOutcome::from_count(n);
		if !outcome.peer_closed {
			self.log.log_message(&format!("Received {n} bytes: {}", buf.render()));
		}
		Ok((outcome, from))
	}

	/// Sends one datagram to `to`.
	pub fn send_to<D: Domain, S: DatagramIo<D>>(&self, socket: &S, bytes: &[u8], to: &D::Addr) -> Result<TransferOutcome> {
		self.log.log_message(&format!("Sending to {to}."));
		let n = socket.send_to(bytes, to)?;

		let outcome = TransferOutcome::from_count(n);
		if !outcome.peer_closed {
			let text = String::from_utf8_lossy(&bytes[..n]);
			self.log.log_message(&format!("Sent {n} bytes: {text}"));
		}
		Ok(outcome)
	}
}
