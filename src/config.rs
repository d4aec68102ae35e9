//! Per-invocation configuration and dispatch to the matching driver.

use crate::buffer::Buffer;
use crate::echo::{
	EchoReport, LocalEchoClient, LocalEchoServer, TcpEchoClient, TcpEchoServer,
	UdpEchoClient, UdpEchoServer,
};
use crate::error::Result;
use crate::report::SharedLogger;

/// Transport family an invocation runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
	Tcp,
	Udp,
	Local,
}

impl std::fmt::Display for Transport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Transport::Tcp => "tcp",
			Transport::Udp => "udp",
			Transport::Local => "local",
		})
	}
}

/// Which side of the exchange an invocation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
	Server,
	Client,
}

/// One server or client run.
///
/// IPv4 servers bind `port` (0 = any); local servers and clients use a
/// socket name, see [`UnixAddr::from_name`](crate::UnixAddr::from_name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
	TcpServer { port: u16 },
	UdpServer { port: u16 },
	LocalServer { name: String },
	TcpClient { address: String, port: u16, message: Vec<u8> },
	UdpClient { address: String, port: u16, message: Vec<u8> },
	LocalClient { name: String, message: Vec<u8> },
}

impl Invocation {
	pub fn transport(&self) -> Transport {
		match self {
			Invocation::TcpServer { .. } | Invocation::TcpClient { .. } => Transport::Tcp,
			Invocation::UdpServer { .. } | Invocation::UdpClient { .. } => Transport::Udp,
			Invocation::LocalServer { .. } | Invocation::LocalClient { .. } => Transport::Local,
		}
	}

	pub fn role(&self) -> Role {
		match self {
			Invocation::TcpServer { .. }
			| Invocation::UdpServer { .. }
			| Invocation::LocalServer { .. } => Role::Server,
			_ => Role::Client,
		}
	}
}

/// What an invocation produced.
#[derive(Debug, Clone)]
pub enum Outcome {
	Served(EchoReport),
	Replied(Buffer),
}

/// Runs one invocation to completion with `log` injected into its driver.
pub fn run(invocation: &Invocation, log: SharedLogger) -> Result<Outcome> {
	match invocation {
		Invocation::TcpServer { port } => TcpEchoServer::run(log, *port).map(Outcome::Served),
		Invocation::UdpServer { port } => UdpEchoServer::run(log, *port).map(Outcome::Served),
		Invocation::LocalServer { name } => LocalEchoServer::run(log, name).map(Outcome::Served),
		Invocation::TcpClient { address, port, message } => {
			TcpEchoClient::new(log)
				.exchange(address, *port, message)
				.map(Outcome::Replied)
		}
		Invocation::UdpClient { address, port, message } => {
			UdpEchoClient::new(log)
				.exchange(address, *port, message)
				.map(|reply| Outcome::Replied(reply.reply))
		}
		Invocation::LocalClient { name, message } => {
			LocalEchoClient::new(log)
				.exchange(name, message)
				.map(Outcome::Replied)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invocation_reports_transport_and_role() {
		let server = Invocation::LocalServer { name: "echo".into() };
		assert_eq!(server.transport(), Transport::Local);
		assert_eq!(server.role(), Role::Server);

		let client = Invocation::UdpClient { address: "127.0.0.1".into(), port: 9, message: b"x".to_vec() };
		assert_eq!(client.transport(), Transport::Udp);
		assert_eq!(client.role(), Role::Client);
		assert_eq!(client.transport().to_string(), "udp");
	}

	#[test]
	fn bad_address_fails_before_any_socket() {
		let log: SharedLogger = std::sync::Arc::new(crate::MemoryLogger::new());
		let invocation = Invocation::TcpClient {
			address: "localhost".into(),
			port: 7,
			message: b"hi".to_vec(),
		};
		let err = run(&invocation, log).unwrap_err();
		assert_eq!(err.kind(), crate::ErrorKind::Naming);
	}
}
