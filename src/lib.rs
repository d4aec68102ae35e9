pub mod socket;
pub mod echo;
pub mod config;
mod addr;
mod buffer;
mod error;
mod report;
mod transceiver;

pub use self::error::{SocketError, ErrorKind, ClassifiedError, Result, errno};
pub use self::addr::{Domain, ToSockAddr, FromSockAddr, Ipv4, Unix, SocketAddrV4, UnixAddr,
					 Endpoint, MAX_PATH_LEN};
pub use self::buffer::{Buffer, TransferOutcome, MAX_BUFFER_SIZE};
pub use self::report::{Logger, SharedLogger, TracingLogger, MemoryLogger,
					   ErrorSink, LogErrorSink, surface};
pub use self::transceiver::Transceiver;
pub use self::socket::{SockType, Stream, Datagram, RawSocket, BoundSocket, Listener,
					   ConnectedStream, BoundDatagram, DatagramIo};
pub use self::echo::{EchoReport, StreamEchoServer, TcpEchoServer, TcpEchoClient,
					 UdpEchoServer, UdpEchoClient, DatagramReply,
					 LocalEchoServer, LocalEchoClient, DEFAULT_BACKLOG};
pub use self::config::{Transport, Role, Invocation, Outcome, run};
