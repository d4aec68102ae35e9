use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd};
use std::marker::PhantomData;
use crate::addr::{Domain, ToSockAddr};
use crate::error::{Result, SocketError, errno};
use super::{SockType, Stream, Datagram, close_fd};
use super::bound::BoundSocket;
use super::datagram::{BoundDatagram, DatagramIo};
use super::stream::ConnectedStream;

/// A raw socket that has been created but not yet bound or connected.
///
/// This is the starting point for all socket operations.
/// Use `.bind()` to become a listener, `.bind_datagram()` for a datagram
/// server, `.connect()` to become a connected stream.
pub struct RawSocket<D: Domain, T: SockType> {
	fd: OwnedFd,
	_marker: PhantomData<(D, T)>,
}

impl<D: Domain, T: SockType> RawSocket<D, T> {
	/// Creates a new raw socket.
	///
	/// Calls the `socket()` syscall with the appropriate domain and type.
	/// The socket is created with `SOCK_CLOEXEC` (close on exec).
	pub fn new() -> Result<Self> {
		let fd = unsafe {
			libc::socket(D::raw(), T::raw() | libc::SOCK_CLOEXEC, 0)
		};
		if fd == -1 {
			return Err(SocketError::Create { errno: errno() });
		}
		tracing::debug!(fd, family = D::label(), kind = T::label(), "socket created");
		let fd = unsafe { OwnedFd::from_raw_fd(fd) };

		Ok(Self {
			fd,
			_marker: PhantomData,
		})
	}

	/// Releases the descriptor.
	pub fn close(self) -> Result<()> {
		close_fd(self.fd)
	}

	fn bind_raw(&self, addr: &D::Addr) -> Result<()> {
		let result = addr.with_raw(|ptr, len| unsafe {
			libc::bind(self.as_raw_fd(), ptr, len)
		});
		if result == -1 {
			return Err(SocketError::Bind {
				errno: errno(),
				addr: addr.to_string(),
			});
		}
		Ok(())
	}
}

impl<D: Domain> RawSocket<D, Stream> {
	/// Binds the socket to an address.
	///
	/// Consumes self, returns BoundSocket ready for `listen()`.
	pub fn bind(self, addr: &D::Addr) -> Result<BoundSocket<D, Stream>> {
		self.bind_raw(addr)?;
		Ok(BoundSocket::from_fd(self.fd))
	}

	/// Connects to a remote address.
	///
	/// Blocks until the handshake completes or the kernel reports failure.
	/// Consumes self, returns a connected stream.
	pub fn connect(self, addr: &D::Addr) -> Result<ConnectedStream<D>> {
		let result = addr.with_raw(|ptr, len| unsafe {
			libc::connect(self.as_raw_fd(), ptr, len)
		});

		if result == -1 {
			return Err(SocketError::Connect {
				errno: errno(),
				addr: addr.to_string(),
			});
		}
		Ok(ConnectedStream::from_fd(self.fd))
	}
}

impl<D: Domain> RawSocket<D, Datagram> {
	/// Binds a datagram socket to an address.
	///
	/// Returns BoundDatagram ready for send_to/recv_from.
	pub fn bind_datagram(self, addr: &D::Addr) -> Result<BoundDatagram<D>> {
		self.bind_raw(addr)?;
		Ok(BoundDatagram::from_fd(self.fd))
	}
}

/// An unbound datagram socket can still send; the kernel assigns it an
/// ephemeral local address on the first `sendto()`.
impl<D: Domain> DatagramIo<D> for RawSocket<D, Datagram> {}

impl<D: Domain, T: SockType> AsRawFd for RawSocket<D, T> {
	fn as_raw_fd(&self) -> RawFd {
		self.fd.as_raw_fd()
	}
}

impl<D: Domain, T: SockType> AsFd for RawSocket<D, T> {
	fn as_fd(&self) -> BorrowedFd<'_> {
		self.fd.as_fd()
	}
}
