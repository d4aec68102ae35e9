use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};
use std::marker::PhantomData;
use crate::addr::Domain;
use crate::error::{Result, SocketError, errno};
use super::close_fd;

/// A connected stream socket.
///
/// Represents an established connection — ready for send/recv.
/// Created by Listener::accept() (server) or RawSocket::connect() (client).
pub struct ConnectedStream<D: Domain> {
	fd: OwnedFd,
	_marker: PhantomData<D>,
}

impl<D: Domain> ConnectedStream<D> {
	pub(crate) fn from_fd(fd: OwnedFd) -> Self {
		Self {
			fd,
			_marker: PhantomData,
		}
	}

	/// Single blocking recv(2) into `buf`.
	///
	/// `Ok(0)` means the peer performed an orderly shutdown.
	pub fn recv(&self, buf: &mut [u8]) -> Result<usize> {
		let n = unsafe {
			libc::recv(
				self.as_raw_fd(),
				buf.as_mut_ptr() as *mut libc::c_void,
				buf.len(),
				0,
			)
		};

		if n == -1 {
			Err(SocketError::Recv { errno: errno() })
		} else {
			Ok(n as usize)
		}
	}

	/// Single blocking send(2) of `buf`.
	///
	/// The kernel may accept fewer bytes than offered; the count is returned
	/// as-is and nothing is retried. `MSG_NOSIGNAL` turns a write to a closed
	/// peer into `EPIPE` instead of a signal.
	pub fn send(&self, buf: &[u8]) -> Result<usize> {
		let n = unsafe {
			libc::send(
				self.as_raw_fd(),
				buf.as_ptr() as *const libc::c_void,
				buf.len(),
				libc::MSG_NOSIGNAL,
			)
		};

		if n == -1 {
			Err(SocketError::Send { errno: errno() })
		} else {
			Ok(n as usize)
		}
	}

	/// Releases the descriptor.
	pub fn close(self) -> Result<()> {
		close_fd(self.fd)
	}
}

impl<D: Domain> AsRawFd for ConnectedStream<D> {
	fn as_raw_fd(&self) -> RawFd {
		self.fd.as_raw_fd()
	}
}

impl<D: Domain> AsFd for ConnectedStream<D> {
	fn as_fd(&self) -> BorrowedFd<'_> {
		self.fd.as_fd()
	}
}
