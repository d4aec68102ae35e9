use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};
use std::marker::PhantomData;
use crate::addr::{Domain, ToSockAddr, FromSockAddr};
use crate::error::{Result, SocketError, errno};
use super::{close_fd, local_addr_of};

/// Per-call addressed I/O for datagram sockets.
///
/// Unlike Stream sockets, datagrams don't connect.
/// Each send specifies a destination, each recv tells you the source.
pub trait DatagramIo<D: Domain>: AsRawFd {
	/// Sends one datagram to `addr`.
	///
	/// Returns the number of bytes sent.
	fn send_to(&self, buf: &[u8], addr: &D::Addr) -> Result<usize> {
		let n = addr.with_raw(|ptr, len| unsafe {
			libc::sendto(
				self.as_raw_fd(),
				buf.as_ptr() as *const libc::c_void,
				buf.len(),
				0,
				ptr,
				len,
			)
		});

		if n == -1 {
			Err(SocketError::Send { errno: errno() })
		} else {
			Ok(n as usize)
		}
	}

	/// Receives one datagram, returning its length and the sender.
	///
	/// A datagram larger than `buf` is truncated to fit.
	fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, D::Addr)> {
		let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
		let mut len = std::mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;

		let n = unsafe {
			libc::recvfrom(
				self.as_raw_fd(),
				buf.as_mut_ptr() as *mut libc::c_void,
				buf.len(),
				0,
				&mut storage as *mut _ as *mut libc::sockaddr,
				&mut len,
			)
		};

		if n == -1 {
			return Err(SocketError::Recv { errno: errno() });
		}

		let addr = unsafe {
			D::Addr::from_sockaddr(&storage as *const _ as *const libc::sockaddr, len)
				.ok_or(SocketError::Naming { reason: "invalid sender address" })?
		};

		Ok((n as usize, addr))
	}

	/// Returns the local address, including a kernel-assigned port.
	fn local_addr(&self) -> Result<D::Addr> {
		local_addr_of(self.as_raw_fd())
	}
}

/// A bound datagram socket ready for send_to/recv_from.
pub struct BoundDatagram<D: Domain> {
	fd: OwnedFd,
	_marker: PhantomData<D>,
}

impl<D: Domain> BoundDatagram<D> {
	pub(crate) fn from_fd(fd: OwnedFd) -> Self {
		Self {
			fd,
			_marker: PhantomData,
		}
	}

	/// Releases the descriptor.
	pub fn close(self) -> Result<()> {
		close_fd(self.fd)
	}
}

impl<D: Domain> DatagramIo<D> for BoundDatagram<D> {}

impl<D: Domain> AsRawFd for BoundDatagram<D> {
	fn as_raw_fd(&self) -> RawFd {
		self.fd.as_raw_fd()
	}
}

impl<D: Domain> AsFd for BoundDatagram<D> {
	fn as_fd(&self) -> BorrowedFd<'_> {
		self.fd.as_fd()
	}
}
