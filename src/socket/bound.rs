use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd};
use std::marker::PhantomData;
use crate::addr::Domain;
use crate::error::Result;
use super::{SockType, close_fd, local_addr_of};

/// A socket that has been bound to an address but not yet listening.
///
/// Same structure as RawSocket. Different name = different capabilities.
/// For Stream sockets: call `.listen()` to become a Listener.
pub struct BoundSocket<D: Domain, T: SockType> {
	fd: OwnedFd,
	_marker: PhantomData<(D, T)>,
}

impl<D: Domain, T: SockType> BoundSocket<D, T> {
	/// Internal use only - called by RawSocket::bind()
	pub(crate) fn from_fd(fd: OwnedFd) -> Self {
		Self {
			fd,
			_marker: PhantomData,
		}
	}

	/// Returns the address the kernel actually bound.
	///
	/// After binding to port 0 this is where the assigned ephemeral port
	/// shows up; no second bind is needed.
	pub fn local_addr(&self) -> Result<D::Addr> {
		local_addr_of(self.as_raw_fd())
	}

	/// Releases the descriptor.
	pub fn close(self) -> Result<()> {
		close_fd(self.fd)
	}

	/// Extracts the owned file descriptor, consuming self.
	pub(crate) fn into_fd(self) -> OwnedFd {
		self.fd
	}
}

impl<D: Domain, T: SockType> AsRawFd for BoundSocket<D, T> {
	fn as_raw_fd(&self) -> RawFd {
		self.fd.as_raw_fd()
	}
}

impl<D: Domain, T: SockType> AsFd for BoundSocket<D, T> {
	fn as_fd(&self) -> BorrowedFd<'_> {
		self.fd.as_fd()
	}
}
