use std::marker::PhantomData;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd};
use crate::addr::{Domain, FromSockAddr};
use crate::error::{Result, SocketError, errno};
use super::{Stream, bound::BoundSocket, close_fd};
use super::stream::ConnectedStream;


/// A listening socket ready to accept connections.
///
/// Only exists for Stream sockets — you cannot listen on datagrams.
/// The type parameter D tracks which address family (Ipv4, Unix).
pub struct Listener<D: Domain> {
    fd: OwnedFd,
    _marker: PhantomData<D>,
}

impl<D: Domain> Listener<D> {
    /// Internal use only — called by BoundSocket::listen()
    pub(crate) fn from_fd(fd: OwnedFd) -> Self {
        Self {
            fd,
            _marker: PhantomData,
        }
    }

    /// Accepts an incoming connection, returning the client's address.
    ///
    /// Blocks the calling thread until a connection has completed the
    /// handshake. The returned stream is a separate descriptor and outlives
    /// the listener.
    ///
    /// # Failure Modes
    ///
    /// - Returns an error if the syscall fails
    /// - Closing the listener from another thread unblocks a pending call
    ///   with an error
    pub fn accept(&self) -> Result<(ConnectedStream<D>, D::Addr)> {
        let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
        let mut len = std::mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;

        let fd = unsafe {
            libc::accept4(
                self.as_raw_fd(),
                &mut storage as *mut _ as *mut libc::sockaddr,
                &mut len,
                libc::SOCK_CLOEXEC,
            )
        };

        if fd == -1 {
            return Err(SocketError::Accept { errno: errno() });
        }
        tracing::debug!(listener = self.as_raw_fd(), fd, "connection accepted");

        // Own the fd before decoding so it is closed if decoding fails.
        let fd = unsafe { OwnedFd::from_raw_fd(fd) };
        let stream = ConnectedStream::from_fd(fd);

        let addr = unsafe {
            D::Addr::from_sockaddr(&storage as *const _ as *const libc::sockaddr, len)
                .ok_or(SocketError::Naming {
                    reason: "invalid client address",
                })?
        };

        Ok((stream, addr))
    }

    /// Stops listening and releases the descriptor.
    pub fn close(self) -> Result<()> {
        close_fd(self.fd)
    }
}

impl<D: Domain> AsRawFd for Listener<D> {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl<D: Domain> AsFd for Listener<D> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}


impl<D: Domain> BoundSocket<D, Stream> {
    /// Transitions to a listening socket.
    ///
    /// `backlog` — maximum pending connections queue size.
    ///
    /// Consumes self — you cannot use BoundSocket after this.
    /// Returns Listener<D> ready for accept().
    pub fn listen(self, backlog: i32) -> Result<Listener<D>> {
        let result = unsafe {
            libc::listen(self.as_raw_fd(), backlog)
        };

        if result == -1 {
            return Err(SocketError::Listen { errno: errno(), backlog });
        }

        Ok(Listener::from_fd(self.into_fd()))
    }
}
