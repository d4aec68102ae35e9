/// Failure of a socket operation.
///
/// Every syscall the crate issues has its own variant carrying the raw errno,
/// so the rendered message names both the call and the OS reason.
/// `Naming` is raised before any syscall when an address cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SocketError {
    #[error("socket() failed: {}", errno_to_str(*.errno))]
    Create { errno: i32 },

    #[error("bind({addr}) failed: {}", errno_to_str(*.errno))]
    Bind { errno: i32, addr: String },

    #[error("getsockname() failed: {}", errno_to_str(*.errno))]
    LocalAddr { errno: i32 },

    #[error("listen(backlog={backlog}) failed: {}", errno_to_str(*.errno))]
    Listen { errno: i32, backlog: i32 },

    #[error("accept() failed: {}", errno_to_str(*.errno))]
    Accept { errno: i32 },

    #[error("connect({addr}) failed: {}", errno_to_str(*.errno))]
    Connect { errno: i32, addr: String },

    #[error("recv() failed: {}", errno_to_str(*.errno))]
    Recv { errno: i32 },

    #[error("send() failed: {}", errno_to_str(*.errno))]
    Send { errno: i32 },

    #[error("close() failed: {}", errno_to_str(*.errno))]
    Close { errno: i32 },

    #[error("{reason}")]
    Naming { reason: &'static str },
}

/// Classification of a [`SocketError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A syscall returned a failure indicator.
    SystemCall,
    /// An address or path failed validation before any syscall.
    Naming,
}

/// A classified failure as handed to an [`ErrorSink`](crate::ErrorSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
}

impl ClassifiedError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl SocketError {
    /// Returns the errno behind a syscall failure, `None` for naming errors.
    pub fn errno(&self) -> Option<i32> {
        match self {
            SocketError::Create { errno }
            | SocketError::Bind { errno, .. }
            | SocketError::LocalAddr { errno }
            | SocketError::Listen { errno, .. }
            | SocketError::Accept { errno }
            | SocketError::Connect { errno, .. }
            | SocketError::Recv { errno }
            | SocketError::Send { errno }
            | SocketError::Close { errno } => Some(*errno),
            SocketError::Naming { .. } => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SocketError::Naming { .. } => ErrorKind::Naming,
            _ => ErrorKind::SystemCall,
        }
    }

    /// Renders this error into its immutable classified form.
    pub fn classify(&self) -> ClassifiedError {
        ClassifiedError {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SocketError>;

/// Returns current errno value.
#[inline]
pub fn errno() -> i32 {
    unsafe { *libc::__errno_location() }
}

/// Converts errno to a human-readable string.
///
/// Common socket errnos get a fixed lowercase wording, everything else
/// falls back to the OS description.
fn errno_to_str(errno: i32) -> String {
    match errno {
        libc::EACCES => "permission denied".into(),
        libc::EADDRINUSE => "address already in use".into(),
        libc::EADDRNOTAVAIL => "address not available".into(),
        libc::EAFNOSUPPORT => "address family not supported".into(),
        libc::EAGAIN => "resource temporarily unavailable".into(),
        libc::EBADF => "bad file descriptor".into(),
        libc::ECONNREFUSED => "connection refused".into(),
        libc::ECONNRESET => "connection reset by peer".into(),
        libc::EINTR => "interrupted by signal".into(),
        libc::EINVAL => "invalid argument".into(),
        libc::EMFILE => "too many open files".into(),
        libc::ENETUNREACH => "network unreachable".into(),
        libc::ENOBUFS => "no buffer space available".into(),
        libc::ENOENT => "no such file or directory".into(),
        libc::ENOTCONN => "not connected".into(),
        libc::EPIPE => "broken pipe".into(),
        libc::ETIMEDOUT => "connection timed out".into(),
        _ => std::io::Error::from_raw_os_error(errno).to_string(),
    }
}

/// Maps errno to std::io::ErrorKind.
fn errno_to_kind(errno: i32) -> std::io::ErrorKind {
    match errno {
        libc::EACCES | libc::EPERM => std::io::ErrorKind::PermissionDenied,
        libc::EADDRINUSE => std::io::ErrorKind::AddrInUse,
        libc::EADDRNOTAVAIL => std::io::ErrorKind::AddrNotAvailable,
        libc::ECONNREFUSED => std::io::ErrorKind::ConnectionRefused,
        libc::ECONNRESET => std::io::ErrorKind::ConnectionReset,
        libc::EINTR => std::io::ErrorKind::Interrupted,
        libc::EINVAL => std::io::ErrorKind::InvalidInput,
        libc::ENOENT => std::io::ErrorKind::NotFound,
        libc::ENOTCONN => std::io::ErrorKind::NotConnected,
        libc::EPIPE => std::io::ErrorKind::BrokenPipe,
        libc::ETIMEDOUT => std::io::ErrorKind::TimedOut,
        _ => std::io::ErrorKind::Other,
    }
}

impl From<SocketError> for std::io::Error {
    fn from(err: SocketError) -> Self {
        let kind = match err.errno() {
            Some(errno) => errno_to_kind(errno),
            None => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syscall_errors_carry_call_and_reason() {
        let err = SocketError::Bind { errno: libc::EADDRINUSE, addr: "0.0.0.0:80".into() };
        assert_eq!(err.kind(), ErrorKind::SystemCall);
        assert_eq!(err.errno(), Some(libc::EADDRINUSE));
        assert_eq!(err.to_string(), "bind(0.0.0.0:80) failed: address already in use");
    }

    #[test]
    fn naming_errors_have_no_errno() {
        let err = SocketError::Naming { reason: "name is too big" };
        let classified = err.classify();
        assert_eq!(classified.kind(), ErrorKind::Naming);
        assert_eq!(classified.message(), "name is too big");
        assert_eq!(err.errno(), None);
    }

    #[test]
    fn unknown_errno_falls_back_to_os_text() {
        let err = SocketError::Recv { errno: libc::EIO };
        let expected = std::io::Error::from_raw_os_error(libc::EIO).to_string();
        assert_eq!(err.to_string(), format!("recv() failed: {expected}"));
    }

    #[test]
    fn converts_into_io_error_kind() {
        let io: std::io::Error = SocketError::Connect {
            errno: libc::ECONNREFUSED,
            addr: "127.0.0.1:1".into(),
        }.into();
        assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);

        let io: std::io::Error = SocketError::Naming { reason: "invalid IPv4 address" }.into();
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidInput);
    }
}
