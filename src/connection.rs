//! [`Connection`] trait for protocol clients that talk over point-to-point links.

use std::time::Instant;

use crate::Endpoint;

/// A bidirectional point-to-point connection with deadline bound I/O.
///
/// Protocol clients are written against this contract instead of a concrete transport.
/// Both ends of the connection are addressed by an [`Endpoint`],
/// blocking operations are bounded by absolute deadlines,
/// and the connection has an explicit open/close lifecycle managed by the implementor.
pub trait Connection {
	/// The endpoint type used to address both ends of the connection.
	type Addr: Endpoint;

	/// The error type returned by connection operations.
	type Error: std::fmt::Debug + std::fmt::Display;

	/// Get the endpoint of the local end of the connection.
	fn local_addr(&self) -> &Self::Addr;

	/// Get the endpoint of the remote end of the connection.
	fn remote_addr(&self) -> &Self::Addr;

	/// Set the read and write deadline to the same point in time.
	///
	/// Deadlines are absolute.
	/// An operation that would block past the armed deadline fails with a timeout error instead.
	/// A deadline at or before the moment it is armed removes the time bound,
	/// so operations block until they can complete.
	fn set_deadline(&mut self, deadline: Instant) -> Result<(), Self::Error>;

	/// Set the deadline for subsequent reads.
	fn set_read_deadline(&mut self, deadline: Instant) -> Result<(), Self::Error>;

	/// Set the deadline for subsequent writes.
	///
	/// Transports that cannot bound the duration of writes accept the deadline and ignore it.
	fn set_write_deadline(&mut self, deadline: Instant) -> Result<(), Self::Error>;

	/// Read available bytes into `buffer`, blocking until data arrives or the read deadline expires.
	fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error>;

	/// Write the bytes in `buffer`, returning the number of bytes written.
	fn write(&mut self, buffer: &[u8]) -> Result<usize, Self::Error>;

	/// Close the connection.
	///
	/// If closing fails the connection stays usable, so the close can be retried.
	fn close(&mut self) -> Result<(), Self::Error>;

	/// Check if an error indicates an expired deadline.
	fn is_timeout_error(error: &Self::Error) -> bool;
}
