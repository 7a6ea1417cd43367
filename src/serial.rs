use std::time::{Duration, Instant};

use crate::{Connection, ConnectionError, Mode, SerialEndpoint};

macro_rules! make_connection_struct {
	($($DefaultSerialPort:ty)?) => {
		/// A serial line presented as a point-to-point [`Connection`].
		///
		/// The adapter owns a [`SerialEndpoint`] describing the port and line parameters,
		/// and an optional handle to the opened device.
		/// It is created closed:
		/// [`open()`][Self::open] validates the endpoint and opens and configures the device,
		/// [`close()`][Connection::close] releases it, and the same adapter can be opened again.
		///
		/// The generic connection contract uses absolute deadlines,
		/// while a serial device only offers a single relative read timeout.
		/// Arming a read deadline translates it once into the remaining duration and programs the device with it.
		/// The device timeout then bounds every subsequent read,
		/// so callers that want a fresh time window re-arm the deadline before each read.
		///
		/// If the `"serial2"` feature is enabled, the `SerialPort` generic type argument defaults to [`serial2::SerialPort`].
		/// If it is not enabled, the `SerialPort` argument must always be specified.
		pub struct SerialConnection<SerialPort $(= $DefaultSerialPort)?>
		where
			SerialPort: crate::SerialPort,
		{
			endpoint: SerialEndpoint,
			port: Option<SerialPort>,
		}
	};
}

#[cfg(feature = "serial2")]
make_connection_struct!(serial2::SerialPort);

#[cfg(not(feature = "serial2"))]
make_connection_struct!();

impl<SerialPort> std::fmt::Debug for SerialConnection<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SerialConnection")
			.field("endpoint", &self.endpoint)
			.field("open", &self.port.is_some())
			.finish_non_exhaustive()
	}
}

impl<SerialPort> SerialConnection<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Create a closed connection for the given endpoint.
	///
	/// No device is touched until [`Self::open()`] is called.
	pub fn new(endpoint: SerialEndpoint) -> Self {
		Self { endpoint, port: None }
	}

	/// Open the connection.
	///
	/// This validates the line parameters of the endpoint,
	/// opens the device by port name and applies the validated mode to it.
	/// A validation or driver failure leaves the connection closed, with no partially configured handle retained.
	///
	/// Opening a connection that is already open does nothing and returns `Ok`.
	pub fn open(&mut self) -> Result<(), ConnectionError> {
		if self.port.is_some() {
			return Ok(());
		}

		// Validate before touching the device, so a bad configuration never opens a port.
		let mode = Mode::new(
			self.endpoint.baud_rate(),
			self.endpoint.data_bits(),
			self.endpoint.stop_bits(),
			self.endpoint.parity(),
		)?;

		debug!("opening serial port {} with mode {}", self.endpoint.port(), self.endpoint);
		let mut port = SerialPort::open(self.endpoint.port())?;

		// The handle is dropped again if the mode can not be applied.
		// The adapter only ever holds a fully configured device.
		port.set_mode(&mode)?;

		self.port = Some(port);
		Ok(())
	}

	/// Check if the connection is open.
	pub fn is_open(&self) -> bool {
		self.port.is_some()
	}

	/// Get the endpoint this connection was created for.
	pub fn endpoint(&self) -> &SerialEndpoint {
		&self.endpoint
	}

	fn port_mut(&mut self) -> Result<&mut SerialPort, ConnectionError> {
		self.port.as_mut().ok_or(ConnectionError::NotOpen)
	}
}

impl<SerialPort> Connection for SerialConnection<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	type Addr = SerialEndpoint;
	type Error = ConnectionError;

	/// Get the endpoint of the connection.
	///
	/// A serial line is point-to-point, so both ends share one endpoint.
	fn local_addr(&self) -> &SerialEndpoint {
		&self.endpoint
	}

	fn remote_addr(&self) -> &SerialEndpoint {
		&self.endpoint
	}

	fn set_deadline(&mut self, deadline: Instant) -> Result<(), ConnectionError> {
		// Write deadlines are a no-op on this transport, so only the read deadline is armed.
		self.set_read_deadline(deadline)
	}

	fn set_read_deadline(&mut self, deadline: Instant) -> Result<(), ConnectionError> {
		let timeout = deadline_to_timeout(deadline, Instant::now());
		trace!("arming read timeout: {:?}", timeout);
		self.port_mut()?.set_read_timeout(timeout)?;
		Ok(())
	}

	fn set_write_deadline(&mut self, _deadline: Instant) -> Result<(), ConnectionError> {
		// The transport can not bound the duration of writes.
		// The deadline is accepted and ignored.
		Ok(())
	}

	fn read(&mut self, buffer: &mut [u8]) -> Result<usize, ConnectionError> {
		let count = self.port_mut()?.read(buffer)?;
		if count == 0 {
			// Zero bytes without an error is the driver convention for an elapsed read timeout.
			// Surface it as an explicit timeout so it can not be mistaken for end of stream.
			trace!("read timed out without data");
			return Err(ConnectionError::Timeout);
		}
		trace!("read {} bytes: {:02X?}", count, &buffer[..count]);
		Ok(count)
	}

	fn write(&mut self, buffer: &[u8]) -> Result<usize, ConnectionError> {
		trace!("writing {} bytes: {:02X?}", buffer.len(), buffer);
		let count = self.port_mut()?.write(buffer)?;
		Ok(count)
	}

	fn close(&mut self) -> Result<(), ConnectionError> {
		if let Some(port) = &mut self.port {
			// If the close fails the handle stays in place, so the close can be retried.
			port.close()?;
			debug!("closed serial port {}", self.endpoint.port());
			self.port = None;
		}
		Ok(())
	}

	fn is_timeout_error(error: &ConnectionError) -> bool {
		error.is_timeout()
	}
}

/// Translate an absolute deadline into the relative timeout of a serial device.
///
/// A deadline in the future maps to the remaining duration.
/// A deadline at or before `now` maps to `None`: wait indefinitely.
/// The translation happens once when the deadline is armed,
/// and the resulting device timeout does not track the deadline afterwards.
fn deadline_to_timeout(deadline: Instant, now: Instant) -> Option<Duration> {
	match deadline.checked_duration_since(now) {
		None => None,
		Some(timeout) if timeout.is_zero() => None,
		Some(timeout) => Some(timeout),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::assert;

	#[test]
	fn test_deadline_to_timeout() {
		let now = Instant::now();

		// A future deadline becomes the exact remaining duration.
		assert!(deadline_to_timeout(now + Duration::from_millis(250), now) == Some(Duration::from_millis(250)));
		assert!(deadline_to_timeout(now + Duration::from_secs(3600), now) == Some(Duration::from_secs(3600)));

		// A deadline at or before now removes the bound.
		assert!(deadline_to_timeout(now, now) == None);
		assert!(deadline_to_timeout(now, now + Duration::from_secs(1)) == None);
		assert!(deadline_to_timeout(now, now + Duration::from_nanos(1)) == None);
	}
}
