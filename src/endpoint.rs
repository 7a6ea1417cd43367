/// The transport family of a connection endpoint.
///
/// Generic code can use this tag to tell connection kinds apart without inspecting the endpoint itself.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Transport {
	/// A point-to-point serial line.
	Serial,
}

impl Transport {
	/// Get the lower-case name of the transport family.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Serial => "serial",
		}
	}
}

impl std::fmt::Display for Transport {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An address for one end of a [`Connection`][crate::Connection].
///
/// The [`Display`][std::fmt::Display] implementation is the canonical form of the endpoint:
/// a stable, human readable rendering meant for logs and diagnostics, not for parsing configuration back out.
pub trait Endpoint: std::fmt::Display {
	/// The transport family this endpoint belongs to.
	fn transport(&self) -> Transport;
}

/// A description of a serial line: the port to open and the line parameters to apply to it.
///
/// The line parameters are stored exactly as configured and are not validated here.
/// An endpoint with an unknown parity mode or stop bit count can be constructed and displayed,
/// but opening a connection to it fails with a configuration error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SerialEndpoint {
	port: String,
	baud_rate: u32,
	data_bits: u8,
	stop_bits: u8,
	parity: String,
}

impl SerialEndpoint {
	/// Make a new endpoint from a port name and raw line parameters.
	pub fn new(port: impl Into<String>, baud_rate: u32, data_bits: u8, stop_bits: u8, parity: impl Into<String>) -> Self {
		Self {
			port: port.into(),
			baud_rate,
			data_bits,
			stop_bits,
			parity: parity.into(),
		}
	}

	/// The name or path of the serial port, such as `/dev/ttyUSB0` or `COM3`.
	pub fn port(&self) -> &str {
		&self.port
	}

	/// The configured baud rate in bits per second.
	pub fn baud_rate(&self) -> u32 {
		self.baud_rate
	}

	/// The configured number of data bits per character.
	pub fn data_bits(&self) -> u8 {
		self.data_bits
	}

	/// The configured stop bit count, as given.
	pub fn stop_bits(&self) -> u8 {
		self.stop_bits
	}

	/// The configured parity mode, as given.
	pub fn parity(&self) -> &str {
		&self.parity
	}
}

impl Endpoint for SerialEndpoint {
	fn transport(&self) -> Transport {
		Transport::Serial
	}
}

impl std::fmt::Display for SerialEndpoint {
	/// Format the endpoint in its canonical form: `baud,data bits,parity,stop bits`.
	///
	/// The parameters are rendered verbatim, even when they would not pass validation.
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{},{},{},{}", self.baud_rate, self.data_bits, self.parity, self.stop_bits)
	}
}
