//! Trait implementation using the `serial2` crate.

use std::time::Duration;

use super::{Mode, Parity, SerialPort, StopBits};

/// Re-exported `serial2` crate in case you need direct access to the port.
pub use serial2;

impl SerialPort for serial2::SerialPort {
	fn open(name: &str) -> std::io::Result<Self> {
		serial2::SerialPort::open(name, serial2::KeepSettings)
	}

	fn set_mode(&mut self, mode: &Mode) -> std::io::Result<()> {
		let mut settings = self.get_configuration()?;
		settings.set_baud_rate(mode.baud_rate)?;
		settings.set_char_size(char_size(mode.data_bits)?);
		settings.set_stop_bits(match mode.stop_bits {
			StopBits::One => serial2::StopBits::One,
			StopBits::Two => serial2::StopBits::Two,
		});
		settings.set_parity(parity(mode.parity)?);
		settings.set_flow_control(serial2::FlowControl::None);
		self.set_configuration(&settings)
	}

	fn set_read_timeout(&mut self, timeout: Option<Duration>) -> std::io::Result<()> {
		// The driver has no explicit unbounded setting.
		// `Duration::MAX` is clamped to the platform maximum, which outlasts any practical transfer.
		serial2::SerialPort::set_read_timeout(self, timeout.unwrap_or(Duration::MAX))
	}

	fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
		// An elapsed read timeout is reported as an error here,
		// but as a zero byte read in the driver contract.
		match serial2::SerialPort::read(self, buffer) {
			Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
			other => other,
		}
	}

	fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
		serial2::SerialPort::write(self, buffer)
	}

	fn close(&mut self) -> std::io::Result<()> {
		// The OS handle is reclaimed on drop.
		// Flush first so errors for pending output are not lost silently.
		std::io::Write::flush(self)
	}
}

fn char_size(data_bits: u8) -> std::io::Result<serial2::CharSize> {
	match data_bits {
		5 => Ok(serial2::CharSize::Bits5),
		6 => Ok(serial2::CharSize::Bits6),
		7 => Ok(serial2::CharSize::Bits7),
		8 => Ok(serial2::CharSize::Bits8),
		other => Err(std::io::Error::new(
			std::io::ErrorKind::InvalidInput,
			format!("unsupported data bit count: {}", other),
		)),
	}
}

fn parity(parity: Parity) -> std::io::Result<serial2::Parity> {
	match parity {
		Parity::None => Ok(serial2::Parity::None),
		Parity::Odd => Ok(serial2::Parity::Odd),
		Parity::Even => Ok(serial2::Parity::Even),
		Parity::Mark | Parity::Space => Err(std::io::Error::new(
			std::io::ErrorKind::Unsupported,
			format!("{} parity is not supported by this driver", parity),
		)),
	}
}
