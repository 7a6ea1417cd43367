use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Talk to raw serial devices over a deadline bound connection.
///
/// The connection is opened from the global port and line options.
/// Reads are bounded by a deadline that is re-armed before every read,
/// and data on the wire is printed as hexadecimal bytes.
#[derive(Parser)]
#[command(version)]
pub struct Options {
	/// Print more verbose messages. Use multiple times to increase verbosity.
	#[arg(long, short, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// The serial port to use.
	#[arg(long, short, global = true)]
	#[cfg_attr(target_os = "windows", arg(default_value = "COM1"))]
	#[cfg_attr(not(target_os = "windows"), arg(default_value = "/dev/ttyUSB0"))]
	pub port: String,

	/// The baud rate to configure.
	#[arg(long, short, global = true, default_value = "9600")]
	pub baud_rate: u32,

	/// The number of data bits per character.
	#[arg(long, global = true, default_value = "8")]
	pub data_bits: u8,

	/// The number of stop bits: 1 or 2.
	#[arg(long, global = true, default_value = "1")]
	pub stop_bits: u8,

	/// The parity mode: NONE, ODD, EVEN, MARK or SPACE (case does not matter).
	#[arg(long, global = true, default_value = "NONE")]
	pub parity: String,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// List the serial ports available on this system.
	Ports,

	/// Write raw bytes to the serial port.
	Write {
		/// The bytes to write, as hexadecimal values.
		#[arg(value_name = "HEX", required = true, value_parser = parse_hex_byte)]
		data: Vec<u8>,
	},

	/// Read from the serial port until the read deadline expires.
	Read {
		/// The read window in milliseconds, re-armed before every read.
		#[arg(long, short, value_name = "MS", default_value = "1000")]
		timeout: u64,

		/// Keep listening after an expired deadline instead of exiting.
		#[arg(long, short)]
		follow: bool,
	},

	/// Write raw bytes and print the response that arrives before the deadline.
	Transfer {
		/// The read window in milliseconds, armed after the request is written.
		#[arg(long, short, value_name = "MS", default_value = "1000")]
		timeout: u64,

		/// The bytes to write, as hexadecimal values.
		#[arg(value_name = "HEX", required = true, value_parser = parse_hex_byte)]
		data: Vec<u8>,
	},

	/// Write shell completions to a file or standard output.
	ShellCompletion {
		/// The shell for which to generate completions.
		#[arg(long)]
		shell: clap_complete::Shell,

		/// The file to write the generated completion file to.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
}

fn parse_hex_byte(value: &str) -> Result<u8, String> {
	let digits = value.strip_prefix("0x").unwrap_or(value);
	u8::from_str_radix(digits, 16).map_err(|_| format!("invalid hex byte: {:?}", value))
}
