use std::path::Path;
use std::time::{Duration, Instant};

use serial_conn::{Connection, ConnectionError, SerialConnection, SerialEndpoint};

mod logging;
mod options;

use options::{Command, Options};

fn main() {
	if let Err(()) = do_main(clap::Parser::parse()) {
		std::process::exit(1);
	}
}

fn do_main(options: Options) -> Result<(), ()> {
	logging::init(module_path!(), options.verbose as i8);
	match &options.command {
		Command::Ports => {
			let ports = serial2::SerialPort::available_ports().map_err(|e| log::error!("Failed to enumerate serial ports: {}", e))?;
			if ports.is_empty() {
				log::info!("No serial ports found.");
			}
			for port in ports {
				println!("{}", port.display());
			}
		},
		Command::Write { data } => {
			let mut connection = open_connection(&options)?;
			log::debug!("Writing {} bytes", data.len());
			let start = Instant::now();
			let written = connection.write(data).map_err(|e| log::error!("Write failed: {}", e))?;
			log::info!("{:?}: wrote {} bytes", start.elapsed(), written);
			close_connection(connection);
		},
		Command::Read { timeout, follow } => {
			let mut connection = open_connection(&options)?;
			let timeout = Duration::from_millis(*timeout);
			let mut buffer = [0; 1024];
			loop {
				// Deadlines are absolute, so each read window needs a freshly armed deadline.
				connection
					.set_read_deadline(Instant::now() + timeout)
					.map_err(|e| log::error!("Failed to arm the read deadline: {}", e))?;
				match connection.read(&mut buffer) {
					Ok(count) => println!("{:02X?}", &buffer[..count]),
					Err(ConnectionError::Timeout) if *follow => continue,
					Err(ConnectionError::Timeout) => {
						log::info!("No data within {:?}", timeout);
						break;
					},
					Err(e) => {
						log::error!("Read failed: {}", e);
						return Err(());
					},
				}
			}
			close_connection(connection);
		},
		Command::Transfer { timeout, data } => {
			let mut connection = open_connection(&options)?;
			log::debug!("Writing {} bytes", data.len());
			let start = Instant::now();
			connection.write(data).map_err(|e| log::error!("Write failed: {}", e))?;
			connection
				.set_read_deadline(Instant::now() + Duration::from_millis(*timeout))
				.map_err(|e| log::error!("Failed to arm the read deadline: {}", e))?;
			let mut buffer = [0; 1024];
			let count = connection.read(&mut buffer).map_err(|e| log::error!("Transfer failed: {}", e))?;
			log::info!("{:?}: read {} bytes", start.elapsed(), count);
			println!("{:02X?}", &buffer[..count]);
			close_connection(connection);
		},
		Command::ShellCompletion { shell, output } => {
			write_shell_completion(*shell, output.as_deref())?;
		},
	}

	Ok(())
}

fn open_connection(options: &Options) -> Result<SerialConnection, ()> {
	let endpoint = SerialEndpoint::new(
		options.port.as_str(),
		options.baud_rate,
		options.data_bits,
		options.stop_bits,
		options.parity.as_str(),
	);
	let mut connection = SerialConnection::new(endpoint);
	connection
		.open()
		.map_err(|e| log::error!("Failed to open serial port {}: {}", options.port, e))?;
	log::debug!("Using serial port {} with mode {}", options.port, connection.endpoint());
	Ok(connection)
}

fn close_connection(mut connection: SerialConnection) {
	if let Err(e) = connection.close() {
		log::warn!("Failed to close serial port: {}", e);
	}
}

fn write_shell_completion(shell: clap_complete::Shell, output: Option<&Path>) -> Result<(), ()> {
	use clap::CommandFactory;
	use std::io::Write;

	let mut buffer = Vec::new();
	let mut command = Options::command();
	clap_complete::generate(shell, &mut command, env!("CARGO_BIN_NAME"), &mut buffer);
	if !buffer.ends_with(b"\n") {
		buffer.push(b'\n');
	}

	match output {
		None => {
			log::debug!("Writing shell completion for {} to stdout", shell);
			std::io::stdout()
				.lock()
				.write_all(&buffer)
				.map_err(|e| log::error!("Failed to write to stdout: {}", e))
		},
		Some(path) => {
			log::debug!("Writing shell completion for {} to {}", shell, path.display());
			std::fs::File::create(path)
				.and_then(|mut file| file.write_all(&buffer))
				.map_err(|e| log::error!("Failed to write {}: {}", path.display(), e))
		},
	}
}
