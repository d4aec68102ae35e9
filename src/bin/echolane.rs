// Command-line host for the echo drivers.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use echolane::{ClassifiedError, ErrorSink, Invocation, Outcome, SharedLogger, TracingLogger};

#[derive(Parser)]
#[command(name = "echolane")]
#[command(about = "Single-exchange echo over TCP, UDP and Unix-domain sockets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve one client (tcp, local) or answer one datagram (udp)
    Server {
        #[arg(value_enum)]
        transport: TransportArg,

        /// Port to bind, 0 picks a random one (tcp, udp)
        #[arg(short, long, default_value_t = 0)]
        port: u16,

        /// Socket name; a leading '/' means a filesystem path (local)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Send one message and print the reply
    Client {
        #[arg(value_enum)]
        transport: TransportArg,

        /// Server IPv4 address (tcp, udp)
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Server port (tcp, udp)
        #[arg(short, long)]
        port: Option<u16>,

        /// Socket name (local)
        #[arg(short, long)]
        name: Option<String>,

        /// Message to send
        #[arg(short, long)]
        message: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TransportArg {
    Tcp,
    Udp,
    Local,
}

struct StderrSink;

impl ErrorSink for StderrSink {
    fn report(&self, error: &ClassifiedError) {
        tracing::error!(kind = ?error.kind(), "{error}");
        eprintln!("error: {error}");
    }
}

fn invocation(command: Commands) -> anyhow::Result<Invocation> {
    Ok(match command {
        Commands::Server { transport: TransportArg::Tcp, port, .. } => Invocation::TcpServer { port },
        Commands::Server { transport: TransportArg::Udp, port, .. } => Invocation::UdpServer { port },
        Commands::Server { transport: TransportArg::Local, name, .. } => {
            let Some(name) = name else { bail!("--name is required for local sockets") };
            Invocation::LocalServer { name }
        }
        Commands::Client { transport: TransportArg::Local, name, message, .. } => {
            let Some(name) = name else { bail!("--name is required for local sockets") };
            Invocation::LocalClient { name, message: message.into_bytes() }
        }
        Commands::Client { transport, address, port, message, .. } => {
            let Some(port) = port else { bail!("--port is required for tcp and udp clients") };
            let message = message.into_bytes();
            match transport {
                TransportArg::Udp => Invocation::UdpClient { address, port, message },
                _ => Invocation::TcpClient { address, port, message },
            }
        }
    })
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .init();

    let invocation = invocation(cli.command)?;
    tracing::debug!(transport = %invocation.transport(), role = ?invocation.role(), "starting");

    let log: SharedLogger = Arc::new(TracingLogger);
    let Some(outcome) = echolane::surface(echolane::run(&invocation, log), &StderrSink) else {
        return Ok(ExitCode::FAILURE);
    };

    match outcome {
        Outcome::Served(report) => {
            println!("served {} ({} exchanges, {} bytes)", report.peer, report.exchanges, report.bytes_echoed);
        }
        Outcome::Replied(reply) => println!("{}", reply.render()),
    }
    Ok(ExitCode::SUCCESS)
}
