//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// BookMySalon - salon booking backend
#[derive(Parser, Debug)]
#[command(name = "bookmysalon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

/// Overrides for the address in SERVER_HOST / SERVER_PORT
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop all tables and re-run every migration
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["bookmysalon", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert!(args.host.is_none());
                assert!(args.port.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_with_port() {
        let cli = Cli::try_parse_from(["bookmysalon", "-v", "serve", "--port", "9090"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve(ServeArgs { port: Some(9090), .. })));
    }

    #[test]
    fn test_migrate_requires_action() {
        assert!(Cli::try_parse_from(["bookmysalon", "migrate"]).is_err());
        let cli = Cli::try_parse_from(["bookmysalon", "migrate", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
