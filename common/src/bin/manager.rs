use clap::Parser;

mod cli {
    use clap::{Parser, Subcommand};

    #[derive(Parser)]
    #[command(
        name = "partpal marketplace manager",
        about = "Cli tool for managing state of the marketplace services: postgres schema"
    )]
    pub(crate) struct Args {
        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Subcommand)]
    pub(crate) enum Command {
        Postgres {
            #[clap(subcommand)]
            cmd: PostgresCommand,
        },
    }

    #[derive(Subcommand)]
    pub(crate) enum PostgresCommand {
        Migrate,
        RevertAll,
        Redo,
        Pending,
    }
}

mod postgres {
    use common::config::CONFIG;
    use common::persistence::PG_MIGRATIONS;
    use diesel::pg::Pg;
    use diesel::Connection;
    use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
    use diesel_async::AsyncPgConnection;
    use diesel_migrations::MigrationHarness;

    type Harness = AsyncConnectionWrapper<AsyncPgConnection>;

    fn harness() -> Harness {
        Harness::establish(&CONFIG.postgres.url()).expect("failed to connect to postgres")
    }

    fn run_pending(harness: &mut Harness) {
        let applied = harness
            .run_pending_migrations(PG_MIGRATIONS)
            .expect("failed to run migrations");
        println!("Applied `{}` migrations", applied.len());
    }

    fn revert(harness: &mut Harness) {
        let reverted = harness
            .revert_all_migrations(PG_MIGRATIONS)
            .expect("failed to revert migrations");
        println!("Reverted `{}` migrations", reverted.len());
    }

    pub(crate) fn migrate() {
        println!("Running migrations");
        run_pending(&mut harness());
        println!("Database migrated")
    }

    pub(crate) fn revert_all() {
        println!("Reverting all migrations");
        revert(&mut harness());
        println!("Database reverted")
    }

    pub(crate) fn redo() {
        println!("Redoing all migrations");
        let mut harness = harness();
        revert(&mut harness);
        run_pending(&mut harness);
        println!("Database redone")
    }

    pub(crate) fn pending() {
        let mut harness = harness();
        let pending = MigrationHarness::<Pg>::pending_migrations(&mut harness, PG_MIGRATIONS)
            .expect("failed to list pending migrations");
        if pending.is_empty() {
            println!("No pending migrations");
        }
        for migration in pending {
            println!("pending: {}", migration.name());
        }
    }
}

// The migration connection drives its own runtime, so this binary stays synchronous.
fn main() {
    let args = cli::Args::parse();
    match args.command {
        cli::Command::Postgres { cmd } => dispatch_postgres(cmd),
    }
}

fn dispatch_postgres(cmd: cli::PostgresCommand) {
    match cmd {
        cli::PostgresCommand::Migrate => postgres::migrate(),
        cli::PostgresCommand::RevertAll => postgres::revert_all(),
        cli::PostgresCommand::Redo => postgres::redo(),
        cli::PostgresCommand::Pending => postgres::pending(),
    };
}
