use clap::Parser;

use contas::cli::{self, Cli, Commands, CompaniesCommands, ExpensesCommands, ExportCommands};
use contas::cli::companies::CompanyEdit;
use contas::cli::expenses::ExpenseEdit;
use contas::logging;

fn main() {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Status => cli::status::run(),
        Commands::Companies { command } => match command {
            CompaniesCommands::Add {
                name,
                salary,
                vr,
                transport,
            } => cli::companies::add(&name, salary, vr, transport),
            CompaniesCommands::List => cli::companies::list(),
            CompaniesCommands::Edit {
                id,
                name,
                salary,
                vr,
                no_vr,
                transport,
                no_transport,
            } => cli::companies::edit(
                &id,
                CompanyEdit {
                    name,
                    salary,
                    vr,
                    no_vr,
                    transport,
                    no_transport,
                },
            ),
            CompaniesCommands::Remove { id, yes } => cli::companies::remove(&id, yes),
        },
        Commands::Expenses { command } => match command {
            ExpensesCommands::Add {
                name,
                amount,
                category,
                month,
            } => cli::expenses::add(&name, amount, category, month),
            ExpensesCommands::List { month, all } => cli::expenses::list(month, all),
            ExpensesCommands::Edit {
                id,
                name,
                amount,
                category,
            } => cli::expenses::edit(
                &id,
                ExpenseEdit {
                    name,
                    amount,
                    category,
                },
            ),
            ExpensesCommands::Pay { id } => cli::expenses::pay(&id),
            ExpensesCommands::Remove { id, yes } => cli::expenses::remove(&id, yes),
        },
        Commands::Summary { month } => cli::summary::run(month),
        Commands::Theme { command } => cli::theme::run(command),
        Commands::Clear { yes } => cli::clear::run(yes),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Export { command } => match command {
            ExportCommands::Companies { output } => cli::export::companies(output),
            ExportCommands::Expenses { month, output } => cli::export::expenses(month, output),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
