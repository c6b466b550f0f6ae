use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::path::PathBuf;
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by corsfix.
    PrintSchemas,
    /// Create a golden fixture case from an existing handler file.
    NewFixture {
        /// Case name (directory under tests/fixtures).
        name: String,
        /// Handler file copied to before.ts.
        #[arg(long)]
        from: PathBuf,
    },
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", corsfix_types::schema::CORSFIX_SUMMARY_V1);
        }
        Command::NewFixture { name, from } => {
            let dir = PathBuf::from("tests").join("fixtures").join(&name);
            if dir.exists() {
                anyhow::bail!("fixture {name} already exists");
            }
            fs::create_dir_all(&dir)?;
            fs::copy(&from, dir.join("before.ts"))?;
            println!(
                "created {}; run `cargo run -p xtask -- bless-fixtures` to write after.ts",
                dir.display()
            );
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "corsfix-domain", "--test", "golden_fixtures"])
                .env("CORSFIX_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
    }
    Ok(())
}
