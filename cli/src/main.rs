use clap::Parser;
use dojo_content::academies;
use dojo_content::validate::validate_all;
use dojo_tui::Cli as TuiCli;

/// Dojo CLI
///
/// If no subcommand is specified, the interactive terminal UI is launched.
#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    // If a sub-command is given, ignore requirements of the default args.
    subcommand_negates_reqs = true,
    bin_name = "dojo"
)]
struct MultitoolCli {
    #[clap(flatten)]
    interactive: TuiCli,

    #[clap(subcommand)]
    subcommand: Option<Subcommand>,
}

#[derive(Debug, clap::Subcommand)]
enum Subcommand {
    /// List the academies and their chapters.
    List,

    /// Validate the shipped curriculum; exits non-zero on any defect.
    Check(CheckCommand),
}

#[derive(Debug, Parser)]
struct CheckCommand {
    /// Emit machine-readable diagnostics instead of the pretty report.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = MultitoolCli::parse();
    match cli.subcommand {
        None => dojo_tui::run_main(cli.interactive).map_err(|err| anyhow::anyhow!(err)),
        Some(Subcommand::List) => {
            run_list();
            Ok(())
        }
        Some(Subcommand::Check(check)) => run_check(check),
    }
}

fn run_list() {
    for academy in academies() {
        println!(
            "{} — {} ({} chapters)",
            academy.id,
            academy.title,
            academy.chapters.len()
        );
        for chapter in &academy.chapters {
            println!("    {}. {}  [{}]", chapter.ordinal, chapter.title, chapter.id);
        }
    }
}

fn run_check(check: CheckCommand) -> anyhow::Result<()> {
    let defects = validate_all(academies());
    if check.json {
        println!("{}", serde_json::to_string_pretty(&defects)?);
    } else if defects.is_empty() {
        let scenarios: usize = academies().iter().map(|a| a.scenarios.len()).sum();
        let chapters: usize = academies().iter().map(|a| a.chapters.len()).sum();
        println!(
            "curriculum OK: {} academies, {chapters} chapters, {scenarios} scenarios",
            academies().len()
        );
    } else {
        for defect in &defects {
            eprintln!("error: {defect}");
        }
    }
    if defects.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("curriculum failed validation with {} defect(s)", defects.len())
    }
}
