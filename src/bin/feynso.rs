use anyhow::Result;
use clap::{CommandFactory, Parser};
use feynso::granada::{self, EpsOrdering, FERMION_MULTIPLETS, SCALAR_MULTIPLETS};
use feynso::model::Model;
use indexmap::IndexSet;

/// Write FeynRules files for multiplets of the Granada dictionary.
///
/// Multiplet names are as in arXiv:1711.10391 but without backslashes, e.g.
/// `feynso omega1 zeta > FeynRulesFile.wl`.
#[derive(Parser, Debug)]
#[command(name = "feynso", version, about, verbatim_doc_comment)]
struct Cli {
    /// Multiplet labels to include
    multiplets: Vec<String>,

    /// Include every multiplet of the dictionary
    #[arg(short, long)]
    all: bool,

    /// Include every scalar multiplet
    #[arg(long)]
    scalars: bool,

    /// Include every fermion multiplet
    #[arg(long)]
    fermions: bool,

    /// Print the MatchMakerParser configuration instead of the model file
    #[arg(long)]
    mmp_config: bool,

    /// Print the Lagrangian as LaTeX instead of the model file
    #[arg(long)]
    latex: bool,

    /// Dump the selected model as JSON
    #[arg(long)]
    json: bool,

    /// Swap the epsilon argument order in the N-Delta1 coupling
    #[arg(long)]
    flipped_eps: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.all && !cli.scalars && !cli.fermions && cli.multiplets.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    // Deduplicate while keeping the order the labels were given in; the
    // model name is built from it.
    let mut selection: IndexSet<String> = cli.multiplets.iter().cloned().collect();
    if cli.scalars || cli.all {
        selection.extend(SCALAR_MULTIPLETS.iter().map(|s| s.to_string()));
    }
    if cli.fermions || cli.all {
        selection.extend(FERMION_MULTIPLETS.iter().map(|s| s.to_string()));
    }
    let selection: Vec<String> = selection.into_iter().collect();

    let convention = if cli.flipped_eps {
        EpsOrdering::Flipped
    } else {
        EpsOrdering::Reference
    };
    let terms = granada::select_terms(&selection, convention)?;
    log::info!(
        "selected {} terms for {} multiplets",
        terms.len(),
        selection.len()
    );

    let model = Model::new(selection.join("_"), terms);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else if cli.mmp_config {
        println!("{}", model.export_mmp_config()?);
    } else if cli.latex {
        println!("{}", model.export_latex()?);
    } else {
        println!("{}", model.export_feynrules()?);
    }
    Ok(())
}
