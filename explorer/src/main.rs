use std::env;
use std::fs;

use anyhow::{bail, Context};
use spelunk::{modules, workflow, Grid, TreeCheck};

const USAGE: &str = "usage: explorer <workflows|modules|garden> <path> [steps]";

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let mode = args.next().context(USAGE)?;
    let path = args.next().context(USAGE)?;
    let input = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;

    match mode.as_str() {
        "workflows" => {
            let graph = workflow::parse(&input)?;
            report(graph.check_tree(workflow::ENTRY)?);
        }
        "modules" => {
            let config = modules::parse(&input)?;
            report(config.graph().check_tree(modules::ENTRY)?);
        }
        "garden" => {
            let steps = args
                .next()
                .context(USAGE)?
                .parse::<u32>()
                .context("step count must be a non-negative integer")?;
            let grid = Grid::parse(&input)?;
            let reachable = grid.reachable_spectral(steps);
            print!("{}", grid.render(&reachable));
            println!("{}", reachable.len());
        }
        other => bail!("unknown mode `{other}`; {USAGE}"),
    }

    Ok(())
}

fn report(check: TreeCheck) {
    match check {
        TreeCheck::Tree => println!("true"),
        TreeCheck::Cycle { path } => {
            println!("found loop: {}", path.join(" -> "));
            println!("false");
        }
    }
}
