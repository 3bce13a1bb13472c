//! craftplan CLI: plan a crafting sequence from a JSON rule file.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use craftplan::{CraftError, DijkstraSearch, Goal, PlanVisualizer, Planner, RuleSet, SearchConfig};

#[derive(Parser, Debug)]
#[command(
    name = "craftplan",
    version,
    about = "Find a fast sequence of crafting actions that reaches a goal inventory"
)]
struct Cli {
    /// JSON rule file with Items, Initial, Goal and Recipes
    rules: PathBuf,

    /// Search budget in seconds
    #[arg(long, default_value_t = 30.0)]
    time_limit: f64,

    /// Override the goal, e.g. `--goal ingot=1,stone_pickaxe=1`
    #[arg(long)]
    goal: Option<String>,

    /// Write the plan as a Graphviz DOT file
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Use uniform-cost search instead of the relaxed-cost heuristic
    #[arg(long)]
    dijkstra: bool,
}

fn run(cli: Cli) -> craftplan::Result<()> {
    let mut rules = RuleSet::from_path(&cli.rules)?;
    if let Some(goal) = &cli.goal {
        rules = rules.with_goal(goal.parse::<Goal>()?);
    }

    println!("All items: {:?}", rules.items);
    println!("Goal: {:?}", rules.goal.iter().collect::<Vec<_>>());
    println!("Initial: {}", rules.initial_state());

    let time_limit = Duration::try_from_secs_f64(cli.time_limit)
        .map_err(|e| CraftError::InvalidConfig(format!("time limit: {}", e)))?;
    let planner = if cli.dijkstra {
        Planner::with_search_algorithm(rules, Box::new(DijkstraSearch::new(time_limit)))
    } else {
        Planner::with_config(rules, SearchConfig::default().with_time_limit(time_limit))
    };

    let plan = planner.plan()?;
    println!("{}", plan);

    if let Some(path) = &cli.dot {
        let rules = planner.rules();
        PlanVisualizer::new().visualize_plan(&rules.initial_state(), &rules.goal, &plan, path)?;
        log::info!("Wrote plan graph to {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
