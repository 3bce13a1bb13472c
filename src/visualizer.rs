use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Goal, Inventory, Plan, Result};

/// A visualizer for crafting plans that generates Graphviz DOT files
pub struct PlanVisualizer;

impl PlanVisualizer {
    pub fn new() -> Self {
        Self
    }

    /// Writes the plan as a left-to-right chain of inventories joined by
    /// the actions taken, to any writer.
    pub fn write_plan<W: Write>(
        &self,
        out: &mut W,
        initial_state: &Inventory,
        goal: &Goal,
        plan: &Plan,
    ) -> Result<()> {
        writeln!(out, "digraph CraftPlan {{")?;
        writeln!(out, "    rankdir=LR;")?;
        writeln!(
            out,
            "    node [shape=box, style=filled, fillcolor=lightblue];"
        )?;
        writeln!(out, "    edge [fontsize=10];")?;

        writeln!(
            out,
            "    state_0 [label=\"Initial State\\n{}\", fillcolor=lightgreen];",
            Self::inventory_label(initial_state)
        )?;

        let last = plan.len();
        for (i, step) in plan.steps.iter().enumerate() {
            let n = i + 1;
            let fill = if n == last { ", fillcolor=lightpink" } else { "" };
            writeln!(
                out,
                "    state_{} [label=\"{}\"{}];",
                n,
                Self::inventory_label(&step.state),
                fill
            )?;
            writeln!(
                out,
                "    state_{} -> state_{} [label=\"{}\"];",
                i,
                n,
                Self::escape(&step.action)
            )?;
        }

        let goal_label = goal
            .iter()
            .map(|(id, min)| format!("{} >= {}", Self::escape(id), min))
            .collect::<Vec<_>>()
            .join("\\n");
        writeln!(
            out,
            "    goal [label=\"Goal\\n{}\\nCost: {}\", shape=note, fillcolor=lightyellow];",
            goal_label, plan.cost
        )?;
        writeln!(out, "    state_{} -> goal [style=dashed];", last)?;

        writeln!(out, "}}")?;
        Ok(())
    }

    /// Writes the plan visualization to a DOT file at `path`.
    pub fn visualize_plan(
        &self,
        initial_state: &Inventory,
        goal: &Goal,
        plan: &Plan,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_plan(&mut file, initial_state, goal, plan)?;
        file.flush()?;
        Ok(())
    }

    fn inventory_label(state: &Inventory) -> String {
        state
            .iter()
            .filter(|(_, qty)| *qty > 0)
            .map(|(id, qty)| format!("{}: {}", Self::escape(id), qty))
            .collect::<Vec<_>>()
            .join("\\n")
    }

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }
}

impl Default for PlanVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
