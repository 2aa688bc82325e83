use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use floating_cuts::{
    build_paths, level, packing_density, parent, relative_position, resolve_all, stages, Arity,
    Axis, CoordinateResolver, Cut, CutTree, Dimensions, GuillotinePosition, LayoutConfig,
    NodeIndex, NonGuillotinePosition, Occupancy, Placement, Plate, RelativePosition, SolvedTree,
};
use tracing::{info, info_span, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "floating-cuts", about = "Floating-Cuts sub-rectangle tree algebra")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the index table of a cut tree.
    Tree {
        /// Children per cut: 4 (guillotine) or 5 (non-guillotine).
        #[arg(long, default_value = "4")]
        arity: Arity,
        /// Tree height (root = level 0).
        #[arg(long, default_value_t = 2)]
        height: usize,
        /// Only list nodes within this many cutting stages (guillotine only).
        #[arg(long)]
        stages: Option<usize>,
    },
    /// Reconstruct item coordinates from a solved layout file.
    Place {
        /// Layout file (`arity`, `height`, `plate`, `node`, `item`, `place`, `repeat` records).
        layout: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tree {
            arity,
            height,
            stages,
        } => run_tree(arity, height, stages)?,
        Commands::Place { layout } => run_place(layout)?,
    }

    Ok(())
}

fn run_tree(arity: Arity, height: usize, stage_limit: Option<usize>) -> Result<()> {
    match arity {
        Arity::Guillotine => {
            let tree = CutTree::<GuillotinePosition>::new(height)?;
            let limit = stage_limit.unwrap_or(usize::MAX);
            println!("node\tparent\tposition\tlevel\tstages");
            for j in tree.nodes_within_stages(limit) {
                println!("{}\t{}", describe_node::<GuillotinePosition>(j), stages(j));
            }
        }
        Arity::NonGuillotine => {
            if stage_limit.is_some() {
                bail!("stage limits are only defined for guillotine trees");
            }
            let tree = CutTree::<NonGuillotinePosition>::new(height)?;
            println!("node\tparent\tposition\tlevel");
            for j in tree.nodes() {
                println!("{}", describe_node::<NonGuillotinePosition>(j));
            }
        }
    }

    Ok(())
}

fn describe_node<P: RelativePosition>(j: NodeIndex) -> String {
    match (relative_position::<P>(j), parent::<P>(j)) {
        (Ok(position), Ok(up)) => format!("{}\t{}\t{}\t{}", j, up, position, level::<P>(j)),
        _ => format!("{}\t-\tROOT\t0", j),
    }
}

/// Parsed layout file
#[derive(Debug)]
struct Layout {
    config: LayoutConfig,
    nodes: Vec<(NodeIndex, Dimensions, Cut)>,
    items: Vec<Dimensions>,
    places: Vec<(usize, NodeIndex)>,
    repeats: BTreeMap<(usize, NodeIndex), (Axis, u32)>,
}

fn run_place(path: PathBuf) -> Result<()> {
    let layout = read_layout_file(&path)
        .with_context(|| format!("failed to read layout from {}", path.display()))?;
    layout.config.validate().context("invalid layout configuration")?;

    let span = info_span!("place", arity = %layout.config.arity, height = layout.config.height);
    let _enter = span.enter();

    let placements = match layout.config.arity {
        Arity::Guillotine => place::<GuillotinePosition>(&layout)?,
        Arity::NonGuillotine => place::<NonGuillotinePosition>(&layout)?,
    };

    if let (Arity::Guillotine, Some(limit)) = (layout.config.arity, layout.config.stage_limit) {
        for placement in &placements {
            let needed = stages(placement.node);
            if needed > limit {
                warn!(node = placement.node, needed, limit, "placement exceeds stage limit");
            }
        }
    }

    if placements.is_empty() {
        println!("No items placed.");
        return Ok(());
    }

    for placement in &placements {
        println!(
            "item {}\tnode {}\torigin={}\tdirection={:?}\trepetitions={}",
            placement.item, placement.node, placement.origin, placement.direction, placement.repetitions
        );
    }

    let density = packing_density(&placements, &layout.items, layout.config.plate)
        .context("item dimensions missing for a placed item")?;
    println!("density={:.4}", density);

    Ok(())
}

fn place<P: CoordinateResolver>(layout: &Layout) -> Result<Vec<Placement>> {
    let config = &layout.config;
    let mut solved = SolvedTree::<P>::try_new(config.height)?;
    for &(node, dims, cut) in &layout.nodes {
        solved
            .set(node, dims, cut)
            .with_context(|| format!("node {} is outside a height-{} tree", node, config.height))?;
    }

    let mut occupancy = Occupancy::try_new(layout.items.len(), solved.len())?;
    for &(item, node) in &layout.places {
        occupancy
            .assign(item, node)
            .with_context(|| format!("invalid placement of item {} in node {}", item, node))?;
    }

    let paths = build_paths(&occupancy, &solved).context("path reconstruction failed")?;
    let origins = resolve_all(&paths, config.plate, config.rotated, &solved)
        .context("coordinate reconstruction failed")?;
    info!(placements = paths.len(), "coordinates resolved");

    let placements = Placement::from_paths(&paths, &origins)
        .into_iter()
        .map(|placement| {
            let (direction, count) = layout
                .repeats
                .get(&(placement.item, placement.node))
                .copied()
                .unwrap_or_else(|| Placement::direction_and_repetitions(None));
            placement.with_repetitions(direction, count)
        })
        .collect();

    Ok(placements)
}

fn read_layout_file(path: &PathBuf) -> Result<Layout> {
    let contents = std::fs::read_to_string(path)?;
    parse_layout(&contents)
}

fn parse_layout(contents: &str) -> Result<Layout> {
    let mut arity = Arity::Guillotine;
    let mut height = None;
    let mut plate = None;
    let mut rotated = false;
    let mut stage_limit = None;
    let mut nodes = Vec::new();
    let mut items = BTreeMap::new();
    let mut places = Vec::new();
    let mut repeats = BTreeMap::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let at = |idx: usize| field(&fields, idx, line_no);

        match fields[0] {
            "arity" => arity = at(1)?.parse::<Arity>()?,
            "height" => height = Some(number::<usize>(&fields, 1, line_no)?),
            "plate" => {
                plate = Some(Plate::new(
                    number(&fields, 1, line_no)?,
                    number(&fields, 2, line_no)?,
                ))
            }
            "rotated" => rotated = parse_bool(at(1)?, line_no)?,
            "stages" => stage_limit = Some(number::<usize>(&fields, 1, line_no)?),
            "node" => {
                let cut = match fields.get(4).copied() {
                    None => Cut::None,
                    Some("v") => Cut::Vertical,
                    Some("h") => Cut::Horizontal,
                    Some("cut") => Cut::Split,
                    Some(other) => bail!("unknown cut '{}' on line {}", other, line_no + 1),
                };
                let dims =
                    Dimensions::new(number(&fields, 2, line_no)?, number(&fields, 3, line_no)?);
                nodes.push((number::<NodeIndex>(&fields, 1, line_no)?, dims, cut));
            }
            "item" => {
                let dims =
                    Dimensions::new(number(&fields, 2, line_no)?, number(&fields, 3, line_no)?);
                items.insert(number::<usize>(&fields, 1, line_no)?, dims);
            }
            "place" => {
                let key = (
                    number::<usize>(&fields, 1, line_no)?,
                    number::<NodeIndex>(&fields, 2, line_no)?,
                );
                let direction = match fields.get(3).copied() {
                    None => None,
                    Some("v") => Some(Axis::Vertical),
                    Some("h") => Some(Axis::Horizontal),
                    Some(other) => bail!("unknown direction '{}' on line {}", other, line_no + 1),
                };
                if let Some(direction) = direction {
                    repeats.insert(key, (direction, number::<u32>(&fields, 4, line_no)?));
                }
                places.push(key);
            }
            "repeat" => {
                let key = (
                    number::<usize>(&fields, 1, line_no)?,
                    number::<NodeIndex>(&fields, 2, line_no)?,
                );
                let vertical = number::<f64>(&fields, 3, line_no)?;
                let horizontal = number::<f64>(&fields, 4, line_no)?;
                let resolved = Placement::direction_and_repetitions(Some((vertical, horizontal)));
                repeats.insert(key, resolved);
            }
            other => bail!("unknown record '{}' on line {}", other, line_no + 1),
        }
    }

    if let Some(&(item, node)) = repeats.keys().find(|key| !places.contains(*key)) {
        bail!("repetitions given for item {} in node {} without a 'place' record", item, node);
    }

    let height = height.ok_or_else(|| anyhow::anyhow!("missing 'height' record"))?;
    let plate = plate.ok_or_else(|| anyhow::anyhow!("missing 'plate' record"))?;

    let mut dense = Vec::with_capacity(items.len());
    for (expected, (id, dims)) in items.into_iter().enumerate() {
        if expected != id {
            bail!("item ids must be numbered 0..n without gaps (missing {})", expected);
        }
        dense.push(dims);
    }

    let mut config = LayoutConfig::new(arity, height, plate).with_rotation(rotated);
    if let Some(limit) = stage_limit {
        config = config.with_stage_limit(limit);
    }

    Ok(Layout {
        config,
        nodes,
        items: dense,
        places,
        repeats,
    })
}

fn field<'a>(fields: &[&'a str], idx: usize, line_no: usize) -> Result<&'a str> {
    fields
        .get(idx)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("missing field {} on line {}", idx, line_no + 1))
}

fn number<T>(fields: &[&str], idx: usize, line_no: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = field(fields, idx, line_no)?;
    raw.parse()
        .with_context(|| format!("invalid number '{}' on line {}", raw, line_no + 1))
}

fn parse_bool(raw: &str, line_no: usize) -> Result<bool> {
    match raw {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("invalid boolean '{}' on line {}", other, line_no + 1),
    }
}
