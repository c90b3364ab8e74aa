//! Terminal frontend: loads a map file, runs the search and plays the
//! route back one step per frame at the configured delay.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context, Result};
use log::info;
use walker::{mapfile, util::parse_img, Grid, Point, Tile, Walker};

const USAGE: &str = "usage: frontend [--delay MS] [--start R,C] [--target R,C] \
                     [--include-target] [--json] MAP_FILE";

struct Args {
    map: PathBuf,
    delay_ms: Option<u64>,
    start: Option<Point>,
    target: Option<Point>,
    include_target: bool,
    json: bool,
}

fn parse_point(s: &str) -> Result<Point> {
    let (row, col) = s
        .split_once(',')
        .context("expected a ROW,COL coordinate pair")?;
    Ok(Point {
        row: row.trim().parse().context("bad row")?,
        col: col.trim().parse().context("bad column")?,
    })
}

fn parse_args() -> Result<Args> {
    let mut map = None;
    let mut delay_ms = None;
    let mut start = None;
    let mut target = None;
    let mut include_target = false;
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--delay" => {
                let value = args.next().with_context(|| USAGE.to_string())?;
                delay_ms = Some(value.parse().context("--delay expects milliseconds")?);
            }
            "--start" => {
                let value = args.next().with_context(|| USAGE.to_string())?;
                start = Some(parse_point(&value)?);
            }
            "--target" => {
                let value = args.next().with_context(|| USAGE.to_string())?;
                target = Some(parse_point(&value)?);
            }
            "--include-target" => include_target = true,
            "--json" => json = true,
            "--help" | "-h" => bail!("{USAGE}"),
            other if other.starts_with('-') => bail!("unknown option {other}\n{USAGE}"),
            other => map = Some(PathBuf::from(other)),
        }
    }

    Ok(Args {
        map: map.with_context(|| USAGE.to_string())?,
        delay_ms,
        start,
        target,
        include_target,
        json,
    })
}

/// Text maps carry their own `A`/`B` markers; image maps only carry walls,
/// so the endpoints come from the command line.
fn load_grid(args: &Args) -> Result<Grid> {
    let is_image = args
        .map
        .extension()
        .is_some_and(|ext| ext == "png" || ext == "bmp");

    let mut grid = if is_image {
        let img = image::open(&args.map)
            .with_context(|| format!("failed to open image {}", args.map.display()))?;
        parse_img(&img)?
    } else {
        mapfile::load(&args.map)
            .with_context(|| format!("failed to load map {}", args.map.display()))?
    };

    for (point, selector) in [(args.start, 1), (args.target, 2)] {
        if let Some(p) = point {
            if !grid.contains(p) {
                bail!("{p} is outside the {}x{} grid", grid.rows(), grid.columns());
            }
            grid.paint(p, selector)?;
        }
    }

    Ok(grid)
}

fn render(grid: &Grid, trail: &HashSet<Point>) {
    let mut frame = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let p = Point { row, col };
            if trail.contains(&p) && grid.tile_at(p) == Tile::Empty {
                frame.push('o');
            } else {
                frame.push(grid.tile_at(p).as_char());
            }
        }
        frame.push('\n');
    }
    println!("{frame}");
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let mut walker = Walker::new(load_grid(&args)?);
    if let Some(ms) = args.delay_ms {
        walker.set_move_delay(ms)?;
    }

    let path = walker.find_path(args.include_target)?;

    if path.is_empty() {
        println!("no route from A to B");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(path)?);
        return Ok(());
    }

    info!("walking {} cells", path.len());
    let delay = walker.move_delay();
    walker.play()?;

    let mut trail = HashSet::new();
    render(walker.grid(), &trail);

    while let Some(step) = walker.tick() {
        thread::sleep(delay);

        println!(
            "Position: {}    Tile: {}",
            step.position,
            walker.grid().tile_at(step.position).name()
        );
        if let Some(previous) = step.trail {
            trail.insert(previous);
        }
        // the start marker follows the walker along the route
        walker.grid_mut().set_start(step.position);
        render(walker.grid(), &trail);
    }

    println!("done");
    Ok(())
}
