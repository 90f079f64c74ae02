use xstream::core::grid::Grid;
use xstream::core::projector::{forward_project, Projector, TraceBuffers};
use xstream::math::constants::{Float, AXIS_PERTURBATION, LENGTH_EPSILON};
use xstream::math::segment::Segment2f;
use xstream::projectors::siddon::SiddonProjector;
use std::env;

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 7 {
        eprintln!(
            "Usage: {} <sx> <sy> <x0> <y0> <x1> <y1> [--value V] [--ramp] [--perturbation E] [--length-epsilon E] [--trace]",
            args[0]
        );
        std::process::exit(1);
    }

    let sx: usize = parse_or_exit(&args[1], "sx");
    let sy: usize = parse_or_exit(&args[2], "sy");
    let x0: Float = parse_or_exit(&args[3], "x0");
    let y0: Float = parse_or_exit(&args[4], "y0");
    let x1: Float = parse_or_exit(&args[5], "x1");
    let y1: Float = parse_or_exit(&args[6], "y1");

    let mut value: Float = 1.0;
    let mut ramp = false;
    let mut perturbation = AXIS_PERTURBATION;
    let mut length_epsilon = LENGTH_EPSILON;
    let mut show_trace = false;

    let mut i = 7;
    while i < args.len() {
        match args[i].as_str() {
            "--value" => {
                i += 1;
                value = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(value);
            }
            "--ramp" => ramp = true,
            "--perturbation" => {
                i += 1;
                perturbation = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(perturbation);
            }
            "--length-epsilon" => {
                i += 1;
                length_epsilon = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(length_epsilon);
            }
            "--trace" => show_trace = true,
            other => log::warn!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    let grid = if ramp {
        Grid::from_fn(sx, sy, |ix, iy| (ix * sy + iy) as Float)
    } else {
        Grid::uniform(sx, sy, value)
    };
    let grid = grid.unwrap_or_else(|e| exit_invalid(&e));
    let projector = SiddonProjector::with_settings(perturbation, length_epsilon)
        .unwrap_or_else(|e| exit_invalid(&e));

    let segment = Segment2f::from_coords(x0, y0, x1, y1);
    if !segment.is_finite() {
        eprintln!("segment coordinates must be finite");
        std::process::exit(2);
    }

    let mut buffers = TraceBuffers::with_capacity(grid.shape());
    projector.trace_into(&segment, grid.shape(), &mut buffers);
    log::info!(
        "traced ({}, {}) -> ({}, {}) over {}x{}: {} cells",
        x0, y0, x1, y1, sx, sy, buffers.cells().len()
    );

    if show_trace {
        for cell in buffers.cells() {
            println!("cell ({}, {}) length {:.9} value {}", cell.ix, cell.iy, cell.length, grid.value(cell.ix, cell.iy));
        }
    }

    println!(
        "projection {:.9} clipped length {:.9}",
        forward_project(buffers.cells(), grid.matrix()),
        grid.bbox().segment_clipped_length(&segment)
    );
}

fn parse_or_exit<T: std::str::FromStr>(arg: &str, name: &str) -> T {
    arg.parse::<T>().unwrap_or_else(|_| {
        eprintln!("invalid value for {}: '{}'", name, arg);
        std::process::exit(2);
    })
}

fn exit_invalid<T>(err: &dyn std::error::Error) -> T {
    eprintln!("{}", err);
    std::process::exit(2);
}
