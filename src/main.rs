use std::env;
use std::process;

use clap::{App, Arg, ArgGroup};

use boxpush_solver::config::{Format, Strategy};
use boxpush_solver::fs;
use boxpush_solver::parser;
use boxpush_solver::Solve;

fn main() {
    env_logger::init();

    let matches = App::new("boxpush-solver")
        .version("0.1")
        .arg(
            Arg::with_name("numeric")
                .short("-n")
                .long("--numeric")
                .help("parse as the numeric format (default: autodetect)"),
        )
        .arg(
            Arg::with_name("xsb")
                .short("-x")
                .long("--xsb")
                .help("parse as the XSB format (default: autodetect)"),
        )
        .group(ArgGroup::with_name("format").arg("numeric").arg("xsb"))
        .arg(
            Arg::with_name("astar")
                .short("-a")
                .long("--astar")
                .help("order the frontier by depth + heuristic instead of heuristic only"),
        )
        .arg(
            Arg::with_name("status")
                .short("-s")
                .long("--status")
                .help("print progress whenever the search reaches a new depth"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let path = matches.value_of("file").unwrap();

    let puzzle_text = fs::read_file(path).unwrap_or_else(|err| {
        let current_dir = env::current_dir().unwrap();
        println!(
            "Can't read file {} in {}: {}",
            path,
            current_dir.display(),
            err
        );
        process::exit(1);
    });

    let format = if matches.is_present("numeric") {
        Format::Numeric
    } else if matches.is_present("xsb") {
        Format::Xsb
    } else {
        parser::detect_format(&puzzle_text)
    };

    let state = parser::parse(&puzzle_text, format).unwrap_or_else(|err| {
        println!("Failed to parse: {}", err);
        process::exit(1);
    });

    let strategy = if matches.is_present("astar") {
        Strategy::AStar
    } else {
        Strategy::Greedy
    };

    println!("Solving {}...", path);
    let result = state.solve(strategy, matches.is_present("status"));
    print!("{}", result.stats);
    match result.moves {
        Some(moves) => {
            println!("Found solution: {}", moves);
            println!("Moves: {}", moves.move_cnt());
        }
        None => println!("No solution"),
    }
}
