// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]

use std::env;
use std::process;

use clap::{App, Arg, ArgGroup};
use log::info;

use sokoban_search::config::Method;
use sokoban_search::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-search")
        .author("Martin Taibr")
        .about("Finds a shortest solution of a Sokoban level using BFS or A*")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("bfs")
                .short("b")
                .long("bfs")
                .help("breadth-first search (default)"),
        )
        .arg(
            Arg::with_name("astar")
                .short("a")
                .long("astar")
                .help("A* with the sum of box to nearest goal distances"),
        )
        .group(ArgGroup::with_name("method").arg("bfs").arg("astar"))
        .arg(
            Arg::with_name("replay")
                .short("r")
                .long("replay")
                .help("print every state of the solution"),
        )
        .arg(
            Arg::with_name("stats")
                .short("s")
                .long("stats")
                .help("print created, duplicate and expanded states by depth"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("print progress while searching"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("level in XSB format"),
        )
        .get_matches();

    let method = if matches.is_present("astar") {
        Method::AStar
    } else {
        Method::Bfs
    };
    let replay = matches.is_present("replay");
    let print_stats = matches.is_present("stats");
    let verbose = matches.is_present("verbose");
    // required so always present
    let path = matches.value_of("file").unwrap();

    let level = path.load_level().unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => eprintln!("Can't load level {} in {}: {}", path, dir.display(), err),
            Err(_) => eprintln!("Can't load level {}: {}", path, err),
        }
        process::exit(1);
    });
    info!("Loaded level {}", path);

    println!("Solving {} using {}...", path, method);
    let solver_ok = level.solve(method, verbose).unwrap_or_else(|err| {
        eprintln!("Invalid level: {}", err);
        process::exit(1);
    });

    match solver_ok.moves {
        Some(ref moves) => {
            println!("Found solution:");
            if replay {
                print!("{}", level.xsb_solution(moves));
            }
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
        }
        None => println!("No solution"),
    }
    print!("{}", solver_ok.stats);
    if print_stats {
        println!();
        print!("{}", solver_ok.stats.depth_table());
    }
}
