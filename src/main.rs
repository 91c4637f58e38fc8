use std::io::Write;
use std::path;
use clap::{crate_version, App, Arg};

use cdcl_rust::sat::cdcl;
use cdcl_rust::MainOptions;


fn main() {
    let matches = App::new("cdcl-rust")
        .version(crate_version!())
        .about("CDCL SAT solver with naive rescanning propagation")
        .arg(
            Arg::with_name("verb")
                .long("verb")
                .takes_value(true)
                .possible_values(&["0", "1", "2"])
                .help("Verbosity level (0=silent, 1=some, 2=more)"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Validate DIMACS header during parsing"),
        )
        .arg(
            Arg::with_name("naive")
                .long("naive")
                .help("Branch on the lowest-indexed unassigned variable instead of activity"),
        )
        .arg(
            Arg::with_name("var-decay")
                .long("var-decay")
                .takes_value(true)
                .help("The variable activity decay factor"),
        )
        .arg(
            Arg::with_name("decay-interval")
                .long("decay-interval")
                .takes_value(true)
                .help("Number of conflicts between activity decays"),
        )
        .arg(
            Arg::with_name("no-phase-saving")
                .long("no-phase-saving")
                .help("Always branch with positive polarity"),
        )
        .arg(Arg::with_name("input").required(true))
        .arg(Arg::with_name("output").required(false))
        .get_matches();

    {
        let mut builder = env_logger::Builder::new();
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
        builder.filter(
            None,
            matches
                .value_of("verb")
                .map(|v| match v {
                    "1" => log::LevelFilter::Info,
                    "2" => log::LevelFilter::Trace,
                    _ => log::LevelFilter::Off,
                })
                .unwrap_or(log::LevelFilter::Info),
        );
        builder.init();
    }

    let options = MainOptions {
        strict: matches.is_present("strict"),
        in_path: path::PathBuf::from(matches.value_of("input").unwrap()),
        out_path: matches.value_of("output").map(path::PathBuf::from),
    };

    let settings = {
        let mut s = cdcl::Settings::default();

        if matches.is_present("naive") {
            s.heur.mode = cdcl::HeuristicMode::Naive;
        }

        for &x in matches
            .value_of("var-decay")
            .and_then(|v| v.parse().ok())
            .iter()
        {
            if 0.0 < x && x < 1.0 {
                s.heur.var_decay = x;
            }
        }

        for &x in matches
            .value_of("decay-interval")
            .and_then(|v| v.parse().ok())
            .iter()
        {
            if x > 0 {
                s.heur.decay_interval = x;
            }
        }

        if matches.is_present("no-phase-saving") {
            s.heur.phase_saving = false;
        }

        s
    };

    cdcl_rust::solve(options, settings).expect("IO Error");
}
