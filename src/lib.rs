use std::{fs, io, path};
use std::io::Write;
use log::info;

use crate::sat::{cdcl, dimacs, Solver, SolverError, TotalResult};

pub mod sat;


pub struct MainOptions {
    pub strict: bool,
    pub in_path: path::PathBuf,
    pub out_path: Option<path::PathBuf>,
}


pub fn solve(options: MainOptions, settings: cdcl::Settings) -> io::Result<()> {
    let mut solver = cdcl::CoreSolver::new(settings);

    let initial_time = time::precise_time_s();

    info!("============================[ Problem Statistics ]=============================");
    info!("|                                                                             |");

    let backward_subst = dimacs::parse_file(&options.in_path, &mut solver, options.strict)?;

    info!("|  Number of variables:  {:12}                                         |", solver.n_vars());
    info!("|  Number of clauses:    {:12}                                         |", solver.n_clauses());

    let parsed_time = time::precise_time_s();
    info!("|  Parse time:           {:12.2} s                                       |", parsed_time - initial_time);
    info!("|                                                                             |");

    let result = solver.solve().map_err(fatal)?;
    print_stats(&solver, time::precise_time_s() - parsed_time);

    println!(
        "{}",
        match result {
            TotalResult::SAT(_) => "SATISFIABLE",
            TotalResult::UnSAT => "UNSATISFIABLE",
            TotalResult::Interrupted => "INDETERMINATE",
        }
    );

    if let Some(path) = options.out_path {
        let mut file = fs::File::create(path)?;
        match result {
            TotalResult::UnSAT => {
                writeln!(file, "UNSAT")?;
            }
            TotalResult::Interrupted => {
                writeln!(file, "INDET")?;
            }
            TotalResult::SAT(ref model) => {
                writeln!(file, "SAT")?;
                dimacs::write_model(&mut file, &backward_subst, model)?;
            }
        }
    }

    if let TotalResult::SAT(ref model) = result {
        let valid = dimacs::validate_model_file(&options.in_path, &backward_subst, model)?;
        assert!(valid, "SELF-CHECK FAILED!");
    }

    Ok(())
}


fn print_stats<S: Solver>(solver: &S, cpu_time: f64) {
    let stats = solver.stats();
    info!("===============================================================================");
    info!("decisions             : {:12}", stats.decisions);
    info!("conflicts             : {:12}", stats.conflicts);
    info!("propagations          : {:12}", stats.propagations);
    info!("learned clauses       : {:12}", stats.learnts);
    info!("learned literals      : {:12}", stats.learnt_literals);
    info!("CPU time              : {:12.3} s", cpu_time);
    info!("");
}


fn fatal(err: SolverError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("FATAL! {}", err))
}
