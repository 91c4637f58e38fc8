use std::{ffi, fs, io, path, str};
use std::collections::{HashMap, HashSet};
use flate2::read::GzDecoder;
use crate::sat::Solver;
use crate::sat::formula::{Lit, Var, VarMap};


pub fn parse_file<P: AsRef<path::Path>, S: Solver>(
    path: P,
    solver: &mut S,
    validate: bool,
) -> io::Result<VarMap<i32>> {
    let file = io::BufReader::new(fs::File::open(&path)?);
    if path.as_ref().extension() == Some(ffi::OsStr::new("gz")) {
        parse(&mut GzDecoder::new(file), solver, validate)
    } else {
        let mut reader = file;
        parse(&mut reader, solver, validate)
    }
}

pub fn parse<R: io::Read, S: Solver>(
    stream: &mut R,
    solver: &mut S,
    validate: bool,
) -> io::Result<VarMap<i32>> {
    let mut subst = Subst::new(solver);
    DimacsParser::parse(stream, validate, |cl| subst.add_clause(cl))?;
    Ok(subst.backward_subst)
}


pub fn write_model<W: io::Write>(
    stream: &mut W,
    backward_subst: &VarMap<i32>,
    model: &VarMap<bool>,
) -> io::Result<()> {
    for (var, &val) in model.iter() {
        let var_id = backward_subst[&var];
        write!(stream, "{} ", if val { var_id } else { -var_id })?;
    }
    writeln!(stream, "0")?;
    Ok(())
}


pub fn validate_model_file<P: AsRef<path::Path>>(
    path: P,
    backward_subst: &VarMap<i32>,
    model: &VarMap<bool>,
) -> io::Result<bool> {
    let file = io::BufReader::new(fs::File::open(&path)?);
    if path.as_ref().extension() == Some(ffi::OsStr::new("gz")) {
        validate_model(&mut GzDecoder::new(file), backward_subst, model)
    } else {
        let mut reader = file;
        validate_model(&mut reader, backward_subst, model)
    }
}

pub fn validate_model<R: io::Read>(
    stream: &mut R,
    backward_subst: &VarMap<i32>,
    model: &VarMap<bool>,
) -> io::Result<bool> {
    let mut lits = HashSet::new();
    for (var, &value) in model.iter() {
        let lit_id = {
            let var_id = backward_subst[&var];
            if value {
                var_id
            } else {
                -var_id
            }
        };

        lits.insert(lit_id);
        if lits.contains(&(-lit_id)) {
            return Ok(false);
        }
    }

    let mut ok = true;
    DimacsParser::parse(stream, false, |cl| {
        let mut found = false;
        for lit in cl {
            if lits.contains(&lit) {
                found = true;
                break;
            }
        }

        if !found {
            ok = false;
        }
    })?;

    Ok(ok)
}


// Interns DIMACS variable ids to dense `Var` indices in first-occurrence
// order, keeping the reverse mapping for printing.
struct Subst<'s, S: 's> {
    solver: &'s mut S,
    forward_subst: HashMap<i32, Var>,
    backward_subst: VarMap<i32>,
}

impl<'s, S: Solver> Subst<'s, S> {
    fn new(solver: &'s mut S) -> Self {
        Subst {
            solver,
            forward_subst: HashMap::new(),
            backward_subst: VarMap::new(),
        }
    }

    fn add_clause(&mut self, raw: Vec<i32>) {
        let lits: Vec<Lit> = raw.iter().map(|&lit_id| self.lit_by_id(lit_id)).collect();
        self.solver.add_clause(&lits[..]);
    }

    fn lit_by_id(&mut self, lit_id: i32) -> Lit {
        let var_id = lit_id.abs();
        if !self.forward_subst.contains_key(&var_id) {
            let v = self.solver.new_var();
            self.forward_subst.insert(var_id, v);
            self.backward_subst.insert(&v, var_id);
        }

        self.forward_subst[&var_id].lit(lit_id < 0)
    }
}


struct DimacsParser<'p> {
    reader: str::Chars<'p>,
    cur: Option<char>,
    vars: HashSet<i32>,
    clauses: usize,
}

impl<'p> DimacsParser<'p> {
    fn parse<R: io::Read, F: FnMut(Vec<i32>) -> ()>(
        reader: &'p mut R,
        validate: bool,
        clause: F,
    ) -> io::Result<()> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;

        let mut p = DimacsParser {
            reader: buf.chars(),
            cur: None,
            vars: HashSet::new(),
            clauses: 0,
        };
        p.next();
        p.parse_me(validate, clause)
    }

    fn parse_me<F: FnMut(Vec<i32>) -> ()>(&mut self, validate: bool, mut clause: F) -> io::Result<()> {
        enum State {
            Waiting,
            Parsing(usize, usize),
        }

        let mut state = State::Waiting;
        loop {
            self.skip_whitespace();
            match state {
                State::Waiting => match self.current() {
                    Some('c') => {
                        self.skip_line();
                    }

                    _ => {
                        self.consume("p cnf")?;
                        let vars = self.next_uint()?;
                        let clauses = self.next_uint()?;
                        state = State::Parsing(vars, clauses);
                    }
                },

                State::Parsing(vars, clauses) => match self.current() {
                    Some('c') => {
                        self.skip_line();
                    }

                    None => {
                        if validate {
                            if clauses != self.clauses {
                                return Err(parse_error(format!(
                                    "DIMACS header mismatch: {} clauses declared, {} found",
                                    clauses, self.clauses
                                )));
                            }

                            if vars < self.vars.len() {
                                return Err(parse_error(format!(
                                    "DIMACS header mismatch: {} vars declared, {} discovered",
                                    vars,
                                    self.vars.len()
                                )));
                            }
                        }
                        return Ok(());
                    }

                    _ => {
                        let c = self.parse_clause()?;
                        clause(c);
                    }
                },
            }
        }
    }

    fn parse_clause(&mut self) -> io::Result<Vec<i32>> {
        let mut lits = Vec::new();
        loop {
            let lit = self.next_int()?;
            if lit == 0 {
                self.clauses += 1;
                return Ok(lits);
            } else {
                self.vars.insert(lit.abs());
                lits.push(lit);
            }
        }
    }


    #[inline]
    fn next(&mut self) {
        self.cur = self.reader.next();
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.cur
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.cur {
                None => break,
                Some(c) if !c.is_whitespace() => break,
                _ => self.next(),
            }
        }
    }

    fn skip_line(&mut self) {
        loop {
            match self.cur {
                None => break,
                Some('\n') => {
                    self.next();
                    break;
                }
                _ => self.next(),
            }
        }
    }

    fn consume(&mut self, target: &str) -> io::Result<()> {
        for tc in target.chars() {
            match self.cur {
                Some(c) if c == tc => self.next(),
                _ => {
                    return Err(parse_error(format!("failed to consume; expected '{}'", target)));
                }
            }
        }
        Ok(())
    }

    fn read_int_body(&mut self) -> io::Result<usize> {
        let mut len: usize = 0;
        let mut value: usize = 0;
        loop {
            match self.cur.and_then(|c| c.to_digit(10)) {
                Some(d) => {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(d as usize))
                        .ok_or_else(|| parse_error("int out of range".to_string()))?;
                    len += 1;
                    self.next()
                }

                _ if len > 0 => return Ok(value),

                _ => {
                    return Err(parse_error("int expected".to_string()));
                }
            }
        }
    }

    fn next_int(&mut self) -> io::Result<i32> {
        self.skip_whitespace();
        let sign = match self.cur {
            Some('+') => {
                self.next();
                1
            }
            Some('-') => {
                self.next();
                -1
            }
            _ => 1,
        };

        let val = self.read_int_body()?;
        if val > i32::max_value() as usize {
            return Err(parse_error("int out of range".to_string()));
        }
        Ok(sign * (val as i32))
    }

    fn next_uint(&mut self) -> io::Result<usize> {
        self.skip_whitespace();
        if let Some('+') = self.cur {
            self.next();
        }
        self.read_int_body()
    }
}

fn parse_error(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("PARSE ERROR! {}", message))
}
