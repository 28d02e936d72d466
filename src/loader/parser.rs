use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader, Read};

use crate::domain::process::{Pid, Process, Time};
use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    let parsed_data: T = serde_json::from_str(&data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Reads the process descriptions in `file_path`. See [`parse_processes`] for the format.
pub fn parse_process_file(file_path: &str) -> Result<Vec<Process>> {
    let file = fs::File::open(file_path).map_err(Error::IoError)?;
    let processes = parse_processes(file)?;
    log::info!("Loaded {} processes from '{}'.", processes.len(), file_path);
    Ok(processes)
}

/// Parses one process per line: `arrival_time pid memory_kb job_time`, separated by whitespace.
/// Blank lines are skipped. Pids must be unique and job times at least 1.
pub fn parse_processes<R: Read>(reader: R) -> Result<Vec<Process>> {
    let mut processes = Vec::new();
    let mut seen_pids: HashSet<Pid> = HashSet::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let process = parse_process_line(&line, line_number)?;
        if !seen_pids.insert(process.pid) {
            return Err(Error::ProcessParseError { line: line_number, reason: format!("duplicate pid {}", process.pid) });
        }
        processes.push(process);
    }

    Ok(processes)
}

/// Parses a single `arrival_time pid memory_kb job_time` line.
pub fn parse_process_line(line: &str, line_number: usize) -> Result<Process> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(Error::ProcessParseError { line: line_number, reason: format!("expected 4 fields, found {}", fields.len()) });
    }

    let arrival_time: Time = parse_field(fields[0], "arrival time", line_number)?;
    let pid: Pid = parse_field(fields[1], "pid", line_number)?;
    let mem_kb: usize = parse_field(fields[2], "memory requirement", line_number)?;
    let job_time: Time = parse_field(fields[3], "job time", line_number)?;

    if job_time == 0 {
        return Err(Error::ProcessParseError { line: line_number, reason: format!("process {} has a job time of 0", pid) });
    }

    Ok(Process::new(arrival_time, pid, mem_kb, job_time))
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str, line_number: usize) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| Error::ProcessParseError { line: line_number, reason: format!("{} '{}' is not a non-negative integer", name, value) })
}
