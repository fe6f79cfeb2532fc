use std::{fmt::Write as _, fs, path::Path};

use tracing::info;

use crate::core::{Process, Result, SimError, Ticks, Workload};

/// Parses `id arrival burst` triples, one per line.
///
/// Line numbers in errors are 1-based.
pub fn parse_processes(input: &str) -> Result<Vec<Process>> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<Process> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let &[id, arrival, burst] = fields.as_slice() else {
        return Err(SimError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let number = |field: &'static str, value: &str| -> Result<Ticks> {
        value.parse().map_err(|source| SimError::InvalidNumber {
            line,
            field,
            value: value.to_owned(),
            source,
        })
    };

    let process = Process::new(
        number("id", id)?,
        number("arrival time", arrival)?,
        number("burst time", burst)?,
    );
    if process.burst_time == 0 {
        return Err(SimError::ZeroBurst {
            line,
            id: process.id,
        });
    }
    Ok(process)
}

pub fn load_workload(path: &Path) -> Result<Workload> {
    let text = fs::read_to_string(path)?;
    let workload = Workload::new(parse_processes(&text)?)?;
    info!(path = %path.display(), processes = workload.len(), "workload loaded");
    Ok(workload)
}

/// Renders processes in the format [`parse_processes`] reads.
pub fn format_processes<'a>(processes: impl IntoIterator<Item = &'a Process>) -> String {
    let mut out = String::new();
    for p in processes {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{} {} {}", p.id, p.arrival_time, p.burst_time);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whitespace_delimited_triples() {
        let processes = parse_processes("0 0 8\n1   1\t4\n  2 2 9  \n").unwrap();
        assert_eq!(
            processes,
            vec![
                Process::new(0, 0, 8),
                Process::new(1, 1, 4),
                Process::new(2, 2, 9)
            ]
        );
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let err = parse_processes("0 0 8\n1 1\n").unwrap_err();
        assert!(matches!(err, SimError::FieldCount { line: 2, found: 2 }));

        let err = parse_processes("0 0 8\n\n").unwrap_err();
        assert!(matches!(err, SimError::FieldCount { line: 2, found: 0 }));

        let err = parse_processes("0 0 8 1").unwrap_err();
        assert!(matches!(err, SimError::FieldCount { line: 1, found: 4 }));
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = parse_processes("0 -1 8").unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidNumber {
                line: 1,
                field: "arrival time",
                ..
            }
        ));
        assert_eq!(err.to_string(), "line 1: invalid arrival time '-1'");

        let err = parse_processes("3 0 0").unwrap_err();
        assert!(matches!(err, SimError::ZeroBurst { line: 1, id: 3 }));
    }

    #[test]
    fn format_round_trips_through_parser() {
        let processes = vec![Process::new(4, 0, 3), Process::new(9, 12, 1)];
        let text = format_processes(&processes);
        assert_eq!(text, "4 0 3\n9 12 1\n");
        assert_eq!(parse_processes(&text).unwrap(), processes);
    }
}
