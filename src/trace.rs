//! Memory access traces

use std::path::Path;

use text_io::try_scan;

use crate::error::TraceError;
use crate::memory::AccessType;

/// One decoded trace line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub access_type: AccessType,
    pub address: u64,
}

/// Scan the operation and address fields.
/// Fields may be separated by any run of whitespace,
/// anything after the address is ignored
fn scan_fields(line: &str) -> Result<(char, String), text_io::Error> {
    let fields: Vec<&str> = line.split_whitespace().take(2).collect();
    let record = fields.join(" ");

    let op: char;
    let address: String;
    try_scan!(record.bytes() => "{} {}", op, address);
    Ok((op, address))
}

/// Parse `<op> <0xADDRESS>`, where `line_num` is 1-based.
/// The first two characters of the address are a marker and are skipped
pub fn parse_line(
    line_num: usize,
    line: &str,
) -> Result<TraceRecord, TraceError> {
    if line.trim().is_empty() {
        return Err(TraceError::FormatError {
            line: line_num,
            reason: "empty line".to_string(),
        });
    }
    let (op, address) =
        scan_fields(line).map_err(|e| TraceError::FormatError {
            line: line_num,
            reason: e.to_string(),
        })?;

    let access_type = match op {
        'r' | 'R' => AccessType::Read,
        'w' | 'W' => AccessType::Write,
        _ => return Err(TraceError::UnknownOperation { line: line_num, op }),
    };

    let address = address.trim();
    if address.is_empty() {
        return Err(TraceError::FormatError {
            line: line_num,
            reason: "missing address".to_string(),
        });
    }
    let invalid_address = || TraceError::InvalidAddress {
        line: line_num,
        address: address.to_string(),
    };
    let digits = address
        .get(2..)
        .filter(|digits| !digits.is_empty())
        .ok_or_else(invalid_address)?;
    let address =
        u64::from_str_radix(digits, 16).map_err(|_| invalid_address())?;

    Ok(TraceRecord { access_type, address })
}

/// Parse a whole trace. Fails on the first malformed line,
/// blank lines included
pub fn parse_trace(content: &str) -> Result<Vec<TraceRecord>, TraceError> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| parse_line(i + 1, line))
        .collect()
}

/// Fetch operations from the trace file
pub fn fetch_operations(
    trace_path: &Path,
) -> Result<Vec<TraceRecord>, TraceError> {
    let content = std::fs::read_to_string(trace_path)
        .map_err(|e| TraceError::FileReadError(trace_path.to_path_buf(), e))?;
    parse_trace(&content)
}

/// File name of a trace, used to name evaluation outputs
pub fn base_name(trace_path: &Path) -> Option<String> {
    trace_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line(1, "r 0x1f40").unwrap(),
            TraceRecord {
                access_type: AccessType::Read,
                address: 0x1f40,
            }
        );
        assert_eq!(
            parse_line(1, "W 0xDEADBEEF").unwrap(),
            TraceRecord {
                access_type: AccessType::Write,
                address: 0xdead_beef,
            }
        );
        assert_eq!(parse_line(1, "  R   0x10 \r").unwrap().address, 0x10);
    }

    #[test]
    fn test_full_width_address() {
        let record = parse_line(1, "w 0xffffffffffffffff").unwrap();
        assert_eq!(record.address, u64::MAX);
    }

    #[test]
    fn test_missing_address() {
        assert!(matches!(
            parse_line(3, "r"),
            Err(TraceError::FormatError { line: 3, .. })
        ));
    }

    #[test]
    fn test_unknown_operation() {
        assert!(matches!(
            parse_line(2, "x 0x10"),
            Err(TraceError::UnknownOperation { line: 2, op: 'x' })
        ));
    }

    #[test]
    fn test_invalid_address() {
        assert!(matches!(
            parse_line(5, "r 0xzz"),
            Err(TraceError::InvalidAddress { line: 5, .. })
        ));
        assert!(matches!(
            parse_line(5, "r 0x"),
            Err(TraceError::InvalidAddress { line: 5, .. })
        ));
    }

    #[test]
    fn test_whitespace_separators() {
        assert_eq!(
            parse_line(1, "r\t0x10").unwrap(),
            TraceRecord {
                access_type: AccessType::Read,
                address: 0x10,
            }
        );
        assert_eq!(
            parse_line(1, "\tw \t 0x20\t").unwrap().access_type,
            AccessType::Write
        );
        // Trailing fields are ignored
        assert_eq!(parse_line(1, "r 0x30 extra").unwrap().address, 0x30);
    }

    #[test]
    fn test_empty_line() {
        for line in ["", "   ", "\t\r"] {
            assert!(matches!(
                parse_line(4, line),
                Err(TraceError::FormatError { line: 4, .. })
            ));
        }
    }

    #[test]
    fn test_parse_trace() {
        let content = "r 0x0\nw 0x4\nR 0x8\n";
        let records = parse_trace(content).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].access_type, AccessType::Write);
        assert_eq!(records[2].address, 0x8);
    }

    #[test]
    fn test_parse_trace_stops_at_blank_line() {
        let content = "r 0x0\n\nr 0x4\n";
        assert!(matches!(
            parse_trace(content),
            Err(TraceError::FormatError { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_trace_reports_line() {
        let content = "r 0x0\nr 0x4\nw\nr 0x8\n";
        assert!(matches!(
            parse_trace(content),
            Err(TraceError::FormatError { line: 3, .. })
        ));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(
            base_name(Path::new("traces/example1.in")),
            Some("example1.in".to_string())
        );
        assert_eq!(base_name(Path::new("/")), None);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("two-level-cache-sim-missing.trace");
        assert!(matches!(
            fetch_operations(&path),
            Err(TraceError::FileReadError(..))
        ));
    }
}
