//! Slicer profile I/O.
//!
//! Slicer profiles are flat `key = value` text files (Slic3r-style ini
//! without section markers). Only the eight tunable keys are interpreted;
//! everything else in the file is opaque and preserved verbatim on write.

use crate::engine::{Candidate, Parameter};
use crate::error::{Result, SliceTuneError};
use std::path::Path;

/// Read the tunable parameters from a slicer profile.
///
/// A key missing from the file, or carrying a non-numeric value, falls back
/// to that parameter's documented default rather than failing: an incomplete
/// profile is the normal case, not an error.
pub fn read_initial_parameters<P: AsRef<Path>>(path: P) -> Result<Candidate> {
    let contents = std::fs::read_to_string(&path).map_err(|e| {
        SliceTuneError::Profile(format!(
            "Failed to read profile {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    let mut candidate = Candidate::default();

    for param in Parameter::ALL {
        match lookup(&contents, param.key()) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) => candidate.set(param, value),
                Err(_) => {
                    log::warn!(
                        "Profile value {} = {:?} is not numeric, using default {}",
                        param.key(),
                        raw,
                        param.default_value()
                    );
                }
            },
            None => {
                log::debug!(
                    "Profile is missing {}, using default {}",
                    param.key(),
                    param.default_value()
                );
            }
        }
    }

    Ok(candidate)
}

/// Write the tunable parameters back to the profile in the same flat
/// `key = value` shape, updating managed keys in place, preserving every
/// other line untouched, and appending managed keys the file did not have.
pub fn write_parameters<P: AsRef<Path>>(path: P, candidate: &Candidate) -> Result<()> {
    let contents = std::fs::read_to_string(&path).unwrap_or_default();

    let mut remaining: Vec<Parameter> = Parameter::ALL.to_vec();
    let mut output = String::new();

    for line in contents.lines() {
        match parse_line(line) {
            Some((key, _)) => {
                if let Some(pos) = remaining.iter().position(|p| p.key() == key) {
                    let param = remaining.remove(pos);
                    output.push_str(&assignment(param, candidate));
                } else {
                    output.push_str(line);
                    output.push('\n');
                }
            }
            None => {
                output.push_str(line);
                output.push('\n');
            }
        }
    }

    for param in remaining {
        output.push_str(&assignment(param, candidate));
    }

    std::fs::write(&path, output).map_err(|e| {
        SliceTuneError::Profile(format!(
            "Failed to write profile {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    Ok(())
}

/// Find the last assignment to `key` in the file, ignoring comments.
fn lookup<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    contents
        .lines()
        .filter_map(parse_line)
        .filter(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .last()
}

/// Split a `key = value` line; comments, blanks and section markers yield None.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with(';')
        || trimmed.starts_with('[')
    {
        return None;
    }
    let (key, value) = trimmed.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Integer-valued fields print without a fractional part so the written file
/// reads like the hand-edited profiles slicers produce.
fn assignment(param: Parameter, candidate: &Candidate) -> String {
    let value = candidate.get(param);
    if value.fract() == 0.0 {
        format!("{} = {}\n", param.key(), value as i64)
    } else {
        format!("{} = {}\n", param.key(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.ini");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_present_keys() {
        let (_dir, path) = write_temp(
            "# generated by Slic3r\n\
             layer_height = 0.2\n\
             perimeter_speed = 45\n\
             fill_density = 0.15\n\
             nozzle_diameter = 0.4\n",
        );

        let candidate = read_initial_parameters(&path).unwrap();
        assert_eq!(candidate.layer_height, 0.2);
        assert_eq!(candidate.perimeter_speed, 45.0);
        assert_eq!(candidate.fill_density, 0.15);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let (_dir, path) = write_temp("layer_height = 0.16\n");

        let candidate = read_initial_parameters(&path).unwrap();
        assert_eq!(candidate.layer_height, 0.16);
        assert_eq!(
            candidate.retract_speed,
            Parameter::RetractSpeed.default_value()
        );
        assert_eq!(
            candidate.fill_density,
            Parameter::FillDensity.default_value()
        );
    }

    #[test]
    fn test_non_numeric_value_falls_back() {
        let (_dir, path) = write_temp("perimeter_speed = fast\n");

        let candidate = read_initial_parameters(&path).unwrap();
        assert_eq!(
            candidate.perimeter_speed,
            Parameter::PerimeterSpeed.default_value()
        );
    }

    #[test]
    fn test_write_preserves_unmanaged_lines() {
        let (_dir, path) = write_temp(
            "# printer: Prusa MK3\n\
             nozzle_diameter = 0.4\n\
             layer_height = 0.2\n\
             bed_temperature = 60\n",
        );

        let mut candidate = Candidate::default();
        candidate.layer_height = 0.28;
        write_parameters(&path, &candidate).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# printer: Prusa MK3"));
        assert!(written.contains("nozzle_diameter = 0.4"));
        assert!(written.contains("bed_temperature = 60"));
        assert!(written.contains("layer_height = 0.28"));
        // Managed keys absent from the original are appended
        assert!(written.contains("retract_length = 2"));
    }

    #[test]
    fn test_write_read_round_trip() {
        let (_dir, path) = write_temp("");

        let candidate = Candidate {
            fill_density: 0.2,
            first_layer_speed: 30.0,
            first_layer_height: 0.28,
            layer_height: 0.28,
            perimeter_speed: 60.0,
            solid_infill_speed: 60.0,
            retract_speed: 40.0,
            retract_length: 2.5,
        };

        write_parameters(&path, &candidate).unwrap();
        let read_back = read_initial_parameters(&path).unwrap();

        for param in Parameter::ALL {
            assert!(
                (read_back.get(param) - candidate.get(param)).abs() < 1e-9,
                "{:?} did not survive the round trip",
                param
            );
        }
    }

    #[test]
    fn test_integer_fields_written_without_fraction() {
        let (_dir, path) = write_temp("");

        let candidate = Candidate::default();
        write_parameters(&path, &candidate).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("perimeter_speed = 60"));
        assert!(!written.contains("perimeter_speed = 60.0"));
    }
}
