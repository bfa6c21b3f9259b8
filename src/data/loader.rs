use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Experiment, ExperimentSet};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an experiment set from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "name": ..., "target_volume": ..., "density": ..., "weights": [...] }, ...]`
/// * `.csv`  – columns `name,target_volume,density,weights`, weights semicolon-separated
pub fn load_file(path: &Path) -> Result<ExperimentSet> {
    match extension(path).as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Write an experiment set in the format implied by the file extension.
pub fn save_file(path: &Path, set: &ExperimentSet) -> Result<()> {
    match extension(path).as_str() {
        "json" => {
            let text = serde_json::to_string_pretty(&set.experiments)
                .context("serializing experiments")?;
            std::fs::write(path, text)
                .with_context(|| format!("writing {}", path.display()))
        }
        "csv" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_csv(file, set)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Expected JSON schema (one record per instrument run):
///
/// ```json
/// [
///   {
///     "name": "1mL burette",
///     "target_volume": 1.0,
///     "density": 0.9968,
///     "weights": [1.1935, 1.0952, 1.0515]
///   }
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<ExperimentSet> {
    let experiments: Vec<Experiment> =
        serde_json::from_str(text).context("parsing experiment JSON")?;
    Ok(ExperimentSet::from_experiments(experiments))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

const CSV_HEADERS: [&str; 4] = ["name", "target_volume", "density", "weights"];

/// CSV layout: header row with the columns `name`, `target_volume`,
/// `density` and `weights`, in any order. `weights` holds
/// semicolon-separated floats: `"0.9933;0.9678;0.9998"`.
pub fn parse_csv<R: Read>(input: R) -> Result<ExperimentSet> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let name_idx = column("name")?;
    let target_idx = column("target_volume")?;
    let density_idx = column("density")?;
    let weights_idx = column("weights")?;

    let mut experiments = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let target_volume = parse_float(field(target_idx), row_no, "target_volume")?;
        let density = parse_float(field(density_idx), row_no, "density")?;
        let weights = parse_semicolon_floats(field(weights_idx), row_no, "weights")?;

        experiments.push(Experiment::new(
            field(name_idx),
            target_volume,
            density,
            weights,
        ));
    }

    Ok(ExperimentSet::from_experiments(experiments))
}

fn write_csv<W: Write>(output: W, set: &ExperimentSet) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(CSV_HEADERS).context("writing CSV header")?;
    for exp in &set.experiments {
        let weights = exp
            .weights
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(";");
        writer
            .write_record([
                exp.spec.name.clone(),
                exp.spec.target_volume.to_string(),
                exp.spec.density.to_string(),
                weights,
            ])
            .with_context(|| format!("writing CSV row for '{}'", exp.spec.name))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn parse_float(s: &str, row: usize, col: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

fn parse_semicolon_floats(s: &str, row: usize, col: &str) -> Result<Vec<f64>> {
    s.split(';')
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<f64>()
                .with_context(|| format!("Row {row}, {col}[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_records() {
        let text = r#"[
            {"name": "1mL burette", "target_volume": 1.0, "density": 0.9968,
             "weights": [1.1935, 1.0952]}
        ]"#;
        let set = parse_json(text).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.experiments[0].name(), "1mL burette");
        assert_eq!(set.experiments[0].weights, vec![1.1935, 1.0952]);
    }

    #[test]
    fn parses_csv_with_reordered_columns() {
        let text = "weights,name,density,target_volume\n\
                    \"9.9094; 9.8970;9.8806\",10mL pipette,0.9968,10\n";
        let set = parse_csv(text.as_bytes()).unwrap();
        let exp = &set.experiments[0];
        assert_eq!(exp.name(), "10mL pipette");
        assert_eq!(exp.spec.target_volume, 10.0);
        assert_eq!(exp.weights, vec![9.9094, 9.8970, 9.8806]);
    }

    #[test]
    fn csv_rejects_bad_weight() {
        let text = "name,target_volume,density,weights\nA,1,1,1.0;abc\n";
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("weights[1]"));
    }

    #[test]
    fn csv_requires_all_columns() {
        let text = "name,density,weights\nA,1,1.0;1.1\n";
        assert!(parse_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn csv_writer_output_parses_back() {
        let set = ExperimentSet::builtin();
        let mut buf = Vec::new();
        write_csv(&mut buf, &set).unwrap();
        let parsed = parse_csv(buf.as_slice()).unwrap();
        assert_eq!(parsed.experiments, set.experiments);
    }
}
