use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted input encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Read a JSON or YAML file and deserialise into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let format = Format::of(&canonical);
    tracing::debug!(path = %canonical.display(), ?format, "reading input file");

    let value: T = match format {
        Format::Yaml => serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?,
        Format::Json => serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?,
    };
    Ok(value)
}

/// Resolve the path against the working directory and require a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use immo_core::real_estate::schedule::AmortizationPlan;
    use rust_decimal_macros::dec;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("immo-cli-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(Format::of(Path::new("a.yaml")), Format::Yaml);
        assert_eq!(Format::of(Path::new("a.YML")), Format::Yaml);
        assert_eq!(Format::of(Path::new("a.json")), Format::Json);
        assert_eq!(Format::of(Path::new("noext")), Format::Json);
    }

    #[test]
    fn test_reads_yaml_and_json_alike() {
        let yaml = write_temp(
            "plan.yaml",
            "debt: 240000\ninterest_rate: 3\nrepayment_rate: 2\nterm_years: 30\n",
        );
        let json = write_temp(
            "plan.json",
            r#"{"debt": 240000, "interest_rate": 3, "repayment_rate": 2, "term_years": 30}"#,
        );

        let from_yaml: AmortizationPlan = read_input(yaml.to_str().unwrap()).unwrap();
        let from_json: AmortizationPlan = read_input(json.to_str().unwrap()).unwrap();
        assert_eq!(from_yaml, from_json);
        assert_eq!(from_yaml.debt, dec!(240000));

        let _ = fs::remove_file(yaml);
        let _ = fs::remove_file(json);
    }

    #[test]
    fn test_missing_file() {
        let err = read_input::<AmortizationPlan>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
