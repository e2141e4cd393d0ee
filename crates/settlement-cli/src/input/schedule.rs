use settlement_core::settlement::schedule::FeeSchedule;

use crate::input::file;

/// Load a fee schedule from a YAML or JSON file (JSON parses as YAML).
/// Fields the file omits keep their standard values.
pub fn load_schedule(path: Option<&str>) -> Result<FeeSchedule, Box<dyn std::error::Error>> {
    let schedule = match path {
        Some(path) => {
            let contents = file::read_to_string(path)?;
            let schedule = parse_schedule(&contents)
                .map_err(|e| format!("Failed to parse schedule '{}': {}", path, e))?;
            tracing::info!(path, "loaded fee schedule");
            schedule
        }
        None => FeeSchedule::default(),
    };
    schedule.validate()?;
    Ok(schedule)
}

pub fn parse_schedule(contents: &str) -> Result<FeeSchedule, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(FeeSchedule::default());
    }
    serde_yaml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_yaml_overrides_named_fields_only() {
        let schedule = parse_schedule("card_fixed_fee: 0\nservice_fee_rate: 0.05\n").unwrap();
        assert_eq!(schedule.card_fixed_fee, dec!(0));
        assert_eq!(schedule.service_fee_rate, dec!(0.05));
        assert_eq!(schedule.vat_rate, dec!(0.1));
        assert_eq!(schedule.withholding_rate, dec!(0.033));
    }

    #[test]
    fn test_json_schedule_parses() {
        let schedule = parse_schedule(r#"{ "withholding_rate": "0.088" }"#).unwrap();
        assert_eq!(schedule.withholding_rate, dec!(0.088));
    }

    #[test]
    fn test_empty_schedule_is_standard() {
        assert!(parse_schedule("  \n").unwrap().is_standard());
    }

    #[test]
    fn test_no_path_gives_standard_schedule() {
        assert!(load_schedule(None).unwrap().is_standard());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_schedule(Some("does/not/exist.yaml")).is_err());
    }
}
