use crate::error::{NormalizeError, Result};

/// The two hydrant designs present in the dataset. Closed on purpose: a new
/// label upstream must fail loudly and trigger a manual schema review rather
/// than fall through to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrantType {
    Underground,
    Pillar,
}

impl HydrantType {
    /// Value of the `fire_hydrant:type` tag in the GeoJSON output.
    pub fn tag_value(&self) -> &'static str {
        match self {
            HydrantType::Underground => "underground",
            HydrantType::Pillar => "pillar",
        }
    }
}

pub fn map_hydrant_type(raw: &str) -> Result<HydrantType> {
    match raw {
        "Unterflurhydrant" => Ok(HydrantType::Underground),
        "Überflurhydrant" => Ok(HydrantType::Pillar),
        other => Err(NormalizeError::Validation(format!(
            "unknown hydrant type '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{map_hydrant_type, HydrantType};
    use crate::error::NormalizeError;
    use rstest::rstest;

    #[rstest]
    #[case("Unterflurhydrant", HydrantType::Underground)]
    #[case("Überflurhydrant", HydrantType::Pillar)]
    fn test_known_types_map(#[case] raw: &str, #[case] expected: HydrantType) {
        assert_eq!(map_hydrant_type(raw).unwrap(), expected);
        assert_eq!(
            map_hydrant_type(raw).unwrap().tag_value(),
            match expected {
                HydrantType::Underground => "underground",
                HydrantType::Pillar => "pillar",
            }
        );
    }

    #[rstest]
    #[case("Standrohr")]
    #[case("unterflurhydrant")] // case matters
    #[case("")]
    fn test_unknown_types_are_a_validation_error(#[case] raw: &str) {
        let error = map_hydrant_type(raw).unwrap_err();
        assert!(matches!(error, NormalizeError::Validation(_)));
    }
}
