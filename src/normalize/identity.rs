use crate::error::{NormalizeError, Result};

/// The dataset carries the same identity in three fields: a transaction ID,
/// a plain ID and a logical ID of the form `ID-<plain ID>`. Any disagreement
/// marks a record that was edited by hand and cannot be trusted as a stable
/// cross-reference.
pub fn cross_check_identity(
    transaction_id: Option<&str>,
    plain_id: Option<&str>,
    logical_id: Option<&str>,
) -> Result<String> {
    let (transaction_id, plain_id, logical_id) = match (transaction_id, plain_id, logical_id) {
        (Some(transaction_id), Some(plain_id), Some(logical_id)) => {
            (transaction_id, plain_id, logical_id)
        }
        _ => {
            return Err(NormalizeError::Validation(
                "hydrant is missing one of its identifier fields".to_string(),
            ))
        }
    };

    if transaction_id != plain_id {
        return Err(NormalizeError::Validation(format!(
            "transaction id '{}' does not match id '{}'",
            transaction_id, plain_id
        )));
    }
    let expected_logical_id = format!("ID-{}", plain_id);
    if logical_id != expected_logical_id {
        return Err(NormalizeError::Validation(format!(
            "logical id '{}' does not match expected '{}'",
            logical_id, expected_logical_id
        )));
    }
    Ok(transaction_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::cross_check_identity;
    use crate::error::NormalizeError;
    use rstest::rstest;

    #[test]
    fn test_matching_identity_returns_the_transaction_id() {
        let reference = cross_check_identity(Some("42"), Some("42"), Some("ID-42")).unwrap();
        assert_eq!(reference, "42");
    }

    #[rstest]
    #[case(Some("42"), Some("42"), Some("ID-43"))] // logical id disagrees
    #[case(Some("42"), Some("43"), Some("ID-43"))] // transaction id disagrees
    #[case(Some("42"), Some("42"), Some("42"))] // logical id misses the prefix
    #[case(None, Some("42"), Some("ID-42"))]
    #[case(Some("42"), None, Some("ID-42"))]
    #[case(Some("42"), Some("42"), None)]
    fn test_identity_mismatch_is_a_validation_error(
        #[case] transaction_id: Option<&str>,
        #[case] plain_id: Option<&str>,
        #[case] logical_id: Option<&str>,
    ) {
        let error = cross_check_identity(transaction_id, plain_id, logical_id).unwrap_err();
        assert!(matches!(error, NormalizeError::Validation(_)));
    }
}
