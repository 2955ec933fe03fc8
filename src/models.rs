pub mod accounts;
pub mod ai;
pub mod analytics;
pub mod communications;
pub mod crops;
pub mod farms;
pub mod inventory;
pub mod livestock;
pub mod marketplace;
pub mod produce;
pub mod workforce;

use rust_decimal::Decimal;
use validator::ValidationError;

// Validações compartilhadas pelos payloads (quantias e quantidades).

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("Value must be greater than zero.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_non_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("Value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::from(-3)).is_err());
        assert!(validate_positive(&Decimal::from(1)).is_ok());
    }

    #[test]
    fn non_negative_allows_zero() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::from(-1)).is_err());
    }
}
