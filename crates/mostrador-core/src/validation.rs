//! # Validation Module
//!
//! Input validation for the sale core.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: HTTP layer (external)     shape/auth checks, early feedback
//! Layer 2: THIS MODULE               business rule validation
//! Layer 3: Database (SQLite)         NOT NULL / UNIQUE / FK / CHECK
//!
//! Defense in depth: each layer catches a different class of mistake.
//! ```
//!
//! Everything here runs before any side effect, so a validation failure is
//! always safe: nothing has been written yet.

use crate::error::ValidationError;
use crate::types::{MovementKind, SaleRequest};
use crate::{MAX_LINE_QUANTITY, MAX_SALE_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale line quantity: strictly positive, bounded.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a movement quantity for the given kind.
///
/// Entry/Exit/Return need a positive magnitude. Adjustment takes the
/// absolute new stock, so zero is legal there (empty the shelf) but a
/// negative value never is.
pub fn validate_movement_quantity(kind: MovementKind, qty: i64) -> ValidationResult<()> {
    match kind {
        MovementKind::Adjustment => {
            if qty < 0 {
                return Err(ValidationError::MustNotBeNegative {
                    field: "quantity".to_string(),
                });
            }
        }
        MovementKind::Entry | MovementKind::Exit | MovementKind::Return => {
            if qty <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates the shape of a sale request before the transaction starts.
///
/// Checks: client id present, at least one line (and not absurdly many),
/// every line has a product id and a positive quantity. Product existence,
/// activity, and stock are resolved later inside the transaction.
pub fn validate_sale_request(request: &SaleRequest) -> ValidationResult<()> {
    if request.client_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "client_id".to_string(),
        });
    }

    if request.lines.is_empty() {
        return Err(ValidationError::Required {
            field: "lines".to_string(),
        });
    }

    if request.lines.len() > MAX_SALE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "lines".to_string(),
            min: 1,
            max: MAX_SALE_LINES as i64,
        });
    }

    for line in &request.lines {
        if line.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Format Validators
// =============================================================================

/// Validates that a string is a well-formed UUID.
///
/// Entity ids in this system are UUID v4 strings; the external layer can
/// use this to reject garbage ids before invoking the core.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates a reason string for a manual movement.
pub fn validate_reason(reason: &str) -> ValidationResult<()> {
    if reason.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethod, SaleLine};

    fn request(lines: Vec<SaleLine>) -> SaleRequest {
        SaleRequest {
            client_id: "c1".to_string(),
            lines,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn movement_quantity_per_kind() {
        assert!(validate_movement_quantity(MovementKind::Entry, 5).is_ok());
        assert!(validate_movement_quantity(MovementKind::Entry, 0).is_err());
        assert!(validate_movement_quantity(MovementKind::Exit, -1).is_err());
        // Adjustment to zero is a legal "empty the shelf"
        assert!(validate_movement_quantity(MovementKind::Adjustment, 0).is_ok());
        assert!(validate_movement_quantity(MovementKind::Adjustment, -1).is_err());
    }

    #[test]
    fn sale_request_happy_path() {
        let req = request(vec![SaleLine {
            product_id: "p1".to_string(),
            quantity: 2,
        }]);
        assert!(validate_sale_request(&req).is_ok());
    }

    #[test]
    fn sale_request_needs_client() {
        let mut req = request(vec![SaleLine {
            product_id: "p1".to_string(),
            quantity: 2,
        }]);
        req.client_id = "  ".to_string();
        assert!(validate_sale_request(&req).is_err());
    }

    #[test]
    fn sale_request_needs_lines() {
        assert!(validate_sale_request(&request(vec![])).is_err());
    }

    #[test]
    fn sale_request_rejects_bad_line() {
        let req = request(vec![
            SaleLine {
                product_id: "p1".to_string(),
                quantity: 2,
            },
            SaleLine {
                product_id: "".to_string(),
                quantity: 1,
            },
        ]);
        assert!(validate_sale_request(&req).is_err());

        let req = request(vec![SaleLine {
            product_id: "p1".to_string(),
            quantity: 0,
        }]);
        assert!(validate_sale_request(&req).is_err());
    }

    #[test]
    fn price_and_tax_validators() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(-100).is_err());
        assert!(validate_tax_rate_bps(1900).is_ok());
        assert!(validate_tax_rate_bps(10_001).is_err());
    }

    #[test]
    fn uuid_format() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn reason_must_not_be_blank() {
        assert!(validate_reason("Restock from supplier").is_ok());
        assert!(validate_reason("   ").is_err());
    }
}
