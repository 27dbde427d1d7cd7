use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity title.
pub trait Titled {
    fn title(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Upper bound accepted for any per-unit price entered by the user.
pub const MAX_PRICE: f64 = 99_999.0;

/// Returns true when `value` is a finite amount within `[0, MAX_PRICE]`.
pub fn is_valid_price(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_PRICE).contains(&value)
}
