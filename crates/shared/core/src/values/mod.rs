use rust_decimal::Decimal;

/// Price in quote currency per unit of base asset
pub type Price = Decimal;

/// Size expressed in units of the base asset
pub type Quantity = Decimal;

/// Venue holding of either the quote currency or the base asset
pub type Balance = Decimal;
