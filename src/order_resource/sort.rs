use std::fmt;
use std::str::FromStr;

/// Sort keys offered on the orders tab. Both sort descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortKey {
    /// Newest `placed_on` first.
    #[default]
    Date,
    /// Largest `total_amount` first.
    Total,
}

impl fmt::Display for OrderSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSortKey::Date => f.write_str("date"),
            OrderSortKey::Total => f.write_str("total"),
        }
    }
}

impl FromStr for OrderSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(OrderSortKey::Date),
            "total" => Ok(OrderSortKey::Total),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}
