use crate::storage::{OrderCost, BASIS_POINTS};

/// Price owed for `fractions` fractions at `fraction_price`, plus the fee.
///
/// Formula: price = fractions × fraction_price, fee = price × fee_bps / 10,000
///
/// Example:
/// - fractions: 10, fraction_price: 1,000
/// - fee: 2.5% (250 basis points)
/// - price: 10,000, fee: 250, total: 10,250
pub fn calculate_order_cost(fractions: u32, fraction_price: i128, fee_bps: u32) -> Option<OrderCost> {
    let price = fraction_price.checked_mul(fractions as i128)?;
    let fee = price
        .checked_mul(fee_bps as i128)?
        .checked_div(BASIS_POINTS)?;
    let total = price.checked_add(fee)?;

    Some(OrderCost { price, fee, total })
}

/// Full-unit value snapshotted on every new unit.
pub fn calculate_unit_value(fraction_price: i128, fractions_per_unit: u32) -> Option<i128> {
    fraction_price.checked_mul(fractions_per_unit as i128)
}
