use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceRecord {
    pub branch_id: u32,
    pub month: u8,
    pub revenue: Decimal,
    pub net_profit: Decimal,
    pub customer_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryRecord {
    pub branch_id: u32,
    pub month: u8,
    pub inventory_days: Decimal,
}
