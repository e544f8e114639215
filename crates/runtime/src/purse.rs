//! Currency earned from defeated creeps.

use std::collections::BTreeMap;

use combat_core::Inventory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum Currency {
    Gold,
}

#[derive(Clone, Debug, Default)]
pub struct Purse {
    balances: BTreeMap<Currency, u32>,
}

impl Inventory for Purse {
    type Item = Currency;

    fn add(&mut self, item: Currency, amount: u32) {
        let balance = self.balances.entry(item).or_default();
        *balance = balance.saturating_add(amount);
    }

    fn subtract(&mut self, item: Currency, amount: u32) -> bool {
        match self.balances.get_mut(&item) {
            Some(balance) if *balance >= amount => {
                *balance -= amount;
                true
            }
            _ => amount == 0,
        }
    }

    fn count(&self, item: Currency) -> u32 {
        self.balances.get(&item).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overspending_leaves_the_balance_alone() {
        let mut purse = Purse::default();
        purse.add(Currency::Gold, 5);
        assert!(!purse.subtract(Currency::Gold, 6));
        assert!(purse.subtract(Currency::Gold, 5));
        assert_eq!(purse.count(Currency::Gold), 0);
        assert!(purse.contains(Currency::Gold, 0));
    }
}
