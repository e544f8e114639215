/// Item-count capability consumed by shop and crafting collaborators.
///
/// Implementers own their own change notification; the combat core only
/// awards and spends through these methods.
pub trait Inventory {
    type Item: Copy + Eq;

    fn add(&mut self, item: Self::Item, amount: u32);

    /// Removes `amount` if available. Returns false and leaves the inventory
    /// untouched otherwise.
    fn subtract(&mut self, item: Self::Item, amount: u32) -> bool;

    fn count(&self, item: Self::Item) -> u32;

    fn contains(&self, item: Self::Item, amount: u32) -> bool {
        self.count(item) >= amount
    }
}
