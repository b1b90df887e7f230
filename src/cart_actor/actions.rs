use crate::domain::ProductSnapshot;

/// Cart mutations. Each one is applied inside the cart store's single message loop,
/// so two tabs adding at once cannot drop each other's line.
#[derive(Debug, Clone)]
pub enum CartAction {
    AddItem {
        product_id: String,
        quantity: u32,
        snapshot: ProductSnapshot,
    },
    /// Zero removes the line.
    SetQuantity { product_id: String, quantity: u32 },
    Clear,
}
