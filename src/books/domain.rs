pub mod model;

// Book is the read view of a catalog title shared by entities and DTOs.
pub trait Book: Sync + Send {
    fn title(&self) -> &str;
    fn is_available(&self) -> bool;
}
