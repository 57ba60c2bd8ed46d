//! Fixed user-facing text. Underlying failure causes go to the log only.

pub const LOAD_FAILED: &str = "Failed to load the saved pharmacy list.";
pub const DELETE_FAILED: &str = "Failed to delete the pharmacy.";
pub const REGISTER_FAILED: &str = "Failed to register the pharmacy.";
pub const SEARCH_FAILED: &str = "Failed to search the address and save nearby pharmacies.";
pub const EMPTY_ADDRESS: &str = "Enter an address to search.";

pub const CONFIRM_DELETE: &str = "Do you really want to delete this pharmacy?";
pub const DELETED: &str = "The pharmacy was deleted.";
pub const REGISTERED: &str = "The pharmacy was registered.";

#[must_use]
pub fn save_failed(name: &str) -> String {
    format!("Failed to save [{name}]. It may already be stored.")
}

#[must_use]
pub fn saved(name: &str) -> String {
    format!("[{name}] was saved.")
}

#[must_use]
pub fn search_found(address: &str, count: usize) -> String {
    format!("Found {count} pharmacies near [{address}] and saved them.")
}

#[must_use]
pub fn search_empty(address: &str) -> String {
    format!("No pharmacies found near [{address}].")
}
