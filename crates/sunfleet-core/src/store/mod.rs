pub(crate) mod collection;
mod fleet_store;

pub use fleet_store::FleetStore;
