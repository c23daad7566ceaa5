// Application layer - use cases and the ports they depend on
pub mod chart_renderer;
pub mod energy_service;
pub mod geocode_controller;
pub mod geocode_service;
pub mod geocoder;
pub mod page;

#[cfg(test)]
pub(crate) mod testing;
