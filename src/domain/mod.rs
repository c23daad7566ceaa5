// Domain layer - page and home-energy models with no I/O
pub mod chart;
pub mod conversions;
pub mod energy_model;
pub mod heating;
pub mod home;
pub mod location;
pub mod url_state;
