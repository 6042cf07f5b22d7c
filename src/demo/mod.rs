//! CEP (Brazilian postal code) lookup service.
//!
//! Reference application for the framework: a read-only repository loaded from
//! a semicolon-separated file and one controller mounted at `/cep`.

pub mod controller;
pub mod model;
pub mod repository;

pub use controller::CepController;
pub use model::{Address, Geolocation};
pub use repository::CepRepository;
