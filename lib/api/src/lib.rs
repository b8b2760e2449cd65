pub mod rest;

pub use rest::{configure, cors, ApiState, RestApi};
