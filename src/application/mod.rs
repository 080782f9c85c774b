pub mod contacts;

pub use contacts::ContactService;
