pub mod cep;
pub mod health;
pub mod quotes;
