pub mod engine;
pub mod errors;
pub mod helpers;
pub mod loader;
pub mod result;


#[cfg(test)]
mod testing;
